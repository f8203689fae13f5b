use ownership_model::compile_glob_set;
use ownership_resolver::Resolver;

use crate::error::Result;

/// Files with no resolved owner and no matching exemption glob, sorted.
pub fn unowned_files(
    resolver: &Resolver,
    candidates: &[String],
    unowned_globs: &[String],
) -> Result<Vec<String>> {
    let exemptions = compile_glob_set(unowned_globs)?;

    let mut unowned = Vec::new();
    for file in candidates {
        if exemptions.is_match(file) {
            continue;
        }
        if resolver.for_file(file)?.is_none() {
            unowned.push(file.clone());
        }
    }
    unowned.sort_unstable();
    Ok(unowned)
}

/// Render the aggregated unowned-files diagnostic.
pub(crate) fn unowned_message(paths: &[String]) -> String {
    let mut message = String::from("Some files are missing ownership:\n");
    for path in paths {
        message.push_str("\n- ");
        message.push_str(path);
    }
    message
}
