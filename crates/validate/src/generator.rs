use ownership_resolver::Resolver;

use crate::error::Result;

/// Static banner at the top of every generated CODEOWNERS file.
pub const CODEOWNERS_HEADER: &str = "\
# STOP! - DO NOT EDIT THIS FILE MANUALLY
# This file was automatically generated by \"ownership validate\".
#
# CODEOWNERS is used for GitHub to suggest code/file owners to various GitHub
# teams. This is useful when developers create Pull Requests since the
# code/file owner is notified. Reference GitHub docs for more details:
# https://help.github.com/en/articles/about-code-owners";

/// Render the canonical CODEOWNERS content for the full tracked tree.
///
/// Pure function of (tree, registry): two runs over an unchanged tree are
/// byte-identical, which is what makes exact-match drift detection sound.
/// Teams that opt out of CODEOWNERS or have no GitHub slug are silently
/// dropped.
pub fn generate_codeowners(resolver: &Resolver, files: &[String]) -> Result<String> {
    let mut lines: Vec<String> = CODEOWNERS_HEADER.lines().map(str::to_string).collect();
    lines.push(String::new());

    for (label, globs) in resolver.glob_maps(files)? {
        let mut entries: Vec<(&String, &str)> = globs
            .iter()
            .filter(|(_, team)| !team.opts_out_of_codeowners())
            .filter_map(|(glob, team)| team.github_team().map(|slug| (glob, slug)))
            .collect();
        if entries.is_empty() {
            continue;
        }
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        lines.push(String::new());
        lines.push(format!("# {label}"));
        lines.extend(entries.into_iter().map(|(glob, slug)| format!("/{glob} {slug}")));
    }

    Ok(lines.join("\n") + "\n")
}
