use ownership_model::Team;
use ownership_resolver::Resolver;

use crate::error::Result;

/// Render the ownership report for one team: everything it owns, grouped by
/// mapper label in precedence order. Globs are listed raw (no `/` anchor, no
/// GitHub slug) since the report is for humans, not GitHub.
pub fn for_team(resolver: &Resolver, team: &Team, files: &[String]) -> Result<String> {
    let mut lines = vec![format!("# Code Ownership Report for `{}` Team", team.name())];

    let mut first_section = true;
    for (label, globs) in resolver.glob_maps(files)? {
        let mut entries: Vec<&str> = globs
            .iter()
            .filter(|(_, owner)| owner.name() == team.name())
            .map(|(glob, _)| glob.as_str())
            .collect();
        if entries.is_empty() {
            continue;
        }
        entries.sort_unstable();

        if !first_section {
            lines.push(String::new());
        }
        first_section = false;

        lines.push(format!("## {label}"));
        for entry in entries {
            lines.push(format!("- {entry}"));
        }
    }

    Ok(lines.join("\n") + "\n")
}
