use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::error::{ModelError, Result};

/// Compile one ownership glob. `*` never crosses a `/` boundary; `**` does.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ModelError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

/// Compile a set of globs into a single matcher, for membership tests like
/// `unowned_globs` exemptions.
pub fn compile_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ModelError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ModelError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_does_not_cross_directories() {
        let matcher = compile_glob("config/teams/*.yml").unwrap();
        assert!(matcher.is_match("config/teams/bar.yml"));
        assert!(!matcher.is_match("config/teams/nested/bar.yml"));
    }

    #[test]
    fn double_star_is_recursive() {
        let matcher = compile_glob("app/services/bar_stuff/**").unwrap();
        assert!(matcher.is_match("app/services/bar_stuff/deep/file.rb"));
        assert!(!matcher.is_match("app/services/other/file.rb"));
    }

    #[test]
    fn set_matches_any_member() {
        let set = compile_glob_set(&[
            "vendor/**/**".to_string(),
            "frontend/**/__generated__/**/*".to_string(),
        ])
        .unwrap();
        assert!(set.is_match("vendor/bundle/gem/file.rb"));
        assert!(set.is_match("frontend/packages/flags/__generated__/Flag.ts"));
        assert!(!set.is_match("app/models/user.rb"));
    }

    #[test]
    fn invalid_pattern_reports_the_pattern() {
        let err = compile_glob("a{b").unwrap_err();
        assert!(err.to_string().contains("a{b"));
    }
}
