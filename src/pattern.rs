use super::*;

use tracing::warn;

/// Compiled validation pattern backed by `fancy_regex`.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        let backend = fancy_regex::Regex::new(pattern).map_err(|err| Error::Pattern(err.to_string()))?;
        Ok(Self { backend })
    }

    #[cfg(test)]
    pub(crate) fn with_backtrack_limit(pattern: &str, limit: usize) -> Result<Self> {
        let backend = fancy_regex::RegexBuilder::new(pattern)
            .backtrack_limit(limit)
            .build()
            .map_err(|err| Error::Pattern(err.to_string()))?;
        Ok(Self { backend })
    }

    /// A matcher failure (backtrack limit) is logged and counts as "no match",
    /// which the validators report as an invalid value.
    pub(crate) fn is_match(&self, input: &str) -> bool {
        match self.backend.is_match(input) {
            Ok(matched) => matched,
            Err(err) => {
                warn!(pattern = self.backend.as_str(), %err, "pattern match failed");
                false
            }
        }
    }
}
