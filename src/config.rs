//! Run-time options for a single extraction run.

/// Number of leading lines in which front matter may be recognized.
pub const FRONT_MATTER_WINDOW: usize = 5;

/// Marker that introduces a literate comment line.
pub const LITERATE_MARKER: &str = "#'";

/// Options for [`Extractor`](crate::extract::Extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// The module marker opens front matter on lines `1..=window`; the
    /// author and date fields are only taken from lines `< window`.
    pub front_matter_window: usize,
    /// Leading token of a literate comment line.
    pub literate_marker: String,
    /// Close an unfinished YAML block before the first line that is not a
    /// front-matter field. Off by default, which leaves the block open when
    /// no date line follows the author.
    pub close_front_matter: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            front_matter_window: FRONT_MATTER_WINDOW,
            literate_marker: LITERATE_MARKER.to_string(),
            close_front_matter: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.front_matter_window, 5);
        assert_eq!(config.literate_marker, "#'");
        assert!(!config.close_front_matter);
    }
}
