//! Streaming driver: one line in, its Markdown out, then the next line.

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::markdown::{self, FRONT_MATTER_FENCE};
use crate::model::{Line, ParseState};
use crate::parser;
use crate::reader::LineReader;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Runs the rule table over a line sequence, writing Markdown to `out` as it
/// goes. Owns the [`ParseState`] for exactly one run.
pub struct Extractor<W: Write> {
    out: W,
    config: ExtractorConfig,
    state: ParseState,
}

impl<W: Write> Extractor<W> {
    pub fn new(out: W, config: ExtractorConfig) -> Self {
        Self {
            out,
            config,
            state: ParseState::new(),
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Classify `line`, write its Markdown, and advance the state.
    pub fn process_line(&mut self, line: &Line) -> Result<()> {
        let action = parser::classify(&self.state, line, &self.config);
        trace!(line = line.number, rule = ?action.rule(), "classified");

        if self.config.close_front_matter
            && self.state.front_matter.is_open()
            && !action.is_front_matter()
        {
            self.close_front_matter()?;
        }

        for fragment in markdown::render(&action) {
            writeln!(self.out, "{}", fragment)?;
        }
        parser::apply(&mut self.state, &action);
        Ok(())
    }

    /// End of input. Returns the sink after flushing it.
    pub fn finish(mut self) -> Result<W> {
        if self.config.close_front_matter && self.state.front_matter.is_open() {
            self.close_front_matter()?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn close_front_matter(&mut self) -> Result<()> {
        let fm = &self.state.front_matter;
        debug!(
            title = ?fm.title,
            author = ?fm.author,
            date = ?fm.date,
            "closing unfinished front matter"
        );
        writeln!(self.out, "{}", FRONT_MATTER_FENCE)?;
        self.state.front_matter.closed = true;
        Ok(())
    }
}

/// Extract every line from `reader` into `out`.
pub fn extract_lines<R: BufRead, W: Write>(
    reader: LineReader<R>,
    out: W,
    config: ExtractorConfig,
) -> Result<W> {
    let mut extractor = Extractor::new(out, config);
    for line in reader {
        extractor.process_line(&line?)?;
    }
    extractor.finish()
}

/// Extract the file at `path` into `out`. Fails with
/// [`InputNotFound`](crate::error::DocuError::InputNotFound) before writing
/// anything if the file does not exist.
pub fn extract_file<W: Write>(path: impl AsRef<Path>, out: W, config: ExtractorConfig) -> Result<W> {
    let reader = LineReader::open(path)?;
    debug!(path = %reader.path().display(), "extracting");
    extract_lines(reader, out, config)
}

/// Extract an in-memory document.
pub fn extract_str(input: &str, config: ExtractorConfig) -> Result<String> {
    let reader = LineReader::from_reader(input.as_bytes(), "<input>");
    let buf = extract_lines(reader, Vec::new(), config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocuError;
    use crate::model::FrontMatterStage;

    const SCENARIO_A: &str = "'''Title\nAuthor Name\n2024-01-01 notes\n'''\nclass Foo:\n    \"\"\"One line.\"\"\"\n    def bar(self):\n        \"\"\"\n        Arguments:\n            x - the value\n        \"\"\"\n";

    fn extract(input: &str) -> String {
        extract_str(input, ExtractorConfig::default()).unwrap()
    }

    fn extract_closing(input: &str) -> String {
        let config = ExtractorConfig {
            close_front_matter: true,
            ..ExtractorConfig::default()
        };
        extract_str(input, config).unwrap()
    }

    #[test]
    fn scenario_a_full_document() {
        let expected = [
            "---",
            "title: Title",
            "author: Author Name",
            "date: 2024-01-01 notes",
            "---",
            "",
            "**class Foo**",
            "",
            "One line.",
            "",
            "",
            "**def bar**",
            "",
            "> _Arguments:_",
            "",
            " - _x_: the value",
        ]
        .join("\n")
            + "\n";
        assert_eq!(extract(SCENARIO_A), expected);
    }

    #[test]
    fn scenario_b_literate_only() {
        assert_eq!(extract("#' Hello\n"), "Hello\n");
    }

    #[test]
    fn no_marker_no_front_matter() {
        let out = extract("import os\n\nclass A:\n    pass\n");
        assert!(!out.contains("---"));
        assert_eq!(out, "\n**class A**\n\n");
    }

    #[test]
    fn marker_after_window_is_not_front_matter() {
        let out = extract("import os\nimport sys\n\n\n\n\"\"\"Late title\nAuthor\n\"\"\"\n");
        assert_eq!(out, "");
    }

    #[test]
    fn module_body_is_passed_through() {
        let input = "\"\"\"Mod\nJo\n2025\n\n## Usage\n\n    mod run\n\"\"\"\nx = 1\n";
        assert_eq!(
            extract(input),
            "---\ntitle: Mod\nauthor: Jo\ndate: 2025\n---\n\n## Usage\n\n    mod run\n"
        );
    }

    #[test]
    fn missing_date_leaves_fence_open() {
        let input = "\"\"\"Mod\nJo\nUsage: mod\n\"\"\"\n";
        assert_eq!(extract(input), "---\ntitle: Mod\nauthor: Jo\nUsage: mod\n");
    }

    #[test]
    fn close_front_matter_before_body_text() {
        let input = "\"\"\"Mod\nJo\nUsage: mod\n\"\"\"\n";
        assert_eq!(
            extract_closing(input),
            "---\ntitle: Mod\nauthor: Jo\n---\nUsage: mod\n"
        );
    }

    #[test]
    fn close_front_matter_at_end_of_input() {
        assert_eq!(extract_closing("\"\"\"Mod\nJo\n"), "---\ntitle: Mod\nauthor: Jo\n---\n");
    }

    #[test]
    fn close_front_matter_does_not_double_close() {
        let input = "\"\"\"Mod\nJo\n2024\n\"\"\"\n";
        assert_eq!(
            extract_closing(input),
            "---\ntitle: Mod\nauthor: Jo\ndate: 2024\n---\n"
        );
    }

    #[test]
    fn front_matter_order_is_title_author_date() {
        let out = extract(SCENARIO_A);
        let title = out.find("title:").unwrap();
        let author = out.find("author:").unwrap();
        let date = out.find("date:").unwrap();
        assert!(title < author && author < date);
    }

    #[test]
    fn heading_outside_class_is_silent() {
        assert_eq!(extract("    def lost(self):\n        \"\"\"Doc.\"\"\"\n"), "");
    }

    #[test]
    fn inline_function_description() {
        let input = "class Foo:\n    def bar(self):\n        \"\"\"Does bar.\"\"\"\n        return 1\n";
        assert_eq!(extract(input), "\n**class Foo**\n\n\n**def bar**\n\nDoes bar.\n\n");
    }

    #[test]
    fn description_text_and_loose_arguments() {
        let input = "class Foo:\n    def bar(self, n):\n        \"\"\"\n        Repeat things.\n\n        Arguments:\n            n\t--\thow often\n        \"\"\"\n        pass\n";
        assert_eq!(
            extract(input),
            "\n**class Foo**\n\n\n**def bar**\n\nRepeat things.\n\n> _Arguments:_\n\n - _n_: how often\n"
        );
    }

    #[test]
    fn argument_ending_docstring_closes_it() {
        let input = "class Foo:\n    def bar(self, x):\n        \"\"\"\n        Arguments:\n            x - the value\"\"\"\n        y = x + 1\n        return y\n";
        assert_eq!(
            extract(input),
            "\n**class Foo**\n\n\n**def bar**\n\n> _Arguments:_\n\n - _x_: the value\n"
        );
    }

    #[test]
    fn dashed_prose_outside_arguments_is_kept() {
        let input = "class Foo:\n    def bar(self, x):\n        \"\"\"\n        Note - results are cached.\n\n        Arguments:\n            x - the value\n        \"\"\"\n";
        assert_eq!(
            extract(input),
            "\n**class Foo**\n\n\n**def bar**\n\nNote - results are cached.\n\n> _Arguments:_\n\n - _x_: the value\n"
        );
    }

    #[test]
    fn lines_after_description_close_are_dropped() {
        let input = "class Foo:\n    def bar(self):\n        \"\"\"\n        Doc.\n        \"\"\"\n        x = compute()\n";
        let out = extract(input);
        assert!(out.ends_with("Doc.\n"), "{out:?}");
    }

    #[test]
    fn state_is_finalized_after_run() {
        let mut extractor = Extractor::new(Vec::new(), ExtractorConfig::default());
        for (i, text) in SCENARIO_A.lines().enumerate() {
            extractor.process_line(&Line::new(i + 1, text)).unwrap();
        }
        let state = extractor.state();
        assert_eq!(state.stage, FrontMatterStage::DateEmitted);
        assert!(state.in_class_body);
        assert!(!state.in_function_description());
        assert_eq!(state.front_matter.title.as_deref(), Some("Title"));
        assert_eq!(state.front_matter.author.as_deref(), Some("Author Name"));
        assert_eq!(state.front_matter.date.as_deref(), Some("2024-01-01 notes"));
    }

    #[test]
    fn extract_file_missing_is_input_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = extract_file(dir.path().join("none.py"), Vec::new(), ExtractorConfig::default())
            .unwrap_err();
        assert!(matches!(err, DocuError::InputNotFound(_)));
    }

    #[test]
    fn extract_file_streams_to_sink() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lit.py");
        std::fs::write(&path, "#' one\nx = 1\n#' two\n").unwrap();
        let out = extract_file(&path, Vec::new(), ExtractorConfig::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\n");
    }
}
