//! Data model for one extraction run: input lines and the parse state that is
//! carried from line to line.

/// One input line with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    /// Text without the line terminator.
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Triple-quote style that opened a block. A block closes only on the same
/// style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub fn as_str(self) -> &'static str {
        match self {
            Quote::Double => "\"\"\"",
            Quote::Single => "'''",
        }
    }

    /// The quote style `text` starts with, if any.
    pub fn leading(text: &str) -> Option<Quote> {
        if text.starts_with(Quote::Double.as_str()) {
            Some(Quote::Double)
        } else if text.starts_with(Quote::Single.as_str()) {
            Some(Quote::Single)
        } else {
            None
        }
    }
}

/// Progress through the front-matter fields. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FrontMatterStage {
    #[default]
    None,
    TitleFound,
    AuthorEmitted,
    DateEmitted,
}

/// The title/author/date record, captured once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    /// The closing `---` fence has been written.
    pub closed: bool,
}

impl FrontMatter {
    /// An opening fence was written and the closing one was not.
    pub fn is_open(&self) -> bool {
        self.title.is_some() && !self.closed
    }
}

/// What kind of block the current line belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Outside any docstring.
    #[default]
    Body,
    /// Inside the module docstring.
    Module { quote: Quote },
    /// Just after a `def` heading, before its docstring.
    Signature,
    /// Inside a function docstring; `indent` is the column of its opening
    /// marker. `in_arguments` once an `Arguments:` header was seen.
    Description {
        quote: Quote,
        indent: usize,
        in_arguments: bool,
    },
}

/// Mutable state for a single run. Created empty, dropped at end of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub stage: FrontMatterStage,
    pub front_matter: FrontMatter,
    pub mode: Mode,
    /// Set by the first class heading and never cleared; the input format
    /// has no end-of-class marker.
    pub in_class_body: bool,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_module_block(&self) -> bool {
        matches!(self.mode, Mode::Module { .. })
    }

    pub fn in_function_signature(&self) -> bool {
        self.mode == Mode::Signature
    }

    pub fn in_function_description(&self) -> bool {
        matches!(self.mode, Mode::Description { .. })
    }

    /// Move the front-matter stage forward. Earlier stages are ignored.
    pub fn advance_stage(&mut self, next: FrontMatterStage) {
        if next > self.stage {
            self.stage = next;
        }
    }
}
