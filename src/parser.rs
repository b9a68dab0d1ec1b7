//! Docstring rules — a line-by-line state machine.
//!
//! Each input line is matched against a fixed, ordered rule table; the first
//! rule that applies wins:
//!
//! | #  | rule               | applies when                                        |
//! |----|--------------------|-----------------------------------------------------|
//! | 1  | module open        | line within the window opens the module docstring   |
//! | 2  | author             | title seen, next line before the window closes      |
//! | 3  | date               | author seen, line contains a `20NN` year            |
//! | 4  | module close       | in the module docstring, line starts with its quote |
//! | 5  | module text        | in the module docstring                             |
//! | 6  | class heading      | `class Name` at column 0                            |
//! | 7  | class description  | in a class, one-line docstring at class indentation |
//! | 8  | function heading   | in a class, `def name` at method indentation        |
//! | 9  | description open   | after a `def`, docstring opens without closing      |
//! | 10 | inline description | after a `def`, one-line docstring                   |
//! | 11 | arguments header   | in a description, `Arguments:`                      |
//! | 12 | argument           | in a description, `name - text`                     |
//! | 13 | description close  | in a description, line starts with its quote        |
//! | 14 | description text   | in a description                                    |
//! | 15 | literate comment   | line starts with the literate marker                |
//!
//! [`classify`] only reads the state, [`apply`] only changes it, and
//! [`render`](crate::markdown::render) turns the resulting [`Action`] into
//! Markdown, so each step can be tested on its own.

use crate::config::ExtractorConfig;
use crate::model::{FrontMatterStage, Line, Mode, ParseState, Quote};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// -- Regex patterns -----------------------------------------------------------

// Marker followed directly by a non-blank character and at least one more.
static RE_MODULE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:"""|''')\S."#).unwrap());

static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"20[0-9]{2}").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class[[:blank:]]+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

static RE_CLASS_DOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ {1,6}(?:"""(.+?)"""|'''(.+?)''')[[:blank:]]*$"#).unwrap()
});

static RE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {4,5}(?:async[[:blank:]]+)?def[[:blank:]]+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

// Docstring marker at function-body indentation; rule 9 or 10 depending on
// whether the same marker closes it on this line.
static RE_DOC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^( {7,9})("""|''')(.*)$"#).unwrap());

static RE_ARGS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]+(?:Arguments|Args):").unwrap());

// `name - description`
static RE_ARG_DASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:blank:]]+([A-Za-z0-9_]+) - (.*\S)[[:blank:]]*$").unwrap()
});

// `name<tab>-- description` and other blank/dash runs
static RE_ARG_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:blank:]]+([A-Za-z0-9_]+)[[:blank:]]+-+[[:blank:]]+(.*\S)[[:blank:]]*$")
        .unwrap()
});

// -- Actions ------------------------------------------------------------------

/// Row of the rule table that produced an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ModuleOpen,
    Author,
    Date,
    ModuleClose,
    ModuleText,
    ClassHeading,
    ClassDescription,
    FunctionHeading,
    DescriptionOpen,
    InlineDescription,
    ArgumentsHeader,
    Argument,
    DescriptionClose,
    DescriptionText,
    Literate,
    /// No rule applied; the line is dropped.
    Unmatched,
}

/// What one input line means in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Module docstring opened with a title. `enters_block` is false when the
    /// docstring also closes on the same line.
    OpenFrontMatter {
        title: String,
        quote: Quote,
        enters_block: bool,
    },
    Author(String),
    Date(String),
    CloseModule,
    ModuleText(String),
    ClassHeading(String),
    ClassDescription(String),
    FunctionHeading(String),
    /// Multi-line function docstring opened at column `indent`, with any text
    /// that followed the marker.
    OpenDescription {
        quote: Quote,
        indent: usize,
        inline: Option<String>,
    },
    InlineDescription(String),
    ArgumentsHeader,
    /// Argument list entry; `closes` as for [`Action::DescriptionText`].
    Argument {
        name: String,
        description: String,
        closes: bool,
    },
    CloseDescription,
    /// Description text; `closes` when the line ended with the closing quote.
    DescriptionText {
        text: String,
        closes: bool,
    },
    Literate(String),
    Skip,
}

impl Action {
    pub fn rule(&self) -> Rule {
        match self {
            Action::OpenFrontMatter { .. } => Rule::ModuleOpen,
            Action::Author(_) => Rule::Author,
            Action::Date(_) => Rule::Date,
            Action::CloseModule => Rule::ModuleClose,
            Action::ModuleText(_) => Rule::ModuleText,
            Action::ClassHeading(_) => Rule::ClassHeading,
            Action::ClassDescription(_) => Rule::ClassDescription,
            Action::FunctionHeading(_) => Rule::FunctionHeading,
            Action::OpenDescription { .. } => Rule::DescriptionOpen,
            Action::InlineDescription(_) => Rule::InlineDescription,
            Action::ArgumentsHeader => Rule::ArgumentsHeader,
            Action::Argument { .. } => Rule::Argument,
            Action::CloseDescription => Rule::DescriptionClose,
            Action::DescriptionText { .. } => Rule::DescriptionText,
            Action::Literate(_) => Rule::Literate,
            Action::Skip => Rule::Unmatched,
        }
    }

    /// Fields written inside the YAML block.
    pub fn is_front_matter(&self) -> bool {
        matches!(
            self,
            Action::OpenFrontMatter { .. } | Action::Author(_) | Action::Date(_)
        )
    }
}

// -- Classification -----------------------------------------------------------

/// Decide which rule `line` falls under. Does not change `state`.
pub fn classify(state: &ParseState, line: &Line, config: &ExtractorConfig) -> Action {
    let text = line.text.as_str();
    let window = config.front_matter_window;

    // 1. Module docstring with a title
    if line.number <= window && state.stage == FrontMatterStage::None {
        if let Some(action) = module_open(text) {
            return action;
        }
    }

    // 2. Author: whatever the next line holds
    if line.number < window && state.stage == FrontMatterStage::TitleFound {
        return Action::Author(text.trim_end().to_string());
    }

    // 3. Date
    if line.number < window
        && state.stage == FrontMatterStage::AuthorEmitted
        && RE_YEAR.is_match(text)
    {
        return Action::Date(text.trim_end().to_string());
    }

    // 4-5. Inside the module docstring
    if let Mode::Module { quote } = state.mode {
        if text.starts_with(quote.as_str()) {
            return Action::CloseModule;
        }
        return Action::ModuleText(text.to_string());
    }

    // 6. Class heading
    if let Some(caps) = RE_CLASS.captures(text) {
        return Action::ClassHeading(caps[1].to_string());
    }

    if state.in_class_body {
        // 7. One-line class docstring
        if let Some(caps) = RE_CLASS_DOC.captures(text) {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            return Action::ClassDescription(inner.trim().to_string());
        }

        // 8. Method heading
        if let Some(caps) = RE_DEF.captures(text) {
            return Action::FunctionHeading(caps[1].to_string());
        }
    }

    // 9-10. Docstring right after a heading
    if state.mode == Mode::Signature {
        if let Some(action) = function_docstring(text) {
            return action;
        }
    }

    if let Mode::Description {
        quote,
        indent,
        in_arguments,
    } = state.mode
    {
        return description_line(text, quote, indent, in_arguments);
    }

    // 15. Literate comment
    if let Some(rest) = strip_literate(text, &config.literate_marker) {
        return Action::Literate(rest.to_string());
    }

    Action::Skip
}

fn module_open(text: &str) -> Option<Action> {
    if !RE_MODULE_OPEN.is_match(text) {
        return None;
    }
    let quote = Quote::leading(text)?;
    let rest = text[quote.as_str().len()..].trim_end();
    let (title, closed) = match rest.strip_suffix(quote.as_str()) {
        Some(inner) => (inner, true),
        None => (rest, false),
    };
    Some(Action::OpenFrontMatter {
        title: title.trim().to_string(),
        quote,
        enters_block: !closed,
    })
}

fn function_docstring(text: &str) -> Option<Action> {
    let caps = RE_DOC_MARKER.captures(text)?;
    let indent = caps[1].len();
    let quote = Quote::leading(&caps[2])?;
    let rest = caps[3].trim_end();

    if !rest.contains(quote.as_str()) {
        let inline = rest.trim();
        return Some(Action::OpenDescription {
            quote,
            indent,
            inline: (!inline.is_empty()).then(|| inline.to_string()),
        });
    }

    // `"""text"""`: anything after the closing quote disqualifies the line.
    let inner = rest.strip_suffix(quote.as_str())?.trim();
    if inner.is_empty() || inner.contains(quote.as_str()) {
        return None;
    }
    Some(Action::InlineDescription(inner.to_string()))
}

/// Rules 11-14, applied inside a function docstring. Argument entries are
/// only recognized after an `Arguments:` header.
fn description_line(text: &str, quote: Quote, indent: usize, in_arguments: bool) -> Action {
    // 13. A line starting with the closing quote cannot match 11 or 12.
    let trimmed = text.trim_start();
    if trimmed.len() < text.len() && trimmed.starts_with(quote.as_str()) {
        return Action::CloseDescription;
    }

    // Text that ends with the closing quote closes the block after it is
    // emitted.
    let (line, closes) = match text.trim_end().strip_suffix(quote.as_str()) {
        Some(inner) => (inner.trim_end(), true),
        None => (text.trim_end(), false),
    };

    // 11. Arguments header
    if !closes && RE_ARGS_HEADER.is_match(line) {
        return Action::ArgumentsHeader;
    }

    // 12. Argument entry, either syntax
    if in_arguments {
        if let Some((name, description)) = parse_argument(line) {
            return Action::Argument {
                name,
                description,
                closes,
            };
        }
    }

    // 14. Plain text
    Action::DescriptionText {
        text: strip_indent(line, indent).to_string(),
        closes,
    }
}

/// Split an argument line into name and description. Accepts
/// `name - description` and the looser `name<blanks>--<blanks>description`.
pub fn parse_argument(text: &str) -> Option<(String, String)> {
    let caps = RE_ARG_DASHED
        .captures(text)
        .or_else(|| RE_ARG_LOOSE.captures(text))?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Text after the last literate marker, with one following space dropped.
/// `None` unless the line starts (after blanks) with the marker.
pub fn strip_literate<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() || !text.trim_start().starts_with(marker) {
        return None;
    }
    let start = text.rfind(marker)? + marker.len();
    let rest = &text[start..];
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Remove up to `indent` leading blanks.
fn strip_indent(text: &str, indent: usize) -> &str {
    let blanks = text
        .bytes()
        .take(indent)
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &text[blanks..]
}

// -- Transitions --------------------------------------------------------------

/// Apply the state change for `action`.
pub fn apply(state: &mut ParseState, action: &Action) {
    match action {
        Action::OpenFrontMatter {
            title,
            quote,
            enters_block,
        } => {
            debug!(%title, "front matter opened");
            state.advance_stage(FrontMatterStage::TitleFound);
            state.front_matter.title = Some(title.clone());
            if *enters_block {
                state.mode = Mode::Module { quote: *quote };
            }
        }
        Action::Author(author) => {
            debug!(%author, "front matter author");
            state.advance_stage(FrontMatterStage::AuthorEmitted);
            state.front_matter.author = Some(author.clone());
        }
        Action::Date(date) => {
            debug!(%date, "front matter date");
            state.advance_stage(FrontMatterStage::DateEmitted);
            state.front_matter.date = Some(date.clone());
            state.front_matter.closed = true;
        }
        Action::CloseModule => {
            debug!("module docstring closed");
            state.mode = Mode::Body;
        }
        Action::ClassHeading(name) => {
            debug!(%name, "class");
            state.in_class_body = true;
            if state.mode == Mode::Signature {
                state.mode = Mode::Body;
            }
        }
        Action::FunctionHeading(name) => {
            debug!(%name, "function");
            state.mode = Mode::Signature;
        }
        Action::OpenDescription { quote, indent, .. } => {
            debug!(indent, "description opened");
            state.mode = Mode::Description {
                quote: *quote,
                indent: *indent,
                in_arguments: false,
            };
        }
        Action::ArgumentsHeader => {
            if let Mode::Description { in_arguments, .. } = &mut state.mode {
                *in_arguments = true;
            }
        }
        Action::InlineDescription(_) | Action::CloseDescription => {
            state.mode = Mode::Body;
        }
        Action::DescriptionText { closes: true, .. }
        | Action::Argument { closes: true, .. } => {
            debug!("description closed");
            state.mode = Mode::Body;
        }
        Action::ModuleText(_)
        | Action::ClassDescription(_)
        | Action::Argument { closes: false, .. }
        | Action::DescriptionText { closes: false, .. }
        | Action::Literate(_)
        | Action::Skip => {}
    }
}
