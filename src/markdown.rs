//! Markdown fragments for each rule.
//!
//! Every helper returns exactly one line. [`render`] strings them together,
//! with the blank lines that keep headings and lists apart, for one
//! [`Action`].

use crate::parser::Action;

/// Opens and closes the YAML front matter.
pub const FRONT_MATTER_FENCE: &str = "---";

/// `title: My Module`
pub fn front_matter_field(field: &str, value: &str) -> String {
    format!("{}: {}", field, value)
}

/// `**class Foo**`
pub fn class_heading(name: &str) -> String {
    format!("**class {}**", name)
}

/// `**def bar**`
pub fn function_heading(name: &str) -> String {
    format!("**def {}**", name)
}

/// `> _Arguments:_`
pub fn arguments_header() -> String {
    "> _Arguments:_".to_string()
}

/// ` - _name_: description`
pub fn argument(name: &str, description: &str) -> String {
    format!(" - _{}_: {}", name, description)
}

/// Markdown lines for one action, in output order.
pub fn render(action: &Action) -> Vec<String> {
    match action {
        Action::OpenFrontMatter { title, .. } => vec![
            FRONT_MATTER_FENCE.to_string(),
            front_matter_field("title", title),
        ],
        Action::Author(author) => vec![front_matter_field("author", author)],
        Action::Date(date) => vec![
            front_matter_field("date", date),
            FRONT_MATTER_FENCE.to_string(),
        ],
        Action::ModuleText(text) | Action::Literate(text) => vec![text.clone()],
        Action::ClassHeading(name) => vec![String::new(), class_heading(name), String::new()],
        Action::ClassDescription(text) => vec![text.clone(), String::new()],
        Action::FunctionHeading(name) => vec![String::new(), function_heading(name)],
        Action::OpenDescription { inline, .. } => {
            let mut lines = vec![String::new()];
            lines.extend(inline.iter().cloned());
            lines
        }
        Action::InlineDescription(text) => vec![String::new(), text.clone(), String::new()],
        Action::ArgumentsHeader => vec![arguments_header(), String::new()],
        Action::Argument {
            name,
            description,
            ..
        } => vec![argument(name, description)],
        Action::DescriptionText { text, .. } => vec![text.clone()],
        Action::CloseModule | Action::CloseDescription | Action::Skip => Vec::new(),
    }
}
