//! docu — turn Python docstrings and literate comments into Markdown.
//!
//! A single forward pass over the input lines. Each line is classified by a
//! fixed rule table (see [`parser`]) and its Markdown is written before the
//! next line is read:
//!
//! - a module docstring in the first lines becomes YAML front matter
//!   (`title`, `author`, `date`) followed by its body text;
//! - `class` and method headings become `**class Name**` / `**def name**`;
//! - method docstrings are copied, with `name - text` argument lines turned
//!   into list items;
//! - `#'` literate comments are copied without the marker.
//!
//! ```
//! use docu::{extract_str, ExtractorConfig};
//!
//! let md = extract_str("#' Hello\n", ExtractorConfig::default()).unwrap();
//! assert_eq!(md, "Hello\n");
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod reader;

pub use config::ExtractorConfig;
pub use error::{DocuError, Result};
pub use extract::{extract_file, extract_lines, extract_str, Extractor};
