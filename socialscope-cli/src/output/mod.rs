//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, kind_name};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
