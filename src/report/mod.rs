//! Comparison report building and rendering.

pub mod builder;
pub mod generator;

pub use builder::{build, CompareOptions};
pub use generator::{generate_json_report, generate_markdown_report, write_report, MarkdownSections};
