//! Use case orchestration for depreport.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod generate;
mod render;
mod report;

pub use generate::{ReportOutput, RunInput, run_report};
pub use render::{MarkdownInput, render_markdown, resolve_format, run_markdown};
pub use report::{parse_report_json, serialize_report, write_report, write_text};
