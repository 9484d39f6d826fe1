//! Rendering for depreport reports (Markdown) and the number formats it applies.

#![forbid(unsafe_code)]

pub mod format;
mod markdown;

pub use markdown::render_markdown;
