//! Vaidya UI crate - embedded single-page HTML for the assistant.
//!
//! One self-contained HTML file with all CSS and JavaScript inline, embedded
//! at compile time via `include_str!`. No build step, no external assets.

pub mod page;

pub use page::PAGE_HTML;
