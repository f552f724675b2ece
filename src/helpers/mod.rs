//! Helper functions for templates
//!
//! Dates, URLs, HTML snippets and reading time.

mod date;
mod html;
pub mod reading;
mod url;

pub use date::*;
pub use html::*;
pub use reading::estimate;
pub use url::*;
