//! Content module - post models and the fetchers that fill them

mod fetch;
mod post;

pub use fetch::{fetch_by_identifier, fetch_summaries, list_all_identifiers, POST_TYPE};
pub use post::{ContentSection, PostDetail, PostSummary};
