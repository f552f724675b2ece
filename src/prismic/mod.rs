//! Prismic content API client
//!
//! A thin handle over the Prismic v2 REST API: resolves the master ref once,
//! then issues predicate queries against `documents/search`.

mod client;
mod error;
mod predicate;
mod response;

pub use client::{ContentClient, QueryOptions};
pub(crate) use client::get_json;
pub use error::ContentError;
pub use predicate::Predicate;
pub use response::{ApiResponse, Document};
pub(crate) use response::{lenient, lenient_seq, value_or_default};
