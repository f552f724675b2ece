//! Post models

use serde::{Deserialize, Serialize};

use crate::prismic::{lenient, lenient_seq, value_or_default, Document};
use crate::richtext::RichTextBlock;

/// The reduced post representation used on the list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Routing key
    pub uid: String,

    /// First publication date, as sent by the API
    pub first_publication_date: Option<String>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Project the summary fields out of a raw document, discarding the rest
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date.clone(),
            title: doc.data_str("title"),
            subtitle: doc.data_str("subtitle"),
            author: doc.data_str("author"),
        }
    }
}

/// A full post, as rendered on its detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub content: Vec<ContentSection>,
}

/// One heading plus its rich-text body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    #[serde(deserialize_with = "lenient")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient_seq")]
    pub body: Vec<RichTextBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostData {
    #[serde(deserialize_with = "lenient")]
    banner: Option<Banner>,
    #[serde(deserialize_with = "lenient_seq")]
    content: Vec<ContentSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Banner {
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
}

impl PostDetail {
    /// Build a post from a full raw document
    ///
    /// Missing or mistyped fields come out empty, as on the list page.
    pub fn from_document(doc: &Document) -> Self {
        let data: PostData = value_or_default(doc.data.clone());

        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date.clone(),
            title: doc.data_str("title"),
            banner_url: data.banner.and_then(|b| b.url).unwrap_or_default(),
            author: doc.data_str("author"),
            content: data.content,
        }
    }
}
