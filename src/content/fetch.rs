//! Build-time fetchers for the list and detail pages

use anyhow::Result;

use super::post::{PostDetail, PostSummary};
use crate::prismic::{ContentClient, Predicate, QueryOptions};

/// Document type holding blog posts
pub const POST_TYPE: &str = "posts";

/// Fields requested for the list page
const SUMMARY_FIELDS: [&str; 3] = ["posts.title", "posts.subtitle", "posts.author"];

/// First page of post summaries and the cursor to the next one
pub async fn fetch_summaries(
    client: &ContentClient,
    page_size: u32,
) -> Result<(Vec<PostSummary>, Option<String>)> {
    let options = QueryOptions::default()
        .fetch(SUMMARY_FIELDS)
        .page_size(page_size);
    let response = client
        .query(&[Predicate::at("document.type", POST_TYPE)], &options)
        .await?;

    let summaries = response
        .results
        .iter()
        .map(PostSummary::from_document)
        .collect();

    Ok((summaries, response.next_page))
}

/// Every post uid known to the API, in API order
pub async fn list_all_identifiers(client: &ContentClient) -> Result<Vec<String>> {
    let predicates = [Predicate::at("document.type", POST_TYPE)];
    let mut uids = Vec::new();
    let mut page = 1;

    loop {
        let response = client
            .query(&predicates, &QueryOptions::default().page(page))
            .await?;

        for doc in &response.results {
            match &doc.uid {
                Some(uid) if !uid.is_empty() => uids.push(uid.clone()),
                _ => tracing::warn!("Skipping post {} without uid", doc.id),
            }
        }

        if response.next_page.is_none() || page >= response.total_pages {
            break;
        }
        page += 1;
    }

    tracing::debug!("Resolved {} post identifiers", uids.len());
    Ok(uids)
}

/// The full post with the given uid
pub async fn fetch_by_identifier(client: &ContentClient, uid: &str) -> Result<PostDetail> {
    let doc = client.get_by_uid(POST_TYPE, uid).await?;
    Ok(PostDetail::from_document(&doc))
}
