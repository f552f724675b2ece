//! In-process mock of the content API for tests

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::config::SiteConfig;
use crate::prismic::{ApiResponse, Document};

struct MockState {
    addr: SocketAddr,
    documents: Vec<Document>,
    queries: Mutex<Vec<String>>,
}

/// A mock Prismic API bound to an ephemeral local port
pub struct MockApi {
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn start(documents: Vec<Document>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState {
            addr,
            documents,
            queries: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/v2", get(api_info))
            .route("/api/v2/documents/search", get(search))
            .route("/broken", get(|| async { "<html>not json</html>" }))
            .route(
                "/unavailable",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
            )
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state, handle }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/api/v2", self.state.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.state.addr, path)
    }

    pub fn config(&self) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.api_endpoint = self.endpoint();
        config.access_token = Some("token".to_string());
        config
    }

    /// Every `q` parameter received so far
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// A search URL for the given page, as the API would hand out in `next_page`
    pub fn page_url(&self, page: u32, page_size: u32) -> String {
        page_url(self.state.addr, page, page_size)
    }

    pub fn sample_posts(count: usize) -> Vec<Document> {
        (1..=count).map(sample_post).collect()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn sample_post(n: usize) -> Document {
    Document {
        id: format!("ID{}", n),
        uid: Some(format!("post-{}", n)),
        doc_type: "posts".to_string(),
        first_publication_date: Some(format!("2021-03-{:02}T19:25:28+0000", 10 + n)),
        last_publication_date: None,
        data: json!({
            "title": format!("Post {}", n),
            "subtitle": format!("Subtitle {}", n),
            "author": "Joseph Oliveira",
            "banner": { "url": format!("https://images.prismic.io/banner-{}.png", n) },
            "content": [
                {
                    "heading": "Proin et varius",
                    "body": [
                        { "type": "paragraph", "text": "Lorem ipsum dolor sit amet", "spans": [] }
                    ]
                }
            ]
        }),
    }
}

fn page_url(addr: SocketAddr, page: u32, page_size: u32) -> String {
    let q = percent_encoding::utf8_percent_encode(
        r#"[[at(document.type, "posts")]]"#,
        percent_encoding::NON_ALPHANUMERIC,
    );
    format!(
        "http://{}/api/v2/documents/search?ref=master-ref&q={}&page={}&pageSize={}",
        addr, q, page, page_size
    )
}

async fn api_info() -> impl IntoResponse {
    Json(json!({
        "refs": [
            { "id": "preview", "ref": "preview-ref", "isMasterRef": false },
            { "id": "master", "ref": "master-ref", "isMasterRef": true }
        ]
    }))
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("ref").map(String::as_str) != Some("master-ref") {
        return (StatusCode::BAD_REQUEST, "bad ref").into_response();
    }

    let q = params.get("q").cloned().unwrap_or_default();
    state.queries.lock().unwrap().push(q.clone());

    let uid_filter = q
        .split("uid, \"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .map(str::to_string);

    let fetch: Vec<String> = params
        .get("fetch")
        .map(|f| {
            f.split(',')
                .filter_map(|field| field.split('.').nth(1))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let matching: Vec<Document> = state
        .documents
        .iter()
        .filter(|d| uid_filter.is_none() || d.uid == uid_filter)
        .cloned()
        .map(|mut d| {
            if !fetch.is_empty() {
                if let Some(data) = d.data.as_object_mut() {
                    data.retain(|k, _| fetch.contains(k));
                }
            }
            d
        })
        .collect();

    let page_size: u32 = params
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(20);
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);

    let total = matching.len() as u32;
    let total_pages = total.div_ceil(page_size);
    let results: Vec<Document> = matching
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    let response = ApiResponse {
        page,
        results_per_page: page_size,
        results_size: results.len() as u32,
        total_results_size: total,
        total_pages,
        next_page: (page < total_pages).then(|| page_url(state.addr, page + 1, page_size)),
        prev_page: (page > 1).then(|| page_url(state.addr, page - 1, page_size)),
        results,
    };

    Json(response).into_response()
}
