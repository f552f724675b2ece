//! Authenticated handle to the content API

use serde::de::DeserializeOwned;

use super::error::ContentError;
use super::predicate::Predicate;
use super::response::{ApiInfo, ApiResponse, Document};
use crate::config::SiteConfig;

/// Options for a `documents/search` query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Restrict `data` to these fields (`posts.title`, ...)
    pub fetch: Vec<String>,
    /// Results per page; the API default applies when unset
    pub page_size: Option<u32>,
    /// 1-based page number
    pub page: Option<u32>,
}

impl QueryOptions {
    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Reusable handle for issuing content queries
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    master_ref: String,
}

impl ContentClient {
    /// Resolve the API entry point and its master ref
    pub async fn connect(config: &SiteConfig) -> Result<Self, ContentError> {
        let endpoint = config.api_endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(ContentError::MissingConfig("api_endpoint"));
        }

        let http = reqwest::Client::new();
        let mut request = http.get(endpoint);
        if let Some(token) = &config.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let info: ApiInfo = send_json(request, endpoint).await?;
        let master_ref = info
            .master_ref()
            .ok_or_else(|| ContentError::NoMasterRef(endpoint.to_string()))?
            .to_string();

        tracing::debug!("Connected to {} (ref {})", endpoint, master_ref);

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            access_token: config.access_token.clone(),
            master_ref,
        })
    }

    /// The ref every query is pinned to
    pub fn master_ref(&self) -> &str {
        &self.master_ref
    }

    /// Run a predicate query and return one page of results
    pub async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<ApiResponse, ContentError> {
        let url = format!("{}/documents/search", self.endpoint);

        let mut params: Vec<(&str, String)> = vec![
            ("ref", self.master_ref.clone()),
            ("q", Predicate::join(predicates)),
        ];
        if !options.fetch.is_empty() {
            params.push(("fetch", options.fetch.join(",")));
        }
        if let Some(page_size) = options.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(page) = options.page {
            params.push(("page", page.to_string()));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!("Query {}", Predicate::join(predicates));
        send_json(self.http.get(&url).query(&params), &url).await
    }

    /// Fetch the single document of `doc_type` whose uid is `uid`
    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document, ContentError> {
        let predicates = [Predicate::at(format!("my.{}.uid", doc_type), uid)];
        let response = self.query(&predicates, &QueryOptions::default()).await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }
}

/// GET a URL and decode its JSON body
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, ContentError> {
    send_json(http.get(url), url).await
}

async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, ContentError> {
    let http_err = |source| ContentError::Http {
        url: url.to_string(),
        source,
    };

    let response = request.send().await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ContentError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(http_err)?;
    serde_json::from_str(&body).map_err(|source| ContentError::Decode {
        url: url.to_string(),
        source,
    })
}
