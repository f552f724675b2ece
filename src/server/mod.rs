//! Preview server with the "load more" endpoint
//!
//! Serves the generated output as-is: a path with no generated file is a 404.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::Generator;
use crate::pagination::{HttpPageFetcher, PaginationState};
use crate::SpaceTraveling;

/// Wires the list page's button to `/__load_more`
const LOAD_MORE_SCRIPT: &str = r#"
<script>
(function() {
    var button = document.getElementById('load-more');
    var list = document.getElementById('posts');
    if (!button || !list) return;
    button.addEventListener('click', function() {
        var cursor = button.getAttribute('data-next-page');
        if (!cursor) return;
        fetch('/__load_more?cursor=' + encodeURIComponent(cursor))
            .then(function(response) { return response.json(); })
            .then(function(data) {
                list.insertAdjacentHTML('beforeend', data.html);
                if (data.next_page) {
                    button.setAttribute('data-next-page', data.next_page);
                } else {
                    button.remove();
                }
            })
            .catch(function(err) { console.error(err); });
    });
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    generator: Generator,
    fetcher: HttpPageFetcher,
    api_origin: Option<reqwest::Url>,
}

#[derive(Debug, Deserialize)]
struct LoadMoreQuery {
    cursor: String,
}

/// Response of `/__load_more`
#[derive(Debug, Serialize, Deserialize)]
pub struct LoadMoreResponse {
    /// Rendered summary entries to append to the list
    pub html: String,
    /// Cursor for the next click, `None` once the list is complete
    pub next_page: Option<String>,
    /// Number of summaries in `html`
    pub loaded: usize,
}

/// Build the preview router
pub fn router(app: &SpaceTraveling) -> Result<Router> {
    let state = Arc::new(ServerState {
        public_dir: app.public_dir.clone(),
        generator: Generator::new(app)?,
        fetcher: HttpPageFetcher::new(),
        api_origin: reqwest::Url::parse(&app.config.api_endpoint).ok(),
    });

    Ok(Router::new()
        .route("/__load_more", get(load_more_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the preview server
pub async fn start(app: &SpaceTraveling, ip: &str, port: u16, open: bool) -> Result<()> {
    let router = router(app)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Load the page behind `cursor` and render its summaries
///
/// Failures answer with nothing loaded and the same cursor, so the list on
/// screen stays as it was.
async fn load_more_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<LoadMoreQuery>,
) -> Response {
    if !same_origin(state.api_origin.as_ref(), &query.cursor) {
        tracing::warn!("Rejected cursor outside the content API: {}", query.cursor);
        return (StatusCode::BAD_REQUEST, "cursor must point at the content API").into_response();
    }

    let before = PaginationState::new(Vec::new(), Some(query.cursor));
    let after = before.clone().load_more(&state.fetcher).await;

    let response = match state.generator.render_post_list(&after.loaded) {
        Ok(html) => LoadMoreResponse {
            html,
            loaded: after.loaded.len(),
            next_page: after.next_page,
        },
        Err(e) => {
            tracing::error!("Failed to render loaded posts: {}", e);
            LoadMoreResponse {
                html: String::new(),
                loaded: 0,
                next_page: before.next_page,
            }
        }
    };

    Json(response).into_response()
}

fn same_origin(api: Option<&reqwest::Url>, cursor: &str) -> bool {
    match (api, reqwest::Url::parse(cursor)) {
        (Some(api), Ok(cursor)) => api.origin() == cursor.origin(),
        _ => false,
    }
}

/// Serve generated files only, wiring up the load-more button on HTML pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();

    let file_path = if path == "/" {
        state.public_dir.join("index.html")
    } else {
        let candidate = state.public_dir.join(path.trim_start_matches('/'));
        if candidate.is_dir() {
            candidate.join("index.html")
        } else {
            candidate
        }
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_load_more(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Inject the load-more script into pages that have the button
fn inject_load_more(html: &str) -> String {
    if !html.contains(r#"id="load-more""#) {
        html.to_string()
    } else if html.contains("</body>") {
        html.replace("</body>", LOAD_MORE_SCRIPT)
    } else {
        format!("{}{}", html, LOAD_MORE_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
