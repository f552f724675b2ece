//! Generator module - renders the list page and every post page to disk

use anyhow::Result;
use chrono_tz::Tz;
use std::fs;
use std::path::PathBuf;

use crate::content::{self, PostDetail, PostSummary};
use crate::helpers;
use crate::pagination::PaginationState;
use crate::prismic::ContentClient;
use crate::routes::RouteTable;
use crate::templates::{PostPageData, SiteData, SummaryData, TemplateRenderer};
use crate::SpaceTraveling;

/// What a build produced
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Summaries on the first list page
    pub summaries: usize,
    /// Detail pages written
    pub posts: usize,
    /// Whether the list page offers "load more"
    pub has_more: bool,
}

/// Static site generator using Tera templates
pub struct Generator {
    app: SpaceTraveling,
    renderer: TemplateRenderer,
    tz: Option<Tz>,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &SpaceTraveling) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            renderer: TemplateRenderer::new()?,
            tz: helpers::timezone(&app.config.timezone),
        })
    }

    /// Generate the entire site
    pub async fn generate(&self, client: &ContentClient) -> Result<BuildReport> {
        fs::create_dir_all(&self.app.public_dir)?;

        // List page
        let (summaries, next_page) =
            content::fetch_summaries(client, self.app.config.page_size).await?;
        let state = PaginationState::new(summaries, next_page);

        // Detail routes are closed over the identifiers known right now
        let uids = content::list_all_identifiers(client).await?;
        let routes = RouteTable::from_identifiers(uids);

        for summary in &state.loaded {
            if !routes.contains_post(&summary.uid) {
                tracing::warn!("Listed post {:?} has no detail page", summary.uid);
            }
        }

        self.write_route("", &self.render_index(&state)?)?;

        let mut posts = 0;
        for uid in routes.post_uids() {
            let post = content::fetch_by_identifier(client, uid).await?;
            self.write_route(&helpers::post_path(uid), &self.render_post(&post)?)?;
            posts += 1;
        }

        Ok(BuildReport {
            summaries: state.loaded.len(),
            posts,
            has_more: state.has_more(),
        })
    }

    /// Render the list page for a pagination state
    pub fn render_index(&self, state: &PaginationState) -> Result<String> {
        let posts = self.summary_data(&state.loaded);
        self.renderer.render_index(
            &SiteData::new(&self.app.config),
            &posts,
            state.next_page.as_deref(),
        )
    }

    /// Render the summary entries alone
    pub fn render_post_list(&self, summaries: &[PostSummary]) -> Result<String> {
        self.renderer
            .render_post_list(&self.summary_data(summaries))
    }

    /// Render a post detail page
    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let page = PostPageData::new(post, &self.app.config, self.tz);
        self.renderer
            .render_post(&SiteData::new(&self.app.config), &page)
    }

    fn summary_data(&self, summaries: &[PostSummary]) -> Vec<SummaryData> {
        summaries
            .iter()
            .map(|s| SummaryData::new(s, &self.app.config, self.tz))
            .collect()
    }

    /// Write a page to `<public>/<route>/index.html`
    fn write_route(&self, route: &str, html: &str) -> Result<PathBuf> {
        let output_path = self
            .app
            .public_dir
            .join(route.trim_matches('/'))
            .join("index.html");

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(output_path)
    }
}
