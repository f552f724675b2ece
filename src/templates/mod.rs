//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Context values are escaped when the
//! context is built; rich-text HTML goes in as-is.

use anyhow::Result;
use chrono_tz::Tz;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{PostDetail, PostSummary};
use crate::helpers::{self, html_escape, image_tag, url_for};
use crate::richtext;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Values are escaped up front; paths and rich text must pass through
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            (
                "partials/post_list.html",
                include_str!("site/partials/post_list.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// The list page
    pub fn render_index(
        &self,
        site: &SiteData,
        posts: &[SummaryData],
        next_page: Option<&str>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", posts);
        context.insert("next_page", &next_page.map(html_escape));
        self.render("index.html", &context)
    }

    /// Just the summary entries, for appending to an existing list
    pub fn render_post_list(&self, posts: &[SummaryData]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        self.render("partials/post_list.html", &context)
    }

    /// A post detail page
    pub fn render_post(&self, site: &SiteData, post: &PostPageData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        self.render("post.html", &context)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub root: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: html_escape(&config.title),
            language: html_escape(&config.language),
            root: url_for(config, ""),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub path: String,
}

impl SummaryData {
    pub fn new(summary: &PostSummary, config: &SiteConfig, tz: Option<Tz>) -> Self {
        Self {
            title: html_escape(&summary.title),
            subtitle: html_escape(&summary.subtitle),
            author: html_escape(&summary.author),
            date: helpers::format_date(
                summary.first_publication_date.as_deref(),
                &config.date_format,
                tz,
            ),
            path: url_for(config, &helpers::post_path(&summary.uid)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub banner: String,
    pub author: String,
    pub date: String,
    pub reading_time: u64,
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    /// Stable key: position plus heading slug
    pub key: String,
    pub heading: String,
    pub html: String,
}

impl PostPageData {
    pub fn new(post: &PostDetail, config: &SiteConfig, tz: Option<Tz>) -> Self {
        let sections = post
            .content
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let heading = section.heading.as_deref().unwrap_or_default();
                SectionData {
                    key: section_key(i, heading),
                    heading: html_escape(heading),
                    html: richtext::as_html(&section.body),
                }
            })
            .collect();

        Self {
            title: html_escape(&post.title),
            banner: image_tag(&post.banner_url, &post.title, Some("banner")),
            author: html_escape(&post.author),
            date: helpers::format_date(
                post.first_publication_date.as_deref(),
                &config.date_format,
                tz,
            ),
            reading_time: helpers::estimate(&post.content, config.words_per_minute),
            sections,
        }
    }
}

fn section_key(index: usize, heading: &str) -> String {
    let slug = slug::slugify(heading);
    if slug.is_empty() {
        format!("section-{}", index)
    } else {
        format!("section-{}-{}", index, slug)
    }
}
