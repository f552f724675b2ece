//! Prismic structured text to HTML
//!
//! Blocks map to block-level elements, consecutive list items are grouped
//! into a single `<ul>`/`<ol>`, and inline spans are nested so that every
//! tag closes in the order it was opened. Span offsets count UTF-16 code
//! units, as the API reports them.

use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;
use crate::prismic::{lenient, lenient_seq};

/// One structured-text block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextBlock {
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub spans: Vec<Span>,
    #[serde(deserialize_with = "lenient")]
    pub label: Option<String>,

    // image
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alt: Option<String>,

    // embed
    #[serde(deserialize_with = "lenient")]
    pub oembed: Option<Embed>,
}

impl RichTextBlock {
    /// A plain paragraph
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
            ..Self::default()
        }
    }
}

/// An inline span over `text[start..end]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanData {
    pub url: Option<String>,
    pub target: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    pub embed_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider_name: Option<String>,
    pub html: Option<String>,
}

/// Render a sequence of blocks as HTML
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&render_block(block));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn render_block(block: &RichTextBlock) -> String {
    let class = block
        .label
        .as_deref()
        .map(|l| format!(r#" class="{}""#, html_escape(l)))
        .unwrap_or_default();

    match block.kind.as_str() {
        "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
            let level = &block.kind["heading".len()..];
            format!(
                "<h{level}{class}>{}</h{level}>",
                render_spans(&block.text, &block.spans)
            )
        }
        "preformatted" => format!("<pre{class}>{}</pre>", render_spans(&block.text, &block.spans)),
        "list-item" | "o-list-item" => {
            format!("<li{class}>{}</li>", render_spans(&block.text, &block.spans))
        }
        "image" => format!(
            r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
            html_escape(block.url.as_deref().unwrap_or_default()),
            html_escape(block.alt.as_deref().unwrap_or_default())
        ),
        "embed" => match &block.oembed {
            Some(embed) => format!(
                r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}"{class}>{}</div>"#,
                html_escape(&embed.embed_url),
                html_escape(&embed.kind),
                html_escape(embed.provider_name.as_deref().unwrap_or_default()),
                embed.html.as_deref().unwrap_or_default()
            ),
            None => String::new(),
        },
        "paragraph" | "" => format!("<p{class}>{}</p>", render_spans(&block.text, &block.spans)),
        other => {
            tracing::debug!("Rendering unknown block type {:?} as paragraph", other);
            format!("<p{class}>{}</p>", render_spans(&block.text, &block.spans))
        }
    }
}

struct Active<'a> {
    span: &'a Span,
    end: usize,
}

/// Render text with its inline spans, escaping everything else
fn render_spans(text: &str, spans: &[Span]) -> String {
    let offsets = utf16_offsets(text);
    let len = offsets.len() - 1;
    let byte_at = |pos: usize| offsets[pos.min(len)];

    let mut spans: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len)
        .collect();
    // outer spans first when two start together
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut points: Vec<usize> = spans
        .iter()
        .flat_map(|s| [s.start, s.end.min(len)])
        .chain([0, len])
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<Active> = Vec::new();

    for (i, &point) in points.iter().enumerate() {
        if let Some(first_done) = stack.iter().position(|a| a.end <= point) {
            let mut reopen = Vec::new();
            while stack.len() > first_done {
                let Some(active) = stack.pop() else { break };
                out.push_str(close_tag(active.span));
                if active.end > point {
                    reopen.push(active);
                }
            }
            for active in reopen.into_iter().rev() {
                out.push_str(&open_tag(active.span));
                stack.push(active);
            }
        }

        for span in spans.iter().filter(|s| s.start == point) {
            out.push_str(&open_tag(span));
            stack.push(Active {
                span: *span,
                end: span.end.min(len),
            });
        }

        if let Some(&next) = points.get(i + 1) {
            out.push_str(&escape_text(&text[byte_at(point)..byte_at(next)]));
        }
    }

    while let Some(active) = stack.pop() {
        out.push_str(close_tag(active.span));
    }

    out
}

/// Byte offset of every UTF-16 position, plus one past the end
fn utf16_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (i, c) in text.char_indices() {
        for _ in 0..c.len_utf16() {
            offsets.push(i);
        }
    }
    offsets.push(text.len());
    offsets
}

fn open_tag(span: &Span) -> String {
    let data = span.data.as_ref();
    match span.kind.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let url = data.and_then(|d| d.url.as_deref()).unwrap_or_default();
            let target = data
                .and_then(|d| d.target.as_deref())
                .map(|t| format!(r#" target="{}" rel="noopener""#, html_escape(t)))
                .unwrap_or_default();
            format!(r#"<a href="{}"{}>"#, html_escape(url), target)
        }
        "label" => {
            let label = data.and_then(|d| d.label.as_deref()).unwrap_or_default();
            format!(r#"<span class="{}">"#, html_escape(label))
        }
        _ => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "</span>",
    }
}

fn escape_text(text: &str) -> String {
    html_escape(text).replace('\n', "<br />")
}
