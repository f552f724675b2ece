//! List site content

use anyhow::Result;

use crate::content;
use crate::helpers::{self, full_url_for};
use crate::pagination::{HttpPageFetcher, PaginationState};
use crate::routes::{Route, RouteTable};
use crate::SpaceTraveling;

/// List site content by type
pub async fn run(app: &SpaceTraveling, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let client = app.connect().await?;
            let (summaries, next_page) =
                content::fetch_summaries(&client, app.config.page_size).await?;
            let state = PaginationState::new(summaries, next_page)
                .load_all(&HttpPageFetcher::new())
                .await;

            let tz = helpers::timezone(&app.config.timezone);
            println!("Posts ({}):", state.loaded.len());
            for post in &state.loaded {
                println!(
                    "  {} - {} by {} [{}]",
                    helpers::format_date(
                        post.first_publication_date.as_deref(),
                        &app.config.date_format,
                        tz
                    ),
                    post.title,
                    post.author,
                    post.uid
                );
            }
            if state.has_more() {
                println!("  (stopped early, see log)");
            }
        }
        "route" | "routes" => {
            let client = app.connect().await?;
            let uids = content::list_all_identifiers(&client).await?;
            let routes = RouteTable::from_identifiers(uids);

            println!("Routes ({}):", routes.len());
            for (path, route) in routes.iter() {
                let kind = match route {
                    Route::Index => "index",
                    Route::Post { .. } => "post",
                };
                println!("  {:<6} {}", kind, full_url_for(&app.config, path));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::testing::MockApi;

    #[tokio::test]
    async fn test_unknown_type() {
        let app = SpaceTraveling::with_config(".", SiteConfig::default());
        let err = run(&app, "tags").await.unwrap_err();
        assert!(err.to_string().contains("Unknown type: tags"));
    }

    #[tokio::test]
    async fn test_list_posts_and_routes() {
        let api = MockApi::start(MockApi::sample_posts(3)).await;
        let app = SpaceTraveling::with_config(".", api.config());

        run(&app, "post").await.unwrap();
        run(&app, "routes").await.unwrap();

        // three list pages walked by cursor, plus one route query
        let type_queries = api
            .queries()
            .iter()
            .filter(|q| q.contains("document.type"))
            .count();
        assert_eq!(type_queries, 4);
    }
}
