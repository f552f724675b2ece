//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{ENV_ACCESS_TOKEN, ENV_API_ENDPOINT};

const CONFIG_TEMPLATE: &str = r#"# spacetraveling configuration

# Site
title: spacetraveling
language: pt-BR
# Timezone used to display publication dates; empty keeps the API offset
timezone: ''

# URL
url: http://localhost:4000
root: /

# Directory
public_dir: public

# Content API (PRISMIC_API_ENDPOINT / PRISMIC_ACCESS_TOKEN override these)
api_endpoint: ''

# Home page: posts per "load more" step
page_size: 1

# Post page
words_per_minute: 200
date_format: dd MMM yyyy
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left alone.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;

    let env_example = format!(
        "{}=https://your-repository.cdn.prismic.io/api/v2\n{}=\n",
        ENV_API_ENDPOINT, ENV_ACCESS_TOKEN
    );
    write_if_missing(&target_dir.join(".env.example"), &env_example)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("{:?} already exists, skipping", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
