//! spacetraveling: a static blog generator backed by a headless content API
//!
//! Posts live in a Prismic repository. Generation pre-renders the post list
//! and one page per known post; the preview server adds the incremental
//! "load more" action on top of the generated files.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pagination;
pub mod prismic;
pub mod richtext;
pub mod routes;
pub mod server;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct SpaceTraveling {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl SpaceTraveling {
    /// Create a new instance from a site directory
    ///
    /// Reads `_config.yml` and `.env` when present, then applies the
    /// `PRISMIC_*` environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let env_path = base_dir.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path)?;
            tracing::debug!("Loaded environment from {:?}", env_path);
        }

        let config_path = base_dir.join("_config.yml");
        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Connect to the content API
    pub async fn connect(&self) -> Result<prismic::ContentClient> {
        Ok(prismic::ContentClient::connect(&self.config).await?)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
