//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::SpaceTraveling;

/// Remove everything a build wrote
pub fn run(app: &SpaceTraveling) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    }

    Ok(())
}
