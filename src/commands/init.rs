use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, a default `config.json`, an empty `ledger.json` (unless one is
/// already there) and the export directory.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Successfully created the vehicle ledger home at {}",
        config.root().display()
    )
    .into())
}
