//! Opening message stores from command line arguments.

use crate::SourceArgs;
use crate::error::{CliError, CliResult};
use std::path::Path;
use std::sync::Arc;
use verba_core::MessageProvider;
use verba_files::FileSystemProvider;
use verba_sql::{DatabaseConfig, TableConfig, TableMessageProvider};

/// Open the store named by `--source-dir` or `--source-db`.
pub async fn open_source(args: &SourceArgs) -> CliResult<Arc<dyn MessageProvider>> {
    if let Some(dir) = &args.source_dir {
        let store = FileSystemProvider::with_encoding(dir, args.encoding)?;
        return Ok(Arc::new(store));
    }
    if let Some(url) = &args.source_db {
        let store = open_table(url, args.table_config.as_deref()).await?;
        return Ok(Arc::new(store));
    }
    Err(CliError::InvalidArgument(
        "either --source-dir or --source-db is required".to_string(),
    ))
}

/// Connect to `url` and open its message table, creating it when missing.
pub async fn open_table(url: &str, table_config: Option<&Path>) -> CliResult<TableMessageProvider> {
    let layout = match table_config {
        Some(path) => load_table_config(path)?,
        None => TableConfig::default(),
    };
    let pool = verba_sql::connect(&DatabaseConfig::new(url)).await?;
    let store = TableMessageProvider::new(pool, layout)?;
    store.ensure_table().await?;
    Ok(store)
}

/// Read a [`TableConfig`] from a `.toml` or `.json` file.
pub fn load_table_config(path: &Path) -> CliResult<TableConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TableConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => {
            return Err(CliError::Config(format!(
                "unsupported table config format: {}",
                path.display()
            )));
        }
    };
    config.validate()?;
    Ok(config)
}
