//! Transfer command - copy basenames between stores.

use crate::error::CliResult;
use crate::store::{open_source, open_table};
use crate::{SourceArgs, info, success};
use colored::Colorize;
use std::path::PathBuf;
use verba_core::{ImportReport, Importer, MessageAcceptor, MessageProvider};
use verba_files::{Encoding, FileSystemProvider, ZipAcceptor};

/// Where copied messages are written.
#[derive(Debug, Clone)]
pub enum Target {
    /// Directory of `.properties` files, created when missing
    Directory(PathBuf, Encoding),
    /// Message table behind a database URL
    Database(String),
    /// Zip archive of `.properties` files
    Zip(PathBuf, Encoding),
}

/// Copy `basenames` (all when empty) from the source store into `target`.
pub async fn run(source: &SourceArgs, basenames: &[String], target: Target) -> CliResult<()> {
    let store = open_source(source).await?;

    match target {
        Target::Directory(dir, encoding) => {
            tokio::fs::create_dir_all(&dir).await?;
            let files = FileSystemProvider::with_encoding(&dir, encoding)?;
            copy(store.as_ref(), &files, basenames).await?;
            info(&format!("Wrote {}", dir.display().to_string().cyan()));
        }
        Target::Database(url) => {
            let table = open_table(&url, source.table_config.as_deref()).await?;
            copy(store.as_ref(), &table, basenames).await?;
            info(&format!("Wrote table {}", table.config().table_name.cyan()));
        }
        Target::Zip(path, encoding) => {
            let archive = ZipAcceptor::new().encoding(encoding);
            copy(store.as_ref(), &archive, basenames).await?;
            archive.finish_to_file(&path).await?;
            info(&format!("Wrote {}", path.display().to_string().cyan()));
        }
    }
    Ok(())
}

async fn copy(
    source: &dyn MessageProvider,
    target: &dyn MessageAcceptor,
    basenames: &[String],
) -> CliResult<Vec<ImportReport>> {
    let importer = Importer::new(source, target);

    let reports = if basenames.is_empty() {
        importer.import_all().await?
    } else {
        let mut reports = Vec::with_capacity(basenames.len());
        for basename in basenames {
            reports.push(importer.import_basename(basename).await?);
        }
        reports
    };

    for report in &reports {
        success(&report.to_string());
    }
    Ok(reports)
}
