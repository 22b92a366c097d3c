//! Show command - summarize or dump the messages of one basename.

use crate::SourceArgs;
use crate::error::CliResult;
use crate::store::open_source;
use colored::Colorize;
use verba_core::MessageProvider;

/// Print per-locale counts, or every message with `full`.
pub async fn run(source: &SourceArgs, basename: &str, full: bool) -> CliResult<()> {
    let store = open_source(source).await?;
    let messages = store.messages(basename).await?;

    if messages.is_empty() {
        println!("  {} No messages for basename {}", "⚠".yellow(), basename.cyan());
        return Ok(());
    }

    if full {
        print!("{}", messages.full_info());
    } else {
        print!("{}", messages.summary());
    }
    Ok(())
}
