//! Basenames command - list the basenames of a store.

use crate::SourceArgs;
use crate::error::CliResult;
use crate::store::open_source;
use verba_core::MessageProvider;

/// Print one basename per line, sorted.
pub async fn run(source: &SourceArgs) -> CliResult<()> {
    let store = open_source(source).await?;
    let mut basenames = store.available_basenames().await?;
    basenames.sort();
    basenames.dedup();

    for basename in basenames {
        println!("{}", basename);
    }
    Ok(())
}
