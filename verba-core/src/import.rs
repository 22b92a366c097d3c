//! Copying messages between stores

use crate::{MessageAcceptor, MessageProvider, Result};
use std::fmt;

/// Outcome of copying one basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub basename: String,
    pub locales: usize,
    pub messages: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} messages in {} locales",
            self.basename, self.messages, self.locales
        )
    }
}

/// Copies whole basenames from a provider into an acceptor.
///
/// ```
/// use verba_core::{Importer, InMemoryProvider, MessageProvider};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> verba_core::Result<()> {
/// let source = InMemoryProvider::new().with_message("app", None, "greeting", "hi");
/// let target = InMemoryProvider::new();
///
/// let report = Importer::new(&source, &target).import_basename("app").await?;
/// assert_eq!(report.messages, 1);
/// assert_eq!(target.available_basenames().await?, ["app"]);
/// # Ok(())
/// # }
/// ```
pub struct Importer<'a> {
    source: &'a dyn MessageProvider,
    target: &'a dyn MessageAcceptor,
}

impl<'a> Importer<'a> {
    pub fn new(source: &'a dyn MessageProvider, target: &'a dyn MessageAcceptor) -> Self {
        Self { source, target }
    }

    /// Replace `basename` in the target with the source's messages.
    pub async fn import_basename(&self, basename: &str) -> Result<ImportReport> {
        let messages = self.source.messages(basename).await?;
        self.target.set_messages(basename, &messages).await?;

        let report = ImportReport {
            basename: basename.to_string(),
            locales: messages.locale_count(),
            messages: messages.len(),
        };
        verba_log::info!(target: "verba::import", "imported {}", report);
        Ok(report)
    }

    /// Copy every basename the source knows, in sorted order.
    pub async fn import_all(&self) -> Result<Vec<ImportReport>> {
        let mut basenames = self.source.available_basenames().await?;
        basenames.sort();
        basenames.dedup();

        let mut reports = Vec::with_capacity(basenames.len());
        for basename in &basenames {
            reports.push(self.import_basename(basename).await?);
        }
        Ok(reports)
    }
}
