// Verba - locale-fallback message resolution for Rust
//
// Messages are grouped by basename and locale, loaded from a store into an
// immutable catalog and resolved by walking from the requested locale
// towards the base locale.

// Re-export core functionality
pub use verba_core::*;

// Re-export logging
pub use verba_log;

// Re-export optional stores
#[cfg(feature = "files")]
pub use verba_files;

#[cfg(feature = "sql")]
pub use verba_sql;

#[cfg(feature = "files")]
pub use verba_files::{Encoding, FileSystemProvider};

#[cfg(feature = "archives")]
pub use verba_files::ZipAcceptor;

#[cfg(feature = "sql")]
pub use verba_sql::{DatabaseConfig, TableConfig, TableMessageProvider};
