//! File-backed message stores for Verba
//!
//! - **Directory store**: one `.properties` file per basename and locale,
//!   read and written with a configurable encoding
//! - **Zip archives**: a write-only store packing the same files into a
//!   ZIP archive
//! - **Properties codec**: the line format both stores share
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verba_core::{Importer, MessageSource};
//! use verba_files::{FileSystemProvider, ZipAcceptor};
//!
//! // Resolve messages straight from a directory
//! let source = MessageSource::builder()
//!     .provider(FileSystemProvider::new("i18n")?)
//!     .build()?;
//! source.load().await?;
//!
//! // Export every basename into an archive
//! let store = FileSystemProvider::new("i18n")?;
//! let archive = ZipAcceptor::new();
//! Importer::new(&store, &archive).import_all().await?;
//! archive.finish_to_file("messages.zip").await?;
//! ```
//!
//! ## Layout
//!
//! ```text
//! i18n/
//! ├── app.properties            base messages of basename "app"
//! ├── app_de.properties
//! ├── app_de_DE.properties
//! └── errors_fr_FR.properties
//! ```

mod encoding;
mod error;
pub mod naming;
pub mod properties;
mod provider;

#[cfg(feature = "archives")]
pub mod archive;

pub use encoding::Encoding;
pub use error::*;
pub use provider::FileSystemProvider;

#[cfg(feature = "archives")]
pub use archive::{CompressionLevel, ZipAcceptor};
