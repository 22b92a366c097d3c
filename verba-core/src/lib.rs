//! Locale-fallback message resolution for Verba
//!
//! Resolves message codes to localized templates, walking a deterministic
//! locale path until a message is found:
//!
//! - **Locale Paths**: `de_DE_POSIX → de_DE → de`, then the default locale's
//!   chain, then the base messages
//! - **Catalogs**: messages compiled once per load and swapped atomically
//! - **Templates**: positional `{0}` placeholders with number, date and
//!   time formats
//! - **Stores**: any [`MessageProvider`] / [`MessageAcceptor`]; file, zip
//!   and table stores live in `verba-files` and `verba-sql`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use verba_core::{InMemoryProvider, Locale, MessageSource};
//!
//! # async fn run() -> verba_core::Result<()> {
//! let store = InMemoryProvider::new()
//!     .with_message("app", None, "welcome", "Welcome, {0}!")
//!     .with_message("app", Some(Locale::de()), "welcome", "Willkommen, {0}!");
//!
//! let source = MessageSource::builder()
//!     .provider(store)
//!     .default_locale(Some(Locale::en()))
//!     .build()?;
//! source.load().await?;
//!
//! let text = source.message("welcome", &["Anna".into()], Some(&Locale::de_at()));
//! assert_eq!(text.as_deref(), Some("Willkommen, Anna!"));
//! # Ok(())
//! # }
//! ```
//!
//! # Locale Paths
//!
//! ```rust
//! use verba_core::{Locale, build_path};
//!
//! let path = build_path(Some(&Locale::de_de()), Some(&Locale::en_us()));
//! let path: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
//! assert_eq!(path, ["_de_DE", "_de", "_en_US", "_en", ""]);
//! ```

mod catalog;
mod config;
mod error;
pub mod format;
mod import;
pub mod locale;
mod memory;
mod messages;
pub mod path;
mod provider;
mod source;
mod template;

pub use catalog::Catalog;
pub use config::{FileFormat, MessageSourceConfig};
pub use error::MessageError;
pub use format::{
    CurrencyFormatter, DateFormatter, DateStyle, NumberFormatter, TimeStyle, currency_for_locale,
    format_currency, format_date, format_integer, format_number, format_percent, format_time,
    format_whole,
};
pub use import::{ImportReport, Importer};
pub use locale::{Locale, LocaleBuilder};
pub use memory::InMemoryProvider;
pub use messages::Messages;
pub use path::{PathCache, Selector, build_path, locale_path};
pub use provider::{MessageAcceptor, MessageProvider};
pub use source::{MessageSource, MessageSourceBuilder};
pub use template::{FormatArg, MessageTemplate};

/// Result type for message operations
pub type Result<T> = std::result::Result<T, MessageError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        FormatArg, InMemoryProvider, Locale, MessageAcceptor, MessageError, MessageProvider,
        MessageSource, MessageSourceConfig, MessageTemplate, Messages, Result, build_path,
    };
}
