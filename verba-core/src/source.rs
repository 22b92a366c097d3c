//! Message resolution
//!
//! [`MessageSource`] serves lookups from the current *generation*: a
//! compiled [`Catalog`] plus the [`PathCache`] built for the configured
//! default locale. Generations are immutable; loading messages or changing
//! the default locale publishes a new one by swapping an `Arc`, so a lookup
//! always sees one generation from start to finish.
//!
//! # Example
//!
//! ```
//! use verba_core::{InMemoryProvider, Locale, MessageSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> verba_core::Result<()> {
//! let store = InMemoryProvider::new()
//!     .with_message("app", None, "greeting", "hi")
//!     .with_message("app", Some(Locale::de_de()), "greeting", "hallo");
//!
//! let source = MessageSource::builder().provider(store).build()?;
//! source.load().await?;
//!
//! assert_eq!(source.message("greeting", &[], Some(&Locale::de_de())).as_deref(), Some("hallo"));
//! assert_eq!(source.message("greeting", &[], Some(&Locale::de_at())).as_deref(), Some("hi"));
//! # Ok(())
//! # }
//! ```

use crate::path::PathCache;
use crate::{
    Catalog, FormatArg, Locale, MessageError, MessageProvider, MessageSourceConfig,
    MessageTemplate, Result,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// One published catalog with the paths cached for it.
#[derive(Debug)]
struct Generation {
    catalog: Arc<Catalog>,
    paths: PathCache,
    loaded: bool,
}

impl Generation {
    fn new(catalog: Arc<Catalog>, default_locale: Option<Locale>, loaded: bool) -> Self {
        Self {
            catalog,
            paths: PathCache::new(default_locale),
            loaded,
        }
    }
}

/// Resolves codes to templates through locale fallback paths.
pub struct MessageSource {
    provider: Arc<dyn MessageProvider>,
    basenames: Option<Vec<String>>,
    unresolved_code_fallback: bool,
    current: RwLock<Arc<Generation>>,
    reload_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSource")
            .field("basenames", &self.basenames)
            .field("unresolved_code_fallback", &self.unresolved_code_fallback)
            .field("default_locale", &self.default_locale())
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl MessageSource {
    pub fn builder() -> MessageSourceBuilder {
        MessageSourceBuilder::new()
    }

    /// Build from a configuration and a store.
    pub fn from_config<P>(config: &MessageSourceConfig, provider: P) -> Result<Self>
    where
        P: MessageProvider + 'static,
    {
        config.validate()?;
        Self::builder().config(config).provider(provider).build()
    }

    fn snapshot(&self) -> Arc<Generation> {
        Arc::clone(&self.current.read())
    }

    /// Read every configured basename from the store and publish the result.
    ///
    /// Loads never overlap. On error the previously published catalog stays
    /// in place.
    pub async fn load(&self) -> Result<()> {
        let _guard = self.reload_lock.lock().await;

        let catalog = match Catalog::load(self.provider.as_ref(), self.basenames.as_deref()).await {
            Ok(catalog) => catalog,
            Err(e) => {
                verba_log::error!(target: "verba::source", "message load failed: {}", e);
                return Err(e);
            }
        };

        let mut current = self.current.write();
        let default_locale = current.paths.default_locale().cloned();
        *current = Arc::new(Generation::new(Arc::new(catalog), default_locale, true));
        Ok(())
    }

    /// Same as [`MessageSource::load`]; reads the store again from scratch.
    pub async fn reload(&self) -> Result<()> {
        verba_log::info!(target: "verba::source", "reloading messages");
        self.load().await
    }

    /// Change the default locale; cached paths are discarded.
    pub fn set_default_locale(&self, locale: Option<Locale>) {
        let mut current = self.current.write();
        verba_log::debug!(
            target: "verba::source",
            "default locale set to {}",
            crate::locale::describe(locale.as_ref())
        );
        let catalog = Arc::clone(&current.catalog);
        let loaded = current.loaded;
        *current = Arc::new(Generation::new(catalog, locale, loaded));
    }

    pub fn default_locale(&self) -> Option<Locale> {
        self.current.read().paths.default_locale().cloned()
    }

    /// Basenames searched by [`MessageSource::resolve`], in order.
    pub fn basenames(&self) -> Vec<String> {
        match &self.basenames {
            Some(names) => names.clone(),
            None => self.snapshot().catalog.basenames().to_vec(),
        }
    }

    /// Whether a load has completed.
    pub fn is_loaded(&self) -> bool {
        self.current.read().loaded
    }

    /// The currently published catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.snapshot().catalog)
    }

    /// Find the template for `code`.
    ///
    /// Basenames are tried in order and, for each, the whole fallback path
    /// of `locale` before the next basename. Templates without a formatting
    /// locale come back bound to the default locale. A miss yields the code
    /// itself when unresolved-code fallback is on, `None` otherwise.
    pub fn resolve(&self, code: &str, locale: Option<&Locale>) -> Option<MessageTemplate> {
        let generation = self.snapshot();
        let found = find(&generation, code, locale, generation.catalog.basenames());
        found.or_else(|| self.miss(code, locale))
    }

    /// Like [`MessageSource::resolve`], searching only `basenames` in the
    /// given order.
    pub fn resolve_in<S>(&self, code: &str, locale: Option<&Locale>, basenames: &[S]) -> Option<MessageTemplate>
    where
        S: AsRef<str>,
    {
        let generation = self.snapshot();
        find(&generation, code, locale, basenames).or_else(|| self.miss(code, locale))
    }

    /// Resolve and render with `args`.
    pub fn message(&self, code: &str, args: &[FormatArg], locale: Option<&Locale>) -> Option<String> {
        self.resolve(code, locale).map(|template| template.format(args))
    }

    /// Resolve and render, rendering `default_text` on a miss.
    ///
    /// `default_text` is a template too; if it does not compile it is
    /// returned as is.
    pub fn message_or(
        &self,
        code: &str,
        args: &[FormatArg],
        default_text: &str,
        locale: Option<&Locale>,
    ) -> String {
        let generation = self.snapshot();
        if let Some(template) = find(&generation, code, locale, generation.catalog.basenames()) {
            return template.format(args);
        }

        let locale = locale.cloned().or_else(|| generation.paths.default_locale().cloned());
        match MessageTemplate::compile(default_text, locale) {
            Ok(template) => template.format(args),
            Err(_) => default_text.to_string(),
        }
    }

    fn miss(&self, code: &str, locale: Option<&Locale>) -> Option<MessageTemplate> {
        verba_log::debug!(
            target: "verba::source",
            "no message for code '{}' and locale {}",
            code,
            crate::locale::describe(locale)
        );
        self.unresolved_code_fallback
            .then(|| MessageTemplate::literal(code, locale.cloned()))
    }
}

fn find<S>(generation: &Generation, code: &str, locale: Option<&Locale>, basenames: &[S]) -> Option<MessageTemplate>
where
    S: AsRef<str>,
{
    let path = generation.paths.get_or_build(locale);

    for basename in basenames {
        for selector in path.iter() {
            if let Some(template) = generation.catalog.lookup(basename.as_ref(), selector, code) {
                if template.is_bound() {
                    return Some(template.clone());
                }
                return Some(template.with_locale(generation.paths.default_locale().cloned()));
            }
        }
    }
    None
}

/// Builder for [`MessageSource`].
#[derive(Default)]
pub struct MessageSourceBuilder {
    provider: Option<Arc<dyn MessageProvider>>,
    basenames: Option<Vec<String>>,
    default_locale: Option<Locale>,
    unresolved_code_fallback: bool,
}

impl MessageSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store messages are loaded from (required).
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: MessageProvider + 'static,
    {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// A store shared with other owners.
    pub fn shared_provider(mut self, provider: Arc<dyn MessageProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Search only these basenames, in this order.
    pub fn basenames<I, S>(mut self, basenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.basenames = Some(basenames.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_locale(mut self, locale: Option<Locale>) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn unresolved_code_fallback(mut self, enabled: bool) -> Self {
        self.unresolved_code_fallback = enabled;
        self
    }

    /// Take basenames, default locale and fallback flag from `config`.
    pub fn config(mut self, config: &MessageSourceConfig) -> Self {
        self.basenames = config.basenames.clone();
        self.default_locale = config.default_locale.clone();
        self.unresolved_code_fallback = config.unresolved_code_fallback;
        self
    }

    pub fn build(self) -> Result<MessageSource> {
        let provider = self
            .provider
            .ok_or_else(|| MessageError::Config("no message provider configured".to_string()))?;

        Ok(MessageSource {
            provider,
            basenames: self.basenames,
            unresolved_code_fallback: self.unresolved_code_fallback,
            current: RwLock::new(Arc::new(Generation::new(
                Arc::new(Catalog::empty()),
                self.default_locale,
                false,
            ))),
            reload_lock: tokio::sync::Mutex::new(()),
        })
    }
}
