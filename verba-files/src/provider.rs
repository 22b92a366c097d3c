//! Directory-backed message store

use crate::naming::{self, basename_of, locale_of};
use crate::{Encoding, FileError, FileResult, properties};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use verba_core::locale::describe;
use verba_core::{Locale, MessageAcceptor, MessageProvider, Messages, Result};

/// Reads and writes one `.properties` file per basename and locale in a
/// single directory.
///
/// # Example
///
/// ```rust,no_run
/// use verba_files::{Encoding, FileSystemProvider};
///
/// let store = FileSystemProvider::with_encoding("i18n", Encoding::Utf8)?;
/// # Ok::<(), verba_core::MessageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemProvider {
    base_dir: PathBuf,
    encoding: Encoding,
}

impl FileSystemProvider {
    /// Store over `base_dir` using ISO-8859-1.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_encoding(base_dir, Encoding::default())
    }

    /// Fails with a configuration error unless `base_dir` is an existing
    /// directory.
    pub fn with_encoding(base_dir: impl Into<PathBuf>, encoding: Encoding) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.is_dir() {
            return Err(FileError::NotADirectory(format!(
                "{} does not exist or is not a directory",
                base_dir.display()
            ))
            .into());
        }

        Ok(Self { base_dir, encoding })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Path of the file holding `(basename, locale)`.
    pub fn file_path(&self, basename: &str, locale: Option<&Locale>) -> PathBuf {
        self.base_dir.join(naming::file_name(basename, locale))
    }

    /// Names of all regular `.properties` files, sorted.
    async fn message_files(&self) -> FileResult<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str() {
                Some(name) if naming::stem(name).is_some() => names.push(name.to_string()),
                _ => {}
            }
        }

        names.sort();
        Ok(names)
    }

    /// Files of `basename` with their locales.
    async fn basename_files(&self, basename: &str) -> FileResult<Vec<(String, Option<Locale>)>> {
        let files = self.message_files().await?;
        Ok(files
            .into_iter()
            .filter_map(|name| {
                let locale = locale_of(basename, &name);
                if locale.is_none() && name.starts_with(&format!("{}_", basename)) {
                    verba_log::warn!(target: "verba::files", "skipping {}: no valid locale suffix", name);
                }
                locale.map(|locale| (name, locale))
            })
            .collect())
    }

    async fn read_file(&self, name: &str) -> FileResult<std::collections::BTreeMap<String, String>> {
        let bytes = tokio::fs::read(self.base_dir.join(name)).await?;
        let text = self.encoding.decode(&bytes)?;
        properties::parse(&text)
    }

    async fn write_messages(&self, basename: &str, messages: &Messages) -> FileResult<()> {
        // refuse before touching anything
        for locale in messages.locales() {
            let path = self.file_path(basename, locale);
            if path.is_dir() {
                return Err(FileError::PathIsDirectory {
                    path: path.display().to_string(),
                });
            }
        }

        for locale in messages.locales() {
            let path = self.file_path(basename, locale);
            let comment = format!("messages for basename {} and locale {}", basename, describe(locale));
            let entries = messages
                .locale_messages(locale)
                .into_iter()
                .flatten()
                .map(|(key, text)| (key.as_str(), text.as_str()));

            let text = properties::write(Some(&comment), entries, self.encoding);
            tokio::fs::write(&path, self.encoding.encode(&text)?).await?;
            verba_log::debug!(target: "verba::files", "wrote {}", path.display());
        }

        for (name, locale) in self.basename_files(basename).await? {
            if messages.locale_messages(locale.as_ref()).is_none() {
                tokio::fs::remove_file(self.base_dir.join(&name)).await?;
                verba_log::debug!(target: "verba::files", "removed stale {}", name);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl MessageProvider for FileSystemProvider {
    async fn available_basenames(&self) -> Result<Vec<String>> {
        let files = self.message_files().await?;
        let basenames: BTreeSet<&str> = files.iter().filter_map(|name| basename_of(name)).collect();
        Ok(basenames.into_iter().map(String::from).collect())
    }

    async fn messages(&self, basename: &str) -> Result<Messages> {
        let mut messages = Messages::new();
        for (name, locale) in self.basename_files(basename).await? {
            let texts = self.read_file(&name).await?;
            messages.set_locale_messages(locale, texts);
        }

        verba_log::debug!(
            target: "verba::files",
            "read {} messages for basename '{}' from {}",
            messages.len(),
            basename,
            self.base_dir.display()
        );
        Ok(messages)
    }
}

#[async_trait]
impl MessageAcceptor for FileSystemProvider {
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()> {
        self.write_messages(basename, messages).await?;
        Ok(())
    }
}
