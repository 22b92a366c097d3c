//! Zip archive output
//!
//! [`ZipAcceptor`] is a write-only message store: messages handed to it are
//! rendered as `.properties` entries and packed into a ZIP archive on
//! [`ZipAcceptor::finish`].

use crate::naming::{self, locale_of};
use crate::{Encoding, FileError, FileResult, properties};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;
use verba_core::locale::describe;
use verba_core::{MessageAcceptor, Messages, Result};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Compression level for archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression (store only)
    None,
    /// Fast compression
    Fast,
    /// Default compression
    #[default]
    Default,
    /// Best compression (slowest)
    Best,
}

impl CompressionLevel {
    fn to_options(self) -> SimpleFileOptions {
        match self {
            Self::None => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            Self::Fast => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(1)),
            Self::Default => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(6)),
            Self::Best => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(9)),
        }
    }
}

/// Collects message files and packs them into a ZIP archive.
///
/// Entries are named like the files of a
/// [`FileSystemProvider`](crate::FileSystemProvider), so unpacking an
/// archive into a directory yields a readable store.
#[derive(Debug, Default)]
pub struct ZipAcceptor {
    entries: Mutex<BTreeMap<String, Bytes>>,
    encoding: Encoding,
    compression: CompressionLevel,
    comment: Option<String>,
}

impl ZipAcceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoding of the entries (ISO-8859-1 by default).
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set compression level
    pub fn compression(mut self, level: CompressionLevel) -> Self {
        self.compression = level;
        self
    }

    /// Set archive comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Entry names collected so far, sorted.
    pub fn entry_names(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    fn render(&self, basename: &str, messages: &Messages) -> FileResult<Vec<(String, Bytes)>> {
        messages
            .locales()
            .map(|locale| {
                let comment = format!("messages for basename {} and locale {}", basename, describe(locale));
                let entries = messages
                    .locale_messages(locale)
                    .into_iter()
                    .flatten()
                    .map(|(key, text)| (key.as_str(), text.as_str()));
                let text = properties::write(Some(&comment), entries, self.encoding);
                Ok((naming::file_name(basename, locale), Bytes::from(self.encoding.encode(&text)?)))
            })
            .collect()
    }

    /// Build the ZIP archive from the collected entries.
    pub fn finish(&self) -> FileResult<Bytes> {
        let entries = self.entries.lock();
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = self.compression.to_options();

        for (name, data) in entries.iter() {
            zip.start_file(name.clone(), options)
                .map_err(|e| FileError::Archive(format!("Failed to add file {}: {}", name, e)))?;
            zip.write_all(data)
                .map_err(|e| FileError::Archive(format!("Failed to write {}: {}", name, e)))?;
        }

        if let Some(comment) = &self.comment {
            zip.set_comment(comment.as_str());
        }

        zip.finish()
            .map_err(|e| FileError::Archive(format!("Failed to finalize archive: {}", e)))?;

        verba_log::info!(target: "verba::archive", "packed {} message files", entries.len());
        Ok(Bytes::from(buffer.into_inner()))
    }

    /// Build the archive and write it to `path`.
    pub async fn finish_to_file(&self, path: impl AsRef<Path>) -> FileResult<()> {
        let data = self.finish()?;
        tokio::fs::write(path, &data).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageAcceptor for ZipAcceptor {
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()> {
        let rendered = self.render(basename, messages)?;

        let mut entries = self.entries.lock();
        entries.retain(|name, _| locale_of(basename, name).is_none());
        entries.extend(rendered);
        Ok(())
    }
}
