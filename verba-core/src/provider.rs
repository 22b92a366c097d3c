//! Message store traits.

use crate::{Messages, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A readable message store.
#[async_trait]
pub trait MessageProvider: Send + Sync {
    /// Basenames the store currently holds messages for.
    ///
    /// Order is not significant; callers sort when they need a stable order.
    async fn available_basenames(&self) -> Result<Vec<String>>;

    /// All messages of `basename`, for every locale.
    ///
    /// An unknown basename yields an empty [`Messages`], not an error.
    async fn messages(&self, basename: &str) -> Result<Messages>;
}

/// A writable message store.
#[async_trait]
pub trait MessageAcceptor: Send + Sync {
    /// Replace everything stored for `basename` with `messages`.
    ///
    /// When this returns an error the caller must not assume any part of the
    /// write took effect.
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()>;
}

#[async_trait]
impl<T: MessageProvider + ?Sized> MessageProvider for Arc<T> {
    async fn available_basenames(&self) -> Result<Vec<String>> {
        (**self).available_basenames().await
    }

    async fn messages(&self, basename: &str) -> Result<Messages> {
        (**self).messages(basename).await
    }
}

#[async_trait]
impl<T: MessageAcceptor + ?Sized> MessageAcceptor for Arc<T> {
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()> {
        (**self).set_messages(basename, messages).await
    }
}
