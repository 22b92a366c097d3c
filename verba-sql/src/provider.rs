//! Message store over a single database table.

use crate::{SqlResult, Statements, TableConfig};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::AnyPool;
use verba_core::{Locale, MessageAcceptor, MessageProvider, Messages, Result};
use verba_log::{debug, info};

/// Reads and writes messages stored one row per basename, locale and key.
///
/// Locale parts that are `NULL` or empty count as absent. A row with
/// neither language nor country belongs to the base locale.
///
/// # Example
///
/// ```rust,ignore
/// use verba_sql::{DatabaseConfig, TableConfig, TableMessageProvider, connect};
///
/// let pool = connect(&DatabaseConfig::new("sqlite:messages.db")).await?;
/// let store = TableMessageProvider::new(pool, TableConfig::default())?;
/// store.ensure_table().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TableMessageProvider {
    pool: AnyPool,
    config: TableConfig,
    statements: Statements,
}

impl TableMessageProvider {
    /// Store over `pool` with the given table layout.
    pub fn new(pool: AnyPool, config: TableConfig) -> SqlResult<Self> {
        config.validate()?;
        let statements = Statements::new(&config);
        Ok(Self {
            pool,
            config,
            statements,
        })
    }

    /// The table layout.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The rendered statements.
    pub fn statements(&self) -> &Statements {
        &self.statements
    }

    /// The connection pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Create the message table if it does not exist yet.
    pub async fn ensure_table(&self) -> SqlResult<()> {
        debug!("Ensuring message table {}", self.config.table_name);
        sqlx::query(&self.statements.create_table).execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_basenames(&self) -> SqlResult<Vec<String>> {
        let rows = sqlx::query(&self.statements.select_basenames)
            .fetch_all(&self.pool)
            .await?;

        let mut basenames = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(basename) = present(row.try_get(0)?) {
                basenames.push(basename);
            }
        }
        Ok(basenames)
    }

    async fn fetch_messages(&self, basename: &str) -> SqlResult<Messages> {
        let rows = sqlx::query(&self.statements.select_messages)
            .bind(basename)
            .fetch_all(&self.pool)
            .await?;

        let mut messages = Messages::new();
        for row in rows {
            let locale = row_locale(row.try_get(0)?, row.try_get(1)?, row.try_get(2)?);
            let key: String = row.try_get(3)?;
            let text: Option<String> = row.try_get(4)?;
            messages.add(locale, key, text.unwrap_or_default());
        }

        debug!(
            "Read {} messages in {} locales for basename '{}'",
            messages.len(),
            messages.locale_count(),
            basename
        );
        Ok(messages)
    }

    async fn replace_messages(&self, basename: &str, messages: &Messages) -> SqlResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&self.statements.delete_basename)
            .bind(basename)
            .execute(&mut *tx)
            .await?;

        for (locale, key, text) in messages.iter() {
            let (language, country, variant) = match locale {
                Some(locale) => (locale.language.as_str(), locale.country.as_str(), locale.variant.as_str()),
                None => ("", "", ""),
            };
            sqlx::query(&self.statements.insert_message)
                .bind(basename)
                .bind(language)
                .bind(country)
                .bind(variant)
                .bind(key)
                .bind(text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(
            "Stored {} messages for basename '{}' in table {}",
            messages.len(),
            basename,
            self.config.table_name
        );
        Ok(())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn row_locale(language: Option<String>, country: Option<String>, variant: Option<String>) -> Option<Locale> {
    let language = present(language);
    let country = present(country);
    if language.is_none() && country.is_none() {
        return None;
    }
    Some(Locale::new(
        language.unwrap_or_default(),
        country.unwrap_or_default(),
        present(variant).unwrap_or_default(),
    ))
}

#[async_trait]
impl MessageProvider for TableMessageProvider {
    async fn available_basenames(&self) -> Result<Vec<String>> {
        Ok(self.fetch_basenames().await?)
    }

    async fn messages(&self, basename: &str) -> Result<Messages> {
        Ok(self.fetch_messages(basename).await?)
    }
}

#[async_trait]
impl MessageAcceptor for TableMessageProvider {
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()> {
        self.replace_messages(basename, messages).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseConfig, connect};

    async fn store(config: TableConfig) -> TableMessageProvider {
        let pool = connect(&DatabaseConfig::new("sqlite::memory:")).await.unwrap();
        let store = TableMessageProvider::new(pool, config).unwrap();
        store.ensure_table().await.unwrap();
        store
    }

    #[test]
    fn test_row_locale() {
        assert_eq!(row_locale(None, None, None), None);
        assert_eq!(row_locale(Some(String::new()), Some(String::new()), Some("X".into())), None);
        assert_eq!(row_locale(Some("de".into()), None, None), Some(Locale::de()));
        assert_eq!(
            row_locale(None, Some("CH".into()), None),
            Some(Locale::new("", "CH", ""))
        );
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = store(TableConfig::default()).await;
        let messages = Messages::new()
            .with_message(None, "greeting", "hi")
            .with_message(Some(Locale::de_de()), "greeting", "hallo")
            .with_message(Some(Locale::new("en", "US", "POSIX")), "greeting", "howdy");

        store.set_messages("app", &messages).await.unwrap();

        assert_eq!(store.available_basenames().await.unwrap(), ["app"]);
        assert_eq!(store.messages("app").await.unwrap(), messages);
    }

    #[tokio::test]
    async fn test_set_replaces_basename() {
        let store = store(TableConfig::default()).await;
        store
            .set_messages("app", &Messages::new().with_message(None, "old", "x"))
            .await
            .unwrap();
        store
            .set_messages("other", &Messages::new().with_message(None, "keep", "y"))
            .await
            .unwrap();

        let replacement = Messages::new().with_message(Some(Locale::fr()), "new", "z");
        store.set_messages("app", &replacement).await.unwrap();

        assert_eq!(store.messages("app").await.unwrap(), replacement);
        assert!(store.messages("other").await.unwrap().has(None, "keep"));
    }

    #[tokio::test]
    async fn test_null_columns_read_as_absent() {
        let store = store(TableConfig::default()).await;
        sqlx::query(
            "INSERT INTO `Message` (`basename`, `language`, `country`, `variant`, `key`, `message`) \
             VALUES ('app', NULL, NULL, NULL, 'a', 'base'), \
                    ('app', 'de', NULL, '', 'b', NULL)",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let messages = store.messages("app").await.unwrap();
        assert_eq!(messages.get(None, "a"), Some("base"));
        assert_eq!(messages.get(Some(&Locale::de()), "b"), Some(""));
    }

    #[tokio::test]
    async fn test_custom_layout_with_double_quotes() {
        let config = TableConfig::new()
            .table_name("texts")
            .key_column("code")
            .message_column("body")
            .delimiter("\"");
        let store = store(config).await;

        let messages = Messages::new().with_message(Some(Locale::ja_jp()), "title", "タイトル");
        store.set_messages("ui", &messages).await.unwrap();

        let row = sqlx::query("SELECT code, body FROM texts")
            .fetch_one(store.pool())
            .await
            .unwrap();
        let code: String = row.try_get(0).unwrap();
        assert_eq!(code, "title");
        assert_eq!(store.messages("ui").await.unwrap(), messages);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let pool = connect(&DatabaseConfig::new("sqlite::memory:")).await.unwrap();
        let err = TableMessageProvider::new(pool, TableConfig::new().key_column("")).unwrap_err();
        assert!(err.to_string().contains("key_column"));
    }
}
