//! Integration tests for verba-sql

use verba_core::*;
use verba_sql::*;

async fn memory_store() -> TableMessageProvider {
    let pool = connect(&DatabaseConfig::new("sqlite::memory:")).await.unwrap();
    let store = TableMessageProvider::new(pool, TableConfig::default()).unwrap();
    store.ensure_table().await.unwrap();
    store
}

#[tokio::test]
async fn test_import_into_table_and_resolve() {
    let memory = InMemoryProvider::new()
        .with_message("app", None, "greeting", "hi")
        .with_message("app", Some(Locale::de()), "greeting", "hallo {0}")
        .with_message("errors", None, "not_found", "{0} was not found");

    let store = memory_store().await;
    let reports = Importer::new(&memory, &store).import_all().await.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(store.available_basenames().await.unwrap(), ["app", "errors"]);

    let source = MessageSource::builder().provider(store).build().unwrap();
    source.load().await.unwrap();

    assert_eq!(
        source.message("greeting", &["Welt".into()], Some(&Locale::de_at())).as_deref(),
        Some("hallo Welt")
    );
    assert_eq!(
        source.message("not_found", &["page".into()], Some(&Locale::fr())).as_deref(),
        Some("page was not found")
    );
}

#[tokio::test]
async fn test_table_round_trips_between_stores() {
    let first = memory_store().await;
    let second = memory_store().await;
    let messages = Messages::new()
        .with_message(None, "a", "1")
        .with_message(Some(Locale::en_gb()), "a", "one")
        .with_message(Some(Locale::new("", "CH", "")), "a", "eins");
    first.set_messages("app", &messages).await.unwrap();

    Importer::new(&first, &second).import_basename("app").await.unwrap();
    assert_eq!(second.messages("app").await.unwrap(), messages);
}

#[tokio::test]
async fn test_missing_table_fails_load() {
    let pool = connect(&DatabaseConfig::new("sqlite::memory:")).await.unwrap();
    let store = TableMessageProvider::new(pool, TableConfig::default()).unwrap();
    let source = MessageSource::builder().provider(store).build().unwrap();

    let err = source.load().await.unwrap_err();
    assert!(err.is_initialization());
    assert!(!source.is_loaded());
}
