//! Integration tests for verba-core

use std::sync::Arc;
use verba_core::*;

fn loc(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

async fn loaded(store: InMemoryProvider, default: Option<Locale>, fallback: bool) -> MessageSource {
    let source = MessageSource::builder()
        .provider(store)
        .default_locale(default)
        .unresolved_code_fallback(fallback)
        .build()
        .unwrap();
    source.load().await.unwrap();
    source
}

#[tokio::test]
async fn test_greeting_scenario() {
    let store = InMemoryProvider::new()
        .with_message("app", None, "greeting", "hi")
        .with_message("app", Some(loc("de_DE")), "greeting", "hallo");
    let source = loaded(store, None, false).await;

    assert_eq!(source.message("greeting", &[], Some(&loc("de_DE"))).as_deref(), Some("hallo"));
    assert_eq!(source.message("greeting", &[], Some(&loc("de_AT"))).as_deref(), Some("hi"));
    assert_eq!(source.message("greeting", &[], None).as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_reload_is_idempotent() {
    let store = Arc::new(
        InMemoryProvider::new()
            .with_message("app", None, "title", "Title")
            .with_message("app", Some(loc("de")), "yes", "ja")
            .with_message("app", Some(loc("en")), "ok", "OK"),
    );
    let source = MessageSource::builder()
        .shared_provider(store)
        .default_locale(Some(loc("en_US")))
        .build()
        .unwrap();

    let cases = [
        ("title", Some("fr_FR")),
        ("yes", Some("de_AT")),
        ("ok", Some("fr_FR")),
        ("ok", None),
        ("missing", Some("de")),
    ];

    source.load().await.unwrap();
    let first: Vec<Option<String>> = cases
        .iter()
        .map(|(code, tag)| source.message(code, &[], tag.map(loc).as_ref()))
        .collect();

    source.reload().await.unwrap();
    let second: Vec<Option<String>> = cases
        .iter()
        .map(|(code, tag)| source.message(code, &[], tag.map(loc).as_ref()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(
        first,
        [
            Some("Title".to_string()),
            Some("ja".to_string()),
            Some("OK".to_string()),
            None,
            None,
        ]
    );
}

#[tokio::test]
async fn test_fallback_policy() {
    let with = loaded(InMemoryProvider::new(), None, true).await;
    let without = loaded(InMemoryProvider::new(), None, false).await;

    for locale in [None, Some(loc("de")), Some(loc("ja_JP"))] {
        let template = with.resolve("missing.key", locale.as_ref()).unwrap();
        assert_eq!(template.format(&[]), "missing.key");
        assert!(without.resolve("missing.key", locale.as_ref()).is_none());
    }
}

#[tokio::test]
async fn test_formatting_follows_resolved_locale() {
    let store = InMemoryProvider::new()
        .with_message("shop", None, "total", "Total: {0,number,currency}")
        .with_message("shop", Some(loc("de")), "total", "Summe: {0,number,currency}")
        .with_message("shop", Some(loc("de_DE")), "date", "Datum: {0,date,long}");
    let source = loaded(store, Some(loc("en_US")), false).await;

    let de = source.message("total", &[1234.5.into()], Some(&loc("de_DE")));
    assert_eq!(de.as_deref(), Some("Summe: 1.234,50 ¤"));

    let base = source.message("total", &[1234.5.into()], Some(&loc("ja_JP")));
    assert_eq!(base.as_deref(), Some("Total: $1,234.50"));

    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let text = source.message("date", &[date.into()], Some(&loc("de_DE")));
    assert_eq!(text.as_deref(), Some("Datum: 1 March 2024"));
}

#[tokio::test]
async fn test_concurrent_resolution_during_reload() {
    let store = Arc::new(InMemoryProvider::new().with_message("app", None, "k", "v"));
    let source = Arc::new(
        MessageSource::builder()
            .shared_provider(store.clone())
            .build()
            .unwrap(),
    );
    source.load().await.unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                for _ in 0..200 {
                    let text = source.message("k", &[], Some(&Locale::de()));
                    assert!(matches!(text.as_deref(), Some("v") | Some("w")));
                }
            })
        })
        .collect();

    store
        .set_messages("app", &Messages::new().with_message(None, "k", "w"))
        .await
        .unwrap();
    source.reload().await.unwrap();

    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(source.message("k", &[], None).as_deref(), Some("w"));
}

#[test]
fn test_path_properties() {
    let tags = ["de", "de_DE", "de_DE_POSIX", "de__POSIX", "en", "en_US", "_DE", "ja_JP"];
    let defaults: Vec<Option<Locale>> = std::iter::once(None)
        .chain(tags.iter().map(|tag| Some(loc(tag))))
        .collect();

    for default in &defaults {
        assert_eq!(build_path(None, default.as_ref()), [Selector::base()]);

        for tag in tags {
            let path = build_path(Some(&loc(tag)), default.as_ref());
            assert_eq!(path.last(), Some(&Selector::base()));
            for (i, selector) in path.iter().enumerate() {
                assert!(!path[i + 1..].contains(selector), "{} / {:?}: {:?}", tag, default, path);
            }
        }
    }
}
