//! Resolution benchmarks for verba

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use verba::{FormatArg, InMemoryProvider, Locale, MessageSource, MessageTemplate, build_path};

fn loaded_source(rt: &tokio::runtime::Runtime) -> MessageSource {
    let mut store = InMemoryProvider::new();
    for i in 0..200 {
        let key = format!("key_{}", i);
        store = store
            .with_message("app", None, &key, format!("base {} {{0}}", i))
            .with_message("app", Some(Locale::de()), &key, format!("de {} {{0}}", i));
    }
    store = store.with_message("app", Some(Locale::de_de()), "key_0", "de_DE {0}");

    let source = MessageSource::builder()
        .provider(store)
        .default_locale(Some(Locale::en_us()))
        .build()
        .unwrap();
    rt.block_on(source.load()).unwrap();
    source
}

fn resolve_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let source = loaded_source(&rt);

    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));

    for (name, locale) in [
        ("exact", Locale::de_de()),
        ("language_fallback", Locale::de_at()),
        ("base_fallback", Locale::ja_jp()),
    ] {
        group.bench_with_input(BenchmarkId::new("key_0", name), &locale, |b, locale| {
            b.iter(|| black_box(source.resolve(black_box("key_0"), Some(locale))));
        });
    }

    group.bench_function("miss", |b| {
        b.iter(|| black_box(source.resolve(black_box("absent"), Some(&Locale::fr_fr()))));
    });

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");

    group.bench_function("compile", |b| {
        b.iter(|| MessageTemplate::compile(black_box("{0} has {1,number,integer} items"), None).unwrap());
    });

    let template = MessageTemplate::compile("{0} has {1,number,integer} items", Some(Locale::de_de())).unwrap();
    let args = [FormatArg::from("Ada"), FormatArg::from(12345)];
    group.bench_function("format", |b| {
        b.iter(|| black_box(template.format(black_box(&args))));
    });

    group.finish();
}

fn path_benchmark(c: &mut Criterion) {
    let default = Locale::en_us();
    c.bench_function("build_path", |b| {
        b.iter(|| build_path(black_box(Some(&Locale::new("de", "AT", "POSIX"))), Some(&default)));
    });
}

criterion_group!(benches, resolve_benchmark, format_benchmark, path_benchmark);
criterion_main!(benches);
