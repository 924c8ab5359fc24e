use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_ini::{from_str, load, load_into, to_string};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Serialize, Deserialize, Clone, Default)]
struct Server {
    host: String,
    port: u16,
    timeout: Duration,
}

#[derive(Serialize, Deserialize, Clone, Default)]
struct Database {
    url: String,
    pool: u32,
    replicas: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Default)]
struct Config {
    name: String,
    debug: bool,
    tags: Vec<String>,
    server: Server,
    database: Database,
}

fn sample_config() -> Config {
    Config {
        name: "service".to_string(),
        debug: false,
        tags: vec!["api".to_string(), "edge".to_string(), "eu".to_string()],
        server: Server {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timeout: Duration::from_secs(30),
        },
        database: Database {
            url: "postgres://localhost/app".to_string(),
            pool: 16,
            replicas: vec!["db1".to_string(), "db2".to_string()],
        },
    }
}

fn wide_text(sections: usize, keys: usize) -> String {
    let mut text = String::new();
    for s in 0..sections {
        text.push_str(&format!("[section{}]\n", s));
        for k in 0..keys {
            text.push_str(&format!("key{} = value {} ; note\n", k, k));
        }
    }
    text
}

fn benchmark_serialize_config(c: &mut Criterion) {
    let config = sample_config();

    c.bench_function("serialize_config", |b| {
        b.iter(|| to_string(black_box(&config)))
    });
}

fn benchmark_deserialize_config(c: &mut Criterion) {
    let text = to_string(&sample_config()).unwrap();

    c.bench_function("deserialize_config", |b| {
        b.iter(|| from_str::<Config>(black_box(&text)))
    });
}

fn benchmark_load_into(c: &mut Criterion) {
    let text = "debug = true\n[server]\nport = 9090\n";

    c.bench_function("load_into_config", |b| {
        b.iter(|| {
            let mut config = sample_config();
            load_into(black_box(text), &mut config)
        })
    });
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [1, 10, 100].iter() {
        let text = wide_text(*sections, 20);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &text, |b, text| {
            b.iter(|| load(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_map");

    for size in [10, 100, 1000].iter() {
        let map: BTreeMap<String, u64> = (0..*size as u64)
            .map(|i| (format!("key{}", i), i * 31))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, map| {
            b.iter(|| to_string(black_box(map)))
        });
    }
    group.finish();
}

fn benchmark_accessors(c: &mut Criterion) {
    let root = load(&wide_text(10, 20)).unwrap();

    c.bench_function("node_lookup", |b| {
        b.iter(|| {
            black_box(&root)
                .get_path(["section5", "key10"])
                .must_value("")
                .len()
        })
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let config = sample_config();

    c.bench_function("roundtrip_config", |b| {
        b.iter(|| {
            let text = to_string(black_box(&config)).unwrap();
            from_str::<Config>(&text).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_config,
    benchmark_deserialize_config,
    benchmark_load_into,
    benchmark_parse,
    benchmark_serialize_map,
    benchmark_accessors,
    benchmark_roundtrip
);
criterion_main!(benches);
