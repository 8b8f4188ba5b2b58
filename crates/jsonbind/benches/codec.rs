#![allow(missing_docs)]
//! Parse, write and bind throughput, with `serde_json` as a baseline.

use std::{fmt::Write, hint::black_box};

use criterion::{
    BenchmarkGroup, Criterion, Throughput, criterion_group, criterion_main, measurement::WallTime,
};
use jsonbind::{BindContext, Bindable, TypeDescriptor};
use serde_json::Value as SerdeValue;

struct Dataset {
    name: &'static str,
    json: String,
}

fn products(count: usize) -> String {
    let mut out = String::from("[");
    for i in 0..count {
        if i > 0 {
            out.push(',');
        }
        write!(
            out,
            r#"{{"id": {i}, "name": "Product é {i}", "price": {i}.25, "inStock": {}, "tags": ["a", "b/c", "d\n"]}}"#,
            i % 2 == 0
        )
        .unwrap();
    }
    out.push(']');
    out
}

fn ints(count: usize) -> String {
    let items: Vec<String> = (0..count).map(|i| (i * 7919).to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn nested(depth: usize) -> String {
    let mut out = String::new();
    for _ in 0..depth {
        out.push_str(r#"{"child": "#);
    }
    out.push_str("null");
    for _ in 0..depth {
        out.push('}');
    }
    out
}

fn datasets() -> Vec<Dataset> {
    vec![
        Dataset {
            name: "products_1k",
            json: products(1_000),
        },
        Dataset {
            name: "ints_10k",
            json: ints(10_000),
        },
        Dataset {
            name: "nested_200",
            json: nested(200),
        },
    ]
}

fn bench_dataset(cfg: &Dataset, c: &mut Criterion) {
    let mut group = c.benchmark_group(cfg.name);
    group.throughput(Throughput::Bytes(cfg.json.len() as u64));

    parse_jsonbind(&cfg.json, &mut group);
    parse_serde(&cfg.json, &mut group);

    let value = jsonbind::parse(&cfg.json).unwrap();
    group.bench_function("jsonbind_write", |b| {
        b.iter(|| black_box(jsonbind::write(black_box(&value)).unwrap()));
    });

    let serde_value: SerdeValue = serde_json::from_str(&cfg.json).unwrap();
    group.bench_function("serde_write", |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&serde_value)).unwrap()));
    });

    group.finish();
}

fn parse_jsonbind(json: &str, group: &mut BenchmarkGroup<'_, WallTime>) {
    group.bench_function("jsonbind_parse", |b| {
        b.iter(|| black_box(jsonbind::parse(black_box(json)).unwrap()));
    });
}

fn parse_serde(json: &str, group: &mut BenchmarkGroup<'_, WallTime>) {
    group.bench_function("serde_parse", |b| {
        b.iter(|| black_box(serde_json::from_str::<SerdeValue>(black_box(json)).unwrap()));
    });
}

#[derive(Default)]
struct Product {
    id: i64,
    name: String,
    price: f64,
    in_stock: bool,
    tags: Vec<String>,
}

impl Bindable for Product {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::setter_bound("Product", Self::default)
            .setter("id", |p, v: i64| p.id = v)
            .setter("name", |p, v: String| p.name = v)
            .setter("price", |p, v: f64| p.price = v)
            .setter("inStock", |p, v: bool| p.in_stock = v)
            .setter("tags", |p, v: Vec<String>| p.tags = v)
    }
}

struct Shelf {
    items: Vec<Product>,
}

impl Bindable for Shelf {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::constructed("Shelf", |ctx: &mut BindContext<'_>| {
            Ok(Shelf {
                items: ctx.get_value("items")?,
            })
        })
        .field::<Vec<Product>>("items")
    }
}

fn bind_benches(c: &mut Criterion) {
    let json = format!(r#"{{"items": {}}}"#, products(1_000));
    let value = jsonbind::parse(&json).unwrap();

    let mut group = c.benchmark_group("bind");
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("constructed_and_setters", |b| {
        b.iter(|| {
            let shelf: Shelf = jsonbind::bind(black_box(&value)).unwrap();
            black_box(shelf.items.len())
        });
    });
    group.bench_function("parse_as", |b| {
        b.iter(|| black_box(jsonbind::parse_as::<Shelf>(black_box(&json)).unwrap()));
    });
    group.finish();

    // Touch every field so the setters are not optimized away.
    let shelf: Shelf = jsonbind::bind(&value).unwrap();
    let checksum: f64 = shelf
        .items
        .iter()
        .map(|p| p.price + p.id as f64 + p.name.len() as f64 + p.tags.len() as f64)
        .sum::<f64>()
        + f64::from(u8::from(shelf.items.iter().any(|p| p.in_stock)));
    black_box(checksum);
}

fn codec_benches(c: &mut Criterion) {
    for cfg in datasets() {
        bench_dataset(&cfg, c);
    }
}

criterion_group!(benches, codec_benches, bind_benches);
criterion_main!(benches);
