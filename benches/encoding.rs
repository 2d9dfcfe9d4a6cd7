use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use map2xml::{
    from_json_slice, from_json_str, to_string, to_string_with_options, to_value, EncoderOptions,
    FloatMode, Value,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct Reading {
    #[serde(rename = "-sensor")]
    sensor: String,
    #[serde(rename = "-unit")]
    unit: String,
    #[serde(rename = "#text")]
    value: f64,
}

#[derive(Serialize, Clone)]
struct Telemetry {
    device: String,
    firmware: String,
    online: bool,
    reading: Vec<Reading>,
}

fn telemetry(readings: usize) -> Value {
    let telemetry = Telemetry {
        device: "press-07".to_string(),
        firmware: "2.4.1".to_string(),
        online: true,
        reading: (0..readings)
            .map(|i| Reading {
                sensor: format!("s{}", i),
                unit: "bar".to_string(),
                value: i as f64 * 0.25,
            })
            .collect(),
    };
    to_value(&telemetry).unwrap()
}

fn benchmark_encode_small(c: &mut Criterion) {
    let doc = from_json_str(r#"{"temperature": 23.5, "humidity": 40, "-unit": "C"}"#).unwrap();

    c.bench_function("encode_small_object", |b| {
        b.iter(|| to_string(black_box(&doc)))
    });
}

fn benchmark_encode_readings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_readings");

    for size in [10, 100, 1000].iter() {
        let doc = telemetry(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }

    group.finish();
}

fn benchmark_float_modes(c: &mut Criterion) {
    let doc = telemetry(100);
    let mut group = c.benchmark_group("float_mode");

    for (name, mode) in [
        ("default", FloatMode::Default),
        ("scientific", FloatMode::Scientific),
        ("fixed", FloatMode::Fixed),
    ] {
        let options = EncoderOptions::new().with_float_mode(mode);
        group.bench_function(name, |b| {
            b.iter(|| to_string_with_options(black_box(&doc), options.clone(), None))
        });
    }

    group.finish();
}

fn benchmark_escaping(c: &mut Criterion) {
    let text = "<tag attr=\"x\">a & b</tag>".repeat(20);
    let doc = from_json_str(&format!(r#"{{"note": {:?}}}"#, text)).unwrap();

    c.bench_function("encode_escaped_text", |b| {
        b.iter(|| to_string(black_box(&doc)))
    });
}

fn benchmark_parse_and_encode(c: &mut Criterion) {
    let payload = br#"{"line": {"-id": 3, "station": [{"t": 20.1}, {"t": 20.4}, {"t": 21.0}], "state": "run"}}"#;

    c.bench_function("parse_and_encode_payload", |b| {
        b.iter(|| {
            let value = from_json_slice(black_box(payload)).unwrap();
            to_string(&value)
        })
    });
}

criterion_group!(
    benches,
    benchmark_encode_small,
    benchmark_encode_readings,
    benchmark_float_modes,
    benchmark_escaping,
    benchmark_parse_and_encode
);
criterion_main!(benches);
