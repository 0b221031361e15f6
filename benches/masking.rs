//! Benchmarks for login input handling.
//!
//! These benchmarks measure regex performance for identifier validation
//! against a plain byte-scan alternative, and the cost of the national ID
//! display mask.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::Regex;

fn bench_regex_compile(c: &mut Criterion) {
    c.bench_function("regex_compile_formatted_id_pattern", |b| {
        b.iter(|| Regex::new(black_box(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$")))
    });
}

fn bench_regex_match(c: &mut Criterion) {
    let re = Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").unwrap();

    c.bench_function("regex_match_formatted_id", |b| {
        b.iter(|| re.is_match(black_box("123.456.789-01")))
    });
}

fn bench_byte_scan(c: &mut Criterion) {
    let value = "12345678901";

    c.bench_function("byte_scan_raw_id", |b| {
        b.iter(|| {
            let value = black_box(value);
            value.len() == 11 && value.bytes().all(|byte| byte.is_ascii_digit())
        })
    });
}

fn bench_mask(c: &mut Criterion) {
    let value = "12345678901";

    c.bench_function("mask_identifier_input", |b| {
        b.iter(|| {
            let mut masked = String::with_capacity(14);
            let digits = black_box(value)
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(11);
            for (position, digit) in digits.enumerate() {
                match position {
                    3 | 6 => masked.push('.'),
                    9 => masked.push('-'),
                    _ => (),
                }
                masked.push(digit);
            }
            masked
        })
    });
}

criterion_group!(
    benches,
    bench_regex_compile,
    bench_regex_match,
    bench_byte_scan,
    bench_mask
);
criterion_main!(benches);
