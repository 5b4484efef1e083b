//! Criterion benchmarks for Chatterbox.
//!
//! Covers the per-utterance path (normalization and answering) and the
//! start-up path (training on a synthetic corpus).

use std::hint::black_box;

use chatterbox::analysis::Normalizer;
use chatterbox::config::ResponderConfig;
use chatterbox::corpus::Corpus;
use chatterbox::responder::Responder;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const WORDS: &[&str] = &[
    "how", "what", "when", "where", "can't", "i'm", "you", "your", "order", "refund", "shipping",
    "account", "password", "reset", "delivery", "late", "price", "discount", "help", "please",
    "cancel", "change", "address", "email", "store", "hours", "open", "today", "it's", "broken",
];

/// Generate a synthetic corpus with `answers` distinct answers.
fn generate_corpus(count: usize, answers: usize) -> Corpus {
    Corpus::from_pairs((0..count).map(|i| {
        let length = 3 + (i % 6);
        let question = (0..length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]) // Pseudo-random distribution
            .collect::<Vec<_>>()
            .join(" ");
        (format!("{question}?"), format!("answer {}", i % answers))
    }))
}

/// Benchmark utterance normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = Normalizer::new(None).unwrap();
    let corpus = generate_corpus(1000, 50);
    let questions: Vec<&str> = corpus.entries().iter().map(|e| e.question.as_str()).collect();

    group.bench_function("normalize_single", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box("I can't reset my password, it's broken!"))))
    });

    group.throughput(Throughput::Elements(questions.len() as u64));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| black_box(normalizer.normalize_batch(black_box(questions.as_slice()))))
    });

    group.finish();
}

/// Benchmark answering against a trained responder.
fn bench_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("respond");

    let responder = Responder::train(&generate_corpus(1000, 50), &ResponderConfig::default()).unwrap();

    group.bench_function("known_words", |b| {
        b.iter(|| black_box(responder.get_response(black_box("how can i change my delivery address"))))
    });
    group.bench_function("unknown_words", |b| {
        b.iter(|| black_box(responder.get_response(black_box("zzqxw flibberjabber"))))
    });

    group.finish();
}

/// Benchmark training at several corpus sizes.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    for size in [100, 1000, 5000] {
        let corpus = generate_corpus(size, size / 10);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &corpus, |b, corpus| {
            b.iter(|| black_box(Responder::train(corpus, &ResponderConfig::default()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_respond, bench_training);
criterion_main!(benches);
