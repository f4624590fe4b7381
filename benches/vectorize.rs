use burn_sentiment::pipelines::text_classification::{standardize, TextVectorizer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const REVIEWS: &[&str] = &[
    "I really enjoyed watching this,  I would definitely watch it again!",
    "Worst one so far, not a good experience. The music was good though",
    "In some bizarre way, this film just clicked for me...",
    "A film that utterly lacked any substance.<br /><br />There was promise at the beginning.",
    "Is this movie terrible? Absolutely not. Is this movie great? Absolutely not.",
];

fn corpus(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| format!("{} Review number {}.", REVIEWS[i % REVIEWS.len()], i))
        .collect()
}

fn bench_standardize(c: &mut Criterion) {
    c.bench_function("standardize", |b| {
        b.iter(|| {
            for review in REVIEWS {
                black_box(standardize(black_box(review)));
            }
        })
    });
}

fn bench_adapt(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapt");

    for size in [100, 1_000, 10_000] {
        let texts = corpus(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &texts, |b, texts| {
            b.iter(|| {
                let mut vectorizer = TextVectorizer::new(10_000, 250);
                vectorizer.adapt(texts.iter());
                black_box(vectorizer.vocab_size())
            })
        });
    }

    group.finish();
}

fn bench_vectorize(c: &mut Criterion) {
    let texts = corpus(1_000);

    let mut vectorizer = TextVectorizer::new(10_000, 250);
    vectorizer.adapt(texts.iter());

    let mut group = c.benchmark_group("vectorize");
    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("1000 reviews", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(vectorizer.vectorize(black_box(text)));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_standardize, bench_adapt, bench_vectorize);
criterion_main!(benches);
