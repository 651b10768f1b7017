use book_recommender::{Item, Snapshot, VectorizerConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "dragon", "empire", "murder", "detective", "romance", "galaxy", "robot", "kingdom", "war",
    "journey", "family", "secret", "island", "ocean", "magic", "city", "history", "science",
    "cooking", "garden", "poetry", "music", "winter", "summer", "revenge", "prophecy", "spy",
    "castle", "village", "mountain", "desert", "forest", "river", "witch", "pirate", "king",
];

const GENRES: &[&str] = &["Fiction", "Fantasy", "Mystery", "Romance", "History", "Cooking"];

/// Deterministic synthetic corpus, xorshift driven
fn synthetic_corpus(size: usize) -> Vec<Item> {
    let mut state = 0x2545_F491_4F6C_DD1D_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state as usize
    };
    (0..size)
        .map(|i| {
            let description: Vec<&str> = (0..24).map(|_| WORDS[next() % WORDS.len()]).collect();
            Item::new(
                format!("Book {i}"),
                format!("Author{}", next() % (size / 4 + 1)),
                GENRES[next() % GENRES.len()],
                description.join(" "),
            )
        })
        .collect()
}

fn build_and_query_benchmark(c: &mut Criterion) {
    let items = synthetic_corpus(2_000);
    let config = VectorizerConfig::default();

    c.bench_function("build_snapshot_2000", |b| {
        b.iter(|| Snapshot::build(black_box(items.clone()), &config))
    });

    let snapshot = match Snapshot::build(items, &config) {
        Ok(snapshot) => snapshot,
        Err(e) => panic!("snapshot build failed: {e}"),
    };

    c.bench_function("recommend_top5", |b| {
        b.iter(|| snapshot.recommend(black_box("Book 1000"), 5))
    });

    c.bench_function("recommend_top100", |b| {
        b.iter(|| snapshot.recommend(black_box("Book 42"), 100))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = build_and_query_benchmark
}
criterion_main!(benches);
