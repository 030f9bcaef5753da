use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typefall::vocab::source::WordSource;
use typefall::vocab::{Corpus, VocabularyEntry};

fn make_corpus(size: usize) -> Corpus {
    let entries = (0..size)
        .map(|i| VocabularyEntry {
            english: format!("word{i}"),
            translation: format!("từ {i}"),
            word_type: "noun".to_string(),
            example: String::new(),
            example_translation: String::new(),
        })
        .collect();
    Corpus::new(entries).unwrap()
}

fn bench_full_cycle(c: &mut Criterion) {
    for size in [40, 5_000] {
        let corpus = make_corpus(size);
        c.bench_function(&format!("word_source full cycle ({size} words)"), |b| {
            b.iter(|| {
                let mut source = WordSource::with_seed(corpus.clone(), 42).unwrap();
                for _ in 0..size {
                    black_box(source.next_index());
                }
            })
        });
    }
}

fn bench_next_late_in_cycle(c: &mut Criterion) {
    // Most entries already served, so picks come from the unserved complement
    let size = 5_000;
    let corpus = make_corpus(size);

    c.bench_function("word_source next (4990/5000 served)", |b| {
        b.iter_batched(
            || {
                let mut source = WordSource::with_seed(corpus.clone(), 7).unwrap();
                for _ in 0..size - 10 {
                    source.next_index();
                }
                source
            },
            |mut source| black_box(source.next()),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_full_cycle, bench_next_late_in_cycle);
criterion_main!(benches);
