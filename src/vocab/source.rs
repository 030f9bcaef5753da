use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::GameError;
use crate::vocab::{Corpus, VocabularyEntry};

/// Serves corpus entries in random order without repeats until every entry
/// has been served once, then starts a new cycle.
pub struct WordSource {
    corpus: Corpus,
    served: HashSet<usize>,
    last: Option<usize>,
    rng: SmallRng,
}

impl WordSource {
    pub fn new(corpus: Corpus) -> Result<Self, GameError> {
        Self::with_rng(corpus, SmallRng::from_entropy())
    }

    pub fn with_seed(corpus: Corpus, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(corpus, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(corpus: Corpus, rng: SmallRng) -> Result<Self, GameError> {
        if corpus.is_empty() {
            return Err(GameError::EmptyCorpus);
        }
        Ok(Self {
            corpus,
            served: HashSet::new(),
            last: None,
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn served_count(&self) -> usize {
        self.served.len()
    }

    pub fn next(&mut self) -> VocabularyEntry {
        let index = self.next_index();
        self.corpus.entries()[index].clone()
    }

    pub fn next_index(&mut self) -> usize {
        let total = self.corpus.len();
        if self.served.len() >= total {
            self.served.clear();
        }

        let index = if total == 1 {
            0
        } else if self.served.len() < total / 2 {
            self.pick_by_rejection(total)
        } else {
            self.pick_from_complement(total)
        };

        self.served.insert(index);
        self.last = Some(index);
        index
    }

    // Fewer than half the entries are served, so each draw succeeds with p > 1/2.
    fn pick_by_rejection(&mut self, total: usize) -> usize {
        loop {
            let candidate = self.rng.gen_range(0..total);
            if self.is_candidate(candidate) {
                return candidate;
            }
        }
    }

    fn pick_from_complement(&mut self, total: usize) -> usize {
        // Non-empty: some index is unserved, and mid-cycle `last` is always served.
        let remaining: Vec<usize> = (0..total).filter(|&i| self.is_candidate(i)).collect();
        debug_assert!(!remaining.is_empty());
        remaining[self.rng.gen_range(0..remaining.len())]
    }

    fn is_candidate(&self, index: usize) -> bool {
        // `last` also guards the first pick after an exhaustion reset
        !self.served.contains(&index) && Some(index) != self.last
    }
}
