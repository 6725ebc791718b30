//! # Vocab Trainer

use core::cmp::{Ordering, Reverse};
use core::marker::PhantomData;

use dary_heap::OctonaryHeap;

use crate::errors::{PairmintError, Result};
use crate::training::CountType;
use crate::training::utility::{PairCountMap, SymbolBuf, pair_counts};
use crate::types::{PMHashSet, Pair, TokenType};
use crate::vocab::{BYTE_VOCAB_SIZE, MergeVocab};

/// A structured record of one completed merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStep<T: TokenType> {
    /// The 0-based merge index (the merge's rank).
    pub index: usize,

    /// The total number of merges requested.
    pub num_merges: usize,

    /// The merged pair.
    pub pair: Pair<T>,

    /// The minted token.
    pub token: T,

    /// The pair's occurrence count at selection time.
    pub count: u64,
}

/// An injectable sink for structured per-merge training records.
///
/// Blanket-implemented for closures; pass `&mut |step| ...` to
/// [`PairVocabTrainer::train_observed`] or
/// [`crate::tokenizer::BpeTokenizer::train_observed`].
pub trait MergeObserver<T: TokenType> {
    /// Called once after each completed merge step.
    fn on_merge(
        &mut self,
        step: &MergeStep<T>,
    );
}

impl<T: TokenType, F> MergeObserver<T> for F
where
    F: FnMut(&MergeStep<T>),
{
    fn on_merge(
        &mut self,
        step: &MergeStep<T>,
    ) {
        self(step)
    }
}

/// Options for [`PairVocabTrainer`].
#[derive(Debug, Clone)]
pub struct PairVocabTrainerOptions {
    /// The target vocab size; must be >= 256 (the size of the u8 space).
    pub vocab_size: usize,
}

impl PairVocabTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    ///
    /// ## Returns
    /// A new `PairVocabTrainerOptions` instance.
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }

    /// Sets the vocab size.
    ///
    /// ## Arguments
    /// * `vocab_size` - The desired vocabulary size.
    ///
    /// ## Returns
    /// The updated `PairVocabTrainerOptions` instance.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size }
    }

    /// Initializes a [`PairVocabTrainer`] from these options.
    ///
    /// ## Returns
    /// A new `PairVocabTrainer` instance.
    pub fn init<C: CountType>(self) -> PairVocabTrainer<C> {
        PairVocabTrainer::new(self)
    }
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Eq)]
struct MergeJob<T: TokenType, C: CountType> {
    /// The number of instances of this pair in the sequence.
    count: C,

    /// The pair to merge.
    pair: Pair<T>,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// The job key.
    ///
    /// Max-heap by count; tie-break to the lexicographically smallest
    /// pair. This is the trainer's fixed selection order: among equally
    /// frequent pairs, the smallest ``(left, right)`` wins (deterministic).
    fn heap_key(&self) -> (C, Reverse<Pair<T>>) {
        (self.count, Reverse(self.pair))
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Trainer for learning a binary pair merge vocabulary.
///
/// Counts are maintained incrementally: a full adjacent-pair scan seeds a
/// lazy-refresh max-heap, and each merge pass patches the counts from its
/// own deltas. Observable results are identical to re-counting the whole
/// sequence after every merge.
///
/// # Parameters
/// * `C` - the type used to store pair occurrence counts.
#[derive(Debug, Clone)]
pub struct PairVocabTrainer<C = u64>
where
    C: CountType,
{
    /// Trainer options.
    pub options: PairVocabTrainerOptions,

    count_type: PhantomData<C>,
}

impl<C: CountType> PairVocabTrainer<C> {
    /// Initializes a [`PairVocabTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    ///
    /// ## Returns
    /// A new `PairVocabTrainer` instance.
    pub fn new(options: PairVocabTrainerOptions) -> Self {
        PairVocabTrainer {
            options,
            count_type: PhantomData,
        }
    }

    /// Trains a [`MergeVocab<T>`] from a byte sequence.
    ///
    /// ## Arguments
    /// * `text` - the training bytes.
    ///
    /// ## Returns
    /// A `Result` containing the trained `MergeVocab<T>` or an error.
    pub fn train<T: TokenType>(
        &self,
        text: &[u8],
    ) -> Result<MergeVocab<T>> {
        self.train_observed(text, &mut |_: &MergeStep<T>| {})
    }

    /// Trains a [`MergeVocab<T>`], reporting each merge to an observer.
    ///
    /// Performs up to ``vocab_size - 256`` merge steps. Each step selects
    /// the most frequent adjacent pair (ties to the smallest pair), mints
    /// the next token, and rewrites the sequence. Training stops early,
    /// without error, once no pair occurs.
    ///
    /// ## Arguments
    /// * `text` - the training bytes.
    /// * `observer` - the per-merge record sink.
    ///
    /// ## Returns
    /// A `Result` containing the trained `MergeVocab<T>` or an error.
    pub fn train_observed<T, O>(
        &self,
        text: &[u8],
        observer: &mut O,
    ) -> Result<MergeVocab<T>>
    where
        T: TokenType,
        O: MergeObserver<T>,
    {
        let vocab_size = self.options.vocab_size;
        if vocab_size < BYTE_VOCAB_SIZE {
            return Err(PairmintError::VocabSizeTooSmall { size: vocab_size });
        }
        if T::from_usize(vocab_size - 1).is_none() {
            return Err(PairmintError::VocabSizeOverflow { size: vocab_size });
        }

        let num_merges = vocab_size - BYTE_VOCAB_SIZE;
        log::info!("Starting BPE training: {} merges to compute", num_merges);

        let mut vocab = MergeVocab::default();
        let mut seq = SymbolBuf::from_bytes(text);

        let mut counts: PairCountMap<T, C> = pair_counts(seq.symbols());

        let zero = C::zero();
        let one = C::one();

        // ---- Build heap ----
        log::info!("Building heap with {} unique pairs", counts.len());
        let mut heap = OctonaryHeap::with_capacity(counts.len());
        for (&pair, &count) in counts.iter() {
            if count > zero {
                heap.push(MergeJob { pair, count });
            }
        }

        // ---- Merge loop ----
        let mut merges_done = 0;
        let mut last_log_percent = 0;

        while merges_done < num_merges {
            let Some(mut job) = heap.pop() else {
                // No more pairs to merge.
                break;
            };

            {
                // Lazy refresh the job count.
                let current = *counts.get(&job.pair).unwrap_or(&zero);
                if job.count != current {
                    job.count = current;
                    if job.count > zero {
                        heap.push(job);
                    }
                    continue;
                }
            }

            if job.count == zero {
                // No live matches.
                break;
            }

            let token = vocab.push_merge(job.pair)?;

            // Pairs introduced by this merge; every one contains `token`
            // and is not yet in the heap.
            let mut created: PMHashSet<Pair<T>> = PMHashSet::default();

            seq.merge_pair_cb(job.pair, token, &mut |pair, delta| {
                if delta < 0 {
                    // This pair adjacency was removed from the sequence.
                    *counts.entry(pair).or_default() -= one;
                } else {
                    // This pair adjacency was added to the sequence.
                    *counts.entry(pair).or_default() += one;
                    created.insert(pair);
                }
            });

            for pair in created {
                let count = *counts.get(&pair).unwrap_or(&zero);
                if count > zero {
                    heap.push(MergeJob { pair, count });
                }
            }

            observer.on_merge(&MergeStep {
                index: merges_done,
                num_merges,
                pair: job.pair,
                token,
                count: job.count.to_u64().unwrap_or(u64::MAX),
            });

            merges_done += 1;

            // Log progress every 1%
            let current_percent = (merges_done * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {} (frequency: {})",
                    current_percent,
                    merges_done,
                    num_merges,
                    job.pair,
                    token,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        if merges_done < num_merges {
            log::info!(
                "Training exhausted the sequence: {}/{} merges completed",
                merges_done,
                num_merges
            );
        } else {
            log::info!("Finished training: {} merges completed", merges_done);
        }

        Ok(vocab)
    }
}
