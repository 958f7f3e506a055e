//! Vocabulary construction for word2vec training.
//!
//! Building happens in two passes: a raw frequency scan over the corpus
//! (optionally pruned to a size cap), then a preparation step that applies
//! `min_count`, the trim rule, sorting, downsampling probabilities and the
//! sampling structures used during training.

use crate::corpus::Document;
use crate::options::Word2VecOptions;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Domain of the negative-sampling cumulative table.
const CUM_TABLE_DOMAIN: f64 = 2_147_483_647.0;

/// Exponent applied to counts in the noise distribution.
const NS_EXPONENT: f64 = 0.75;

/// Padding word added when `null_word` is enabled.
pub const NULL_WORD: &str = "\0";

/// Decision returned by a [`TrimRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleResult {
    /// Apply the usual count threshold.
    Default,
    /// Keep the word regardless of its count.
    Keep,
    /// Drop the word regardless of its count.
    Discard,
}

/// Per-word override of the vocabulary count threshold.
///
/// Any `Fn(&str, u64, u64) -> RuleResult` closure is a trim rule; the
/// arguments are the word, its count and the threshold in force.
pub trait TrimRule: Send + Sync {
    fn decide(&self, word: &str, count: u64, min_count: u64) -> RuleResult;
}

impl<F> TrimRule for F
where
    F: Fn(&str, u64, u64) -> RuleResult + Send + Sync,
{
    fn decide(&self, word: &str, count: u64, min_count: u64) -> RuleResult {
        self(word, count, min_count)
    }
}

fn keep_word(word: &str, count: u64, min_count: u64, rule: Option<&dyn TrimRule>) -> bool {
    match rule.map(|r| r.decide(word, count, min_count)) {
        Some(RuleResult::Keep) => true,
        Some(RuleResult::Discard) => false,
        _ => count >= min_count,
    }
}

/// Raw word counts in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct RawVocab {
    pub counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
    /// Every token seen, including ones later pruned.
    pub total_words: u64,
    /// Threshold the next size-cap prune would apply.
    pub min_reduce: u64,
}

impl RawVocab {
    fn add(&mut self, token: &str) {
        self.total_words += 1;
        match self.index.get(token) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    fn prune(&mut self, rule: Option<&dyn TrimRule>) {
        let min_reduce = self.min_reduce;
        self.counts
            .retain(|(word, count)| keep_word(word, *count, min_reduce, rule));
        self.index = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, (w, _))| (w.clone(), i))
            .collect();
        self.min_reduce += 1;
    }
}

/// Count every token, pruning rare words whenever `max_vocab_size` is exceeded.
pub(crate) fn scan_vocab<D: Document>(
    corpus: &[D],
    max_vocab_size: Option<usize>,
    rule: Option<&dyn TrimRule>,
) -> RawVocab {
    let mut raw = RawVocab {
        min_reduce: 1,
        ..RawVocab::default()
    };

    for doc in corpus {
        for token in doc.tokens() {
            raw.add(token);
        }
        if let Some(cap) = max_vocab_size {
            if raw.counts.len() > cap {
                raw.prune(rule);
            }
        }
    }

    raw
}

/// A vocabulary word and its training metadata.
#[derive(Debug, Clone)]
pub(crate) struct VocabEntry {
    pub word: String,
    pub count: u64,
    /// Keep probability scaled to `2^32`; the word is dropped when a uniform
    /// `u32` draw exceeds it.
    pub sample_int: u64,
    /// Huffman code, root first.
    pub code: Vec<u8>,
    /// Inner-node indices along the Huffman path, root first.
    pub point: Vec<u32>,
}

/// The final training vocabulary.
#[derive(Debug)]
pub(crate) struct Vocabulary {
    pub entries: Vec<VocabEntry>,
    pub index: HashMap<String, usize>,
    /// Sum of counts of retained words.
    pub retained_total: u64,
    /// Cumulative noise distribution for negative sampling.
    pub cum_table: Vec<u32>,
}

impl Vocabulary {
    /// Apply thresholds and build all sampling structures.
    pub fn prepare(raw: RawVocab, options: &Word2VecOptions, rule: Option<&dyn TrimRule>) -> Self {
        let mut entries: Vec<VocabEntry> = Vec::new();
        let mut retained_total = 0u64;

        for (word, count) in raw.counts {
            if keep_word(&word, count, options.min_count, rule) {
                retained_total += count;
                entries.push(VocabEntry {
                    word,
                    count,
                    sample_int: 0,
                    code: Vec::new(),
                    point: Vec::new(),
                });
            }
        }

        let threshold = if options.sample == 0.0 {
            retained_total as f64
        } else if options.sample < 1.0 {
            options.sample * retained_total as f64
        } else {
            (options.sample * (3.0 + 5f64.sqrt()) / 2.0).floor()
        };

        for entry in entries.iter_mut() {
            let probability = if options.sample == 0.0 {
                1.0
            } else {
                let v = entry.count as f64;
                (((v / threshold).sqrt() + 1.0) * (threshold / v)).min(1.0)
            };
            entry.sample_int = (probability * 4_294_967_296.0).round() as u64;
        }

        let has_null = entries.iter().any(|e| e.word == NULL_WORD);
        if options.null_word && !entries.is_empty() && !has_null {
            entries.push(VocabEntry {
                word: NULL_WORD.to_string(),
                count: 1,
                sample_int: 0,
                code: Vec::new(),
                point: Vec::new(),
            });
        }

        if options.sorted_vocab {
            entries.sort_by_key(|e| Reverse(e.count));
        }

        let counts: Vec<u64> = entries.iter().map(|e| e.count).collect();
        if options.hierarchical_softmax {
            let (codes, points) = huffman_codes(&counts);
            for (entry, (code, point)) in entries.iter_mut().zip(codes.into_iter().zip(points)) {
                entry.code = code;
                entry.point = point;
            }
        }

        let cum_table = if options.negative > 0 {
            cumulative_table(&counts)
        } else {
            Vec::new()
        };

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.word.clone(), i))
            .collect();

        Self {
            entries,
            index,
            retained_total,
            cum_table,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw a noise word index given a uniform value in `[0, u32::MAX]`.
    pub fn noise_word(&self, draw: u32) -> usize {
        match self.cum_table.last() {
            Some(&last) if last > 0 => {
                let target = draw % last;
                self.cum_table.partition_point(|&c| c <= target)
            }
            _ => 0,
        }
    }
}

/// Cumulative `count^0.75` distribution scaled to [`CUM_TABLE_DOMAIN`].
fn cumulative_table(counts: &[u64]) -> Vec<u32> {
    let total: f64 = counts.iter().map(|&c| (c as f64).powf(NS_EXPONENT)).sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    counts
        .iter()
        .map(|&c| {
            cumulative += (c as f64).powf(NS_EXPONENT);
            (cumulative / total * CUM_TABLE_DOMAIN).round() as u32
        })
        .collect()
}

/// Huffman codes and inner-node paths, both root first.
fn huffman_codes(counts: &[u64]) -> (Vec<Vec<u8>>, Vec<Vec<u32>>) {
    let n = counts.len();
    let mut codes = vec![Vec::new(); n];
    let mut points = vec![Vec::new(); n];
    if n < 2 {
        return (codes, points);
    }

    let mut parent = vec![0usize; 2 * n - 1];
    let mut binary = vec![0u8; 2 * n - 1];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| Reverse((c, i)))
        .collect();

    for inner in n..2 * n - 1 {
        let (Some(Reverse((c1, i1))), Some(Reverse((c2, i2)))) = (heap.pop(), heap.pop()) else {
            break;
        };
        parent[i1] = inner;
        parent[i2] = inner;
        binary[i2] = 1;
        heap.push(Reverse((c1 + c2, inner)));
    }

    let root = 2 * n - 2;
    for leaf in 0..n {
        let mut node = leaf;
        while node != root {
            codes[leaf].push(binary[node]);
            points[leaf].push((parent[node] - n) as u32);
            node = parent[node];
        }
        codes[leaf].reverse();
        points[leaf].reverse();
    }

    (codes, points)
}
