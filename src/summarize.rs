//! Frequency-based text summarization.
//!
//! The summary is the first three non-blank lines joined by spaces; topics
//! are the five most frequent case-folded words longer than four characters,
//! ties broken by first occurrence. No stemming, no stopword list.

use std::collections::HashMap;

const SUMMARY_LINES: usize = 3;
const TOPIC_COUNT: usize = 5;
const MIN_WORD_CHARS: usize = 5;

/// Summary text plus ranked topic keywords for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub summary: String,
    pub topics: Vec<String>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.topics.is_empty()
    }
}

/// Summarize arbitrary text.
///
/// Empty or whitespace-only input yields an empty summary and no topics.
pub fn summarize(text: &str) -> Summary {
    let summary = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(SUMMARY_LINES)
        .collect::<Vec<_>>()
        .join(" ");

    Summary {
        summary,
        topics: top_words(text),
    }
}

/// Count case-folded words longer than four characters and keep the five
/// most frequent, preserving first-encountered order among equal counts.
fn top_words(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in text.split_whitespace() {
        let word = token.to_lowercase();
        if word.chars().count() < MIN_WORD_CHARS {
            continue;
        }
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order within equal counts.
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| counts[b].1.cmp(&counts[a].1));

    order
        .into_iter()
        .take(TOPIC_COUNT)
        .map(|i| counts[i].0.clone())
        .collect()
}
