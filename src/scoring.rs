//! Position-wise scoring of a validated pair.
//!
//! Residues are compared index by index: an identical pair adds
//! `match_score`, any other pair adds `mismatch_penalty`. There is no gap
//! model, so `gap_penalty` never contributes.

use crate::formats::params::ScoringConfig;
use crate::model::SequencePair;

/// Gap symbol.
pub const GAP: u8 = b'-';

/// Outcome of scoring a sequence pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    /// Score of each position, left to right.
    pub per_position: Vec<f64>,
    /// Sum of `per_position`.
    pub score: f64,
    pub matches: usize,
    pub mismatches: usize,
    /// Positions where either residue is a gap. Informational only.
    pub gap_columns: usize,
}

impl ScoreReport {
    /// Number of compared positions.
    pub fn len(&self) -> usize {
        self.per_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_position.is_empty()
    }

    /// `matches / L * 100`.
    pub fn percent_identity(&self) -> f64 {
        percent(self.matches, self.len())
    }

    pub fn percent_gaps(&self) -> f64 {
        percent(self.gap_columns, self.len())
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Scores the pair position by position.
pub fn score_pair(pair: &SequencePair, config: &ScoringConfig) -> ScoreReport {
    let seq1 = pair.first().as_bytes();
    let seq2 = pair.second().as_bytes();

    let mut per_position = Vec::with_capacity(pair.len());
    let mut matches = 0;
    let mut gap_columns = 0;

    for (&a, &b) in seq1.iter().zip(seq2) {
        if a == b {
            matches += 1;
        }
        if a == GAP || b == GAP {
            gap_columns += 1;
        }
        per_position.push(config.score(a, b));
    }

    let score = per_position.iter().sum();
    ScoreReport {
        mismatches: per_position.len() - matches,
        per_position,
        score,
        matches,
        gap_columns,
    }
}
