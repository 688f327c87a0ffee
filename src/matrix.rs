//! All-pairs score matrix behind the dot plot.
//!
//! Cell `(i, j)` compares `seq1[i]` with `seq2[j]` using the same rule as
//! the position-wise scoring, so the diagonal reproduces
//! [`ScoreReport::per_position`](crate::scoring::ScoreReport::per_position).
//! Off-diagonal matches reveal repeats and inversions.
//!
//! Only one match flag per cell is stored, in a flat buffer indexed by
//! `i * L + j`; the two possible scores are held once.

use crate::formats::params::ScoringConfig;
use crate::model::SequencePair;

/// `L × L` comparison of the two sequences of a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    size: usize,
    match_score: f64,
    mismatch_penalty: f64,
    hits: Vec<bool>,
}

impl ScoreMatrix {
    /// Side length `L`.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.size && j < self.size).then(|| i * self.size + j)
    }

    /// Whether `seq1[i] == seq2[j]`.
    pub fn is_match(&self, i: usize, j: usize) -> Option<bool> {
        self.offset(i, j).map(|k| self.hits[k])
    }

    /// Score of cell `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.is_match(i, j).map(|hit| self.score_of(hit))
    }

    #[inline]
    fn score_of(&self, hit: bool) -> f64 {
        if hit {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// Scores of cells `(i, i)`.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.size)
            .map(|i| self.score_of(self.hits[i * self.size + i]))
            .collect()
    }

    /// Number of matching cells.
    pub fn match_count(&self) -> usize {
        self.hits.iter().filter(|&&hit| hit).count()
    }
}

/// Builds the all-pairs matrix for a validated pair.
pub fn build_matrix(pair: &SequencePair, config: &ScoringConfig) -> ScoreMatrix {
    let seq1 = pair.first().as_bytes();
    let seq2 = pair.second().as_bytes();
    let size = pair.len();

    let mut hits = Vec::with_capacity(size * size);
    for &a in seq1 {
        hits.extend(seq2.iter().map(|&b| a == b));
    }

    ScoreMatrix {
        size,
        match_score: config.match_score,
        mismatch_penalty: config.mismatch_penalty,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alphabet, SequenceRecord};
    use crate::scoring::score_pair;
    use crate::validate::validate_pair;

    fn pair(seq1: &str, seq2: &str) -> SequencePair {
        validate_pair(
            vec![
                SequenceRecord::new("seq1", "", seq1),
                SequenceRecord::new("seq2", "", seq2),
            ],
            Alphabet::Any,
        )
        .unwrap()
    }

    #[test]
    fn test_acgt_vs_acct() {
        let matrix = build_matrix(&pair("ACGT", "ACCT"), &ScoringConfig::default());
        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.diagonal(), vec![1.0, 1.0, -1.0, 1.0]);
        // A vs C
        assert_eq!(matrix.get(0, 2), Some(-1.0));
        // G vs A
        assert_eq!(matrix.get(2, 0), Some(-1.0));
        // C vs C, off the diagonal
        assert_eq!(matrix.get(1, 2), Some(1.0));
        assert_eq!(matrix.get(4, 0), None);
        assert_eq!(matrix.get(0, 4), None);
    }

    #[test]
    fn test_diagonal_matches_position_scores() {
        let config = ScoringConfig {
            match_score: 5.0,
            mismatch_penalty: -4.0,
            gap_penalty: -1.0,
        };
        for (a, b) in [("ACGTTGCA", "ACGAAGCA"), ("MKVLA", "MKVLA"), ("A-C", "-AC")] {
            let p = pair(a, b);
            assert_eq!(build_matrix(&p, &config).diagonal(), score_pair(&p, &config).per_position);
        }
    }

    #[test]
    fn test_repeats_off_the_diagonal() {
        let matrix = build_matrix(&pair("AAC", "CAA"), &ScoringConfig::default());
        let first_row: Vec<_> = (0..3).filter_map(|j| matrix.get(0, j)).collect();
        assert_eq!(first_row, vec![-1.0, 1.0, 1.0]);
        let last_row: Vec<_> = (0..3).filter_map(|j| matrix.get(2, j)).collect();
        assert_eq!(last_row, vec![1.0, -1.0, -1.0]);
        assert_eq!(matrix.match_count(), 5);
        assert_eq!(matrix.is_match(2, 0), Some(true));
    }
}
