//! Scoring parameter file parser.
//!
//! ## Parameter Format
//!
//! ```text
//! # comment
//! match_score = 1
//! mismatch_penalty = -1
//! gap_penalty = -1
//! ```
//!
//! Every key is optional; keys left out keep their default value.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur while reading scoring parameters.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("Malformed parameter at line {line}: expected exactly one '=' but found {equals}")]
    Malformed { line: usize, equals: usize },

    #[error("Duplicate parameter '{key}' at line {line} (first set at line {first_line})")]
    Duplicate {
        key: ParameterKey,
        line: usize,
        first_line: usize,
    },

    #[error("Unknown parameter '{key}' at line {line}; recognized parameters are match_score, mismatch_penalty, gap_penalty")]
    UnknownKey { line: usize, key: String },

    #[error("Parameter '{key}' at line {line} must be numerical, got '{value}'")]
    NotNumeric {
        line: usize,
        key: ParameterKey,
        value: String,
    },
}

impl ParameterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParameterError::Malformed { .. } | ParameterError::Duplicate { .. } => {
                ErrorKind::MalformedParameter
            }
            ParameterError::UnknownKey { .. } => ErrorKind::UnknownParameter,
            ParameterError::NotNumeric { .. } => ErrorKind::ParameterType,
        }
    }
}

/// Result type for parameter operations.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// The recognized parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    MatchScore,
    MismatchPenalty,
    GapPenalty,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 3] = [
        ParameterKey::MatchScore,
        ParameterKey::MismatchPenalty,
        ParameterKey::GapPenalty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKey::MatchScore => "match_score",
            ParameterKey::MismatchPenalty => "mismatch_penalty",
            ParameterKey::GapPenalty => "gap_penalty",
        }
    }

    fn index(&self) -> usize {
        match self {
            ParameterKey::MatchScore => 0,
            ParameterKey::MismatchPenalty => 1,
            ParameterKey::GapPenalty => 2,
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

/// Scores applied when comparing residues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Added when two residues are identical.
    pub match_score: f64,
    /// Added when two residues differ.
    pub mismatch_penalty: f64,
    /// Kept for parameter-file compatibility; gap-free scoring never applies it.
    pub gap_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch_penalty: -1.0,
            gap_penalty: -1.0,
        }
    }
}

impl ScoringConfig {
    pub fn get(&self, key: ParameterKey) -> f64 {
        match key {
            ParameterKey::MatchScore => self.match_score,
            ParameterKey::MismatchPenalty => self.mismatch_penalty,
            ParameterKey::GapPenalty => self.gap_penalty,
        }
    }

    fn set(&mut self, key: ParameterKey, value: f64) {
        match key {
            ParameterKey::MatchScore => self.match_score = value,
            ParameterKey::MismatchPenalty => self.mismatch_penalty = value,
            ParameterKey::GapPenalty => self.gap_penalty = value,
        }
    }

    /// Score for a pair of residues.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }
}

/// Renders the configuration in parameter-file format.
impl fmt::Display for ScoringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in ParameterKey::ALL {
            writeln!(f, "{} = {}", key, self.get(key))?;
        }
        Ok(())
    }
}

/// Parses parameter-file content, falling back to defaults when absent.
pub fn parse_parameters(content: Option<&str>) -> ParameterResult<ScoringConfig> {
    let mut config = ScoringConfig::default();
    let Some(content) = content else {
        debug!("no parameter file, using default scoring");
        return Ok(config);
    };

    let mut seen: [Option<usize>; 3] = [None; 3];

    for (idx, raw_line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let equals = line.matches('=').count();
        let Some((key, value)) = line.split_once('=').filter(|_| equals == 1) else {
            return Err(ParameterError::Malformed {
                line: line_number,
                equals,
            });
        };

        let key_text = key.trim();
        let key: ParameterKey = key_text.parse().map_err(|_| ParameterError::UnknownKey {
            line: line_number,
            key: key_text.to_string(),
        })?;

        if let Some(first_line) = seen[key.index()] {
            return Err(ParameterError::Duplicate {
                key,
                line: line_number,
                first_line,
            });
        }
        seen[key.index()] = Some(line_number);

        let value_text = value.trim();
        let value = value_text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParameterError::NotNumeric {
                line: line_number,
                key,
                value: value_text.to_string(),
            })?;

        debug!("parameter {} = {}", key, value);
        config.set(key, value);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_content() {
        let config = parse_parameters(None).unwrap();
        assert_eq!(config, ScoringConfig::default());
        assert_eq!(config.match_score, 1.0);
        assert_eq!(config.mismatch_penalty, -1.0);
    }

    #[test]
    fn test_parse_all_keys() {
        let content = "match_score = 2\nmismatch_penalty=-3.5\n gap_penalty = -4 \n";
        let config = parse_parameters(Some(content)).unwrap();
        assert_eq!(config.match_score, 2.0);
        assert_eq!(config.mismatch_penalty, -3.5);
        assert_eq!(config.gap_penalty, -4.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_parameters(Some("match_score=5\n")).unwrap();
        assert_eq!(config.match_score, 5.0);
        assert_eq!(config.mismatch_penalty, -1.0);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let content = "# scoring\n\n   \nmatch_score=3\n";
        let config = parse_parameters(Some(content)).unwrap();
        assert_eq!(config.match_score, 3.0);
    }

    #[test]
    fn test_multiple_equals() {
        let err = parse_parameters(Some("match_score=2=3\n")).unwrap_err();
        assert!(matches!(err, ParameterError::Malformed { line: 1, equals: 2 }));
        assert_eq!(err.kind(), ErrorKind::MalformedParameter);
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_parameters(Some("match_score=1\nmismatch_penalty -1\n")).unwrap_err();
        assert!(matches!(err, ParameterError::Malformed { line: 2, equals: 0 }));
        assert_eq!(err.kind(), ErrorKind::MalformedParameter);
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_parameters(Some("matchscore=2\n")).unwrap_err();
        match err {
            ParameterError::UnknownKey { line, ref key } => {
                assert_eq!(line, 1);
                assert_eq!(key, "matchscore");
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::UnknownParameter);
    }

    #[test]
    fn test_original_tool_keys_are_not_recognized() {
        let err = parse_parameters(Some("transition=-1\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownParameter);
    }

    #[test]
    fn test_non_numeric_value() {
        let err = parse_parameters(Some("match_score=two\n")).unwrap_err();
        assert!(matches!(
            err,
            ParameterError::NotNumeric {
                key: ParameterKey::MatchScore,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::ParameterType);

        let err = parse_parameters(Some("gap_penalty=\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterType);

        let err = parse_parameters(Some("gap_penalty=NaN\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterType);
    }

    #[test]
    fn test_duplicate_key() {
        let err = parse_parameters(Some("match_score=1\nmatch_score=2\n")).unwrap_err();
        assert!(matches!(
            err,
            ParameterError::Duplicate {
                line: 2,
                first_line: 1,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::MalformedParameter);
    }

    #[test]
    fn test_display_parses_back() {
        let config = ScoringConfig {
            match_score: 2.5,
            mismatch_penalty: -0.5,
            gap_penalty: -3.0,
        };
        let rendered = config.to_string();
        assert!(rendered.contains("match_score = 2.5"));
        assert_eq!(parse_parameters(Some(&rendered)).unwrap(), config);
    }

    #[test]
    fn test_score_pair() {
        let config = ScoringConfig::default();
        assert_eq!(config.score(b'A', b'A'), 1.0);
        assert_eq!(config.score(b'A', b'C'), -1.0);
    }
}
