//! Sequence pair validation.
//!
//! Gates scoring: exactly two records, both non-empty, of the same length,
//! and every residue inside the alphabet. The alphabet is checked here
//! again even though the parser already did, since records can also be
//! built directly through [`SequenceRecord::new`].

use thiserror::Error;

use crate::error::ErrorKind;
use crate::model::{Alphabet, SequencePair, SequenceRecord};

/// Errors raised while checking a record set.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Expected exactly two sequences, found {found}")]
    WrongCount { found: usize },

    #[error("Sequence '{id}' is empty")]
    EmptySequence { id: String },

    #[error("Sequences are not of the same length: '{first_id}' has {first_len} residues, '{second_id}' has {second_len}")]
    LengthMismatch {
        first_id: String,
        first_len: usize,
        second_id: String,
        second_len: usize,
    },

    #[error("Invalid character {found:?} in {alphabet} sequence '{id}' at position {position}")]
    InvalidCharacter {
        id: String,
        position: usize,
        found: char,
        alphabet: Alphabet,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::WrongCount { .. } => ErrorKind::Count,
            ValidationError::EmptySequence { .. } => ErrorKind::Format,
            ValidationError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            ValidationError::InvalidCharacter { .. } => ErrorKind::Alphabet,
        }
    }
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_alphabet(record: &SequenceRecord, alphabet: Alphabet) -> ValidationResult<()> {
    match record
        .sequence()
        .chars()
        .enumerate()
        .find(|(_, c)| !alphabet.is_valid_char(*c))
    {
        Some((idx, found)) => Err(ValidationError::InvalidCharacter {
            id: record.id().to_string(),
            position: idx + 1,
            found,
            alphabet,
        }),
        None => Ok(()),
    }
}

/// Turns exactly two records into a [`SequencePair`].
pub fn validate_pair(records: Vec<SequenceRecord>, alphabet: Alphabet) -> ValidationResult<SequencePair> {
    let found = records.len();
    let [first, second]: [SequenceRecord; 2] = records
        .try_into()
        .map_err(|_| ValidationError::WrongCount { found })?;

    for record in [&first, &second] {
        if record.is_empty() {
            return Err(ValidationError::EmptySequence {
                id: record.id().to_string(),
            });
        }
    }

    if first.len() != second.len() {
        return Err(ValidationError::LengthMismatch {
            first_id: first.id().to_string(),
            first_len: first.len(),
            second_id: second.id().to_string(),
            second_len: second.len(),
        });
    }

    check_alphabet(&first, alphabet)?;
    check_alphabet(&second, alphabet)?;

    Ok(SequencePair::new(first, second))
}
