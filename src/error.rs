//! Error taxonomy shared by every stage of a run.
//!
//! Each stage has its own error enum (`FastaError`, `ParameterError`,
//! `ValidationError`, `InputError`). They all report an [`ErrorKind`] so
//! callers can branch on the failure class without matching every variant.

use std::fmt;

use thiserror::Error;

use crate::formats::fasta::FastaError;
use crate::formats::params::ParameterError;
use crate::formats::InputError;
use crate::validate::ValidationError;

/// Failure classes of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No header, corrupted record structure, undecodable text.
    Format,
    /// Not exactly two sequences.
    Count,
    /// The two sequences differ in length.
    LengthMismatch,
    /// A character outside the legal alphabet.
    Alphabet,
    /// A parameter line without exactly one `=`, or a repeated key.
    MalformedParameter,
    /// A parameter key outside the recognized set.
    UnknownParameter,
    /// A parameter value that is not a finite number.
    ParameterType,
    /// Missing file, wrong extension, refused overwrite.
    Input,
    /// Underlying I/O failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "format error",
            ErrorKind::Count => "count error",
            ErrorKind::LengthMismatch => "length mismatch error",
            ErrorKind::Alphabet => "alphabet error",
            ErrorKind::MalformedParameter => "malformed parameter error",
            ErrorKind::UnknownParameter => "unknown parameter error",
            ErrorKind::ParameterType => "parameter type error",
            ErrorKind::Input => "input error",
            ErrorKind::Io => "I/O error",
        };
        f.write_str(name)
    }
}

/// Any error produced while analysing a sequence pair.
#[derive(Error, Debug)]
pub enum DotalignError {
    #[error("FASTA error: {0}")]
    Fasta(#[from] FastaError),

    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

impl DotalignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DotalignError::Fasta(e) => e.kind(),
            DotalignError::Parameter(e) => e.kind(),
            DotalignError::Validation(e) => e.kind(),
            DotalignError::Input(e) => e.kind(),
        }
    }
}

/// Result type for a whole run.
pub type DotalignResult<T> = Result<T, DotalignError>;
