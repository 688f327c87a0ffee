//! FASTA record parser.
//!
//! This module turns FASTA text into [`SequenceRecord`]s and checks the
//! file structure. It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Residues are upper-cased while parsing. Characters outside the chosen
//! [`Alphabet`] are either rejected or substituted, see [`AlphabetPolicy`].

use log::{debug, warn};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::model::{Alphabet, AlphabetPolicy, AlphabetWarning, SequenceRecord};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Incorrect FASTA type: no header line starting with '>' found")]
    NoHeader,

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Empty sequence identifier at line {0}")]
    EmptyIdentifier(usize),

    #[error("Corrupted FASTA file: header '{id}' at line {line} has no sequence data")]
    EmptyRecord { id: String, line: usize },

    #[error("Invalid character {found:?} in {alphabet} sequence '{id}' at line {line}, column {column}")]
    InvalidCharacter {
        id: String,
        line: usize,
        column: usize,
        found: char,
        alphabet: Alphabet,
    },

    #[error("Single sequence error: expected two sequences, found {found}")]
    TooFewRecords { found: usize },

    #[error("FASTA content is not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),
}

impl FastaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FastaError::NoHeader
            | FastaError::SequenceWithoutHeader(_)
            | FastaError::EmptyIdentifier(_)
            | FastaError::EmptyRecord { .. }
            | FastaError::NotText(_) => ErrorKind::Format,
            FastaError::InvalidCharacter { .. } => ErrorKind::Alphabet,
            FastaError::TooFewRecords { .. } => ErrorKind::Count,
        }
    }
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FastaOptions {
    pub alphabet: Alphabet,
    pub policy: AlphabetPolicy,
}

/// Records read from a FASTA file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ParsedFasta {
    pub records: Vec<SequenceRecord>,
    /// Illegal characters substituted under [`AlphabetPolicy::Lenient`].
    pub warnings: Vec<AlphabetWarning>,
}

/// Header of the record being accumulated.
struct OpenRecord<'a> {
    id: &'a str,
    description: &'a str,
    line: usize,
    sequence: String,
}

impl OpenRecord<'_> {
    fn finish(self) -> FastaResult<SequenceRecord> {
        if self.sequence.is_empty() {
            return Err(FastaError::EmptyRecord {
                id: self.id.to_string(),
                line: self.line,
            });
        }
        Ok(SequenceRecord::new(self.id, self.description, self.sequence))
    }
}

/// Parses FASTA content into records.
///
/// Fails if the content has no header, if a header carries no sequence,
/// and when fewer than two records are found. Under
/// [`AlphabetPolicy::Strict`] the first illegal character is reported only
/// once the file is known to hold exactly two records; any other count is
/// left to the record count checks.
pub fn parse_fasta(content: &str, options: &FastaOptions) -> FastaResult<ParsedFasta> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut first_invalid: Option<FastaError> = None;
    let mut current: Option<OpenRecord> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(open) = current.take() {
                records.push(open.finish()?);
            }

            let header = header.trim_start();
            let (id, description) = match header.split_once(char::is_whitespace) {
                Some((id, rest)) => (id, rest.trim()),
                None => (header, ""),
            };

            if id.is_empty() {
                return Err(FastaError::EmptyIdentifier(line_number));
            }

            debug!("FASTA header '{}' at line {}", id, line_number);
            current = Some(OpenRecord {
                id,
                description,
                line: line_number,
                sequence: String::with_capacity(raw_line.len()),
            });
        } else {
            // Sequence line
            let Some(open) = current.as_mut() else {
                if content.lines().any(|l| l.trim_start().starts_with('>')) {
                    return Err(FastaError::SequenceWithoutHeader(line_number));
                }
                return Err(FastaError::NoHeader);
            };

            for (col_idx, c) in raw_line.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let residue = c.to_ascii_uppercase();
                if options.alphabet.is_valid_char(residue) {
                    open.sequence.push(residue);
                    continue;
                }

                match options.policy {
                    AlphabetPolicy::Strict => {
                        if first_invalid.is_none() {
                            first_invalid = Some(FastaError::InvalidCharacter {
                                id: open.id.to_string(),
                                line: line_number,
                                column: col_idx + 1,
                                found: c,
                                alphabet: options.alphabet,
                            });
                        }
                        open.sequence.push(residue);
                    }
                    AlphabetPolicy::Lenient => {
                        let warning = AlphabetWarning {
                            record_id: open.id.to_string(),
                            line: line_number,
                            column: col_idx + 1,
                            found: c,
                            replacement: options.alphabet.unknown_symbol(),
                        };
                        warn!("{}", warning);
                        warnings.push(warning);
                        open.sequence.push(options.alphabet.unknown_symbol());
                    }
                }
            }
        }
    }

    match current {
        Some(open) => records.push(open.finish()?),
        None => return Err(FastaError::NoHeader),
    }

    if records.len() < 2 {
        return Err(FastaError::TooFewRecords {
            found: records.len(),
        });
    }

    if records.len() == 2 {
        if let Some(err) = first_invalid {
            return Err(err);
        }
    }

    debug!("parsed {} FASTA records", records.len());
    Ok(ParsedFasta { records, warnings })
}

/// Decodes the raw content of a FASTA file.
pub fn decode_fasta(bytes: Vec<u8>) -> FastaResult<String> {
    String::from_utf8(bytes).map_err(|e| FastaError::NotText(e.utf8_error()))
}
