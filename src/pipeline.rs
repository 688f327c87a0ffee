//! One run from input text to score report and matrix.
//!
//! The record count is settled before residues or parameters are judged,
//! and scoring and matrix construction only run on a validated pair. Any
//! failure ends the run without a partial result.

use std::path::Path;

use log::{debug, info};

use crate::error::DotalignResult;
use crate::formats::fasta::{parse_fasta, FastaOptions};
use crate::formats::params::{parse_parameters, ScoringConfig};
use crate::formats::{read_fasta_text, read_parameter_text};
use crate::matrix::{build_matrix, ScoreMatrix};
use crate::model::{Alphabet, AlphabetPolicy, AlphabetWarning, SequencePair};
use crate::scoring::{score_pair, ScoreReport};
use crate::validate::validate_pair;

/// How residues are checked during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub alphabet: Alphabet,
    pub policy: AlphabetPolicy,
}

impl AnalysisOptions {
    fn fasta_options(&self) -> FastaOptions {
        FastaOptions {
            alphabet: self.alphabet,
            policy: self.policy,
        }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub pair: SequencePair,
    pub config: ScoringConfig,
    pub report: ScoreReport,
    pub matrix: ScoreMatrix,
    /// Substituted characters, only under [`AlphabetPolicy::Lenient`].
    pub warnings: Vec<AlphabetWarning>,
}

/// Analyses FASTA text with optional parameter text.
pub fn analyze(
    fasta_text: &str,
    parameter_text: Option<&str>,
    options: &AnalysisOptions,
) -> DotalignResult<Analysis> {
    let parsed = parse_fasta(fasta_text, &options.fasta_options())?;
    let pair = validate_pair(parsed.records, options.alphabet)?;
    let config = parse_parameters(parameter_text)?;
    debug!("scoring with {:?}", config);

    info!(
        "comparing '{}' and '{}' ({} positions)",
        pair.first().id(),
        pair.second().id(),
        pair.len()
    );

    let report = score_pair(&pair, &config);
    info!(
        "score {} with {} matches, {} mismatches",
        report.score, report.matches, report.mismatches
    );

    let matrix = build_matrix(&pair, &config);
    debug!(
        "built {0}x{0} score matrix with {1} matching cells",
        matrix.size(),
        matrix.match_count()
    );

    Ok(Analysis {
        pair,
        config,
        report,
        matrix,
        warnings: parsed.warnings,
    })
}

/// Reads the input files and analyses them.
pub fn analyze_files(
    fasta_path: &Path,
    parameter_path: Option<&Path>,
    options: &AnalysisOptions,
) -> DotalignResult<Analysis> {
    let fasta_text = read_fasta_text(fasta_path)?;
    let parameter_text = parameter_path.map(read_parameter_text).transpose()?;
    analyze(&fasta_text, parameter_text.as_deref(), options)
}
