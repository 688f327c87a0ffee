//! Text report of a run.
//!
//! The first line is the one-line summary:
//!
//! ```text
//! seq1-seq2: Identity: 3/4 (75.0%), Gaps: 0/4 (0.0%), Score=2
//! ```
//!
//! followed by the scoring parameters, any alphabet warnings and the
//! pairwise view in blocks of [`BLOCK_WIDTH`] columns.

use std::fmt;
use std::io::{self, Write};

use crate::pipeline::Analysis;

/// Residues per block in the pairwise view.
pub const BLOCK_WIDTH: usize = 60;

/// Width used to wrap warning text.
const WRAP_WIDTH: usize = 78;

/// One-line summary of the comparison.
pub fn summary_line(analysis: &Analysis) -> String {
    let report = &analysis.report;
    let len = report.len();
    format!(
        "{}-{}: Identity: {}/{} ({:.1}%), Gaps: {}/{} ({:.1}%), Score={}",
        analysis.pair.first().id(),
        analysis.pair.second().id(),
        report.matches,
        len,
        report.percent_identity(),
        report.gap_columns,
        len,
        report.percent_gaps(),
        report.score
    )
}

/// Match line between two blocks: `|` identical, `.` different.
fn midline(seq1: &[u8], seq2: &[u8]) -> String {
    seq1.iter()
        .zip(seq2)
        .map(|(a, b)| if a == b { '|' } else { '.' })
        .collect()
}

/// Full report of a run, rendered through [`fmt::Display`].
pub struct Report<'a>(pub &'a Analysis);

impl Report<'_> {
    fn write_statistics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        let report = &analysis.report;

        writeln!(f, "Parameters:")?;
        for line in analysis.config.to_string().lines() {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f)?;
        writeln!(f, "Length:     {}", report.len())?;
        writeln!(f, "Matches:    {}", report.matches)?;
        writeln!(f, "Mismatches: {}", report.mismatches)?;
        writeln!(f, "Score:      {}", report.score)?;
        writeln!(f, "Matrix:     {} matching cells", analysis.matrix.match_count())
    }

    fn write_warnings(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let warnings = &self.0.warnings;
        if warnings.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Warnings:")?;
        let options = textwrap::Options::new(WRAP_WIDTH)
            .initial_indent("  - ")
            .subsequent_indent("    ");
        for warning in warnings {
            for line in textwrap::wrap(&warning.to_string(), &options) {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }

    fn write_blocks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pair = &self.0.pair;
        let seq1 = pair.first().as_bytes();
        let seq2 = pair.second().as_bytes();
        let lw = pair.first().id().len().max(pair.second().id().len());
        let nw = pair.len().to_string().len();

        for start in (0..pair.len()).step_by(BLOCK_WIDTH) {
            let end = (start + BLOCK_WIDTH).min(pair.len());
            writeln!(f)?;
            let (first, second) = (pair.first(), pair.second());
            writeln!(f, "{:<lw$} {:>nw$} {} {}", first.id(), start + 1, first.slice(start..end), end)?;
            writeln!(f, "{:<lw$} {:>nw$} {}", "", "", midline(&seq1[start..end], &seq2[start..end]))?;
            writeln!(f, "{:<lw$} {:>nw$} {} {}", second.id(), start + 1, second.slice(start..end), end)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", summary_line(self.0))?;
        writeln!(f)?;
        self.write_statistics(f)?;
        self.write_warnings(f)?;
        self.write_blocks(f)
    }
}

/// Renders the full report.
pub fn render_report(analysis: &Analysis) -> String {
    Report(analysis).to_string()
}

/// Writes the full report.
pub fn write_report<W: Write>(writer: &mut W, analysis: &Analysis) -> io::Result<()> {
    write!(writer, "{}", Report(analysis))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alphabet, AlphabetPolicy};
    use crate::pipeline::{analyze, AnalysisOptions};

    #[test]
    fn test_summary_line() {
        let analysis = analyze(">s1 first\nACGT\n>s2\nACCT\n", None, &AnalysisOptions::default()).unwrap();
        assert_eq!(
            summary_line(&analysis),
            "s1-s2: Identity: 3/4 (75.0%), Gaps: 0/4 (0.0%), Score=2"
        );
    }

    #[test]
    fn test_summary_with_gaps_and_fractional_score() {
        let analysis = analyze(
            ">a\nAC-T\n>b\nACGT\n",
            Some("match_score=1.5\nmismatch_penalty=-0.5\n"),
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(
            summary_line(&analysis),
            "a-b: Identity: 3/4 (75.0%), Gaps: 1/4 (25.0%), Score=4"
        );
    }

    #[test]
    fn test_report_blocks() {
        let seq1 = "A".repeat(70);
        let mut seq2 = "A".repeat(69);
        seq2.push('C');
        let fasta = format!(">x\n{}\n>y\n{}\n", seq1, seq2);
        let analysis = analyze(&fasta, None, &AnalysisOptions::default()).unwrap();
        let text = render_report(&analysis);

        assert!(text.starts_with("x-y: Identity: 69/70"));
        assert!(text.contains("match_score = 1"));
        assert!(text.contains(&format!("x  1 {} 60", "A".repeat(60))));
        assert!(text.contains(&format!("y 61 {}C 70", "A".repeat(9))));
        assert!(text.contains(&format!("{}.", "|".repeat(9))));
    }

    #[test]
    fn test_report_lists_warnings() {
        let options = AnalysisOptions {
            alphabet: Alphabet::Nucleotide,
            policy: AlphabetPolicy::Lenient,
        };
        let analysis = analyze(">a\nA!GT\n>b\nACGT\n", None, &options).unwrap();
        let text = render_report(&analysis);
        assert!(text.contains("Warnings:"));
        assert!(text.contains("invalid character '!'"));
    }

    #[test]
    fn test_write_report() {
        let analysis = analyze(">a\nAC\n>b\nAC\n", None, &AnalysisOptions::default()).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &analysis).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("a-b: Identity: 2/2 (100.0%)"));
    }

    #[test]
    fn test_report_statistics() {
        let analysis = analyze(">a\nACGT\n>b\nACCT\n", None, &AnalysisOptions::default()).unwrap();
        let text = render_report(&analysis);
        assert!(text.contains("Matches:    3\n"));
        assert!(text.contains("Mismatches: 1\n"));
        assert!(text.contains("Score:      2\n"));
        assert!(text.contains("Matrix:     4 matching cells\n"));
    }
}
