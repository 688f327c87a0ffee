//! Dot plot rendering.
//!
//! Turns a [`ScoreMatrix`] into display cells and writes them as a binary
//! PGM (`P5`) grey-map. Display orientation puts the first sequence on the
//! x axis and the second one on the y axis, read bottom to top, so that
//! the main diagonal rises from the lower-left corner.
//!
//! A matching pair only becomes a dot when the residue carries
//! information: matched gaps and matched unknown residues stay blank.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::matrix::ScoreMatrix;
use crate::model::SequencePair;
use crate::pipeline::Analysis;

/// Grey level of a diagonal match.
const DIAGONAL_SHADE: u8 = 0;
/// Grey level of an off-diagonal match.
const MATCH_SHADE: u8 = 128;
/// Grey level of an empty cell.
const EMPTY_SHADE: u8 = 255;

/// One displayed cell of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotCell {
    Empty,
    /// Match outside the main diagonal (repeat or inversion signal).
    Match,
    /// Match on the main diagonal (aligned identity).
    DiagonalMatch,
}

impl DotCell {
    pub fn shade(self) -> u8 {
        match self {
            DotCell::Empty => EMPTY_SHADE,
            DotCell::Match => MATCH_SHADE,
            DotCell::DiagonalMatch => DIAGONAL_SHADE,
        }
    }
}

/// Whether a matched residue should be drawn.
pub fn is_informative(residue: u8) -> bool {
    !matches!(residue, b'-' | b'N' | b'X')
}

/// Display cells of a dot plot, row-major in display orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPlot {
    size: usize,
    cells: Vec<DotCell>,
}

impl DotPlot {
    /// Derives display cells from a matrix and the pair it was built from.
    pub fn new(pair: &SequencePair, matrix: &ScoreMatrix) -> Self {
        let size = matrix.size();
        let seq1 = pair.first().as_bytes();
        let mut cells = Vec::with_capacity(size * size);

        for row in 0..size {
            let j = size - 1 - row;
            for (i, &residue) in seq1.iter().enumerate().take(size) {
                let hit = matrix.is_match(i, j).unwrap_or(false) && is_informative(residue);
                cells.push(match (hit, i == j) {
                    (false, _) => DotCell::Empty,
                    (true, true) => DotCell::DiagonalMatch,
                    (true, false) => DotCell::Match,
                });
            }
        }

        Self { size, cells }
    }

    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self::new(&analysis.pair, &analysis.matrix)
    }

    /// Side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at display position, `col` indexing the first sequence.
    pub fn cell(&self, row: usize, col: usize) -> Option<DotCell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Position in the second sequence shown on display row `row`.
    pub fn seq2_index(&self, row: usize) -> usize {
        self.size.saturating_sub(1).saturating_sub(row)
    }

    /// Display row showing position `j` of the second sequence.
    pub fn row_of(&self, j: usize) -> usize {
        self.size.saturating_sub(1).saturating_sub(j)
    }

    /// Number of drawn dots.
    pub fn dot_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != DotCell::Empty).count()
    }

    /// Writes the plot as a binary PGM, each cell `scale` pixels wide.
    pub fn write_pgm<W: Write>(&self, writer: &mut W, scale: usize) -> io::Result<()> {
        let scale = scale.max(1);
        let side = self.size * scale;
        write!(writer, "P5\n{} {}\n255\n", side, side)?;

        let mut line = Vec::with_capacity(side);
        for row in self.cells.chunks(self.size.max(1)) {
            line.clear();
            for cell in row {
                line.extend(std::iter::repeat(cell.shade()).take(scale));
            }
            for _ in 0..scale {
                writer.write_all(&line)?;
            }
        }
        writer.flush()
    }

    /// Saves the plot as `{dir}/{id1}_{id2}.pgm`, creating `dir` if needed.
    pub fn save_pgm(&self, dir: &Path, pair: &SequencePair, scale: usize) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(plot_file_name(pair));
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_pgm(&mut writer, scale)?;
        info!("wrote dot plot to {}", path.display());
        Ok(path)
    }
}

/// File name of the plot image for a pair.
pub fn plot_file_name(pair: &SequencePair) -> String {
    let clean = |id: &str| -> String {
        id.chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect()
    };
    format!("{}_{}.pgm", clean(pair.first().id()), clean(pair.second().id()))
}
