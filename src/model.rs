//! Data model for sequence-pair analysis and the dot plot viewer.
//!
//! This module contains the data structures for representing:
//! - Sequence records and the validated pair
//! - Alphabets and the policy applied to illegal characters
//! - Viewport and application state of the viewer
//!
//! Records and pairs are immutable once built: fields are private and
//! exposed through read-only accessors.

use std::fmt;
use std::ops::Range;

use crate::pipeline::Analysis;
use crate::plot::{DotCell, DotPlot};

/// A single named sequence from a FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    id: String,
    description: String,
    sequence: String,
}

impl SequenceRecord {
    /// Creates a new record. The sequence is stored as given.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    /// The identifier (first token of the header, without '>').
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The rest of the header line, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    /// Returns the length of the sequence in residues.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Gets the residue at a specific position.
    pub fn residue_at(&self, pos: usize) -> Option<char> {
        self.as_bytes().get(pos).map(|&b| b as char)
    }

    /// Gets a slice of the sequence, clamped to its bounds.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = range.start.min(self.sequence.len());
        let end = range.end.min(self.sequence.len());
        &self.sequence[start..end]
    }
}

/// Set of characters accepted in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// Nucleotide or amino-acid symbols (union of the two).
    #[default]
    Any,
    /// IUPAC DNA/RNA symbols including ambiguity codes.
    Nucleotide,
    /// Amino acids plus the extended IUPAC codes and stop.
    Protein,
}

impl Alphabet {
    const NUCLEOTIDE: &'static [u8] = b"ACGTUNRYSWKMBDHV-";
    const PROTEIN: &'static [u8] = b"ACDEFGHIKLMNPQRSTVWYXBZJUO*-";

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Any => "nucleotide/protein",
            Alphabet::Nucleotide => "nucleotide",
            Alphabet::Protein => "protein",
        }
    }

    /// Checks an upper-case byte.
    pub fn is_valid(&self, b: u8) -> bool {
        match self {
            Alphabet::Nucleotide => Self::NUCLEOTIDE.contains(&b),
            Alphabet::Protein => Self::PROTEIN.contains(&b),
            Alphabet::Any => Self::NUCLEOTIDE.contains(&b) || Self::PROTEIN.contains(&b),
        }
    }

    pub fn is_valid_char(&self, c: char) -> bool {
        c.is_ascii() && self.is_valid(c as u8)
    }

    /// Symbol substituted for illegal characters under [`AlphabetPolicy::Lenient`].
    pub fn unknown_symbol(&self) -> char {
        match self {
            Alphabet::Protein => 'X',
            Alphabet::Any | Alphabet::Nucleotide => 'N',
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a character outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphabetPolicy {
    /// Abort the run with an alphabet error.
    #[default]
    Strict,
    /// Substitute the unknown symbol and record a warning.
    Lenient,
}

/// An illegal character that was tolerated and substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetWarning {
    pub record_id: String,
    pub line: usize,
    pub column: usize,
    pub found: char,
    pub replacement: char,
}

impl fmt::Display for AlphabetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid character {:?} in sequence '{}' at line {}, column {} (replaced by '{}')",
            self.found, self.record_id, self.line, self.column, self.replacement
        )
    }
}

/// Two validated records of identical length.
///
/// Only [`crate::validate::validate_pair`] builds this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    first: SequenceRecord,
    second: SequenceRecord,
    len: usize,
}

impl SequencePair {
    pub(crate) fn new(first: SequenceRecord, second: SequenceRecord) -> Self {
        let len = first.len();
        Self { first, second, len }
    }

    pub fn first(&self) -> &SequenceRecord {
        &self.first
    }

    pub fn second(&self) -> &SequenceRecord {
        &self.second
    }

    /// Shared length `L` of both sequences.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The viewport defines what portion of the dot plot is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible display row
    pub first_row: usize,
    /// Index of the first visible column
    pub first_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            first_row: 0,
            first_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Updates the viewport dimensions.
    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
    }

    /// Returns the range of visible rows.
    pub fn row_range(&self) -> Range<usize> {
        self.first_row..self.first_row + self.visible_rows
    }

    /// Returns the range of visible columns.
    pub fn col_range(&self) -> Range<usize> {
        self.first_col..self.first_col + self.visible_cols
    }
}

/// The current cursor position in the dot plot.
///
/// `row` is a display row (second sequence, reversed), `col` a position
/// in the first sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Creates a new cursor at origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor at a specific position.
    pub fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete viewer state.
#[derive(Debug)]
pub struct AppState {
    /// Everything the run produced
    pub analysis: Analysis,
    /// Display cells derived from the score matrix
    pub plot: DotPlot,
    /// Current viewport
    pub viewport: Viewport,
    /// Current cursor position
    pub cursor: Cursor,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates a new viewer state, with the cursor on the first diagonal cell.
    pub fn new(analysis: Analysis) -> Self {
        let plot = DotPlot::from_analysis(&analysis);
        let status_message = analysis
            .warnings
            .first()
            .map(|_| format!("{} alphabet warning(s), see report", analysis.warnings.len()));
        let mut state = Self {
            analysis,
            plot,
            viewport: Viewport::new(0, 0),
            cursor: Cursor::new(),
            mode: AppMode::Normal,
            should_quit: false,
            status_message,
        };
        state.cursor.row = state.plot.row_of(0);
        state
    }

    fn size(&self) -> usize {
        self.plot.size()
    }

    /// Position in the second sequence under the cursor.
    pub fn cursor_seq2_index(&self) -> usize {
        self.plot.seq2_index(self.cursor.row)
    }

    /// Display cell under the cursor.
    pub fn cursor_cell(&self) -> DotCell {
        self.plot
            .cell(self.cursor.row, self.cursor.col)
            .unwrap_or(DotCell::Empty)
    }

    /// Score of the matrix cell under the cursor.
    pub fn cursor_score(&self) -> Option<f64> {
        self.analysis
            .matrix
            .get(self.cursor.col, self.cursor_seq2_index())
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport.resize(rows, cols);
        self.ensure_cursor_visible();
    }

    /// Moves the cursor up by one row.
    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor down by one row.
    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.size() {
            self.cursor.row += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor left by one column.
    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor right by one column.
    pub fn move_right(&mut self) {
        if self.cursor.col + 1 < self.size() {
            self.cursor.col += 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn goto_first_column(&mut self) {
        self.cursor.col = 0;
        self.ensure_cursor_visible();
    }

    pub fn goto_last_column(&mut self) {
        self.cursor.col = self.size().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    pub fn goto_top(&mut self) {
        self.cursor.row = 0;
        self.ensure_cursor_visible();
    }

    pub fn goto_bottom(&mut self) {
        self.cursor.row = self.size().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Moves the cursor to the diagonal cell of the current column.
    pub fn goto_diagonal(&mut self) {
        self.cursor.row = self.plot.row_of(self.cursor.col);
        self.ensure_cursor_visible();
    }

    pub fn page_up(&mut self) {
        let step = self.viewport.visible_rows.max(1);
        self.cursor.row = self.cursor.row.saturating_sub(step);
        self.ensure_cursor_visible();
    }

    pub fn page_down(&mut self) {
        let step = self.viewport.visible_rows.max(1);
        let last = self.size().saturating_sub(1);
        self.cursor.row = (self.cursor.row + step).min(last);
        self.ensure_cursor_visible();
    }

    /// Ensures the cursor is visible in the viewport, with centering behavior.
    fn ensure_cursor_visible(&mut self) {
        if self.cursor.row < self.viewport.first_row {
            self.viewport.first_row = self.cursor.row;
        } else if self.viewport.visible_rows > 0
            && self.cursor.row >= self.viewport.first_row + self.viewport.visible_rows
        {
            self.viewport.first_row = self.cursor.row + 1 - self.viewport.visible_rows;
        }

        // Horizontal scrolling - center when reaching edge
        if self.cursor.col < self.viewport.first_col
            || self.cursor.col >= self.viewport.first_col + self.viewport.visible_cols
        {
            self.center_column();
        }

        self.clamp_viewport();
    }

    /// Centers the current column in the viewport.
    fn center_column(&mut self) {
        if self.viewport.visible_cols > 0 {
            let half = self.viewport.visible_cols / 2;
            self.viewport.first_col = self.cursor.col.saturating_sub(half);
        }
    }

    /// Clamps the viewport to valid plot bounds.
    fn clamp_viewport(&mut self) {
        let size = self.size();
        let max_index = size.saturating_sub(1);

        if self.viewport.first_row + self.viewport.visible_rows > size {
            self.viewport.first_row = size.saturating_sub(self.viewport.visible_rows);
        }
        if self.viewport.first_col + self.viewport.visible_cols > size {
            self.viewport.first_col = size.saturating_sub(self.viewport.visible_cols);
        }

        self.cursor.row = self.cursor.row.min(max_index);
        self.cursor.col = self.cursor.col.min(max_index);
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        if let AppMode::Command(cmd) = std::mem::take(&mut self.mode) {
            match cmd.trim() {
                "q" | "quit" => self.should_quit = true,
                "d" | "diag" => self.goto_diagonal(),
                other => match other.parse::<usize>() {
                    Ok(col) if col > 0 && col <= self.size() => {
                        // 1-indexed for the user
                        self.cursor.col = col - 1;
                        self.ensure_cursor_visible();
                    }
                    Ok(col) => {
                        self.status_message = Some(format!("Invalid column: {}", col));
                    }
                    Err(_) => {
                        self.status_message = Some(format!("Unknown command: {}", other));
                    }
                },
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::params::ScoringConfig;
    use crate::pipeline::{analyze, AnalysisOptions};

    fn state_for(seq1: &str, seq2: &str) -> AppState {
        let fasta = format!(">a\n{}\n>b\n{}\n", seq1, seq2);
        let analysis = analyze(&fasta, None, &AnalysisOptions::default()).unwrap();
        AppState::new(analysis)
    }

    #[test]
    fn test_record_accessors() {
        let rec = SequenceRecord::new("seq1", "some protein", "ACGT");
        assert_eq!(rec.id(), "seq1");
        assert_eq!(rec.description(), "some protein");
        assert_eq!(rec.len(), 4);
        assert_eq!(rec.residue_at(0), Some('A'));
        assert_eq!(rec.residue_at(3), Some('T'));
        assert_eq!(rec.residue_at(4), None);
        assert_eq!(rec.slice(1..10), "CGT");
    }

    #[test]
    fn test_nucleotide_alphabet() {
        for &b in b"ACGTUNRYSWKMBDHV-" {
            assert!(Alphabet::Nucleotide.is_valid(b), "{} should be valid", b as char);
        }
        assert!(!Alphabet::Nucleotide.is_valid(b'E'));
        assert!(!Alphabet::Nucleotide.is_valid(b'*'));
        assert!(!Alphabet::Nucleotide.is_valid(b'a'));
    }

    #[test]
    fn test_protein_and_any_alphabets() {
        assert!(Alphabet::Protein.is_valid(b'W'));
        assert!(Alphabet::Protein.is_valid(b'*'));
        assert!(Alphabet::Any.is_valid(b'E'));
        assert!(Alphabet::Any.is_valid(b'-'));
        assert!(!Alphabet::Any.is_valid(b'1'));
        assert!(!Alphabet::Any.is_valid_char('é'));
        assert_eq!(Alphabet::Protein.unknown_symbol(), 'X');
        assert_eq!(Alphabet::Nucleotide.unknown_symbol(), 'N');
    }

    #[test]
    fn test_viewer_starts_on_first_diagonal_cell() {
        let state = state_for("ACGT", "ACCT");
        assert_eq!(state.cursor.col, 0);
        assert_eq!(state.cursor_seq2_index(), 0);
        assert_eq!(state.cursor_cell(), DotCell::DiagonalMatch);
        assert_eq!(state.cursor_score(), Some(ScoringConfig::default().match_score));
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = state_for("ACGTACGT", "ACGTACGA");
        state.update_viewport_size(3, 4);

        state.goto_top();
        assert_eq!(state.cursor.row, 0);
        state.move_up();
        assert_eq!(state.cursor.row, 0);

        state.move_down();
        assert_eq!(state.cursor.row, 1);
        assert!(state.viewport.row_range().contains(&1));

        state.goto_last_column();
        assert_eq!(state.cursor.col, 7);
        state.move_right();
        assert_eq!(state.cursor.col, 7);
        assert!(state.viewport.col_range().contains(&7));

        state.goto_first_column();
        state.move_left();
        assert_eq!(state.cursor.col, 0);

        state.goto_bottom();
        assert_eq!(state.cursor.row, 7);
        assert!(state.viewport.row_range().contains(&7));
    }

    #[test]
    fn test_commands() {
        let mut state = state_for("ACGTACGT", "ACGTACGA");
        state.update_viewport_size(4, 4);

        state.enter_command_mode();
        state.command_input('5');
        state.execute_command();
        assert_eq!(state.cursor.col, 4);
        assert_eq!(state.mode, AppMode::Normal);

        state.enter_command_mode();
        state.command_input('d');
        state.execute_command();
        assert_eq!(state.cursor_seq2_index(), 4);

        state.enter_command_mode();
        state.command_input('9');
        state.command_input('9');
        state.execute_command();
        assert_eq!(state.status_message.as_deref(), Some("Invalid column: 99"));

        state.enter_command_mode();
        state.command_input('q');
        state.execute_command();
        assert!(state.should_quit);
    }

    #[test]
    fn test_command_backspace_leaves_mode() {
        let mut state = state_for("AC", "AC");
        state.enter_command_mode();
        state.command_input('q');
        state.command_backspace();
        assert_eq!(state.mode, AppMode::Normal);
    }
}
