//! TUI rendering module.
//!
//! This module draws the dot plot viewer using ratatui:
//! - Sticky row labels on the left (second sequence, read bottom to top)
//! - An axis line with the first sequence above the plot
//! - The plot grid, one glyph per matrix cell
//! - Status bar with mode, cursor cell and score

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{AppMode, AppState};
use crate::plot::DotCell;
use glyphs::Glyphs;

/// Width reserved for row labels (including border and padding).
const ROW_LABEL_WIDTH: u16 = 12;
/// Minimum width for the plot panel.
const MIN_PLOT_PANEL_WIDTH: u16 = 10;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Lines above the grid showing the first sequence.
const AXIS_HEIGHT: u16 = 1;

/// Color scheme for residues on the axes.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// Nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' | 'U' => Color::Blue,
            _ => Color::DarkGray,
        }
    }
}

fn cell_style(cell: DotCell) -> Style {
    match cell {
        DotCell::DiagonalMatch => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        DotCell::Match => Style::default().fg(Color::Cyan),
        DotCell::Empty => Style::default().fg(Color::DarkGray),
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();

    // Main layout: content area + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let content_area = main_layout[0];
    let status_area = main_layout[1];

    // Split content area: row labels (left) + plot (right)
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ROW_LABEL_WIDTH),
            Constraint::Min(MIN_PLOT_PANEL_WIDTH),
        ])
        .split(content_area);

    let labels_area = content_layout[0];
    let plot_area = content_layout[1];

    // Borders and axis line
    let visible_rows = plot_area.height.saturating_sub(2 + AXIS_HEIGHT) as usize;
    let visible_cols = plot_area.width.saturating_sub(2) as usize;

    render_labels_panel(frame, state, glyphs, labels_area, visible_rows);
    render_plot_panel(frame, state, glyphs, plot_area, visible_rows, visible_cols);
    render_status_bar(frame, state, status_area);
}

/// Renders the row labels for the second sequence.
fn render_labels_panel(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect, visible_rows: usize) {
    let color_scheme = DnaColorScheme;
    let second = state.analysis.pair.second();
    let size = state.plot.size();
    let number_width = (ROW_LABEL_WIDTH as usize).saturating_sub(5);

    let mut lines: Vec<Line> = vec![Line::from(glyphs.h_separator.repeat(number_width + 2))];

    let start_row = state.viewport.first_row;
    let end_row = (start_row + visible_rows).min(size);

    for row in start_row..end_row {
        let j = state.plot.seq2_index(row);
        let residue = second.residue_at(j).unwrap_or(' ');
        let number_style = if row == state.cursor.row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>w$}", j + 1, w = number_width), number_style),
            Span::raw(" "),
            Span::styled(
                residue.to_string(),
                Style::default().fg(color_scheme.get_color(residue)),
            ),
        ]));
    }

    let block = Block::default().borders(Borders::ALL).title(second.id().to_string());
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the axis line and the plot grid.
fn render_plot_panel(
    frame: &mut Frame,
    state: &AppState,
    glyphs: &Glyphs,
    area: Rect,
    visible_rows: usize,
    visible_cols: usize,
) {
    let color_scheme = DnaColorScheme;
    let first = state.analysis.pair.first();
    let size = state.plot.size();
    let mut lines: Vec<Line> = Vec::new();

    let start_row = state.viewport.first_row;
    let end_row = (start_row + visible_rows).min(size);
    let start_col = state.viewport.first_col;
    let end_col = (start_col + visible_cols).min(size);

    let axis: Vec<Span> = (start_col..end_col)
        .map(|col| {
            let residue = first.residue_at(col).unwrap_or(' ');
            let mut style = Style::default().fg(color_scheme.get_color(residue));
            if col == state.cursor.col {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled(residue.to_string(), style)
        })
        .collect();
    lines.push(Line::from(axis));

    for row in start_row..end_row {
        let is_cursor_row = row == state.cursor.row;
        let spans: Vec<Span> = (start_col..end_col)
            .map(|col| {
                let cell = state.plot.cell(row, col).unwrap_or(DotCell::Empty);
                if is_cursor_row && col == state.cursor.col {
                    let glyph = match cell {
                        DotCell::Empty => glyphs.cursor,
                        _ => glyphs.for_cell(cell),
                    };
                    Span::styled(
                        glyph,
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(glyphs.for_cell(cell), cell_style(cell))
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    // Show cursor position and visible range in title
    let title = format!(
        "{} {} {} [View: {}-{}/{}]",
        first.id(),
        glyphs.v_separator,
        state.analysis.pair.second().id(),
        start_col + 1,
        end_col,
        size
    );

    let block = Block::default().borders(Borders::ALL).title(title);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Text shown on the right of the status bar.
pub fn position_info(state: &AppState) -> String {
    let pair = &state.analysis.pair;
    let i = state.cursor.col;
    let j = state.cursor_seq2_index();
    let a = pair.first().residue_at(i).unwrap_or(' ');
    let b = pair.second().residue_at(j).unwrap_or(' ');
    let score = state
        .cursor_score()
        .map(|s| s.to_string())
        .unwrap_or_default();

    format!(
        "x {}:{} y {}:{} score={} | identity {:.1}% ",
        i + 1,
        a,
        j + 1,
        b,
        score,
        state.analysis.report.percent_identity()
    )
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let position_info = position_info(state);
    let message = state.status_message.as_deref().unwrap_or("");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.chars().count())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}

/// Calculates the visible dimensions of the plot grid.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    // Account for borders, axis line and status bar
    let visible_cols = terminal_width.saturating_sub(ROW_LABEL_WIDTH + 2) as usize;
    let visible_rows = terminal_height.saturating_sub(STATUS_BAR_HEIGHT + 2 + AXIS_HEIGHT) as usize;
    (visible_rows, visible_cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{analyze, AnalysisOptions};

    #[test]
    fn test_dna_colors() {
        let scheme = DnaColorScheme;
        assert_eq!(scheme.get_color('A'), Color::Red);
        assert_eq!(scheme.get_color('a'), Color::Red);
        assert_eq!(scheme.get_color('C'), Color::Green);
        assert_eq!(scheme.get_color('G'), Color::Yellow);
        assert_eq!(scheme.get_color('T'), Color::Blue);
        assert_eq!(scheme.get_color('-'), Color::DarkGray);
    }

    #[test]
    fn test_visible_dimensions() {
        let (rows, cols) = calculate_visible_dimensions(100, 50);
        // 100 - 12 (labels) - 2 (borders) = 86 cols
        // 50 - 1 (status) - 2 (borders) - 1 (axis) = 46 rows
        assert_eq!(cols, 86);
        assert_eq!(rows, 46);
    }

    #[test]
    fn test_position_info() {
        let analysis = analyze(">a\nACGT\n>b\nACCT\n", None, &AnalysisOptions::default()).unwrap();
        let mut state = AppState::new(analysis);
        state.cursor.col = 2;
        state.goto_diagonal();
        assert_eq!(position_info(&state), "x 3:G y 3:C score=-1 | identity 75.0% ");
    }

    #[test]
    fn test_glyph_selection() {
        let ascii = glyphs::select(false);
        assert_eq!(ascii.for_cell(DotCell::DiagonalMatch), "#");
        assert_eq!(ascii.for_cell(DotCell::Empty), ".");
        let fancy = glyphs::select(true);
        assert_eq!(fancy.for_cell(DotCell::DiagonalMatch), "█");
    }
}
