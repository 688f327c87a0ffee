//! # dotalign - Sequence pair scoring and dot plots
//!
//! Reads two equal-length sequences from a FASTA file, scores them
//! position by position and builds the all-pairs matrix behind a dot plot.
//!
//! ## Architecture
//!
//! Each stage is a pure function over immutable values:
//! - `formats`: FASTA and parameter file loading and parsing
//! - `validate`: checks that exactly two equal-length sequences remain
//! - `scoring`: position-wise score, matches and percent identity
//! - `matrix`: the `L × L` score matrix
//! - `pipeline`: runs the stages above in order
//! - `report`: text report
//! - `plot`: dot plot cells and PGM output
//!
//! The interactive viewer follows an event-driven design:
//! - `model`: records, pair and viewer state
//! - `event`: keyboard event handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui
//! - `controller`: terminal setup and main loop
//!
//! ## Example
//!
//! ```
//! use dotalign::pipeline::{analyze, AnalysisOptions};
//!
//! let analysis = analyze(">a\nACGT\n>b\nACCT\n", None, &AnalysisOptions::default()).unwrap();
//! assert_eq!(analysis.report.score, 2.0);
//! assert_eq!(analysis.report.percent_identity(), 75.0);
//! ```

pub mod controller;
pub mod error;
pub mod event;
pub mod formats;
pub mod matrix;
pub mod model;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod scoring;
pub mod ui;
pub mod validate;

pub use error::{DotalignError, DotalignResult, ErrorKind};
