//! dotalign - sequence pair scoring and dot plots
//!
//! ## Usage
//!
//! ```bash
//! dotalign pair.fasta                      # report to output_fasta.txt, plot to dotplots/
//! dotalign pair.fasta -p params.txt -o -   # custom scores, report on stdout
//! dotalign pair.fasta --view               # browse the dot plot in the terminal
//! dotalign --show-params > params.txt      # default parameter file
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::info;

use dotalign::controller::run_viewer;
use dotalign::formats::params::ScoringConfig;
use dotalign::formats::{check_output_path, DEFAULT_OUTPUT};
use dotalign::model::{Alphabet, AlphabetPolicy, AppState};
use dotalign::pipeline::{analyze_files, Analysis, AnalysisOptions};
use dotalign::plot::DotPlot;
use dotalign::report::write_report;

/// Alphabet specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlphabetArg {
    /// Nucleotide or amino-acid symbols
    Any,
    /// IUPAC nucleotides with ambiguity codes
    Nucleotide,
    /// Amino acids with ambiguity codes
    Protein,
}

impl From<AlphabetArg> for Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Any => Alphabet::Any,
            AlphabetArg::Nucleotide => Alphabet::Nucleotide,
            AlphabetArg::Protein => Alphabet::Protein,
        }
    }
}

/// dotalign - Score two equal-length sequences and draw their dot plot
///
/// The FASTA file must hold exactly two sequences of the same length.
/// Writes a text report and a PGM dot plot image; --view opens the dot
/// plot in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file holding the two sequences
    #[arg(required_unless_present = "show_params")]
    file: Option<PathBuf>,

    /// Scoring parameter file (key=value lines, .txt)
    #[arg(short = 'p', long = "params")]
    params: Option<PathBuf>,

    /// Report file (.txt). Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Overwrite an existing report file
    #[arg(long)]
    force: bool,

    /// Characters accepted in sequences
    #[arg(short = 'a', long = "alphabet", value_enum, default_value = "any")]
    alphabet: AlphabetArg,

    /// Replace illegal characters with N (X for proteins) instead of failing
    #[arg(long)]
    lenient: bool,

    /// Directory receiving the dot plot image
    #[arg(long = "plot-dir", default_value = "dotplots")]
    plot_dir: PathBuf,

    /// Do not write the dot plot image
    #[arg(long = "no-plot")]
    no_plot: bool,

    /// Pixels per dot plot cell
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..=64))]
    scale: u16,

    /// Browse the dot plot in the terminal
    #[arg(long)]
    view: bool,

    /// Use Unicode glyphs in the viewer
    #[arg(long)]
    fancy: bool,

    /// Print the default parameter file and exit
    #[arg(long = "show-params")]
    show_params: bool,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// Writes the report to a file or stdout.
fn emit_report(output: &Path, analysis: &Analysis) -> Result<()> {
    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_report(&mut handle, analysis)?;
    } else {
        let file = File::create(output)
            .with_context(|| format!("Failed to create report file {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        write_report(&mut writer, analysis)?;
        eprintln!("Wrote report to {}", output.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.show_params {
        print!("{}", ScoringConfig::default());
        return Ok(());
    }

    let Some(file) = args.file.as_deref() else {
        anyhow::bail!("No FASTA file given");
    };

    check_output_path(&args.output, args.force)?;

    let options = AnalysisOptions {
        alphabet: args.alphabet.into(),
        policy: if args.lenient {
            AlphabetPolicy::Lenient
        } else {
            AlphabetPolicy::Strict
        },
    };

    let analysis = analyze_files(file, args.params.as_deref(), &options)
        .with_context(|| format!("Failed to analyse {}", file.display()))?;

    if !analysis.warnings.is_empty() {
        eprintln!(
            "Warning: {} invalid character(s) found in the input file. These have been converted to \"{}\".",
            analysis.warnings.len(),
            options.alphabet.unknown_symbol()
        );
    }

    emit_report(&args.output, &analysis)?;

    if !args.no_plot {
        let plot = DotPlot::from_analysis(&analysis);
        info!("dot plot has {} drawn dots", plot.dot_count());
        let path = plot
            .save_pgm(&args.plot_dir, &analysis.pair, usize::from(args.scale))
            .with_context(|| format!("Failed to write dot plot to {}", args.plot_dir.display()))?;
        eprintln!("Wrote dot plot to {}", path.display());
    }

    if args.view {
        run_viewer(AppState::new(analysis), args.fancy)?;
    }

    Ok(())
}
