//! Input file loading.
//!
//! Reads the FASTA and parameter files from disk and hands their text to
//! the parsers in [`fasta`] and [`params`]:
//! - FASTA files are recognized by extension (.fasta, .fas, .fa, .fna,
//!   .ffn, .faa, .mpfa, .frn)
//! - Parameter files must be plain `.txt` files
//! - Report files must be `.txt` and are not silently overwritten

pub mod fasta;
pub mod params;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::error::{DotalignResult, ErrorKind};
use fasta::decode_fasta;

/// Report path used when none is given; it may be overwritten freely.
pub const DEFAULT_OUTPUT: &str = "output_fasta.txt";

/// Extensions accepted for FASTA input.
pub const FASTA_EXTENSIONS: &[&str] = &["fasta", "fas", "fa", "fna", "ffn", "faa", "mpfa", "frn"];

/// Errors about the files themselves rather than their content.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("The {role} file does not exist: {}", .path.display())]
    NotFound { role: &'static str, path: PathBuf },

    #[error("The {role} file must have one of the extensions {expected}: {}", .path.display())]
    UnsupportedExtension {
        role: &'static str,
        path: PathBuf,
        expected: String,
    },

    #[error("The {role} file is not valid UTF-8 text: {}", .path.display())]
    NotText { role: &'static str, path: PathBuf },

    #[error("The output path already contains a file: {}\nHint: pass --force to overwrite it", .0.display())]
    OutputExists(PathBuf),
}

impl InputError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InputError::IoError(_) => ErrorKind::Io,
            InputError::NotText { .. } => ErrorKind::Format,
            InputError::NotFound { .. }
            | InputError::UnsupportedExtension { .. }
            | InputError::OutputExists(_) => ErrorKind::Input,
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.to_lowercase())
}

/// Checks whether a path carries a FASTA extension.
pub fn has_fasta_extension<P: AsRef<Path>>(path: P) -> bool {
    extension_of(path.as_ref())
        .map(|ext| FASTA_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Checks whether a path carries a `.txt` extension.
pub fn has_text_extension<P: AsRef<Path>>(path: P) -> bool {
    extension_of(path.as_ref()).as_deref() == Some("txt")
}

fn read_existing(path: &Path, role: &'static str) -> Result<Vec<u8>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            role,
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Reads a FASTA file as text.
///
/// Undecodable content is reported as a FASTA format error.
pub fn read_fasta_text<P: AsRef<Path>>(path: P) -> DotalignResult<String> {
    let path = path.as_ref();
    if !has_fasta_extension(path) {
        return Err(InputError::UnsupportedExtension {
            role: "input",
            path: path.to_path_buf(),
            expected: FASTA_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into());
    }

    let bytes = read_existing(path, "input")?;
    let text = decode_fasta(bytes)?;
    info!("loaded FASTA file {}", path.display());
    Ok(text)
}

/// Reads a parameter file as text.
pub fn read_parameter_text<P: AsRef<Path>>(path: P) -> Result<String, InputError> {
    let path = path.as_ref();
    if !has_text_extension(path) {
        return Err(InputError::UnsupportedExtension {
            role: "parameters",
            path: path.to_path_buf(),
            expected: ".txt".to_string(),
        });
    }

    let bytes = read_existing(path, "parameters")?;
    let text = String::from_utf8(bytes).map_err(|_| InputError::NotText {
        role: "parameters",
        path: path.to_path_buf(),
    })?;
    info!("loaded parameter file {}", path.display());
    Ok(text)
}

/// Whether `path` names [`DEFAULT_OUTPUT`] in the working directory.
pub fn is_default_output(path: &Path) -> bool {
    let in_working_dir = match path.parent() {
        None => true,
        Some(parent) => parent.as_os_str().is_empty() || parent == Path::new("."),
    };
    in_working_dir && path.file_name() == Some(OsStr::new(DEFAULT_OUTPUT))
}

/// Checks that the report can be written to `path`.
///
/// `-` means standard output. An existing file other than
/// [`DEFAULT_OUTPUT`] is only accepted with `force`.
pub fn check_output_path<P: AsRef<Path>>(path: P, force: bool) -> Result<(), InputError> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        return Ok(());
    }

    if !has_text_extension(path) {
        return Err(InputError::UnsupportedExtension {
            role: "output",
            path: path.to_path_buf(),
            expected: ".txt".to_string(),
        });
    }

    if path.exists() && !force && !is_default_output(path) {
        return Err(InputError::OutputExists(path.to_path_buf()));
    }

    Ok(())
}
