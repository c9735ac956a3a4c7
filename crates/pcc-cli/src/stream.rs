//! Stream selection: a path, or `-` / nothing for stdin and stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, StdoutLock, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Name used for a stream in diagnostics.
pub fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if !is_stdio(path) => p.display().to_string(),
        _ => String::from("-"),
    }
}

pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file = File::open(p).with_context(|| format!("cannot open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Destination of a transcode.
///
/// A file destination is written to a temporary file next to it and only
/// renamed into place by [`commit`](Self::commit). Dropping an uncommitted
/// `Output` removes the temporary file and leaves the destination as it was.
pub enum Output {
    Stdout(BufWriter<StdoutLock<'static>>),
    File {
        staged: BufWriter<NamedTempFile>,
        path: PathBuf,
    },
}

impl Output {
    /// Flush everything and move a staged file over its destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush or the rename fails.
    pub fn commit(self) -> Result<()> {
        match self {
            Self::Stdout(mut out) => out.flush().context("cannot write to stdout"),
            Self::File { staged, path } => {
                let staged = staged
                    .into_inner()
                    .map_err(io::IntoInnerError::into_error)
                    .with_context(|| format!("cannot write {}", path.display()))?;
                staged
                    .persist(&path)
                    .map_err(|e| e.error)
                    .with_context(|| format!("cannot create {}", path.display()))?;
                Ok(())
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File { staged, .. } => staged.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File { staged, .. } => staged.flush(),
        }
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Output> {
    match path {
        Some(p) if !is_stdio(path) => {
            let dir = match p.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            let staged = NamedTempFile::new_in(dir)
                .with_context(|| format!("cannot create {}", p.display()))?;
            Ok(Output::File {
                staged: BufWriter::new(staged),
                path: p.to_path_buf(),
            })
        }
        _ => Ok(Output::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}
