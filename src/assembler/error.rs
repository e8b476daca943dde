//! Errors raised while reading and parsing CG-16-1 source.
use std::path::PathBuf;

/// Everything that can go wrong between a source line and an `Instruction`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid syntax: {0}")]
    Syntax(String),
    #[error("value higher than 16-bits ({0})")]
    Overflow(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unable to read `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn syntax<S: Into<String>>(msg: S) -> Self {
        Error::Syntax(msg.into())
    }

    /// Attaches a 1-based line number to a per-line failure.
    pub(crate) fn at_line(self, line: usize) -> Self {
        Error::Line { line, source: Box::new(self) }
    }

    /// Returns the underlying cause, looking through line wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Line { source, .. } => source.root(),
            e => e,
        }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self.root(), Error::Overflow(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
