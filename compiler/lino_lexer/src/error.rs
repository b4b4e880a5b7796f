//! Tokenizer errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no statements found in '{}', is the file empty?", path.display())]
    Empty { path: PathBuf },

    #[error("'{}' includes itself", path.display())]
    IncludeCycle { path: PathBuf },
}
