//! Three-kind error taxonomy shared by every fallible operation in this
//! crate, and one small mapping function per subordinate contract.
//!
//! Subordinate error values never escape [`TtyError`] — each mapping
//! function below collapses a collaborator's richer error type down to
//! the kind the screen model actually needs to react to.

use thiserror::Error;

use crate::backend::{FontError, LinePrinterError};

/// The taxonomy every public operation in this crate reports through.
///
/// There is no `NoError` variant: success is `Ok(())`/`Ok(T)`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TtyError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("memory allocation failed: {0}")]
    Memory(String),
    #[error("unknown error from a subordinate component: {0}")]
    Unknown(String),
}

impl TtyError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn memory(msg: impl Into<String>) -> Self {
        Self::Memory(msg.into())
    }
}

/// Maps a [`FontError`] from the font resource contract into [`TtyError`].
pub fn font_to_tty_error(err: FontError) -> TtyError {
    match err {
        FontError::InvalidArgument(msg) => TtyError::InvalidArgument(msg),
        FontError::Memory(msg) => TtyError::Memory(msg),
        FontError::Unknown(msg) => TtyError::Unknown(msg),
    }
}

/// Maps a [`LinePrinterError`] from the line printer contract into [`TtyError`].
pub fn line_printer_to_tty_error(err: LinePrinterError) -> TtyError {
    match err {
        LinePrinterError::InvalidArgument(msg) => TtyError::InvalidArgument(msg),
        LinePrinterError::Memory(msg) => TtyError::Memory(msg),
        LinePrinterError::Unknown(msg) => TtyError::Unknown(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_error_kinds_map_through() {
        assert_eq!(
            font_to_tty_error(FontError::InvalidArgument("bad path".into())),
            TtyError::InvalidArgument("bad path".into())
        );
        assert_eq!(
            font_to_tty_error(FontError::Memory("oom".into())),
            TtyError::Memory("oom".into())
        );
        assert_eq!(
            font_to_tty_error(FontError::Unknown("rasterizer crashed".into())),
            TtyError::Unknown("rasterizer crashed".into())
        );
    }
}
