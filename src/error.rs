//! Error type for the tick path

use core::fmt;

/// Failure reported by a collaborator while handling a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// An LED pin rejected a write
    Pin(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "LED pin write failed: {:?}", e),
        }
    }
}
