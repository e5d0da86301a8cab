// SPDX-License-Identifier: MIT

//! Error type shared by every identity and entropy backend.
use core::{
    fmt,
    fmt::{Display, Formatter},
};

/// The step of a driver session that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Opening the session or initializing the controller.
    Init,
    /// Reading the identity or drawing random data.
    Read,
    /// Closing the session.
    Release,
}

/// Classification of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The underlying driver reported a failure at `Step`.
    Driver(Step),
    /// The secure element produced its known default output. Any
    /// bytes already written to the caller buffer must not be used.
    Implausible,
    /// The entropy source was used before it was enabled.
    NotEnabled,
    /// The power-control line could not be driven.
    Power,
}

/// Error type for identity and entropy failures.
///
/// Every failure is a plain return value; no backend retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Create a new error of the given kind.
    ///
    /// # Example
    /// ```
    /// use hwtrust::error::{Error, ErrorKind, Step};
    ///
    /// let err = Error::new(ErrorKind::Driver(Step::Release));
    /// assert_eq!(err.kind(), ErrorKind::Driver(Step::Release));
    /// ```
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) const fn driver(step: Step) -> Self {
        Self::new(ErrorKind::Driver(step))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl core::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Driver(Step::Init) => write!(f, "hwtrust error: driver init failed"),
            ErrorKind::Driver(Step::Read) => write!(f, "hwtrust error: driver read failed"),
            ErrorKind::Driver(Step::Release) => write!(f, "hwtrust error: driver release failed"),
            ErrorKind::Implausible => {
                write!(f, "hwtrust error: secure element returned its default pattern")
            }
            ErrorKind::NotEnabled => write!(f, "hwtrust error: entropy source not enabled"),
            ErrorKind::Power => write!(f, "hwtrust error: power line could not be driven"),
        }
    }
}
