use core::fmt;

/// Represents an error while parsing a delimited MIDI packet.
///
/// The stream decoders never produce errors: malformed input just produces fewer events.
/// Errors only come out of [`Event::parse`](struct.Event.html#method.parse), which is asked to read
/// exactly one message and therefore has something to complain about.
///
/// This type wraps an `ErrorKind`, and optionally the `ErrorKind` that caused it.
/// It is a couple of pointers in size and never allocates.
///
/// If the `std` feature is enabled, this type implements `std::error::Error`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Error {
    kind: &'static ErrorKind,
    cause: Option<&'static ErrorKind>,
}
impl Error {
    /// Create a new error with the given `ErrorKind`.
    #[inline]
    pub fn new(kind: &'static ErrorKind) -> Error {
        Error::from(kind)
    }

    /// More information about the error itself.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        *self.kind
    }

    /// The lower-level error that was wrapped by this one, if any.
    #[inline]
    pub fn cause(&self) -> Option<ErrorKind> {
        self.cause.copied()
    }

    #[inline]
    fn chain_ctx(self, ctx: &'static ErrorKind) -> Error {
        Error {
            kind: ctx,
            cause: Some(self.kind),
        }
    }
}
impl From<&'static ErrorKind> for Error {
    #[inline]
    fn from(kind: &'static ErrorKind) -> Error {
        Error { kind, cause: None }
    }
}
impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.kind, f)
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(cause) = self.cause {
            writeln!(f)?;
            write!(f, "  caused by: {}", cause)?;
        }
        Ok(())
    }
}
#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The type of error that occurred while parsing a packet.
///
/// Errors are broadly categorized into 2 classes, and specific error info is provided as a
/// non-normative string literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The packet does not hold a readable MIDI message: it is empty, truncated, starts with a
    /// reserved status, or has a status byte where a data byte was expected.
    Invalid(&'static str),

    /// A message could be read, but the packet is not compliant (for example, there are leftover
    /// bytes after the message).
    ///
    /// This kind of error is not emitted by default, only if the `strict` crate feature is
    /// enabled.
    Malformed(&'static str),
}
impl ErrorKind {
    /// Get the informative message on what exact part of the MIDI format was not respected.
    #[inline]
    pub fn message(&self) -> &'static str {
        match *self {
            ErrorKind::Invalid(msg) => msg,
            ErrorKind::Malformed(msg) => msg,
        }
    }
}
impl fmt::Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Invalid(msg) => write!(f, "invalid midi: {}", msg),
            ErrorKind::Malformed(msg) => write!(f, "malformed midi: {}", msg),
        }
    }
}

macro_rules! err_invalid {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Invalid($msg);
        ERR_KIND
    }};
}
macro_rules! err_malformed {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Malformed($msg);
        ERR_KIND
    }};
}

pub(crate) trait ResultExt<T> {
    fn context(self, ctx: &'static ErrorKind) -> StdResult<T, Error>;
}
impl<T> ResultExt<T> for StdResult<T, Error> {
    #[inline]
    fn context(self, ctx: &'static ErrorKind) -> StdResult<T, Error> {
        self.map_err(|err| err.chain_ctx(ctx))
    }
}
impl<T> ResultExt<T> for StdResult<T, &'static ErrorKind> {
    #[inline]
    fn context(self, ctx: &'static ErrorKind) -> StdResult<T, Error> {
        self.map_err(|errkind| Error::from(errkind).chain_ctx(ctx))
    }
}

/// The result type used by the packet parser.
pub type Result<T> = StdResult<T, Error>;
pub(crate) use core::result::Result as StdResult;
