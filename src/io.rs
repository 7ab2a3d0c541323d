//! Output sinks for the encoder.
//!
//! The encoder writes through the crate-local [`Write`](trait.Write.html) trait instead of
//! `std::io::Write`, so that it stays usable in `no_std` environments.
//! Implementations are provided for `Vec<u8>` (never fails), for fixed buffers ([`Cursor`] and
//! `&mut [u8]`, which fail when out of space) and, with the `std` feature, for any
//! `std::io::Write` through [`IoWrap`].

use crate::prelude::*;

pub type IoResult<W> = StdResult<(), <W as Write>::Error>;

/// A sink of raw MIDI bytes.
pub trait Write {
    type Error;
    fn write_all(&mut self, buf: &[u8]) -> IoResult<Self>;
}

impl Write for Vec<u8> {
    type Error = Infallible;
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> IoResult<Self> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Writes into a fixed-size buffer, remembering how much of it has been filled.
///
/// Useful to encode messages on the stack:
///
/// ```rust
/// use midiwire::{io::Cursor, Event};
///
/// let mut buf = [0; 3];
/// let mut cursor = Cursor::new(&mut buf);
/// Event::note_on(0, 60, 100).write(&mut cursor).ok();
/// assert_eq!(cursor.written(), &[0x90, 60, 100]);
/// ```
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    cur: usize,
}
impl<'a> Cursor<'a> {
    pub fn new(slice: &mut [u8]) -> Cursor {
        Cursor { buf: slice, cur: 0 }
    }
    pub fn into_parts(self) -> (&'a mut [u8], usize) {
        (self.buf, self.cur)
    }
    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.cur]
    }
    pub fn cursor(&self) -> usize {
        self.cur
    }
    /// Rewind the cursor to the start of the buffer, so that it can be reused for another
    /// message.
    pub fn clear(&mut self) {
        self.cur = 0;
    }
}
impl<'a> Write for Cursor<'a> {
    type Error = CursorError;
    fn write_all(&mut self, buf: &[u8]) -> IoResult<Self> {
        //Cannot overflow because `cur <= buf.len()` is always true.
        let up_to = self.cur + buf.len();
        if up_to > self.buf.len() {
            let space = self.buf.len() - self.cur;
            self.buf[self.cur..].copy_from_slice(&buf[..space]);
            self.cur = self.buf.len();
            Err(CursorError::OutOfSpace)
        } else {
            self.buf[self.cur..up_to].copy_from_slice(buf);
            self.cur = up_to;
            Ok(())
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorError {
    /// The message did not fit in the buffer.
    /// Whatever fit was written anyway.
    OutOfSpace,
}
impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CursorError::OutOfSpace => write!(f, "output buffer is out of space"),
        }
    }
}

impl<'a> Write for &'a mut [u8] {
    type Error = CursorError;
    fn write_all(&mut self, buf: &[u8]) -> IoResult<Self> {
        if buf.len() > self.len() {
            let len = self.len();
            self.copy_from_slice(&buf[..len]);
            *self = &mut [];
            Err(CursorError::OutOfSpace)
        } else {
            self[..buf.len()].copy_from_slice(buf);
            let slice = mem::replace(self, &mut []);
            *self = &mut slice[buf.len()..];
            Ok(())
        }
    }
}

/// Adapts any `std::io::Write`, such as a serial port handle, into an encoder sink.
pub struct IoWrap<T>(pub T);
#[cfg(feature = "std")]
impl<T: io::Write> Write for IoWrap<T> {
    type Error = io::Error;
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.0, buf)
    }
}

/// Counts bytes instead of storing them.
pub(crate) struct WriteCounter(pub usize);
impl Write for WriteCounter {
    type Error = Infallible;
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> IoResult<Self> {
        self.0 += buf.len();
        Ok(())
    }
}
