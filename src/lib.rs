//! # Overview
//!
//! `midiwire` reads and writes MIDI 1.0 as it travels over the wire: serial links, USB-MIDI
//! drivers, virtual ports.
//!
//! Raw MIDI streams are a byte-oriented protocol with a few quirks that make them harder to read
//! than they look:
//!
//! - *Running status*: a status byte may be omitted if it matches the previous message.
//! - *System realtime bytes* may appear anywhere, even in between the data bytes of another
//!   message, without disturbing it.
//! - *System-exclusive* transfers have unbounded length, and may be split across arbitrary chunk
//!   boundaries or interrupted by other messages.
//!
//! Decoding a stream is as simple as:
//!
//! ```rust
//! use midiwire::Decoder;
//!
//! let raw: &[u8] = &[0x91, 60, 100, 62, 100, 0x81, 60, 0x40];
//! for ev in Decoder::new(raw) {
//!     println!("{}", ev);
//! }
//! # assert_eq!(midiwire::decode(raw).len(), 3);
//! ```
//!
//! When bytes arrive in chunks, for example from a driver callback, use a
//! [`MidiStream`](struct.MidiStream.html) instead, which keeps partial messages around in between
//! chunks:
//!
//! ```rust
//! use midiwire::{Event, MidiStream};
//!
//! let mut stream = MidiStream::new();
//! let mut events = Vec::new();
//! stream.feed(&[0x90, 60], |ev| events.push(ev));
//! stream.feed(&[100], |ev| events.push(ev));
//! assert_eq!(events, [Event::note_on(0, 60, 100)]);
//! ```
//!
//! # Writing MIDI
//!
//! Events are turned back into their canonical bytes through the
//! [`Event::encode`](struct.Event.html#method.encode) and
//! [`Event::write`](struct.Event.html#method.write) methods, or the functions in the
//! [`encode`](encode/index.html) module:
//!
//! ```rust
//! use midiwire::Event;
//!
//! assert_eq!(Event::note_on(2, 60, 100).encode(), [0x92, 60, 100]);
//! assert_eq!(Event::sysex_complete(vec![0x7E, 0x01]).encode(), [0xF0, 0x7E, 0x01, 0xF7]);
//! ```
//!
//! # About errors
//!
//! The stream decoders never fail. By MIDI convention, truncated messages and reserved bytes are
//! a normal occurrence on noisy or power-cycled links: they are skipped, and decoding resumes at
//! the next status byte. [`DecodeStats`](struct.DecodeStats.html) counts what was skipped.
//!
//! Only [`Event::parse`](struct.Event.html#method.parse), which reads exactly one message out of a
//! delimited packet, reports errors.
//!
//! # About features
//!
//! - The `std` feature
//!
//!   Enables `std::io::Write` integration and the `std::error::Error` implementation.
//!   This feature is enabled by default. Disabling it with `default-features = false` will make
//!   the crate `no_std + alloc`.
//!
//! - The `parallel` feature
//!
//!   Makes [`decode_streams`](fn.decode_streams.html) decode independent streams in parallel,
//!   through the `rayon` dependency. Enabled by default.
//!
//! - The `strict` feature
//!
//!   Makes [`Event::parse`](struct.Event.html#method.parse) reject packets with leftover bytes
//!   after the message, raising errors of the kind `ErrorKind::Malformed`.
//!
//! # Logging
//!
//! Skipped input is reported through [`tracing`](https://docs.rs/tracing) events: dropped
//! reserved bytes and interrupted sysex fragments at `trace` level, truncated messages at
//! `debug` level.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

/// All of the errors this crate produces.
#[macro_use]
mod error;

mod prelude {
    pub(crate) use crate::{
        error::{ErrorKind, Result, ResultExt, StdResult},
        io::{IoResult, Write},
    };
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::{convert::Infallible, fmt, mem, ops};
    #[cfg(feature = "std")]
    pub(crate) use std::io;

    pub(crate) fn bit_range<T>(val: T, range: ops::Range<u32>) -> T
    where
        T: From<u8>
            + ops::Shr<u32, Output = T>
            + ops::Shl<u32, Output = T>
            + ops::Not<Output = T>
            + ops::BitAnd<Output = T>,
    {
        let mask = !((!T::from(0)) << (range.end - range.start));
        (val >> range.start) & mask
    }
}

mod builder;
pub mod encode;
mod event;
pub mod io;
mod primitive;
mod stream;

pub use crate::{
    error::{Error, ErrorKind, Result},
    event::{ChannelVoice, ChannelVoiceKind, Event, RealtimeKind, SysexKind},
    primitive::status,
    stream::{decode, decode_streams, ByteSource, DecodeStats, Decoder, MidiStream},
};

#[cfg(test)]
mod test;
