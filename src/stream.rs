//! Decoding of raw, undelimited MIDI byte streams, presumably coming from a cable.
//!
//! Handles all of the quirks specific to MIDI streams:
//!
//! - Running status: consecutive channel voice messages sharing a status may omit it.
//! - System realtime bytes embedded anywhere, even in between the data bytes of another message,
//!     without disturbing it.
//! - System-exclusive transfers of unbounded length, split across arbitrary chunk boundaries or
//!     interrupted by other traffic.
//! - Truncated messages, which are dropped, resynchronizing on the status byte that cut them
//!     short.
//!
//! Two flavors of decoders are provided:
//!
//! - [`Decoder`](struct.Decoder.html) pulls bytes out of a [`ByteSource`](trait.ByteSource.html)
//!     and is an `Iterator` of events. Running out of bytes means the input has ended for good.
//! - [`MidiStream`](struct.MidiStream.html) is pushed chunks of bytes as they arrive, and keeps
//!     partial messages around in between chunks until it is explicitly flushed.
//!
//! Both produce the exact same events for the same bytes, regardless of how they are chunked.
//! Neither of them ever fails: malformed input just produces fewer events.

use crate::{
    builder::{
        BuildResult, Builder, ChannelVoiceBuilder, CommonField, SongPositionBuilder,
        SysexBuilder, SystemCommonBuilder,
    },
    event::{Event, RealtimeKind},
    prelude::*,
    primitive::{is_data, is_realtime, status},
};
use core::iter::Peekable;

/// Counters of input that was thrown away while decoding.
///
/// These are purely diagnostic, and do not influence decoding in any way.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecodeStats {
    /// Reserved or unknown status bytes that were skipped.
    pub dropped: u64,
    /// Messages that were cut short by a status byte or by the end of the input, and discarded.
    pub truncated: u64,
}

/// The outcome of offering one byte to the parser.
struct Step {
    /// Whether the byte was used up. If not, it must be offered again.
    consumed: bool,
    event: Option<Event>,
}
impl Step {
    #[inline]
    fn consumed(event: Option<Event>) -> Step {
        Step {
            consumed: true,
            event,
        }
    }
}

/// The state machine shared by both decoder flavors.
#[derive(Clone, Debug, Default)]
struct Parser {
    group: u8,
    builder: Option<Builder>,
    stats: DecodeStats,
}
impl Parser {
    fn new(group: u8) -> Parser {
        Parser {
            group,
            builder: None,
            stats: DecodeStats::default(),
        }
    }

    /// Offer the byte at the front of the input.
    fn step(&mut self, byte: u8) -> Step {
        if is_realtime(byte) {
            //Realtime bytes are invisible to any message in progress
            return Step::consumed(match RealtimeKind::from_byte(byte) {
                Some(kind) => Some(Event::Realtime {
                    group: self.group,
                    kind,
                }),
                None => {
                    self.drop_byte(byte);
                    None
                }
            });
        }
        if let Some(builder) = &mut self.builder {
            let was_mid_message = builder.is_mid_message();
            return match builder.add(Some(byte)) {
                BuildResult::Building(ev) => Step::consumed(ev),
                BuildResult::Finished(ev) => {
                    self.builder = None;
                    Step::consumed(ev)
                }
                BuildResult::Failed(ev) => {
                    self.builder = None;
                    if ev.is_none() && was_mid_message {
                        self.truncate(byte);
                    }
                    //Leave the byte where it is, so that it starts the next message
                    Step {
                        consumed: false,
                        event: ev,
                    }
                }
            };
        }
        let group = self.group;
        let ev = match byte {
            _ if is_data(byte) => {
                //A data byte with no status: the rest of a sysex transfer from an earlier chunk
                self.builder = Some(Builder::Sysex(SysexBuilder::resume(group, byte)));
                None
            }
            0x80..=0xEF => {
                match ChannelVoiceBuilder::new(group, byte) {
                    Some(builder) => self.builder = Some(Builder::ChannelVoice(builder)),
                    None => self.drop_byte(byte),
                }
                None
            }
            status::SYSEX_START => {
                self.builder = Some(Builder::Sysex(SysexBuilder::start(group)));
                None
            }
            status::TUNE_REQUEST => Some(Event::TuneRequest { group }),
            status::TIME_CODE_QUARTER_FRAME => {
                self.builder = Some(Builder::SystemCommon(SystemCommonBuilder::new(
                    group,
                    CommonField::TimeCodeQuarterFrame,
                )));
                None
            }
            status::SONG_SELECT => {
                self.builder = Some(Builder::SystemCommon(SystemCommonBuilder::new(
                    group,
                    CommonField::SongSelect,
                )));
                None
            }
            status::SONG_POSITION => {
                self.builder = Some(Builder::SongPosition(SongPositionBuilder::new(group)));
                None
            }
            _ => {
                //Reserved system common, or a stray sysex end marker
                self.drop_byte(byte);
                None
            }
        };
        Step::consumed(ev)
    }

    /// Signal that the input has ended, flushing or discarding any message in progress.
    fn finish(&mut self) -> Option<Event> {
        let mut builder = self.builder.take()?;
        let was_mid_message = builder.is_mid_message();
        let ev = match builder.add(None) {
            BuildResult::Building(ev) | BuildResult::Finished(ev) | BuildResult::Failed(ev) => ev,
        };
        if ev.is_none() && was_mid_message {
            self.stats.truncated += 1;
            tracing::debug!("message truncated by the end of input");
        }
        ev
    }

    fn drop_byte(&mut self, byte: u8) {
        self.stats.dropped += 1;
        tracing::trace!(byte, "dropping reserved status byte");
    }

    fn truncate(&mut self, byte: u8) {
        self.stats.truncated += 1;
        tracing::debug!(interrupted_by = byte, "message truncated by a status byte");
    }
}

/// An ordered source of bytes that can be inspected before consuming them.
///
/// Running out of bytes is taken as the definitive end of the input.
pub trait ByteSource {
    /// The byte at the front, without consuming it.
    fn peek(&mut self) -> Option<u8>;
    /// Consume the byte at the front.
    fn advance(&mut self);
}
impl<'a> ByteSource for &'a [u8] {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.first().copied()
    }
    #[inline]
    fn advance(&mut self) {
        if let Some((_, rest)) = self.split_first() {
            *self = rest;
        }
    }
}
impl<I: Iterator<Item = u8>> ByteSource for Peekable<I> {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        Peekable::peek(self).copied()
    }
    #[inline]
    fn advance(&mut self) {
        self.next();
    }
}

/// Pulls events out of a [`ByteSource`](trait.ByteSource.html), one at a time.
///
/// A note-on with velocity 0 is emitted as a note-off with velocity `0x40`, but running status
/// stays note-on: `[0x90, 60, 0, 61, 100]` decodes to a note-off followed by a note-on.
///
/// ```rust
/// use midiwire::{Decoder, Event, RealtimeKind};
///
/// let raw: &[u8] = &[0x90, 60, 0xF8, 100, 62, 100];
/// let events = Decoder::new(raw).collect::<Vec<_>>();
/// assert_eq!(
///     events,
///     [
///         Event::realtime(RealtimeKind::TimingClock),
///         Event::note_on(0, 60, 100),
///         Event::note_on(0, 62, 100),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<S> {
    source: S,
    parser: Parser,
}
impl<S: ByteSource> Decoder<S> {
    /// Decode the given source, tagging events with group 0.
    pub fn new(source: S) -> Decoder<S> {
        Self::with_group(source, 0)
    }

    /// Decode the given source, tagging every event with the given group.
    ///
    /// The group is not validated.
    pub fn with_group(source: S, group: u8) -> Decoder<S> {
        Decoder {
            source,
            parser: Parser::new(group),
        }
    }

    /// What has been thrown away so far.
    pub fn stats(&self) -> DecodeStats {
        self.parser.stats
    }

    /// The remaining, undecoded input.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Recover the remaining, undecoded input.
    pub fn into_source(self) -> S {
        self.source
    }
}
impl<S: ByteSource> Iterator for Decoder<S> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let byte = match self.source.peek() {
                Some(byte) => byte,
                None => return self.parser.finish(),
            };
            let step = self.parser.step(byte);
            if step.consumed {
                self.source.advance();
            }
            if step.event.is_some() {
                return step.event;
            }
        }
    }
}

/// A streaming raw MIDI parser, taking chunks of raw, undelimited MIDI bytes as they arrive.
///
/// Partial messages at the end of a chunk are kept until the next chunk, so calling `feed` with
/// many small slices is equivalent to calling `feed` with one large concatenation of them all.
/// Call `flush` once the input has ended for good.
/// Note-on messages with velocity 0 are handled as in [`Decoder`](struct.Decoder.html).
///
/// ```rust
/// use midiwire::{Event, MidiStream, SysexKind};
///
/// let mut stream = MidiStream::new();
/// let mut events = Vec::new();
/// stream.feed(&[0xF0, 0x7E, 0x7F], |ev| events.push(ev));
/// stream.feed(&[0x06, 0x01, 0xF7], |ev| events.push(ev));
/// stream.flush(|ev| events.push(ev));
/// assert_eq!(events, [Event::sysex(SysexKind::Complete, vec![0x7E, 0x7F, 0x06, 0x01])]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MidiStream {
    parser: Parser,
}
impl MidiStream {
    /// Create a fresh stream parser, tagging events with group 0.
    #[inline]
    pub fn new() -> MidiStream {
        MidiStream::default()
    }

    /// Create a fresh stream parser, tagging every event with the given group.
    #[inline]
    pub fn with_group(group: u8) -> MidiStream {
        MidiStream {
            parser: Parser::new(group),
        }
    }

    /// Feeds a slice of bytes to the stream, calling the `handle_ev` closure whenever a complete
    /// event is read.
    ///
    /// Note that some calls to `feed` might produce no events, and others may produce as many as
    /// the amount of bytes fed in.
    pub fn feed(&mut self, bytes: &[u8], mut handle_ev: impl FnMut(Event)) {
        for &byte in bytes {
            //A byte that is not consumed always tears down the current builder, so the second
            //attempt always consumes it
            loop {
                let step = self.parser.step(byte);
                if let Some(ev) = step.event {
                    handle_ev(ev);
                }
                if step.consumed {
                    break;
                }
            }
        }
    }

    /// Indicates to the stream that the input has ended, such as when the port is closed.
    ///
    /// Pending system-exclusive data is emitted as an open fragment, and any other partial
    /// message is dropped.
    /// This function clears running status.
    pub fn flush(&mut self, handle_ev: impl FnOnce(Event)) {
        if let Some(ev) = self.parser.finish() {
            handle_ev(ev);
        }
    }

    /// Whether a partial message (or a running status) is waiting for more bytes.
    pub fn is_pending(&self) -> bool {
        self.parser.builder.is_some()
    }

    /// What has been thrown away so far.
    pub fn stats(&self) -> DecodeStats {
        self.parser.stats
    }
}

/// Decode a whole byte stream at once.
pub fn decode(raw: &[u8]) -> Vec<Event> {
    Decoder::new(raw).collect()
}

/// Decode several independent streams, such as the input of several ports.
///
/// If the `parallel` feature is enabled, the streams are decoded on multiple threads.
pub fn decode_streams(streams: &[&[u8]]) -> Vec<Vec<Event>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if streams.len() > 1 {
            return streams.par_iter().map(|raw| decode(raw)).collect();
        }
    }
    //Fall back to single-threaded
    streams.iter().map(|raw| decode(raw)).collect()
}
