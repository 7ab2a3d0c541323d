//! The MIDI 1.0 event model, and a parser for events delivered as delimited packets.

use crate::{
    prelude::*,
    primitive::{high_nibble, is_data, is_realtime, low_nibble, status},
};

/// The kind of a channel voice message, selected by the high nibble of its status byte.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChannelVoiceKind {
    NoteOff,
    NoteOn,
    /// Also known as polyphonic aftertouch.
    PolyPressure,
    ControlChange,
    ProgramChange,
    /// Also known as channel aftertouch.
    ChannelPressure,
    PitchBend,
}
impl ChannelVoiceKind {
    /// Classify a status nibble, or `None` if it is not a channel voice nibble (`0x8 ..= 0xE`).
    pub fn from_nibble(nibble: u8) -> Option<ChannelVoiceKind> {
        use ChannelVoiceKind::*;
        Some(match nibble {
            0x8 => NoteOff,
            0x9 => NoteOn,
            0xA => PolyPressure,
            0xB => ControlChange,
            0xC => ProgramChange,
            0xD => ChannelPressure,
            0xE => PitchBend,
            _ => return None,
        })
    }

    /// Classify a full status byte, ignoring its channel.
    #[inline]
    pub fn from_status(status: u8) -> Option<ChannelVoiceKind> {
        Self::from_nibble(high_nibble(status))
    }

    pub fn nibble(self) -> u8 {
        use ChannelVoiceKind::*;
        match self {
            NoteOff => 0x8,
            NoteOn => 0x9,
            PolyPressure => 0xA,
            ControlChange => 0xB,
            ProgramChange => 0xC,
            ChannelPressure => 0xD,
            PitchBend => 0xE,
        }
    }

    /// Channel voice messages have a known amount of data bytes.
    pub fn data_len(self) -> usize {
        match self {
            ChannelVoiceKind::ProgramChange | ChannelVoiceKind::ChannelPressure => 1,
            _ => 2,
        }
    }

    /// Build the status byte for this kind of message on the given channel.
    ///
    /// Only the low nibble of `channel` is used.
    #[inline]
    pub fn status(self, channel: u8) -> u8 {
        self.nibble() << 4 | low_nibble(channel)
    }

    fn name(self) -> &'static str {
        use ChannelVoiceKind::*;
        match self {
            NoteOff => "noteOff",
            NoteOn => "noteOn",
            PolyPressure => "polyPressure",
            ControlChange => "controlChange",
            ProgramChange => "programChange",
            ChannelPressure => "channelPressure",
            PitchBend => "pitchBend",
        }
    }
}

/// A channel voice message, as its raw status and data bytes.
///
/// For kinds with a single data byte (program change and channel pressure), `data2` is always 0
/// when built through [`ChannelVoice::new`] or decoded from the wire.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ChannelVoice {
    /// Addressing nibble reserved for multi-port setups. It is never put on the wire.
    pub group: u8,
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}
impl ChannelVoice {
    /// Create a message on group 0.
    ///
    /// The fields are not checked to be 7-bit values.
    pub fn new(kind: ChannelVoiceKind, channel: u8, data1: u8, data2: u8) -> ChannelVoice {
        ChannelVoice {
            group: 0,
            status: kind.status(channel),
            data1,
            data2: if kind.data_len() > 1 { data2 } else { 0 },
        }
    }

    /// Build the message that a decoder emits for the given wire bytes.
    ///
    /// A note-on with velocity 0 means note-off by convention, and is emitted as a note-off with
    /// the default release velocity of `0x40`.
    pub(crate) fn from_wire(group: u8, status: u8, data1: u8, data2: u8) -> ChannelVoice {
        if data2 == 0 && ChannelVoiceKind::from_status(status) == Some(ChannelVoiceKind::NoteOn) {
            ChannelVoice {
                group,
                status: ChannelVoiceKind::NoteOff.status(status),
                data1,
                data2: 0x40,
            }
        } else {
            ChannelVoice {
                group,
                status,
                data1,
                data2,
            }
        }
    }

    /// The kind of message, or `None` if the status byte is not a channel voice status.
    ///
    /// This can only happen for hand-built messages.
    #[inline]
    pub fn kind(&self) -> Option<ChannelVoiceKind> {
        ChannelVoiceKind::from_status(self.status)
    }

    /// The channel, in the range `0 ..= 15`.
    #[inline]
    pub fn channel(&self) -> u8 {
        low_nibble(self.status)
    }

    /// The amount of data bytes that follow the status on the wire.
    ///
    /// Unknown kinds are assumed to carry two data bytes.
    #[inline]
    pub fn data_len(&self) -> usize {
        self.kind().map(ChannelVoiceKind::data_len).unwrap_or(2)
    }
}

/// Which part of a system-exclusive transfer a [`Event::Sysex`] holds.
///
/// Long sysex transfers may be split across several fragments, either by the transport or because
/// other traffic interrupted them.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SysexKind {
    /// Both the opening `0xF0` and the closing `0xF7` were seen.
    Complete,
    /// Opened by `0xF0`, but not closed yet.
    Start,
    /// Neither opened nor closed in this fragment.
    Continue,
    /// Closed by `0xF7`, continuing a fragment seen earlier.
    End,
}

/// Single-byte messages that can occur at ANY time, even in between the data bytes of other
/// messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum RealtimeKind {
    /// If sent, they should be sent 24 times per quarter note.
    TimingClock,
    Start,
    Continue,
    Stop,
    /// Once one of these messages is transmitted, a message should arrive every 300ms or else the
    /// connection is considered broken.
    ActiveSensing,
    Reset,
}
impl RealtimeKind {
    /// Classify a realtime byte, or `None` for the reserved `0xF9` and `0xFD` (and any byte
    /// outside of the realtime range).
    pub fn from_byte(byte: u8) -> Option<RealtimeKind> {
        use RealtimeKind::*;
        Some(match byte {
            0xF8 => TimingClock,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFE => ActiveSensing,
            0xFF => Reset,
            _ => return None,
        })
    }

    pub fn byte(self) -> u8 {
        use RealtimeKind::*;
        match self {
            TimingClock => 0xF8,
            Start => 0xFA,
            Continue => 0xFB,
            Stop => 0xFC,
            ActiveSensing => 0xFE,
            Reset => 0xFF,
        }
    }

    fn name(self) -> &'static str {
        use RealtimeKind::*;
        match self {
            TimingClock => "timingClock",
            Start => "start",
            Continue => "continue",
            Stop => "stop",
            ActiveSensing => "activeSensing",
            Reset => "reset",
        }
    }
}

/// A single MIDI 1.0 message, as read from or written to the wire.
///
/// Every variant carries a `group`, an addressing nibble reserved for multi-port setups.
/// It is passed through untouched and never written to the wire.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Event {
    /// A message associated with a channel, carrying musical data.
    ///
    /// Status byte in the range `0x80 ..= 0xEF`.
    ChannelVoice(ChannelVoice),
    /// A nibble of MIDI Time Code. The value packs the nibble type in its high bits.
    TimeCodeQuarterFrame { group: u8, value: u8 },
    /// The number of MIDI beats (6 x MIDI clocks) that have elapsed since the start of the
    /// sequence, as two 7-bit halves.
    SongPosition { group: u8, lsb: u8, msb: u8 },
    SongSelect { group: u8, number: u8 },
    /// Used with analog synthesizers to request that all oscillators be tuned.
    TuneRequest { group: u8 },
    /// A system-exclusive fragment.
    ///
    /// The data never includes the `0xF0` and `0xF7` delimiters, only 7-bit data bytes.
    Sysex {
        group: u8,
        kind: SysexKind,
        data: Vec<u8>,
    },
    Realtime { group: u8, kind: RealtimeKind },
}
impl Event {
    pub fn channel_voice(kind: ChannelVoiceKind, channel: u8, data1: u8, data2: u8) -> Event {
        Event::ChannelVoice(ChannelVoice::new(kind, channel, data1, data2))
    }

    /// Stop playing a note. The conventional release velocity is `0x40`.
    pub fn note_off(channel: u8, number: u8, velocity: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::NoteOff, channel, number, velocity)
    }

    /// Start playing a note.
    ///
    /// Note that a velocity of 0 is read back as a note-off.
    pub fn note_on(channel: u8, number: u8, velocity: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::NoteOn, channel, number, velocity)
    }

    pub fn poly_pressure(channel: u8, number: u8, value: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::PolyPressure, channel, number, value)
    }

    pub fn control_change(channel: u8, number: u8, value: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::ControlChange, channel, number, value)
    }

    pub fn program_change(channel: u8, number: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::ProgramChange, channel, number, 0)
    }

    pub fn channel_pressure(channel: u8, value: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::ChannelPressure, channel, value, 0)
    }

    /// Pitch bend is sent least significant half first. `0x2000` (`lsb: 0, msb: 0x40`) means no
    /// bend.
    pub fn pitch_bend(channel: u8, lsb: u8, msb: u8) -> Event {
        Self::channel_voice(ChannelVoiceKind::PitchBend, channel, lsb, msb)
    }

    pub fn time_code_quarter_frame(value: u8) -> Event {
        Event::TimeCodeQuarterFrame { group: 0, value }
    }

    pub fn song_position(lsb: u8, msb: u8) -> Event {
        Event::SongPosition { group: 0, lsb, msb }
    }

    pub fn song_select(number: u8) -> Event {
        Event::SongSelect { group: 0, number }
    }

    pub fn tune_request() -> Event {
        Event::TuneRequest { group: 0 }
    }

    pub fn sysex(kind: SysexKind, data: impl Into<Vec<u8>>) -> Event {
        Event::Sysex {
            group: 0,
            kind,
            data: data.into(),
        }
    }

    /// A whole system-exclusive message, delimited by `0xF0` and `0xF7` on the wire.
    pub fn sysex_complete(data: impl Into<Vec<u8>>) -> Event {
        Self::sysex(SysexKind::Complete, data)
    }

    pub fn realtime(kind: RealtimeKind) -> Event {
        Event::Realtime { group: 0, kind }
    }

    /// Replace the group of this event.
    pub fn with_group(mut self, group: u8) -> Event {
        *self.group_mut() = group;
        self
    }

    fn group_mut(&mut self) -> &mut u8 {
        match self {
            Event::ChannelVoice(ChannelVoice { group, .. })
            | Event::TimeCodeQuarterFrame { group, .. }
            | Event::SongPosition { group, .. }
            | Event::SongSelect { group, .. }
            | Event::TuneRequest { group }
            | Event::Sysex { group, .. }
            | Event::Realtime { group, .. } => group,
        }
    }

    pub fn group(&self) -> u8 {
        match *self {
            Event::ChannelVoice(ChannelVoice { group, .. })
            | Event::TimeCodeQuarterFrame { group, .. }
            | Event::SongPosition { group, .. }
            | Event::SongSelect { group, .. }
            | Event::TuneRequest { group }
            | Event::Sysex { group, .. }
            | Event::Realtime { group, .. } => group,
        }
    }

    /// The channel of a channel voice message, or `None` for system messages.
    pub fn channel(&self) -> Option<u8> {
        match self {
            Event::ChannelVoice(msg) => Some(msg.channel()),
            _ => None,
        }
    }

    #[inline]
    pub fn is_channel_voice(&self) -> bool {
        matches!(self, Event::ChannelVoice(_))
    }

    /// Time code, song position, song select and tune request.
    ///
    /// System-exclusive fragments are reported by [`is_sysex`](#method.is_sysex) instead.
    #[inline]
    pub fn is_system_common(&self) -> bool {
        matches!(
            self,
            Event::TimeCodeQuarterFrame { .. }
                | Event::SongPosition { .. }
                | Event::SongSelect { .. }
                | Event::TuneRequest { .. }
        )
    }

    #[inline]
    pub fn is_sysex(&self) -> bool {
        matches!(self, Event::Sysex { .. })
    }

    #[inline]
    pub fn is_realtime(&self) -> bool {
        matches!(self, Event::Realtime { .. })
    }

    /// Parse a single MIDI message from a delimited packet, such as the ones delivered by most OS
    /// MIDI APIs.
    ///
    /// Unlike the stream decoders, which silently drop anything unreadable, this method reports
    /// truncated messages, status bytes in data position and reserved statuses as errors.
    /// A packet starting with a data byte is read as a continuation of a system-exclusive
    /// transfer. Realtime bytes inside the message are skipped, as they may appear anywhere.
    ///
    /// Leftover bytes after the message are ignored, unless the `strict` feature is enabled.
    pub fn parse(mut raw: &[u8]) -> Result<Event> {
        let first = *raw.first().ok_or(err_invalid!("empty packet"))?;
        let ev = if is_data(first) {
            Self::read_sysex(false, &mut raw)
        } else {
            raw = &raw[1..];
            Self::read(first, &mut raw)?
        };
        if cfg!(feature = "strict") {
            ensure!(
                raw.is_empty(),
                err_malformed!("trailing bytes after message")
            );
        }
        Ok(ev)
    }

    fn read(status: u8, raw: &mut &[u8]) -> Result<Event> {
        let ev = match status {
            0x80..=0xEF => {
                let len = ChannelVoiceKind::from_status(status)
                    .map(ChannelVoiceKind::data_len)
                    .ok_or(err_invalid!("unknown channel voice status"))?;
                let data = read_data(raw, len)
                    .context(err_invalid!("failed to read channel voice message"))?;
                Event::ChannelVoice(ChannelVoice::from_wire(0, status, data[0], data[1]))
            }
            status::SYSEX_START => Self::read_sysex(true, raw),
            status::TIME_CODE_QUARTER_FRAME => {
                let data = read_data(raw, 1)
                    .context(err_invalid!("failed to read time code quarter frame"))?;
                Event::time_code_quarter_frame(data[0])
            }
            status::SONG_POSITION => {
                let data =
                    read_data(raw, 2).context(err_invalid!("failed to read song position"))?;
                Event::song_position(data[0], data[1])
            }
            status::SONG_SELECT => {
                let data = read_data(raw, 1).context(err_invalid!("failed to read song select"))?;
                Event::song_select(data[0])
            }
            status::TUNE_REQUEST => Event::tune_request(),
            status::SYSEX_END => bail!(err_invalid!("sysex end marker without a sysex start")),
            0xF4 | 0xF5 => bail!(err_invalid!("reserved system common status")),
            0xF8..=0xFF => Event::realtime(
                RealtimeKind::from_byte(status).ok_or(err_invalid!("reserved realtime status"))?,
            ),
            0x00..=0x7F => bail!(err_invalid!("expected a status byte")),
        };
        Ok(ev)
    }

    /// Read sysex data up to the first non-data byte, consuming it only if it is the end marker.
    /// Realtime bytes in between are skipped.
    fn read_sysex(explicit_start: bool, raw: &mut &[u8]) -> Event {
        let mut data = Vec::new();
        let mut closed = false;
        while let Some((&byte, rest)) = raw.split_first() {
            if is_data(byte) {
                data.push(byte);
            } else if byte == status::SYSEX_END {
                closed = true;
            } else if !is_realtime(byte) {
                break;
            }
            *raw = rest;
            if closed {
                break;
            }
        }
        let kind = match (explicit_start, closed) {
            (true, true) => SysexKind::Complete,
            (true, false) => SysexKind::Start,
            (false, false) => SysexKind::Continue,
            (false, true) => SysexKind::End,
        };
        Event::sysex(kind, data)
    }
}

/// Take `len` data bytes off the front of a packet, skipping realtime bytes.
///
/// Unused trailing slots are left as 0.
fn read_data(raw: &mut &[u8], len: usize) -> StdResult<[u8; 2], &'static ErrorKind> {
    let mut data = [0; 2];
    for slot in data.iter_mut().take(len) {
        loop {
            let (&byte, rest) = raw
                .split_first()
                .ok_or(err_invalid!("truncated message"))?;
            *raw = rest;
            if is_realtime(byte) {
                continue;
            }
            ensure!(
                is_data(byte),
                err_invalid!("status byte where a data byte was expected")
            );
            *slot = byte;
            break;
        }
    }
    Ok(data)
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Event::ChannelVoice(msg) => match msg.kind() {
                Some(kind) => write!(
                    f,
                    "{}(group: {}, channel: {}, data1: {}, data2: {})",
                    kind.name(),
                    msg.group,
                    msg.channel(),
                    msg.data1,
                    msg.data2
                ),
                None => write!(
                    f,
                    "channelVoice(group: {}, status: {}, data1: {}, data2: {})",
                    msg.group, msg.status, msg.data1, msg.data2
                ),
            },
            Event::TimeCodeQuarterFrame { group, value } => {
                write!(f, "timeCodeQuarterFrame(group: {}, value: {})", group, value)
            }
            Event::SongPosition { group, lsb, msb } => write!(
                f,
                "songPosition(group: {}, lsb: {}, msb: {})",
                group, lsb, msb
            ),
            Event::SongSelect { group, number } => {
                write!(f, "songSelect(group: {}, number: {})", group, number)
            }
            Event::TuneRequest { group } => write!(f, "tuneRequest(group: {})", group),
            Event::Sysex { group, kind, data } => write!(
                f,
                "sysex(group: {}, kind: {:?}, data: {:?})",
                group, kind, data
            ),
            Event::Realtime { group, kind } => write!(f, "{}(group: {})", kind.name(), group),
        }
    }
}
