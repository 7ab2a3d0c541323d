//! The byte encoder: one function per message shape, producing the canonical MIDI 1.0 bytes.
//!
//! No field is validated. Values outside of the 7-bit range produce non-conformant bytes, just as
//! they would if written to the wire by hand.
//!
//! Most of the time the [`Event::write`](../struct.Event.html#method.write) and
//! [`Event::encode`](../struct.Event.html#method.encode) methods are more convenient.

use crate::{
    event::{ChannelVoiceKind, Event, RealtimeKind, SysexKind},
    io::WriteCounter,
    prelude::*,
    primitive::status,
};

/// `[status, data1]` or `[status, data1, data2]`, depending on the kind of message.
pub fn channel_voice<W: Write>(
    kind: ChannelVoiceKind,
    channel: u8,
    data1: u8,
    data2: u8,
    out: &mut W,
) -> IoResult<W> {
    out.write_all(&[kind.status(channel)])?;
    channel_voice_data(kind.data_len(), data1, data2, out)
}

/// Write the data part of a channel voice message, not including the status.
fn channel_voice_data<W: Write>(len: usize, data1: u8, data2: u8, out: &mut W) -> IoResult<W> {
    if len > 1 {
        out.write_all(&[data1, data2])
    } else {
        out.write_all(&[data1])
    }
}

pub fn time_code_quarter_frame<W: Write>(value: u8, out: &mut W) -> IoResult<W> {
    out.write_all(&[status::TIME_CODE_QUARTER_FRAME, value])
}

pub fn song_position<W: Write>(lsb: u8, msb: u8, out: &mut W) -> IoResult<W> {
    out.write_all(&[status::SONG_POSITION, lsb, msb])
}

pub fn song_select<W: Write>(number: u8, out: &mut W) -> IoResult<W> {
    out.write_all(&[status::SONG_SELECT, number])
}

pub fn tune_request<W: Write>(out: &mut W) -> IoResult<W> {
    out.write_all(&[status::TUNE_REQUEST])
}

/// Only fragments that open a transfer get a leading `0xF0`, and only fragments that close it get
/// a trailing `0xF7`.
pub fn sysex<W: Write>(kind: SysexKind, data: &[u8], out: &mut W) -> IoResult<W> {
    if let SysexKind::Complete | SysexKind::Start = kind {
        out.write_all(&[status::SYSEX_START])?;
    }
    out.write_all(data)?;
    if let SysexKind::Complete | SysexKind::End = kind {
        out.write_all(&[status::SYSEX_END])?;
    }
    Ok(())
}

pub fn realtime<W: Write>(kind: RealtimeKind, out: &mut W) -> IoResult<W> {
    out.write_all(&[kind.byte()])
}

impl Event {
    /// Write this message to the given output.
    pub fn write<W: Write>(&self, out: &mut W) -> IoResult<W> {
        self.write_with_running_status(&mut None, out)
    }

    /// Write a message, skipping the status if it shares the status with the previous message.
    ///
    /// `running_status` should be shared between consecutive calls writing to the same stream,
    /// and should initially be `None`.
    /// System common and system-exclusive messages cancel running status, while realtime
    /// messages leave it untouched, since they may appear anywhere.
    pub fn write_with_running_status<W: Write>(
        &self,
        running_status: &mut Option<u8>,
        out: &mut W,
    ) -> IoResult<W> {
        match self {
            Event::ChannelVoice(msg) => {
                if Some(msg.status) != *running_status {
                    out.write_all(&[msg.status])?;
                    *running_status = Some(msg.status);
                }
                channel_voice_data(msg.data_len(), msg.data1, msg.data2, out)?;
            }
            Event::TimeCodeQuarterFrame { value, .. } => {
                *running_status = None;
                time_code_quarter_frame(*value, out)?;
            }
            Event::SongPosition { lsb, msb, .. } => {
                *running_status = None;
                song_position(*lsb, *msb, out)?;
            }
            Event::SongSelect { number, .. } => {
                *running_status = None;
                song_select(*number, out)?;
            }
            Event::TuneRequest { .. } => {
                *running_status = None;
                tune_request(out)?;
            }
            Event::Sysex { kind, data, .. } => {
                *running_status = None;
                sysex(*kind, data, out)?;
            }
            Event::Realtime { kind, .. } => realtime(*kind, out)?,
        }
        Ok(())
    }

    /// Encode this message into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        match self.write(&mut out) {
            Ok(()) => out,
            Err(never) => match never {},
        }
    }

    /// The amount of bytes this message takes on the wire, without running status.
    pub fn encoded_len(&self) -> usize {
        let mut counter = WriteCounter(0);
        match self.write(&mut counter) {
            Ok(()) => counter.0,
            Err(never) => match never {},
        }
    }
}
