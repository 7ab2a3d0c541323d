//! Partial-message state of the stream decoders.
//!
//! While a multi-byte message is incomplete, the decoder holds exactly one [`Builder`].
//! Each builder is advanced one byte at a time through [`Builder::add`], or with `None` once the
//! input has ended, and reports back whether the byte was taken and whether a message came out.

use crate::{
    event::{ChannelVoice, ChannelVoiceKind, Event, SysexKind},
    prelude::*,
    primitive::{is_data, status},
};

/// What happened to the byte handed to a builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BuildResult {
    /// The byte was consumed and the builder wants more.
    /// Channel voice builders may emit a message and keep going, for running status.
    Building(Option<Event>),
    /// The byte was consumed and the builder is done.
    Finished(Option<Event>),
    /// The byte was NOT consumed, and the builder must be discarded.
    /// The byte must be classified again from scratch.
    Failed(Option<Event>),
}

#[derive(Clone, Debug)]
pub(crate) enum Builder {
    ChannelVoice(ChannelVoiceBuilder),
    Sysex(SysexBuilder),
    SongPosition(SongPositionBuilder),
    SystemCommon(SystemCommonBuilder),
}
impl Builder {
    /// Feed the next byte to the builder, or `None` if the input has ended.
    #[inline]
    pub(crate) fn add(&mut self, byte: Option<u8>) -> BuildResult {
        match self {
            Builder::ChannelVoice(b) => b.add(byte),
            Builder::Sysex(b) => b.add(byte),
            Builder::SongPosition(b) => b.add(byte),
            Builder::SystemCommon(b) => b.add(byte),
        }
    }

    /// Whether discarding the builder right now would lose a partially received message.
    ///
    /// A channel voice builder sitting in between running-status messages has nothing to lose.
    pub(crate) fn is_mid_message(&self) -> bool {
        match self {
            Builder::ChannelVoice(b) => b.pending,
            _ => true,
        }
    }
}

/// Collects the data bytes of a channel voice message, and stays around after completing it so
/// that further data bytes are read under the same status (running status).
#[derive(Clone, Debug)]
pub(crate) struct ChannelVoiceBuilder {
    group: u8,
    status: u8,
    len: usize,
    data1: u8,
    /// Index of the next data byte.
    index: usize,
    /// Whether a status byte or data bytes have been taken since the last emitted message.
    pending: bool,
}
impl ChannelVoiceBuilder {
    /// Returns `None` if the status is not a channel voice status.
    pub(crate) fn new(group: u8, status: u8) -> Option<ChannelVoiceBuilder> {
        let kind = ChannelVoiceKind::from_status(status)?;
        Some(ChannelVoiceBuilder {
            group,
            status,
            len: kind.data_len(),
            data1: 0,
            index: 0,
            pending: true,
        })
    }

    fn add(&mut self, byte: Option<u8>) -> BuildResult {
        let byte = match byte {
            Some(byte) if is_data(byte) => byte,
            _ => return BuildResult::Failed(None),
        };
        self.pending = true;
        if self.index == 0 {
            self.data1 = byte;
            if self.len > 1 {
                self.index = 1;
                return BuildResult::Building(None);
            }
            self.pending = false;
            let msg = ChannelVoice::from_wire(self.group, self.status, byte, 0);
            BuildResult::Building(Some(Event::ChannelVoice(msg)))
        } else {
            self.index = 0;
            self.pending = false;
            let msg = ChannelVoice::from_wire(self.group, self.status, self.data1, byte);
            BuildResult::Building(Some(Event::ChannelVoice(msg)))
        }
    }
}

/// Accumulates the data of a system-exclusive fragment until `0xF7`, an interrupting status byte
/// or the end of input.
#[derive(Clone, Debug)]
pub(crate) struct SysexBuilder {
    group: u8,
    /// Whether this fragment was opened by an explicit `0xF0`.
    explicit_start: bool,
    data: Vec<u8>,
}
impl SysexBuilder {
    /// A fragment opened by `0xF0`, which may turn out to be `Complete` or a `Start`.
    pub(crate) fn start(group: u8) -> SysexBuilder {
        SysexBuilder {
            group,
            explicit_start: true,
            data: Vec::new(),
        }
    }

    /// A fragment starting with a bare data byte, continuing a transfer opened earlier.
    /// It may turn out to be an `End` or a `Continue`.
    pub(crate) fn resume(group: u8, first: u8) -> SysexBuilder {
        let mut data = Vec::new();
        data.push(first);
        SysexBuilder {
            group,
            explicit_start: false,
            data,
        }
    }

    fn add(&mut self, byte: Option<u8>) -> BuildResult {
        match byte {
            Some(byte) if is_data(byte) => {
                self.data.push(byte);
                BuildResult::Building(None)
            }
            Some(status::SYSEX_END) => {
                let kind = if self.explicit_start {
                    SysexKind::Complete
                } else {
                    SysexKind::End
                };
                BuildResult::Finished(Some(self.take(kind)))
            }
            Some(_) => {
                tracing::trace!(
                    len = self.data.len(),
                    "sysex fragment interrupted by a status byte"
                );
                BuildResult::Failed(Some(self.take_open()))
            }
            //The rest of the transfer may come in a later chunk
            None => BuildResult::Finished(Some(self.take_open())),
        }
    }

    /// Emit the fragment without a closing `0xF7`.
    fn take_open(&mut self) -> Event {
        let kind = if self.explicit_start {
            SysexKind::Start
        } else {
            SysexKind::Continue
        };
        self.take(kind)
    }

    fn take(&mut self, kind: SysexKind) -> Event {
        Event::Sysex {
            group: self.group,
            kind,
            data: mem::take(&mut self.data),
        }
    }
}

/// Collects the two 7-bit halves of a song position pointer.
#[derive(Clone, Debug)]
pub(crate) struct SongPositionBuilder {
    group: u8,
    lsb: Option<u8>,
}
impl SongPositionBuilder {
    pub(crate) fn new(group: u8) -> SongPositionBuilder {
        SongPositionBuilder { group, lsb: None }
    }

    fn add(&mut self, byte: Option<u8>) -> BuildResult {
        let byte = match byte {
            Some(byte) if is_data(byte) => byte,
            _ => return BuildResult::Failed(None),
        };
        match self.lsb {
            None => {
                self.lsb = Some(byte);
                BuildResult::Building(None)
            }
            Some(lsb) => BuildResult::Finished(Some(Event::SongPosition {
                group: self.group,
                lsb,
                msb: byte,
            })),
        }
    }
}

/// The system common messages carrying a single data byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CommonField {
    TimeCodeQuarterFrame,
    SongSelect,
}

/// Waits for the single data byte of a time code quarter frame or a song select.
#[derive(Clone, Debug)]
pub(crate) struct SystemCommonBuilder {
    group: u8,
    field: CommonField,
}
impl SystemCommonBuilder {
    pub(crate) fn new(group: u8, field: CommonField) -> SystemCommonBuilder {
        SystemCommonBuilder { group, field }
    }

    fn add(&mut self, byte: Option<u8>) -> BuildResult {
        let byte = match byte {
            Some(byte) if is_data(byte) => byte,
            _ => return BuildResult::Failed(None),
        };
        let group = self.group;
        let ev = match self.field {
            CommonField::TimeCodeQuarterFrame => Event::TimeCodeQuarterFrame { group, value: byte },
            CommonField::SongSelect => Event::SongSelect {
                group,
                number: byte,
            },
        };
        BuildResult::Finished(Some(ev))
    }
}
