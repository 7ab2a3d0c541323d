//! Byte-level building blocks of the MIDI 1.0 wire format.
//! Status values and data-byte checks shared by the encoder and the decoders.

use crate::prelude::*;

/// Raw status and opcode bytes that have a fixed meaning on the wire.
///
/// Channel voice statuses are not listed here, since they are built from a
/// [`ChannelVoiceKind`](../enum.ChannelVoiceKind.html) nibble and a channel.
pub mod status {
    /// Opens a system-exclusive message.
    pub const SYSEX_START: u8 = 0xF0;
    /// MIDI Time Code quarter frame, followed by one data byte.
    pub const TIME_CODE_QUARTER_FRAME: u8 = 0xF1;
    /// Song position pointer, followed by two data bytes (LSB first).
    pub const SONG_POSITION: u8 = 0xF2;
    /// Song select, followed by one data byte.
    pub const SONG_SELECT: u8 = 0xF3;
    /// Tune request, no data bytes.
    pub const TUNE_REQUEST: u8 = 0xF6;
    /// Closes a system-exclusive message.
    pub const SYSEX_END: u8 = 0xF7;
    /// The lowest system realtime byte. Every byte at or above this value is realtime.
    pub const FIRST_REALTIME: u8 = 0xF8;
}

/// Whether the byte is a 7-bit data byte, as opposed to a status or opcode byte.
#[inline]
pub(crate) fn is_data(byte: u8) -> bool {
    bit_range(byte, 7..8) == 0
}

/// Whether the byte is a system realtime byte, which may appear anywhere in the stream.
#[inline]
pub(crate) fn is_realtime(byte: u8) -> bool {
    byte >= status::FIRST_REALTIME
}

/// The high nibble of a status byte, selecting the channel voice message kind.
#[inline]
pub(crate) fn high_nibble(status: u8) -> u8 {
    bit_range(status, 4..8)
}

/// The low nibble of a status byte, selecting the channel.
#[inline]
pub(crate) fn low_nibble(status: u8) -> u8 {
    bit_range(status, 0..4)
}
