use crate::{
    decode, decode_streams, encode,
    io::{Cursor, CursorError},
    status, ChannelVoice, ChannelVoiceKind, DecodeStats, Decoder, ErrorKind, Event, MidiStream,
    RealtimeKind, SysexKind,
};

/// Check that each raw message decodes, parses and encodes to and from its event.
fn test_equiv(list: &[(&[u8], Event)]) {
    for (raw, ev) in list {
        assert_eq!(&decode(raw), &[ev.clone()], "decoding {:02x?}", raw);
        assert_eq!(Event::parse(raw).as_ref(), Ok(ev), "parsing {:02x?}", raw);
        assert_eq!(&ev.encode()[..], *raw, "encoding {}", ev);
        assert_eq!(ev.encoded_len(), raw.len());
    }
}

/// Decode a stream and also return what was thrown away.
fn decode_with_stats(raw: &[u8]) -> (Vec<Event>, DecodeStats) {
    let mut decoder = Decoder::new(raw);
    let events = decoder.by_ref().collect();
    (events, decoder.stats())
}

/// Feed a stream to a `MidiStream` in chunks of the given lengths, then flush it.
fn feed_chunked(raw: &[u8], mut chunk_len: impl FnMut() -> usize) -> (Vec<Event>, DecodeStats) {
    let mut stream = MidiStream::new();
    let mut events = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        let len = chunk_len().max(1).min(rest.len());
        let (chunk, tail) = rest.split_at(len);
        stream.feed(chunk, |ev| events.push(ev));
        rest = tail;
    }
    stream.flush(|ev| events.push(ev));
    (events, stream.stats())
}

/// Small deterministic generator, to avoid pulling in a randomness crate.
struct XorShift(u64);
impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
    fn byte(&mut self) -> u8 {
        (self.next() >> 32) as u8
    }
}

/// A stream exercising every decoder path: running status, interleaved realtime, sysex fragments,
/// truncation and reserved bytes.
fn mixed_stream() -> Vec<u8> {
    [
        &[0x91, 60, 100, 62, 100][..],
        &[0xF8, 0xB1, 7, 0xFE, 100],
        &[0xF0, 1, 2, 3, 0xF8, 4, 0xF7],
        &[0xC3, 5, 6, 7],
        &[0xF0, 9, 9, 0x80, 60, 0x40],
        &[10, 11, 12, 0xF7],
        &[0xF4, 0xF9, 0xFD, 0xF7],
        &[0xF2, 1, 0xF8, 2, 0xF2, 1],
        &[0xF1, 0x35, 0xF3, 4, 0xF6],
        &[0x90, 64, 0, 65, 90, 0xE0, 0, 0x40],
        &[0xF0, 0x7E, 0x7F, 0x06],
    ]
    .concat()
}

#[test]
fn channel_voice() {
    test_equiv(&[
        (&[0x82, 3, 4], Event::note_off(2, 3, 4)),
        (&[0x8F, 127, 127], Event::note_off(15, 127, 127)),
        (&[0x92, 3, 4], Event::note_on(2, 3, 4)),
        (&[0x90, 0, 127], Event::note_on(0, 0, 127)),
        (&[0xA2, 3, 4], Event::poly_pressure(2, 3, 4)),
        (&[0xB2, 3, 4], Event::control_change(2, 3, 4)),
        (&[0xC2, 3], Event::program_change(2, 3)),
        (&[0xD2, 3], Event::channel_pressure(2, 3)),
        (&[0xE2, 3, 4], Event::pitch_bend(2, 3, 4)),
        (&[0xE7, 0, 0x40], Event::pitch_bend(7, 0, 0x40)),
    ]);
}

#[test]
fn system_common() {
    test_equiv(&[
        (&[0xF1, 34], Event::time_code_quarter_frame(34)),
        (&[0xF2, 3, 4], Event::song_position(3, 4)),
        (&[0xF3, 34], Event::song_select(34)),
        (&[0xF6], Event::tune_request()),
    ]);
}

#[test]
fn realtime() {
    use RealtimeKind::*;
    test_equiv(&[
        (&[0xF8], Event::realtime(TimingClock)),
        (&[0xFA], Event::realtime(Start)),
        (&[0xFB], Event::realtime(Continue)),
        (&[0xFC], Event::realtime(Stop)),
        (&[0xFE], Event::realtime(ActiveSensing)),
        (&[0xFF], Event::realtime(Reset)),
    ]);
}

#[test]
fn sysex() {
    test_equiv(&[
        (
            &[0xF0, 3, 4, 5, 6, 0xF7],
            Event::sysex(SysexKind::Complete, vec![3, 4, 5, 6]),
        ),
        (
            &[0xF0, 3, 4, 5, 6],
            Event::sysex(SysexKind::Start, vec![3, 4, 5, 6]),
        ),
        (
            &[3, 4, 5, 6],
            Event::sysex(SysexKind::Continue, vec![3, 4, 5, 6]),
        ),
        (
            &[3, 4, 5, 6, 0xF7],
            Event::sysex(SysexKind::End, vec![3, 4, 5, 6]),
        ),
        (&[0xF0, 0xF7], Event::sysex_complete(Vec::new())),
    ]);
}

#[test]
fn long_sysex() {
    let data = (0..4096).map(|i| (i % 128) as u8).collect::<Vec<_>>();
    let ev = Event::sysex_complete(data.clone());
    let raw = ev.encode();
    assert_eq!(raw.len(), data.len() + 2);
    assert_eq!(decode(&raw), [ev]);
}

#[test]
fn note_on_three_times() {
    let raw = [0x91, 2, 3, 0x91, 2, 3, 0x91, 2, 3];
    let ev = Event::note_on(1, 2, 3);
    assert_eq!(decode(&raw), [ev.clone(), ev.clone(), ev]);
}

#[test]
fn running_status() {
    let mut raw = Event::note_off(0, 13, 14).encode();
    raw.extend_from_slice(&[15, 16]);
    assert_eq!(
        decode(&raw),
        [Event::note_off(0, 13, 14), Event::note_off(0, 15, 16)]
    );
}

#[test]
fn running_status_single_data_byte() {
    assert_eq!(
        decode(&[0xC4, 1, 2, 3]),
        [
            Event::program_change(4, 1),
            Event::program_change(4, 2),
            Event::program_change(4, 3),
        ]
    );
}

#[test]
fn realtime_in_between() {
    let raw = [0x80, 0xFF, 13, 0xFF, 0x40];
    assert_eq!(
        decode(&raw),
        [
            Event::realtime(RealtimeKind::Reset),
            Event::realtime(RealtimeKind::Reset),
            Event::note_off(0, 13, 0x40),
        ]
    );
}

#[test]
fn realtime_inside_sysex() {
    let raw = [0xF0, 1, 0xF8, 2, 0xFA, 0xF7];
    assert_eq!(
        decode(&raw),
        [
            Event::realtime(RealtimeKind::TimingClock),
            Event::realtime(RealtimeKind::Start),
            Event::sysex_complete(vec![1, 2]),
        ]
    );
}

#[test]
fn note_off_too_short() {
    let (events, stats) = decode_with_stats(&[0x80, 13]);
    assert_eq!(events, []);
    assert_eq!(stats.truncated, 1);

    let (events, stats) = decode_with_stats(&[0x80]);
    assert_eq!(events, []);
    assert_eq!(stats.truncated, 1);
}

#[test]
fn note_off_too_short_followed_by_status() {
    let (events, stats) = decode_with_stats(&[0x80, 13, 0x80, 14, 0x40]);
    assert_eq!(events, [Event::note_off(0, 14, 0x40)]);
    assert_eq!(
        stats,
        DecodeStats {
            dropped: 0,
            truncated: 1
        }
    );
}

#[test]
fn running_status_end_is_not_truncation() {
    let (events, stats) = decode_with_stats(&[0x90, 60, 100, 0xF6]);
    assert_eq!(events, [Event::note_on(0, 60, 100), Event::tune_request()]);
    assert_eq!(stats, DecodeStats::default());
}

#[test]
fn note_on_velocity_zero() {
    assert_eq!(
        decode(&Event::note_on(0, 3, 0).encode()),
        [Event::note_off(0, 3, 0x40)]
    );
    assert_eq!(
        Event::parse(&[0x95, 3, 0]),
        Ok(Event::note_off(5, 3, 0x40))
    );
}

#[test]
fn note_on_velocity_zero_keeps_running_status() {
    assert_eq!(
        decode(&[0x90, 60, 0, 61, 100]),
        [Event::note_off(0, 60, 0x40), Event::note_on(0, 61, 100)]
    );
}

#[test]
fn song_position_too_short() {
    assert_eq!(decode(&[status::SONG_POSITION, 3]), []);
    assert_eq!(
        decode(&[status::SONG_POSITION, 3, 0x80, 4, 0x40]),
        [Event::note_off(0, 4, 0x40)]
    );
}

#[test]
fn song_select_too_short() {
    assert_eq!(decode(&[status::SONG_SELECT]), []);
    assert_eq!(
        decode(&[status::SONG_SELECT, 0x80, 3, 0x40]),
        [Event::note_off(0, 3, 0x40)]
    );
}

#[test]
fn system_common_reserved() {
    let (events, stats) = decode_with_stats(&[0xF4]);
    assert_eq!(events, []);
    assert_eq!(stats.dropped, 1);

    assert_eq!(
        decode(&[0xF4, 0x80, 5, 6, 0xF5]),
        [Event::note_off(0, 5, 6)]
    );
}

#[test]
fn realtime_reserved() {
    let (events, stats) = decode_with_stats(&[0xF9, 0xFD]);
    assert_eq!(events, []);
    assert_eq!(stats.dropped, 2);

    assert_eq!(
        decode(&[0x80, 5, 0xFD, 6]),
        [Event::note_off(0, 5, 6)]
    );
}

#[test]
fn stray_sysex_end() {
    let (events, stats) = decode_with_stats(&[0xF7, 0xF6]);
    assert_eq!(events, [Event::tune_request()]);
    assert_eq!(stats.dropped, 1);
}

#[test]
fn sysex_start_delimited_by_status() {
    let (events, stats) = decode_with_stats(&[0xF0, 3, 4, 5, 6, 0x80, 3, 0x40]);
    assert_eq!(
        events,
        [
            Event::sysex(SysexKind::Start, vec![3, 4, 5, 6]),
            Event::note_off(0, 3, 0x40),
        ]
    );
    assert_eq!(stats, DecodeStats::default());
}

#[test]
fn sysex_continue_delimited_by_status() {
    assert_eq!(
        decode(&[3, 4, 5, 6, 0x80, 3, 0x40]),
        [
            Event::sysex(SysexKind::Continue, vec![3, 4, 5, 6]),
            Event::note_off(0, 3, 0x40),
        ]
    );
}

#[test]
fn sysex_interrupted_by_sysex() {
    assert_eq!(
        decode(&[0xF0, 1, 0xF0, 2, 0xF7]),
        [
            Event::sysex(SysexKind::Start, vec![1]),
            Event::sysex_complete(vec![2]),
        ]
    );
}

#[test]
fn channel_voice_truncated_by_sysex() {
    assert_eq!(
        decode(&[0x90, 60, 0xF0, 1, 0xF7]),
        [Event::sysex_complete(vec![1])]
    );
}

#[test]
fn data_after_sysex_is_continuation() {
    assert_eq!(
        decode(&[0xF0, 1, 0xF7, 2, 3]),
        [
            Event::sysex_complete(vec![1]),
            Event::sysex(SysexKind::Continue, vec![2, 3]),
        ]
    );
}

#[test]
fn empty_input() {
    let (events, stats) = decode_with_stats(&[]);
    assert_eq!(events, []);
    assert_eq!(stats, DecodeStats::default());
}

#[test]
fn decoder_is_lazy() {
    let raw: &[u8] = &[0x90, 60, 100, 0xF8, 0xF6];
    let mut decoder = Decoder::new(raw);
    assert_eq!(decoder.next(), Some(Event::note_on(0, 60, 100)));
    assert_eq!(decoder.source(), &&[0xF8, 0xF6][..]);
    assert_eq!(
        decoder.next(),
        Some(Event::realtime(RealtimeKind::TimingClock))
    );
    assert_eq!(decoder.next(), Some(Event::tune_request()));
    assert_eq!(decoder.next(), None);
    assert_eq!(decoder.next(), None);
}

#[test]
fn decoder_over_iterator() {
    let raw = mixed_stream();
    let from_iter = Decoder::new(raw.iter().copied().peekable()).collect::<Vec<_>>();
    assert_eq!(from_iter, decode(&raw));
}

#[test]
fn decoder_group() {
    let raw: &[u8] = &[0x90, 60, 0xF8, 100, 0xF0, 1];
    let events = Decoder::with_group(raw, 5).collect::<Vec<_>>();
    assert_eq!(
        events,
        [
            Event::realtime(RealtimeKind::TimingClock).with_group(5),
            Event::note_on(0, 60, 100).with_group(5),
            Event::sysex(SysexKind::Start, vec![1]).with_group(5),
        ]
    );
    assert!(events.iter().all(|ev| ev.group() == 5));
}

#[test]
fn stream_keeps_partial_messages() {
    let mut stream = MidiStream::new();
    let mut events = Vec::new();
    stream.feed(&[0xF0, 1, 2], |ev| events.push(ev));
    assert_eq!(events, []);
    assert!(stream.is_pending());
    stream.feed(&[3], |ev| events.push(ev));
    stream.feed(&[4, 0x80, 60], |ev| events.push(ev));
    assert_eq!(events, [Event::sysex(SysexKind::Start, vec![1, 2, 3, 4])]);
    stream.feed(&[0x40], |ev| events.push(ev));
    stream.flush(|ev| events.push(ev));
    assert_eq!(
        events,
        [
            Event::sysex(SysexKind::Start, vec![1, 2, 3, 4]),
            Event::note_off(0, 60, 0x40),
        ]
    );
    assert!(!stream.is_pending());
}

#[test]
fn stream_flush_emits_open_sysex() {
    let mut stream = MidiStream::with_group(2);
    let mut events = Vec::new();
    stream.feed(&[5, 6], |ev| events.push(ev));
    stream.flush(|ev| events.push(ev));
    assert_eq!(
        events,
        [Event::sysex(SysexKind::Continue, vec![5, 6]).with_group(2)]
    );
}

#[test]
fn stream_flush_drops_truncated_message() {
    let mut stream = MidiStream::new();
    let mut events = Vec::new();
    stream.feed(&[0xE0, 0], |ev| events.push(ev));
    stream.flush(|ev| events.push(ev));
    assert_eq!(events, []);
    assert_eq!(stream.stats().truncated, 1);
}

#[test]
fn chunking_is_irrelevant() {
    let raw = mixed_stream();
    let (whole, whole_stats) = decode_with_stats(&raw);
    assert_eq!(feed_chunked(&raw, || 1), (whole.clone(), whole_stats));
    assert_eq!(feed_chunked(&raw, || raw.len()), (whole.clone(), whole_stats));
    for seed in 1..=32u64 {
        let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let chunked = feed_chunked(&raw, || (rng.next() % 7) as usize);
        assert_eq!(chunked, (whole.clone(), whole_stats), "seed {}", seed);
    }
}

#[test]
fn mixed_stream_events() {
    use RealtimeKind::*;
    let (events, stats) = decode_with_stats(&mixed_stream());
    assert_eq!(
        events,
        [
            Event::note_on(1, 60, 100),
            Event::note_on(1, 62, 100),
            Event::realtime(TimingClock),
            Event::realtime(ActiveSensing),
            Event::control_change(1, 7, 100),
            Event::realtime(TimingClock),
            Event::sysex_complete(vec![1, 2, 3, 4]),
            Event::program_change(3, 5),
            Event::program_change(3, 6),
            Event::program_change(3, 7),
            Event::sysex(SysexKind::Start, vec![9, 9]),
            Event::note_off(0, 60, 0x40),
            Event::note_off(0, 10, 11),
            Event::realtime(TimingClock),
            Event::song_position(1, 2),
            Event::time_code_quarter_frame(0x35),
            Event::song_select(4),
            Event::tune_request(),
            Event::note_off(0, 64, 0x40),
            Event::note_on(0, 65, 90),
            Event::pitch_bend(0, 0, 0x40),
            Event::sysex(SysexKind::Start, vec![0x7E, 0x7F, 0x06]),
        ]
    );
    // `12` is cut short by a stray `0xF7`, and `0xF2 1` by `0xF1`
    assert_eq!(
        stats,
        DecodeStats {
            dropped: 5,
            truncated: 2
        }
    );
}

#[test]
fn noise_never_breaks_invariants() {
    let mut rng = XorShift(0xDEAD_BEEF_CAFE_F00D);
    let raw = (0..64 * 1024).map(|_| rng.byte()).collect::<Vec<_>>();
    let whole = decode(&raw);
    for ev in whole.iter() {
        match ev {
            Event::ChannelVoice(msg) => {
                let kind = msg.kind().expect("decoded message with unknown kind");
                assert!(msg.data1 < 0x80 && msg.data2 < 0x80, "{}", ev);
                if kind.data_len() == 1 {
                    assert_eq!(msg.data2, 0, "{}", ev);
                }
            }
            Event::TimeCodeQuarterFrame { value, .. } => assert!(*value < 0x80),
            Event::SongPosition { lsb, msb, .. } => assert!(*lsb < 0x80 && *msb < 0x80),
            Event::SongSelect { number, .. } => assert!(*number < 0x80),
            Event::Sysex { data, .. } => assert!(data.iter().all(|&b| b < 0x80)),
            Event::TuneRequest { .. } | Event::Realtime { .. } => {}
        }
        assert_eq!(ev.group(), 0);
    }
    let mut chunk_rng = XorShift(42);
    let (chunked, _) = feed_chunked(&raw, || (chunk_rng.next() % 300) as usize);
    assert_eq!(chunked, whole);
}

#[test]
fn decode_many_streams() {
    let a = mixed_stream();
    let b = [0x90, 60, 100, 0xF8];
    let c = [0xF0, 1, 2];
    let streams: [&[u8]; 4] = [&a, &b, &c, &[]];
    let decoded = decode_streams(&streams);
    assert_eq!(decoded.len(), 4);
    for (raw, events) in streams.iter().zip(decoded.iter()) {
        assert_eq!(&decode(raw), events);
    }
}

#[test]
fn write_with_running_status() {
    let events = [
        Event::note_on(0, 60, 100),
        Event::note_on(0, 62, 100),
        Event::realtime(RealtimeKind::TimingClock),
        Event::note_on(0, 64, 100),
        Event::control_change(0, 7, 100),
        Event::song_select(3),
        Event::note_on(0, 65, 100),
    ];
    let mut raw = Vec::new();
    let mut running_status = None;
    for ev in events.iter() {
        ev.write_with_running_status(&mut running_status, &mut raw)
            .unwrap();
    }
    assert_eq!(
        raw,
        [0x90, 60, 100, 62, 100, 0xF8, 64, 100, 0xB0, 7, 100, 0xF3, 3, 0x90, 65, 100]
    );
    assert_eq!(decode(&raw), events);
}

#[test]
fn encode_functions() {
    let mut out = Vec::new();
    encode::channel_voice(ChannelVoiceKind::ProgramChange, 0x1F, 5, 99, &mut out).unwrap();
    encode::channel_voice(ChannelVoiceKind::PitchBend, 3, 0, 0x40, &mut out).unwrap();
    encode::time_code_quarter_frame(0x12, &mut out).unwrap();
    encode::song_position(1, 2, &mut out).unwrap();
    encode::song_select(9, &mut out).unwrap();
    encode::tune_request(&mut out).unwrap();
    encode::sysex(SysexKind::Start, &[1], &mut out).unwrap();
    encode::sysex(SysexKind::Continue, &[2], &mut out).unwrap();
    encode::sysex(SysexKind::End, &[3], &mut out).unwrap();
    encode::realtime(RealtimeKind::Stop, &mut out).unwrap();
    assert_eq!(
        out,
        [
            0xCF, 5, 0xE3, 0, 0x40, 0xF1, 0x12, 0xF2, 1, 2, 0xF3, 9, 0xF6, 0xF0, 1, 2, 3, 0xF7,
            0xFC
        ]
    );
}

#[test]
fn encoder_does_not_validate() {
    assert_eq!(Event::note_on(0, 200, 0).encode(), [0x90, 200, 0]);
    assert_eq!(
        Event::sysex_complete(vec![0xF7]).encode(),
        [0xF0, 0xF7, 0xF7]
    );
}

#[test]
fn single_data_byte_kinds_have_no_data2() {
    let ev = Event::channel_voice(ChannelVoiceKind::ChannelPressure, 1, 5, 99);
    assert_eq!(
        ev,
        Event::ChannelVoice(ChannelVoice {
            group: 0,
            status: 0xD1,
            data1: 5,
            data2: 0
        })
    );
    assert_eq!(ev.encode(), [0xD1, 5]);
}

#[test]
fn write_to_fixed_buffers() {
    let mut buf = [0; 2];
    let mut cursor = Cursor::new(&mut buf);
    assert_eq!(
        Event::note_on(0, 60, 100).write(&mut cursor),
        Err(CursorError::OutOfSpace)
    );
    assert_eq!(cursor.written(), &[0x90, 60]);

    let mut buf = [0; 4];
    let mut slice = &mut buf[..];
    Event::song_position(1, 2).write(&mut slice).unwrap();
    assert_eq!(slice.len(), 1);
    assert_eq!(buf, [0xF2, 1, 2, 0]);
}

#[cfg(feature = "std")]
#[test]
fn write_to_std_io() {
    let mut out = crate::io::IoWrap(Vec::new());
    Event::tune_request().write(&mut out).unwrap();
    Event::realtime(RealtimeKind::Reset).write(&mut out).unwrap();
    assert_eq!(out.0, [0xF6, 0xFF]);
}

#[test]
fn parse_realtime_inside_packet() {
    assert_eq!(
        Event::parse(&[0xF0, 1, 0xF8, 2, 0xF7]),
        Ok(Event::sysex_complete(vec![1, 2]))
    );
    assert_eq!(
        Event::parse(&[3, 0xFE, 4, 0xF7]),
        Ok(Event::sysex(SysexKind::End, vec![3, 4]))
    );
    assert_eq!(
        Event::parse(&[0x90, 0xF8, 60, 0xFF, 100]),
        Ok(Event::note_on(0, 60, 100))
    );
    assert_eq!(
        Event::parse(&[0xF2, 1, 0xFA, 2]),
        Ok(Event::song_position(1, 2))
    );

    let err = Event::parse(&[0x90, 60, 0xF8]).unwrap_err();
    assert_eq!(err.cause(), Some(ErrorKind::Invalid("truncated message")));
}

#[test]
fn parse_errors() {
    let err = Event::parse(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid("empty packet"));

    let err = Event::parse(&[0x90, 60]).unwrap_err();
    assert_eq!(
        err.kind(),
        ErrorKind::Invalid("failed to read channel voice message")
    );
    assert_eq!(err.cause(), Some(ErrorKind::Invalid("truncated message")));

    let err = Event::parse(&[0x90, 60, 0x80]).unwrap_err();
    assert_eq!(
        err.cause(),
        Some(ErrorKind::Invalid(
            "status byte where a data byte was expected"
        ))
    );

    let err = Event::parse(&[0xF2, 1]).unwrap_err();
    assert_eq!(err.kind().message(), "failed to read song position");

    assert!(Event::parse(&[0xF7]).is_err());
    assert!(Event::parse(&[0xF4, 1]).is_err());
    assert!(Event::parse(&[0xFD]).is_err());
}

#[test]
fn parse_error_display() {
    let err = Event::parse(&[0xF3]).unwrap_err();
    assert_eq!(err.to_string(), "invalid midi: failed to read song select");
    assert_eq!(
        format!("{:?}", err),
        "invalid midi: failed to read song select\n  caused by: invalid midi: truncated message"
    );
}

#[cfg(not(feature = "strict"))]
#[test]
fn parse_ignores_trailing_bytes() {
    assert_eq!(
        Event::parse(&[0x90, 60, 100, 0x80]),
        Ok(Event::note_on(0, 60, 100))
    );
    assert_eq!(
        Event::parse(&[0xF0, 1, 2, 0x90, 60, 100]),
        Ok(Event::sysex(SysexKind::Start, vec![1, 2]))
    );
}

#[cfg(feature = "strict")]
#[test]
fn parse_rejects_trailing_bytes() {
    let err = Event::parse(&[0x90, 60, 100, 0x80]).unwrap_err();
    assert_eq!(
        err.kind(),
        ErrorKind::Malformed("trailing bytes after message")
    );
}

#[test]
fn classification() {
    use ChannelVoiceKind::*;
    assert_eq!(ChannelVoiceKind::from_status(0x93), Some(NoteOn));
    assert_eq!(ChannelVoiceKind::from_status(0xEF), Some(PitchBend));
    assert_eq!(ChannelVoiceKind::from_status(0x70), None);
    assert_eq!(ChannelVoiceKind::from_nibble(0xF), None);
    assert_eq!(ProgramChange.data_len(), 1);
    assert_eq!(ChannelPressure.data_len(), 1);
    assert_eq!(PolyPressure.data_len(), 2);
    assert_eq!(ControlChange.status(0x12), 0xB2);

    let unknown = ChannelVoice {
        group: 0,
        status: 0x42,
        data1: 1,
        data2: 2,
    };
    assert_eq!(unknown.kind(), None);
    assert_eq!(unknown.channel(), 2);

    let ev = Event::control_change(9, 1, 2);
    assert!(ev.is_channel_voice() && !ev.is_system_common());
    assert_eq!(ev.channel(), Some(9));
    assert!(Event::song_select(1).is_system_common());
    assert!(!Event::sysex_complete(vec![1]).is_system_common());
    assert!(Event::sysex_complete(vec![1]).is_sysex());
    assert!(Event::realtime(RealtimeKind::Stop).is_realtime());
    assert_eq!(Event::tune_request().channel(), None);
    assert_eq!(RealtimeKind::from_byte(0xFB), Some(RealtimeKind::Continue));
    assert_eq!(RealtimeKind::from_byte(0xF9), None);
}

#[test]
fn display() {
    assert_eq!(
        Event::note_on(1, 60, 100).to_string(),
        "noteOn(group: 0, channel: 1, data1: 60, data2: 100)"
    );
    assert_eq!(
        Event::song_position(1, 2).with_group(3).to_string(),
        "songPosition(group: 3, lsb: 1, msb: 2)"
    );
    assert_eq!(
        Event::realtime(RealtimeKind::ActiveSensing).to_string(),
        "activeSensing(group: 0)"
    );
    assert_eq!(
        Event::sysex(SysexKind::End, vec![1, 2]).to_string(),
        "sysex(group: 0, kind: End, data: [1, 2])"
    );
}
