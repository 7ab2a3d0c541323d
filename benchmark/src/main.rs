use std::{env, time::Instant};

const CHUNK_LEN: usize = 64;

const DECODERS: &[(&str, fn(&[u8]) -> usize)] = &[
    (&"midiwire-decoder", decode_midiwire),
    (&"midiwire-stream", feed_midiwire),
    (&"midly-stream", feed_midly),
];

fn decode_midiwire(raw: &[u8]) -> usize {
    midiwire::Decoder::new(raw).count()
}

fn feed_midiwire(raw: &[u8]) -> usize {
    let mut stream = midiwire::MidiStream::new();
    let mut count = 0;
    for chunk in raw.chunks(CHUNK_LEN) {
        stream.feed(chunk, |_ev| count += 1);
    }
    stream.flush(|_ev| count += 1);
    count
}

fn feed_midly(raw: &[u8]) -> usize {
    let mut stream = midly::stream::MidiStream::new();
    let mut count = 0;
    for chunk in raw.chunks(CHUNK_LEN) {
        stream.feed(chunk, |_ev| count += 1);
    }
    stream.flush(|_ev| count += 1);
    count
}

/// Synthetic traffic, roughly what a keyboard with a clock and an occasional patch dump sends.
fn traffic(name: &str, len: usize) -> Option<Vec<u8>> {
    let mut seed = 0x2545_F491_4F6C_DD1D_u64;
    let mut rand = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 32) as u8
    };
    let mut raw = Vec::with_capacity(len);
    let mut running_status = None;
    while raw.len() < len {
        let ev = match name {
            "notes" => match rand() % 4 {
                0 => midiwire::Event::note_off(0, rand() & 0x7F, 0x40),
                _ => midiwire::Event::note_on(0, rand() & 0x7F, rand() & 0x7F),
            },
            "clocked" => match rand() % 3 {
                0 => midiwire::Event::realtime(midiwire::RealtimeKind::TimingClock),
                1 => midiwire::Event::control_change(rand() & 0xF, rand() & 0x7F, rand() & 0x7F),
                _ => midiwire::Event::note_on(rand() & 0xF, rand() & 0x7F, 100),
            },
            "sysex" => {
                let data = (0..rand() as usize * 16)
                    .map(|_| rand() & 0x7F)
                    .collect::<Vec<_>>();
                midiwire::Event::sysex_complete(data)
            }
            _ => return None,
        };
        match ev.write_with_running_status(&mut running_status, &mut raw) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
    Some(raw)
}

const TRAFFIC: &[&str] = &["notes", "clocked", "sysex"];

fn use_decoder(decode: fn(&[u8]) -> usize, raw: &[u8]) {
    let round = |num: f64| (num * 100.0).round() / 100.0;

    let runtime = || {
        let start = Instant::now();
        let out = decode(raw);
        let time = round((start.elapsed().as_micros() as f64) / 1000.0);
        (out, time)
    };

    let (event_count, cold_time) = runtime();
    let runtime = || {
        let (out, time) = runtime();
        assert_eq!(
            out, event_count,
            "decoder is not consistent with event counts"
        );
        time
    };

    let iters = (2000.0 / cold_time.max(0.01)).floor() as u64 + 1;
    let mut total_time = 0.0;
    let mut max_time = cold_time;
    let mut min_time = cold_time;
    for _ in 0..iters {
        let time = runtime();
        total_time += time;
        max_time = max_time.max(time);
        min_time = min_time.min(time);
    }
    let avg_time = round(total_time / (iters as f64));

    eprintln!(
        "{} events in {} iters / min {} / avg {} / max {}",
        event_count, iters, min_time, avg_time, max_time
    );
}

fn main() {
    let traffic_filter = env::args().nth(1).unwrap_or_default().to_lowercase();
    let decoder_filter = env::args().nth(2).unwrap_or_default().to_lowercase();
    let size_kb = env::args()
        .nth(3)
        .and_then(|size| size.parse::<usize>().ok())
        .unwrap_or(1024);

    let decoders = DECODERS
        .iter()
        .filter(|(name, _)| name.contains(&decoder_filter))
        .collect::<Vec<_>>();
    if decoders.is_empty() {
        eprintln!("no decoders match the pattern \"{}\"", decoder_filter);
        eprint!("available decoders: ");
        for (i, (name, _)) in DECODERS.iter().enumerate() {
            if i > 0 {
                eprint!(", ");
            }
            eprint!("{}", name);
        }
        eprintln!();
        return;
    }

    let kinds = TRAFFIC
        .iter()
        .filter(|name| name.contains(&traffic_filter))
        .collect::<Vec<_>>();
    if kinds.is_empty() {
        eprintln!("no traffic matches the pattern \"{}\"", traffic_filter);
        eprintln!("available traffic: {}", TRAFFIC.join(", "));
    }
    for name in kinds {
        let raw = match traffic(name, size_kb * 1024) {
            Some(raw) => raw,
            None => continue,
        };
        eprintln!("decoding \"{}\" traffic ({} KB)", name, raw.len() / 1024);
        for &(decoder, decode) in decoders.iter() {
            eprint!("  {}: ", decoder);
            use_decoder(*decode, &raw);
        }
        eprintln!();
    }
}
