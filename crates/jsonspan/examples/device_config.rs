//! Reads a configuration push the way a small device would: straight out of
//! the receive buffer, without building a tree, then answers with a status
//! report printed into a fixed-size transmit buffer.
//!
//! The incoming document is scanned once per lookup. Settings that are
//! missing or have the wrong type fall back to defaults, so a partial push
//! still yields a usable configuration.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonspan --example device_config
//! ```

#![allow(clippy::needless_raw_string_hashes)]

use jsonspan::{
    FindOptions, FixedBuf, ScanError, find_bool, find_number, find_str, find_with, print_buf,
    print_int, print_str, validate,
};

/// What the firmware keeps after applying a push.
#[derive(Debug)]
struct Config<'a> {
    name: &'a str,
    interval_ms: i64,
    threshold: f64,
    alarms: bool,
}

fn apply<'a>(push: &[u8], name_buf: &'a mut [u8]) -> Config<'a> {
    // A name that does not fit the buffer keeps the factory default.
    let name = match find_str(push, "$.device.name", name_buf) {
        Ok(Some(name)) => name,
        Ok(None) | Err(_) => "unnamed",
    };

    #[allow(clippy::cast_possible_truncation)]
    let interval_ms = find_number(push, "$.sampling.interval_ms", 1000.0) as i64;

    Config {
        name,
        interval_ms,
        threshold: find_number(push, "$.sampling.thresholds[1]", 30.0),
        alarms: find_bool(push, "$.alarms.enabled", false),
    }
}

fn report(config: &Config<'_>, consumed: Result<usize, ScanError>, out: &mut FixedBuf<'_>) {
    print_buf(b"{\"name\":", out);
    print_str(config.name.as_bytes(), out);
    print_buf(b",\"interval_ms\":", out);
    print_int(config.interval_ms, out);
    print_buf(b",\"alarms\":", out);
    let alarms: &[u8] = if config.alarms { b"true" } else { b"false" };
    print_buf(alarms, out);
    print_buf(b",\"push\":", out);
    match consumed {
        Ok(n) => {
            print_int(i64::try_from(n).unwrap_or(i64::MAX), out);
        }
        Err(e) => {
            print_buf(b"\"rejected at ", out);
            print_int(i64::try_from(e.offset()).unwrap_or(i64::MAX), out);
            print_buf(b"\"", out);
        }
    }
    print_buf(b"}", out);
}

fn main() {
    let pushes: [&[u8]; 2] = [
        br#"{"device": {"name": "boiler \"north\""},
            "sampling": {"interval_ms": 250, "thresholds": [12, 45.5]},
            "alarms": {"enabled": true}}"#,
        // Truncated in transit: the tail is gone, but the first setting is
        // still readable when lookups stop at the match.
        br#"{"device": {"name": "pump"}, "sampling": {"interval_ms": 5"#,
    ];

    for push in pushes {
        let mut name_buf = [0u8; 32];
        let config = apply(push, &mut name_buf);
        println!("applied: {config:?}");
        if config.threshold > 40.0 {
            println!("  threshold {} exceeds the sensor's rated range", config.threshold);
        }

        let early = FindOptions {
            stop_at_match: true,
            ..FindOptions::default()
        };
        if let Some(m) = find_with(push, "$.device.name", early) {
            println!(
                "  name token at {:?}: {}",
                m.span.range(),
                String::from_utf8_lossy(m.bytes(push))
            );
        }

        let mut storage = [0u8; 96];
        let mut out = FixedBuf::new(&mut storage);
        report(&config, validate(push), &mut out);
        println!("  reply ({} bytes): {}", out.len(), String::from_utf8_lossy(out.as_bytes()));
    }
}
