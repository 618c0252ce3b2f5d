//! Benchmark for TLV record serialization using sensor readings.
//!
//! Usage: `bench-readings [readings.json] [--count N] [--json]`
//!
//! Without an input file, readings are synthesized deterministically.
//! Set `RUST_LOG=tlv_record=debug` to see per-record codec logs.

use std::fs;
use std::time::Instant;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tlv_record::{
    format_schema_id, AccessError, FieldAccessor, PrimitiveType, Record, Schema, Value,
};

// =============================================================================
// SCHEMA
// =============================================================================

lazy_static! {
    static ref READING: Schema = Schema::builder("reading")
        .required("station", PrimitiveType::UInt32)
        .required("timestamp", PrimitiveType::UInt64)
        .required("celsius_milli", PrimitiveType::Int32)
        .optional("humidity", PrimitiveType::UInt8)
        .optional("online", PrimitiveType::Bool)
        .optional("label", PrimitiveType::String)
        .optional("raw", PrimitiveType::Bytes)
        .build()
        .expect("reading schema is valid");
}

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
struct Reading {
    station: u32,
    timestamp: u64,
    celsius_milli: i32,
    humidity: Option<u8>,
    online: Option<bool>,
    label: Option<String>,
    #[serde(default)]
    raw: Option<Vec<u8>>,
}

impl FieldAccessor for Reading {
    fn get_field(&self, index: u8) -> Option<Value<'_>> {
        match index {
            0 => Some(Value::UInt32(self.station)),
            1 => Some(Value::UInt64(self.timestamp)),
            2 => Some(Value::Int32(self.celsius_milli)),
            3 => self.humidity.map(Value::UInt8),
            4 => self.online.map(Value::Bool),
            5 => self.label.as_deref().map(Value::from),
            6 => self.raw.as_deref().map(Value::from),
            _ => None,
        }
    }

    fn set_field(&mut self, index: u8, value: Value<'_>) -> Result<(), AccessError> {
        let found = value.primitive_type();
        match (index, value) {
            (0, Value::UInt32(v)) => self.station = v,
            (1, Value::UInt64(v)) => self.timestamp = v,
            (2, Value::Int32(v)) => self.celsius_milli = v,
            (3, Value::UInt8(v)) => self.humidity = Some(v),
            (4, Value::Bool(v)) => self.online = Some(v),
            (5, Value::String(s)) => self.label = Some(s.into_owned()),
            (6, Value::Bytes(b)) => self.raw = Some(b.into_owned()),
            (0..=6, _) => {
                let expected = READING.fields()[index as usize].ty;
                return Err(AccessError::TypeMismatch { index, expected, found });
            }
            _ => return Err(AccessError::NoSuchField { index }),
        }
        Ok(())
    }
}

impl Record for Reading {
    fn schema() -> &'static Schema {
        &READING
    }
}

#[derive(Debug, Serialize)]
struct Report {
    schema: String,
    fingerprint: String,
    records: usize,
    json_bytes: usize,
    encoded_bytes: usize,
    encode_ns_per_record: f64,
    decode_ns_per_record: f64,
    encode_mb_per_s: f64,
    decode_mb_per_s: f64,
}

// =============================================================================
// DATA
// =============================================================================

/// Deterministic readings covering every field shape.
fn synthesize(count: usize) -> Vec<Reading> {
    const LABELS: [&str; 4] = ["roof", "basement", "greenhouse north", "server room"];

    (0..count)
        .map(|i| {
            let n = i as u64;
            Reading {
                station: (i % 1024) as u32,
                timestamp: 1_700_000_000_000 + n * 250,
                celsius_milli: ((n.wrapping_mul(7919) % 60_000) as i32) - 20_000,
                humidity: (i % 3 != 0).then_some((n % 101) as u8),
                online: (i % 5 != 0).then_some(i % 2 == 0),
                label: (i % 4 == 0).then(|| LABELS[(i / 4) % LABELS.len()].to_string()),
                raw: (i % 10 == 0).then(|| (0..(i % 48) as u8).collect()),
            }
        })
        .collect()
}

fn mb_per_s(bytes: usize, secs: f64) -> f64 {
    (bytes as f64 / 1_000_000.0) / secs
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let mut input = None;
    let mut count = 100_000usize;
    let mut json_report = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json_report = true,
            "--count" => {
                count = args
                    .next()
                    .and_then(|n| n.parse().ok())
                    .expect("--count takes a number");
            }
            path => input = Some(path.to_string()),
        }
    }

    let readings: Vec<Reading> = match &input {
        Some(path) => {
            info!(path = %path, "Loading readings");
            let json_data = fs::read_to_string(path).expect("Failed to read input file");
            serde_json::from_str(&json_data).expect("Failed to parse readings JSON")
        }
        None => synthesize(count),
    };
    let json_bytes = serde_json::to_vec(&readings).expect("Failed to serialize JSON").len();

    if !json_report {
        println!("=== Schema ===");
        println!("{}", *READING);
        println!("Fingerprint: {}", format_schema_id(&READING.fingerprint()));
        println!("Records: {}", readings.len());
    }

    // Warmup
    for reading in readings.iter().take(1000) {
        let _ = tlv_record::encode(reading).expect("Failed to encode");
    }

    // Benchmark encoding
    let encode_start = Instant::now();
    let encoded: Vec<Vec<u8>> = readings
        .iter()
        .map(|r| tlv_record::encode(r).expect("Failed to encode"))
        .collect();
    let encode_time = encode_start.elapsed();
    let encoded_bytes: usize = encoded.iter().map(Vec::len).sum();

    // Benchmark decoding
    let decode_start = Instant::now();
    let decoded: Vec<Reading> = encoded
        .iter()
        .map(|bytes| tlv_record::decode(bytes).expect("Failed to decode"))
        .collect();
    let decode_time = decode_start.elapsed();

    assert_eq!(decoded, readings, "Decoded readings should match input");

    let records = readings.len().max(1) as f64;
    let report = Report {
        schema: READING.to_string(),
        fingerprint: format_schema_id(&READING.fingerprint()),
        records: readings.len(),
        json_bytes,
        encoded_bytes,
        encode_ns_per_record: encode_time.as_nanos() as f64 / records,
        decode_ns_per_record: decode_time.as_nanos() as f64 / records,
        encode_mb_per_s: mb_per_s(encoded_bytes, encode_time.as_secs_f64()),
        decode_mb_per_s: mb_per_s(encoded_bytes, decode_time.as_secs_f64()),
    };

    if json_report {
        println!("{}", serde_json::to_string_pretty(&report).expect("Failed to serialize report"));
        return;
    }

    println!("\nEncode: {:?} ({:.1} ns/record)", encode_time, report.encode_ns_per_record);
    println!("  Throughput: {:.2} MB/s", report.encode_mb_per_s);
    println!("\nDecode: {:?} ({:.1} ns/record)", decode_time, report.decode_ns_per_record);
    println!("  Throughput: {:.2} MB/s", report.decode_mb_per_s);

    println!("\n=== Summary ===");
    println!(
        "JSON size: {} bytes ({:.1} MB)",
        json_bytes,
        json_bytes as f64 / 1_000_000.0
    );
    println!(
        "TLV size: {} bytes ({:.1} MB)",
        encoded_bytes,
        encoded_bytes as f64 / 1_000_000.0
    );
    println!(
        "Size vs JSON: {:.1}%",
        100.0 * encoded_bytes as f64 / json_bytes.max(1) as f64
    );
}
