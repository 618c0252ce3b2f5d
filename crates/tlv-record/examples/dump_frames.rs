//! Simple inspector for TLV record files.
//!
//! Usage: `dump_frames <file> [types]`
//!
//! Without `types`, prints the raw frames. With a comma-separated type list
//! such as `uint8,string?,bytes` (a trailing `?` marks an optional field),
//! also decodes the record and checks required fields.

use std::fs;
use std::sync::Arc;

use tlv_record::{
    decode_record_with_options, format_schema_id, validate_required, DecodeOptions,
    DynamicRecord, FrameReader, Presence, Schema, Value,
};

fn format_value(v: &Value) -> String {
    match v {
        Value::String(s) => {
            let preview: String = s.chars().take(60).collect();
            if s.chars().count() > 60 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Bytes(b) => {
            let hex: String = b.iter().take(16).map(|x| format!("{:02x}", x)).collect();
            if b.len() > 16 {
                format!("BYTES[{}] {}...", b.len(), hex)
            } else {
                format!("BYTES[{}] {}", b.len(), hex)
            }
        }
        Value::Bool(b) => format!("{}", b),
        other => match (other.as_i64(), other.as_u64()) {
            (Some(i), _) => format!("{}", i),
            (None, Some(u)) => format!("{}", u),
            (None, None) => format!("{:?}", other),
        },
    }
}

fn parse_schema(type_list: &str) -> Schema {
    let mut builder = Schema::builder("cli");
    for (i, decl) in type_list.split(',').map(str::trim).enumerate() {
        let (type_name, presence) = match decl.strip_suffix('?') {
            Some(t) => (t, Presence::Optional),
            None => (decl, Presence::Required),
        };
        builder = builder.field_named(format!("field{}", i), type_name, presence);
    }
    builder.build().expect("Invalid type list")
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("Usage: dump_frames <file> [types]");
    let types = args.next();

    println!("Reading: {}", path);
    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    println!("\n=== Frames ===");
    let mut reader = FrameReader::new(&data);
    let mut count = 0;
    loop {
        let offset = reader.position();
        match reader.next() {
            None => break,
            Some(Ok(frame)) => {
                let hex: String = frame
                    .payload()
                    .iter()
                    .take(24)
                    .map(|b| format!("{:02x}", b))
                    .collect();
                let ellipsis = if frame.payload().len() > 24 { "..." } else { "" };
                println!(
                    "  @{:<6} index={:<3} len={:<3} {}{}",
                    offset,
                    frame.index(),
                    frame.len(),
                    hex,
                    ellipsis
                );
                count += 1;
            }
            Some(Err(e)) => {
                println!("  @{:<6} error: {}", offset, e);
                break;
            }
        }
    }
    println!("Total frames: {}", count);

    let Some(types) = types else {
        return;
    };

    let schema = Arc::new(parse_schema(&types));
    println!("\n=== Record ===");
    println!("Schema: {}", schema);
    println!("Fingerprint: {}", format_schema_id(&schema.fingerprint()));

    let mut record = DynamicRecord::new(schema.clone());
    let options = DecodeOptions::new().reject_unknown_fields(false);
    match decode_record_with_options(&schema, &data, &mut record, options) {
        Ok(n) => println!("Decoded {} fields", n),
        Err(e) => {
            println!("Decode failed [{}]: {}", e.code().code(), e);
            return;
        }
    }

    for field in schema.fields() {
        match record.get(&field.name) {
            Some(value) => println!("  [{}] {} = {}", field.index, field.ty, format_value(value)),
            None => println!("  [{}] {} = <absent>", field.index, field.ty),
        }
    }

    if let Err(e) = validate_required(&schema, &record) {
        println!("\nWarning: {}", e);
    }
}
