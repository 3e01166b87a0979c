use bitpack::iter::fields;
use bitpack::prelude::*;

/// One packed sample: 5-bit channel, 4 flag bits, 8-bit quantized level.
const RECORD_BITS: u64 = 17;

struct Sample {
    channel: u8,
    flags: &'static str,
    level: f32,
}

fn main() -> Result<()> {
    println!("=== Telemetry Records ===\n");

    let samples = [
        Sample { channel: 17, flags: "1011", level: 0.73 },
        Sample { channel: 3, flags: "0000", level: 0.0 },
        Sample { channel: 31, flags: "1111", level: 1.0 },
        Sample { channel: 8, flags: "0101", level: 0.25 },
    ];

    let mut stream = BitStreamBuilder::new().allocate(RECORD_BITS * samples.len() as u64)?;
    for s in &samples {
        stream.write_field(s.channel, 5, false)?;
        stream.write_bit_str(s.flags)?;
        stream.write_quantized(s.level, 0.0, 1.0, 8)?;
    }
    stream.flush()?;

    let packed = stream.bit_length() / 8;
    let naive = samples.len() * (1 + 4 + 4);
    println!("✓ {} records in {packed} bytes ({naive} bytes unpacked)", samples.len());
    println!("  {}", stream.to_bit_string()?);

    println!("\n=== Decoding ===");
    stream.set_bit_position(0)?;
    for i in 0..samples.len() {
        let channel = stream.read_field::<u8>(5, false)?;
        let flags = stream.read_bit_string(4)?;
        let level: f32 = stream.read_quantized(0.0, 1.0, 8)?;
        println!("  #{i}: channel={channel:2} flags={flags} level={level:.3}");
    }

    println!("\n=== Raw bytes ===");
    stream.set_bit_position(0)?;
    let all_bytes: Vec<u8> = fields(&mut stream, 8, false).collect::<bit_stream::Result<_>>()?;
    println!("  {all_bytes:02x?}");

    Ok(())
}
