use bitpack::prelude::*;

fn main() -> Result<()> {
    println!("=== Bitpack Quick Start ===\n");

    let path = std::env::temp_dir().join("bitpack_quick_start.bits");

    // Pack three sensor readings into a file, 21 bits in all
    let mut stream = create_file(&path)?;
    stream.write_bit(true)?; // online
    stream.write_field(42u8, 6, false)?; // sensor id
    stream.write_quantized(21.7f32, -40.0, 85.0, 10)?; // temperature
    stream.write_bit_str("0110")?; // status nibble
    let used = stream.bit_position();
    stream.flush()?;
    drop(stream);

    let size = std::fs::metadata(&path)?.len();
    println!("✓ Wrote {used} bits into {size} bytes");

    // Read it back field by field
    let mut stream = open_file(&path)?;
    let online = stream.read_bit()?;
    let id = stream.read_field::<u8>(6, false)?;
    let temperature: f32 = stream.read_quantized(-40.0, 85.0, 10)?;
    let status = stream.read_bit_string(4)?;
    println!("  online={online} id={id} temperature={temperature:.2} status={status}");

    // Patch the online flag in place
    stream.set_bit_position(0)?;
    stream.write_bit(false)?;
    stream.flush()?;
    drop(stream);

    // Dump every bit in the file
    let bits = read_file_bits(&path)?;
    let rendered: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    println!("\n=== Raw bits ===");
    println!("  {rendered}");

    std::fs::remove_file(&path)?;
    Ok(())
}
