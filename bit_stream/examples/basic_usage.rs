use bit_stream::{BitStream, BitStreamError, SeekOrigin};
use byte_channel::{ForwardReader, ForwardWriter, MemoryChannel};
use std::io::Cursor;

fn main() {
    println!("=== Bit Stream Examples ===\n");

    // Example 1: Packing palette indices
    let _ = example_palette();

    // Example 2: Flipping one bit in existing data
    let _ = example_patch_in_place();

    // Example 3: Streaming through forward-only channels
    let _ = example_forward_only();
}

fn example_palette() -> Result<(), BitStreamError> {
    println!("Example 1: Storing palette indices (5 bits each)");

    let mut colors = BitStream::allocate(64)?;
    for index in [15u8, 8, 23] {
        colors.write_field(index, 5, false)?;
    }
    colors.flush()?;

    println!("  Bits used: {}", colors.bit_position());
    println!("  Bytes:     {:?}", colors.channel().map(|c| c.as_slice()));

    colors.set_bit_position(0)?;
    for i in 0..3 {
        println!("  Color {i}: {}", colors.read_field::<u8>(5, false)?);
    }
    println!();

    Ok(())
}

fn example_patch_in_place() -> Result<(), BitStreamError> {
    println!("Example 2: Setting bit 3 of existing data");

    let mut stream = BitStream::attach(MemoryChannel::from_vec(vec![0b1000_0001, 0xFF]))?;
    println!("  Before: {}", stream.to_bit_string()?);

    stream.seek(3, SeekOrigin::Begin)?;
    stream.write_bit(true)?;
    stream.flush()?;
    println!("  After:  {}", stream.to_bit_string()?);
    println!();

    Ok(())
}

fn example_forward_only() -> Result<(), BitStreamError> {
    println!("Example 3: Writing to a forward-only sink");

    let mut writer = BitStream::attach(ForwardWriter::new(Vec::new()))?;
    writer.write_bit_str("101")?;
    writer.write_field(0x1FFu16, 9, true)?;
    writer.write_str("ok")?;
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map(|w| w.into_inner())
        .unwrap_or_default();
    println!("  Wrote {} bytes", bytes.len());

    let mut reader = BitStream::attach(ForwardReader::new(Cursor::new(bytes)))?;
    println!("  Flag bits: {}", reader.read_bit_string(3)?);
    println!("  Field:     {:#x}", reader.read_field::<u16>(9, true)?);
    println!("  Text:      {}", reader.read_str(2)?);

    Ok(())
}
