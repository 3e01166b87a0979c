use bitpack::prelude::*;
use bytemuck_derive::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Tile {
    kind: u8,
    flags: u8,
    height: u16,
}

fn main() -> Result<()> {
    println!("=== Bit Edits Over Pod Data ===\n");

    let tiles = [
        Tile { kind: 1, flags: 0b0000_0000, height: 100 },
        Tile { kind: 2, flags: 0b1000_0001, height: 250 },
    ];
    println!("Before: {tiles:?}");

    // Set flag bit 3 of the second tile in place
    let flags_bit = (std::mem::size_of::<Tile>() + 1) as u64 * 8 + 3;
    let mut stream = BitStream::attach(MemoryChannel::from_pod_slice(&tiles))?;
    stream.seek(flags_bit as i64, SeekOrigin::Begin)?;
    stream.write_bit(true)?;
    stream.flush()?;

    let bytes = stream.into_inner().map(|c| c.into_inner()).unwrap_or_default();
    let edited: Vec<Tile> = bytes
        .chunks_exact(std::mem::size_of::<Tile>())
        .map(bytemuck::pod_read_unaligned)
        .collect();
    println!("After:  {edited:?}");

    Ok(())
}
