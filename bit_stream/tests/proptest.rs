//! Property-based tests for BitStream over the different channel kinds.

use std::io::Cursor;

use bit_stream::bit_ops::{FieldLayout, set_bits};
use bit_stream::{BitStream, SeekOrigin};
use byte_channel::{FileChannel, ForwardReader, ForwardWriter, MemoryChannel};
use proptest::prelude::*;
use tempfile::NamedTempFile;

//
// -----------------------------------------------------------------------------
// Helper Functions
// -----------------------------------------------------------------------------

fn field_strategy() -> impl Strategy<Value = (u64, u32, bool)> {
    (any::<u64>(), 1u32..=64, any::<bool>())
}

fn mask(bits: u32) -> u64 {
    if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

//
// -----------------------------------------------------------------------------
// Round trips
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_bits_roundtrip_seekable(
        start in 0u64..64,
        bits in prop::collection::vec(any::<bool>(), 1..300)
    ) {
        let mut stream = BitStream::attach(MemoryChannel::new()).unwrap();
        stream.set_bit_position(start).unwrap();
        stream.write_bits_from(&bits).unwrap();

        stream.seek(start as i64, SeekOrigin::Begin).unwrap();
        let back = stream.read_bits_into(bits.len()).unwrap();
        prop_assert_eq!(back, bits);
    }
}

proptest! {
    #[test]
    fn prop_bits_roundtrip_forward_only(bits in prop::collection::vec(any::<bool>(), 1..300)) {
        let mut writer = BitStream::attach(ForwardWriter::new(Vec::new())).unwrap();
        writer.write_bits_from(&bits).unwrap();
        writer.flush().unwrap();
        let bytes = writer.into_inner().unwrap().into_inner();
        prop_assert_eq!(bytes.len(), bits.len().div_ceil(8));

        let mut reader = BitStream::attach(ForwardReader::new(Cursor::new(bytes))).unwrap();
        let back = reader.read_bits_into(bits.len()).unwrap();
        prop_assert_eq!(back, bits);
    }
}

proptest! {
    #[test]
    fn prop_bits_roundtrip_file(
        start in 0u64..40,
        bits in prop::collection::vec(any::<bool>(), 1..200)
    ) {
        let tmp = NamedTempFile::new().unwrap();
        let mut stream = BitStream::attach(FileChannel::create(tmp.path()).unwrap()).unwrap();
        stream.set_bit_position(start).unwrap();
        stream.write_bits_from(&bits).unwrap();
        stream.flush().unwrap();
        drop(stream);

        let mut stream = BitStream::attach(FileChannel::open_read(tmp.path()).unwrap()).unwrap();
        stream.set_bit_position(start).unwrap();
        let back = stream.read_bits_into(bits.len()).unwrap();
        prop_assert_eq!(back, bits);
    }
}

//
// -----------------------------------------------------------------------------
// Read-modify-write
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_single_bit_write_preserves_neighbours(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        index in any::<prop::sample::Index>(),
        bit in any::<bool>()
    ) {
        let total_bits = bytes.len() * 8;
        let pos = index.index(total_bits);

        let mut stream = BitStream::attach(MemoryChannel::from_vec(bytes.clone())).unwrap();
        stream.set_bit_position(pos as u64).unwrap();
        stream.write_bit(bit).unwrap();
        stream.flush().unwrap();

        let mut expected = bytes;
        let m = 0x80u8 >> (pos % 8);
        if bit { expected[pos / 8] |= m } else { expected[pos / 8] &= !m }

        let channel = stream.into_inner().unwrap();
        prop_assert_eq!(channel.as_slice(), expected.as_slice());
    }
}

//
// -----------------------------------------------------------------------------
// Integer fields
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_field_identity((value, bits, lsb_first) in field_strategy(), lead in 0u64..8) {
        let mut stream = BitStream::allocate(128).unwrap();
        stream.set_bit_position(lead).unwrap();
        stream.write_field(value, bits, lsb_first).unwrap();
        stream.set_bit_position(lead).unwrap();
        prop_assert_eq!(stream.read_field::<u64>(bits, lsb_first).unwrap(), value & mask(bits));
    }
}

proptest! {
    #[test]
    fn prop_fields_match_slice_layout(fields in prop::collection::vec(field_strategy(), 1..24)) {
        let total: u32 = fields.iter().map(|f| f.1).sum();
        let mut reference = vec![0u8; (total as usize).div_ceil(8)];

        let mut stream = BitStream::allocate(total as u64).unwrap();
        let mut offset = 0usize;
        for &(value, bits, lsb_first) in &fields {
            stream.write_field(value, bits, lsb_first).unwrap();
            set_bits(&mut reference, offset, FieldLayout::new(bits, 64, lsb_first).unwrap(), value);
            offset += bits as usize;
        }
        stream.flush().unwrap();

        let channel = stream.into_inner().unwrap();
        prop_assert_eq!(channel.as_slice(), reference.as_slice());
    }
}

proptest! {
    #[test]
    fn prop_u16_fields_roundtrip(values in prop::collection::vec((any::<u16>(), 1u32..=20, any::<bool>()), 1..50)) {
        let mut stream = BitStream::allocate(1024).unwrap();
        for &(v, bits, lsb) in &values {
            stream.write_field(v, bits, lsb).unwrap();
        }
        stream.set_bit_position(0).unwrap();
        for &(v, bits, lsb) in &values {
            let expected = (v as u64 & mask(bits.min(16))) as u16;
            prop_assert_eq!(stream.read_field::<u16>(bits, lsb).unwrap(), expected);
        }
    }
}
