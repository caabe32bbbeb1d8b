//! Fuzz target for the snapshot decoder.
//!
//! `decode` sizes allocations from tag counts and length prefixes found in
//! the input. A hostile file must produce an error, never a panic or an
//! oversized allocation.
//!
//! Raw inputs almost never survive the CRC check, so each input is also
//! decoded a second time wrapped in a valid header and trailer.

#![no_main]

use flashtag_core::snapshot::{decode, encode, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode(data);

    let mut framed = Vec::with_capacity(data.len() + 9);
    framed.extend_from_slice(SNAPSHOT_MAGIC);
    framed.push(SNAPSHOT_VERSION);
    framed.extend_from_slice(data);
    let crc = crc32_hash(&framed);
    framed.extend_from_slice(&crc.to_le_bytes());

    if let Ok(index) = decode(&framed) {
        // Anything accepted must re-encode to an equivalent index.
        let bytes = encode(&index).expect("re-encode accepted index");
        let again = decode(&bytes).expect("decode re-encoded index");
        assert_eq!(again.tag_names(), index.tag_names());
        for name in index.tag_names() {
            assert_eq!(again.get(name), index.get(name));
        }
    }
});

/// Simple CRC32 implementation (IEEE 802.3 polynomial).
#[allow(clippy::cast_possible_truncation)]
fn crc32_hash(data: &[u8]) -> u32 {
    const CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut j = 0;
            while j < 8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ 0xEDB8_8320;
                } else {
                    crc >>= 1;
                }
                j += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    };

    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let idx = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[idx];
    }
    !crc
}
