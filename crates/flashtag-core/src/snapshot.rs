//! Single-file snapshots of a sealed index.
//!
//! ## Snapshot Format
//!
//! ```text
//! [Magic: "FTAG" 4 bytes]
//! [Version: 1 byte]
//! [Tag count: 8 bytes]
//! [Entries, sorted by tag name:
//!     name_len: u32, name: UTF-8 bytes,
//!     bitmap_len: u64, bitmap: portable roaring format] × N
//! [CRC32: 4 bytes]
//! ```
//!
//! All integers are little-endian. The CRC covers every byte before it.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::bitmap::IdSet;
use crate::error::{Error, Result};
use crate::index::{TagIndex, TagMap};

/// Snapshot file magic bytes.
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"FTAG";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

const HEADER_SIZE: usize = 13; // magic(4) + version(1) + tag_count(8)
const CRC_SIZE: usize = 4;
// name_len(4) + at least one name byte + bitmap_len(8)
const MIN_ENTRY_SIZE: usize = 13;

/// Simple CRC32 implementation (IEEE 802.3 polynomial).
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn crc32_hash(data: &[u8]) -> u32 {
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

/// Encodes `index` into snapshot bytes.
///
/// # Errors
///
/// Returns an error if a tag name is longer than `u32::MAX` bytes.
pub fn encode(index: &TagIndex) -> Result<Vec<u8>> {
    let names = index.tag_names();
    let body: usize = names
        .iter()
        .map(|name| 12 + name.len() + index.get(name).map_or(0, IdSet::serialized_size))
        .sum();
    let mut buf = Vec::with_capacity(HEADER_SIZE + body + CRC_SIZE);

    buf.extend_from_slice(SNAPSHOT_MAGIC);
    buf.push(SNAPSHOT_VERSION);
    buf.extend_from_slice(&(names.len() as u64).to_le_bytes());

    for name in names {
        let Some(set) = index.get(name) else {
            continue;
        };
        let name_len = u32::try_from(name.len())
            .map_err(|_| Error::SnapshotCorrupted(format!("tag name too long: {} bytes", name.len())))?;
        buf.extend_from_slice(&name_len.to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&(set.serialized_size() as u64).to_le_bytes());
        set.serialize_into(&mut buf)?;
    }

    let crc = crc32_hash(&buf);
    buf.extend_from_slice(&crc.to_le_bytes());
    Ok(buf)
}

/// Decodes snapshot bytes produced by [`encode`].
///
/// # Errors
///
/// Returns [`Error::SnapshotCorrupted`] if the bytes fail any structural
/// check and [`Error::UnsupportedVersion`] for an unknown format version.
pub fn decode(data: &[u8]) -> Result<TagIndex> {
    if data.len() < HEADER_SIZE + CRC_SIZE {
        return Err(corrupted("snapshot too small"));
    }
    if &data[0..4] != SNAPSHOT_MAGIC {
        return Err(corrupted("invalid magic"));
    }
    if data[4] != SNAPSHOT_VERSION {
        return Err(Error::UnsupportedVersion {
            expected: SNAPSHOT_VERSION,
            found: data[4],
        });
    }

    let (payload, crc_bytes) = data.split_at(data.len() - CRC_SIZE);
    let stored_crc = u32::from_le_bytes(
        crc_bytes
            .try_into()
            .map_err(|_| corrupted("invalid CRC"))?,
    );
    if stored_crc != crc32_hash(payload) {
        return Err(corrupted("CRC mismatch"));
    }

    let mut cursor = Cursor::new(&payload[5..]);
    let tag_count = cursor.read_u64()?;
    // Reject counts the remaining bytes cannot possibly hold before allocating.
    let max_possible = (cursor.remaining() / MIN_ENTRY_SIZE) as u64;
    if tag_count > max_possible {
        return Err(corrupted("tag count exceeds data size"));
    }

    let mut tags = TagMap::default();
    tags.reserve(tag_count as usize);
    for _ in 0..tag_count {
        let name_len = cursor.read_u32()? as usize;
        if name_len == 0 {
            return Err(corrupted("empty tag name"));
        }
        let name = std::str::from_utf8(cursor.take(name_len)?)
            .map_err(|_| corrupted("tag name is not valid UTF-8"))?
            .to_owned();

        let bitmap_len = usize::try_from(cursor.read_u64()?)
            .map_err(|_| corrupted("bitmap length overflow"))?;
        let mut bytes = cursor.take(bitmap_len)?;
        let set = IdSet::deserialize_from(&mut bytes)
            .map_err(|e| corrupted(&format!("bitmap for tag '{name}': {e}")))?;
        if !bytes.is_empty() {
            return Err(corrupted(&format!("bitmap length mismatch for tag '{name}'")));
        }

        if tags.insert(name, set).is_some() {
            return Err(corrupted("duplicate tag name"));
        }
    }

    if cursor.remaining() != 0 {
        return Err(corrupted("trailing bytes after last entry"));
    }

    Ok(TagIndex::from_map(tags))
}

/// Writes `index` to `path` atomically (temp file + rename).
///
/// # Errors
///
/// Returns an error if encoding or any file operation fails.
pub fn save(index: &TagIndex, path: &Path) -> Result<()> {
    let start = Instant::now();
    let buf = encode(index)?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);
    std::fs::write(&temp_path, &buf)?;
    std::fs::rename(&temp_path, path)?;

    info!(
        path = %path.display(),
        tags = index.tag_count(),
        bytes = buf.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Saved snapshot"
    );
    Ok(())
}

/// Loads a sealed index from a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn load(path: &Path) -> Result<TagIndex> {
    let start = Instant::now();
    let data = std::fs::read(path)?;
    let index = decode(&data)?;

    info!(
        path = %path.display(),
        tags = index.tag_count(),
        bytes = data.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded snapshot"
    );
    Ok(index)
}

fn corrupted(reason: &str) -> Error {
    Error::SnapshotCorrupted(reason.to_string())
}

/// Bounds-checked little-endian reader over a byte slice.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(corrupted("unexpected end of snapshot"));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(
            bytes.try_into().map_err(|_| corrupted("truncated u32"))?,
        ))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(
            bytes.try_into().map_err(|_| corrupted("truncated u64"))?,
        ))
    }
}
