//! Checksummed snapshot framing shared by every on-disk store.
//!
//! Frame layout:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Bincode-serialized value (variable length)
//! - SHA256 checksum over all of the above (32 bytes)

use crate::core::constants::SNAPSHOT_VERSION_MAGIC;
use crate::error::LedgerError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

fn checksum(version: &[u8], length: &[u8], data: &[u8]) -> impl AsRef<[u8]> {
    let mut hasher = Sha256::new();
    hasher.update(version);
    hasher.update(length);
    hasher.update(data);
    hasher.finalize()
}

pub(crate) fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    let data = bincode::serialize(value)?;
    let version = SNAPSHOT_VERSION_MAGIC.to_le_bytes();
    let length = (data.len() as u32).to_le_bytes();
    let sum = checksum(&version, &length, &data);

    let mut bytes = Vec::with_capacity(8 + 4 + data.len() + 32);
    bytes.extend_from_slice(&version);
    bytes.extend_from_slice(&length);
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(sum.as_ref());
    Ok(bytes)
}

/// Decodes one frame. `Ok(None)` when the magic or checksum does not match.
pub(crate) fn decode_frame<T: DeserializeOwned>(
    reader: &mut impl Read,
) -> Result<Option<T>, LedgerError> {
    let mut version_bytes = [0u8; 8];
    reader.read_exact(&mut version_bytes)?;
    if u64::from_le_bytes(version_bytes) != SNAPSHOT_VERSION_MAGIC {
        return Ok(None);
    }

    let mut length_bytes = [0u8; 4];
    reader.read_exact(&mut length_bytes)?;
    let mut data = vec![0u8; u32::from_le_bytes(length_bytes) as usize];
    reader.read_exact(&mut data)?;

    let mut stored_checksum = [0u8; 32];
    reader.read_exact(&mut stored_checksum)?;
    if stored_checksum.as_slice() != checksum(&version_bytes, &length_bytes, &data).as_ref() {
        return Ok(None);
    }

    Ok(Some(bincode::deserialize(&data)?))
}

/// Reads a frame from `path`. The outer `None` means the file does not exist.
pub(crate) fn read_frame<T: DeserializeOwned>(
    path: &Path,
) -> Result<Option<Option<T>>, LedgerError> {
    match fs::File::open(path) {
        Ok(mut file) => decode_frame(&mut file).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes a frame to a sibling temp file, then renames it over `path`.
pub(crate) fn write_frame<T: Serialize>(path: &Path, value: &T) -> Result<(), LedgerError> {
    let bytes = encode_frame(value)?;
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
