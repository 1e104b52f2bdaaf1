//! State log entry format
//!
//! ```text
//! +------------------+
//! | Entry Length     | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Key              | (length-prefixed UTF-8)
//! +------------------+
//! | Value            | (length-prefixed bytes)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over length + body)
//! +------------------+
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StateError, StateResult};

/// length + key length + value length + checksum
pub(crate) const MIN_ENTRY_SIZE: usize = 4 + 4 + 4 + 4;

/// One persisted key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl LogEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + self.key.len() + self.value.len());

        buf.extend_from_slice(&(self.key.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.key.as_bytes());

        buf.extend_from_slice(&(self.value.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.value);

        buf
    }

    /// Serialize the complete entry to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let entry_length = (4 + body.len() + 4) as u32;

        let mut entry = Vec::with_capacity(entry_length as usize);
        entry.extend_from_slice(&entry_length.to_le_bytes());
        entry.extend_from_slice(&body);

        let checksum = compute_checksum(&entry);
        entry.extend_from_slice(&checksum.to_le_bytes());

        entry
    }

    /// Deserialize an entry from bytes, verifying checksum.
    ///
    /// Returns the entry and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_ENTRY_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Entry too short",
            ));
        }

        let entry_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if entry_length < MIN_ENTRY_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid entry length: {}", entry_length),
            ));
        }

        if data.len() < entry_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Entry truncated: expected {} bytes, got {}",
                    entry_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = entry_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let covered = &data[0..checksum_offset];

        if !verify_checksum(covered, stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    compute_checksum(covered),
                    stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let key_bytes = read_bytes(&mut cursor)?;
        let key = String::from_utf8(key_bytes).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8 key: {}", e))
        })?;
        let value = read_bytes(&mut cursor)?;

        if cursor.position() as usize != checksum_offset - 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Trailing bytes inside entry",
            ));
        }

        Ok((Self { key, value }, entry_length))
    }
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Sequential reader over a state log.
///
/// Validates every entry. Any corruption is fatal.
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log for reading.
    pub fn open(path: &Path) -> StateResult<Self> {
        let file = File::open(path).map_err(|e| {
            StateError::read_failed_io(format!("Failed to open state log: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StateError::read_failed_io("Failed to read state log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Reads the next entry.
    ///
    /// - `Ok(Some(entry))` if an entry was read
    /// - `Ok(None)` at end of file
    /// - `Err(INFO_DATA_CORRUPTION)` on truncation or checksum failure
    pub fn read_next(&mut self) -> StateResult<Option<LogEntry>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_ENTRY_SIZE as u64 {
            return Err(StateError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated state log: {} bytes remaining, minimum entry size is {}",
                    remaining, MIN_ENTRY_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StateError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read entry length: {}", e),
            )
        })?;
        let entry_length = u32::from_le_bytes(len_buf) as u64;

        if entry_length < MIN_ENTRY_SIZE as u64 {
            return Err(StateError::corruption_at_offset(
                self.current_offset,
                format!("Invalid entry length: {}", entry_length),
            ));
        }

        if entry_length > remaining {
            return Err(StateError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Entry length {} exceeds remaining file size {}",
                    entry_length, remaining
                ),
            ));
        }

        let mut entry_buf = vec![0u8; entry_length as usize];
        entry_buf[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut entry_buf[4..]).map_err(|e| {
            StateError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read entry body: {}", e),
            )
        })?;

        let (entry, consumed) = LogEntry::deserialize(&entry_buf)
            .map_err(|e| StateError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;

        Ok(Some(entry))
    }
}
