//! CRC32 (IEEE) over a log entry's length prefix and body

/// Checksum stored in the last four bytes of every entry
pub fn compute_checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// True if `data` hashes to `expected`
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
