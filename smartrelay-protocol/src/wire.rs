//! Little-endian integer decoding
//!
//! All multi-byte fields on the wire are little-endian. These helpers are
//! the single place that reconstruction happens, so the per-command layout
//! tables stay free of bit shifting.

/// Decode a little-endian u16 from the first two bytes
///
/// # Panics
/// Panics if `bytes` is shorter than 2 bytes. Callers are expected to have
/// validated the response length already.
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Decode a little-endian u32 from the first four bytes
///
/// # Panics
/// Panics if `bytes` is shorter than 4 bytes. Callers are expected to have
/// validated the response length already.
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
