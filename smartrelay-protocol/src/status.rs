//! Response status codes
//!
//! The first byte of every response is a status. `0x00` is success; the
//! remaining payload bytes are meaningful only then. The firmware reports
//! a handful of known failure codes, and unknown values are carried
//! through so newer firmware can add codes without breaking the client.

/// Status byte of a device response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Operation succeeded
    Ok,
    /// Generic on-device failure
    Error,
    /// Opcode not recognized by the firmware
    BadCommand,
    /// Request payload rejected (e.g. relay id out of range)
    BadParam,
    /// Device busy with a previous operation
    Busy,
    /// Status code this client does not know about
    Other(u8),
}

impl Status {
    /// Decode a status byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Status::Ok,
            0x01 => Status::Error,
            0x02 => Status::BadCommand,
            0x03 => Status::BadParam,
            0x04 => Status::Busy,
            other => Status::Other(other),
        }
    }

    /// Whether this status indicates success
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }
}
