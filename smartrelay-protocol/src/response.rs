//! Typed response payloads
//!
//! Most commands answer with a bare status byte; the handful that return
//! data decode into the types here. Decoders take the payload *after* the
//! status byte, with the length already validated by the caller.

use crate::wire::read_u16_le;

/// Relay state and initialization bitmasks
///
/// Bit `i` of each mask refers to relay `i`. The init mask says whether
/// the device has a stored state for that relay at all; an uninitialized
/// relay's state bit is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayState {
    /// Bit per relay: 1 = on
    pub state_mask: u8,
    /// Bit per relay: 1 = state initialized
    pub init_mask: u8,
}

impl RelayState {
    /// Decode from the two payload bytes of a RELAY_GET_STATE response
    pub fn from_payload(payload: &[u8]) -> Self {
        Self {
            state_mask: payload[0],
            init_mask: payload[1],
        }
    }

    /// Whether the given relay is on
    pub fn is_on(&self, relay: u8) -> bool {
        self.state_mask & (1 << relay) != 0
    }

    /// Whether the device holds an initialized state for the given relay
    pub fn is_initialized(&self, relay: u8) -> bool {
        self.init_mask & (1 << relay) != 0
    }
}

/// Device identification from a DEVICE_INFO response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Vendor identifier
    pub vendor_id: u16,
    /// Product identifier
    pub product_id: u16,
    /// Hardware revision
    pub revision: u8,
    /// Firmware version
    pub firmware_version: u16,
}

impl DeviceInfo {
    /// Decode from the seven payload bytes of a DEVICE_INFO response
    ///
    /// Layout: vendor (u16 LE), product (u16 LE), revision (u8),
    /// firmware version (u16 LE).
    pub fn from_payload(payload: &[u8]) -> Self {
        Self {
            vendor_id: read_u16_le(&payload[0..2]),
            product_id: read_u16_le(&payload[2..4]),
            revision: payload[4],
            firmware_version: read_u16_le(&payload[5..7]),
        }
    }
}
