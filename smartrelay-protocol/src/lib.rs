//! Smart Relay I2C wire protocol
//!
//! This crate defines the command-ID byte protocol spoken by the Smart
//! Relay peripheral. Every exchange is a single write followed by a single
//! read against the device address:
//!
//! ```text
//! request               response
//! ┌────────┬─────────┐  ┌────────┬─────────┐
//! │ OPCODE │ PAYLOAD │  │ STATUS │ PAYLOAD │
//! │ 1B     │ 0–3B    │  │ 1B     │ 0–7B    │
//! └────────┴─────────┘  └────────┴─────────┘
//! ```
//!
//! The response length is fixed per command and known before the read.
//! All multi-byte integers on the wire are little-endian. A status byte of
//! `0x00` means the operation succeeded; any other value is a device-side
//! rejection and the response payload carries no meaning.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod response;
pub mod status;
pub mod wire;

pub use command::{Command, MAX_REQUEST_LEN, MAX_RESPONSE_LEN};
pub use response::{DeviceInfo, RelayState};
pub use status::Status;
