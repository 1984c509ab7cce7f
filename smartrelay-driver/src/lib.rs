//! Smart Relay protocol client
//!
//! Host-side driver for the Smart Relay I2C peripheral: relay switching,
//! watchdog reset, power cycling, relay-state persistence and device
//! introspection.
//!
//! Every operation is one synchronous request/response exchange: the
//! client encodes a command, writes it to the device address, reads back
//! the command's fixed-length response and decodes it. There is no
//! buffering, retrying or request interleaving; the protocol has no
//! request identifiers, so a [`SmartRelay`] must not be shared between
//! threads without external serialization.
//!
//! The client is generic over [`smartrelay_hal::I2cBus`], so it runs
//! unchanged against a Linux I2C adapter (via the `embedded-hal` feature
//! and `linux-embedded-hal`), an MCU HAL, or a canned bus in tests.

#![no_std]
#![deny(unsafe_code)]

mod error;
mod relay;

pub use error::Error;
pub use relay::{SmartRelay, DEFAULT_ADDRESS};

// Re-export the decoded types callers interact with
pub use smartrelay_protocol::{DeviceInfo, RelayState, Status};
