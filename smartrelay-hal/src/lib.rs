//! Smart Relay transport abstraction
//!
//! This crate defines the bus trait the Smart Relay protocol client is
//! generic over. Any byte-oriented I2C master that can write a buffer to a
//! 7-bit address and read a buffer back can drive the device, so the same
//! client code runs against a Linux `/dev/i2c-*` adapter, an MCU HAL, or a
//! canned bus in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / console                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  smartrelay-driver (protocol client)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  smartrelay-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ platform bus  │
//! │   adapter     │       │ (smbus, ...)  │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key items at crate root for convenience
pub use i2c::I2cBus;

#[cfg(feature = "embedded-hal")]
pub use i2c::EmbeddedHalBus;
