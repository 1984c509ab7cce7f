//! Driver error taxonomy
//!
//! The caller can always tell "device said no" from "link broke" from
//! "bad input": bus faults are propagated untouched, a nonzero status
//! byte carries the device's reason, and client-side precondition
//! failures never reach the bus at all.

use smartrelay_protocol::Status;

/// Errors returned by the Smart Relay client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Underlying bus failure (NACK, arbitration loss, timeout)
    Bus(E),
    /// The device refused or failed the operation
    ///
    /// The response payload is discarded; it carries no meaning when the
    /// status is not OK.
    Rejected(Status),
    /// The bus returned fewer bytes than the command's fixed response
    /// length
    ///
    /// Indicates a protocol or firmware mismatch. The partial bytes are
    /// never interpreted or zero-filled.
    ShortResponse {
        /// Bytes the command's response is defined to have
        expected: u8,
        /// Bytes actually read
        got: u8,
    },
    /// A client-side precondition failed; nothing was sent on the bus
    InvalidArgument,
}
