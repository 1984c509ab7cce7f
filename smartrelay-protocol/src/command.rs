//! Command encoding for the Smart Relay protocol
//!
//! Each logical device capability maps to one opcode with a fixed request
//! payload schema (0-3 bytes) and a fixed response length. The command set
//! is closed and versioned; adding an opcode is an additive protocol
//! change.

use heapless::Vec;

/// Command opcodes
pub mod opcode {
    /// Switch a relay on
    pub const RELAY_ON: u8 = 0x01;
    /// Switch a relay off
    pub const RELAY_OFF: u8 = 0x02;
    /// Switch a relay on for a number of seconds
    pub const RELAY_ON_FOR: u8 = 0x03;
    /// Switch a relay off for a number of seconds
    pub const RELAY_OFF_FOR: u8 = 0x04;
    /// Arm the watchdog on a relay
    pub const WATCHDOG_ENABLE: u8 = 0x05;
    /// Disarm the watchdog
    pub const WATCHDOG_DISABLE: u8 = 0x06;
    /// Feed the watchdog
    pub const WATCHDOG_PING: u8 = 0x07;
    /// Set the ping timeout in seconds
    pub const WATCHDOG_SET_PING_TIMEOUT: u8 = 0x08;
    /// Set the reset pulse duration in seconds
    pub const WATCHDOG_SET_RESET_DURATION: u8 = 0x09;
    /// Read the watchdog trip counter
    pub const WATCHDOG_GET_TRIP_COUNT: u8 = 0x0A;
    /// Clear the watchdog trip counter
    pub const WATCHDOG_CLEAR_TRIP_COUNT: u8 = 0x0B;
    /// Erase the device EEPROM
    pub const EEPROM_CLEAR: u8 = 0x0C;
    /// Enable power cycling on a relay
    pub const POWER_CYCLE_ENABLE: u8 = 0x0D;
    /// Disable power cycling
    pub const POWER_CYCLE_DISABLE: u8 = 0x0E;
    /// Set the maximum on time in seconds
    pub const POWER_CYCLE_SET_MAX_ON_TIME: u8 = 0x0F;
    /// Sleep (power off) for a number of seconds
    pub const POWER_CYCLE_SLEEP: u8 = 0x10;
    /// Persist relay state across device resets
    pub const RELAY_STATE_PERSIST_ENABLE: u8 = 0x11;
    /// Stop persisting relay state
    pub const RELAY_STATE_PERSIST_DISABLE: u8 = 0x12;
    /// Read the persistence setting
    pub const RELAY_STATE_PERSIST_GET: u8 = 0x13;
    /// Read the relay state and init bitmasks
    pub const RELAY_GET_STATE: u8 = 0x14;
    /// Change the device I2C address
    pub const I2C_SET_ADDRESS: u8 = 0x15;
    /// Read the EEPROM write counter
    pub const EEPROM_GET_WRITE_COUNT: u8 = 0x16;
    /// Set the reset line active level
    pub const WATCHDOG_SET_RESET_ACTIVE_STATE: u8 = 0x17;
    /// Read the reset line active level
    pub const WATCHDOG_GET_RESET_ACTIVE_STATE: u8 = 0x18;
    /// Read the EEPROM wear-leveling shift counter
    pub const EEPROM_GET_SHIFT_COUNT: u8 = 0x19;
    /// Read the firmware version
    pub const FIRMWARE_GET_VERSION: u8 = 0x1A;
    /// Read the EEPROM layout version
    pub const EEPROM_GET_VERSION: u8 = 0x1B;
    /// Read vendor/product identification
    pub const DEVICE_INFO: u8 = 0x1C;
}

/// Maximum request size in bytes (opcode + 3 payload bytes)
pub const MAX_REQUEST_LEN: usize = 4;

/// Maximum response size in bytes (status + 7 payload bytes)
pub const MAX_RESPONSE_LEN: usize = 8;

/// A command to the Smart Relay device
///
/// Relay ids address one of up to 8 relays (0-7). The client does not
/// range-check them; an out-of-range id is refused by the device with a
/// bad-parameter status. All durations are in seconds and truncate to 16
/// bits on the wire by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Switch a relay on
    RelayOn { relay: u8 },
    /// Switch a relay off
    RelayOff { relay: u8 },
    /// Switch a relay on, reverting after `seconds`
    RelayOnFor { relay: u8, seconds: u16 },
    /// Switch a relay off, reverting after `seconds`
    RelayOffFor { relay: u8, seconds: u16 },
    /// Arm the watchdog, pulsing `relay` when it trips
    WatchdogEnable { relay: u8 },
    /// Disarm the watchdog
    WatchdogDisable,
    /// Feed the watchdog
    WatchdogPing,
    /// Set how long the device waits for a ping before tripping
    WatchdogSetPingTimeout { seconds: u16 },
    /// Set how long the reset pulse holds the relay
    WatchdogSetResetDuration { seconds: u16 },
    /// Read the trip counter
    WatchdogGetTripCount,
    /// Clear the trip counter
    WatchdogClearTripCount,
    /// Erase the device EEPROM
    EepromClear,
    /// Enable power cycling on `relay`, optionally sleeping between cycles
    ///
    /// The sleep flag byte goes on the wire only when it is set; with the
    /// flag clear the request is just the relay id. The device treats the
    /// missing byte as "no sleep", so both encodings are canonical.
    PowerCycleEnable { relay: u8, sleep: bool },
    /// Disable power cycling
    PowerCycleDisable,
    /// Set the maximum on time before a forced cycle
    PowerCycleSetMaxOnTime { seconds: u16 },
    /// Power off for `seconds`, then back on
    PowerCycleSleep { seconds: u16 },
    /// Persist relay state across device resets
    RelayStatePersistEnable,
    /// Stop persisting relay state
    RelayStatePersistDisable,
    /// Read the persistence setting
    RelayStatePersistGet,
    /// Read the relay state and init bitmasks
    RelayGetState,
    /// Change the device I2C address (takes effect after device reset)
    I2cSetAddress { address: u8 },
    /// Read the EEPROM write counter
    EepromGetWriteCount,
    /// Set the reset line active level (0 or 1)
    WatchdogSetResetActiveState { active: u8 },
    /// Read the reset line active level
    WatchdogGetResetActiveState,
    /// Read the EEPROM wear-leveling shift counter
    EepromGetShiftCount,
    /// Read the firmware version
    FirmwareGetVersion,
    /// Read the EEPROM layout version
    EepromGetVersion,
    /// Read vendor/product identification
    DeviceInfo,
}

impl Command {
    /// The opcode byte for this command
    pub fn opcode(&self) -> u8 {
        match self {
            Command::RelayOn { .. } => opcode::RELAY_ON,
            Command::RelayOff { .. } => opcode::RELAY_OFF,
            Command::RelayOnFor { .. } => opcode::RELAY_ON_FOR,
            Command::RelayOffFor { .. } => opcode::RELAY_OFF_FOR,
            Command::WatchdogEnable { .. } => opcode::WATCHDOG_ENABLE,
            Command::WatchdogDisable => opcode::WATCHDOG_DISABLE,
            Command::WatchdogPing => opcode::WATCHDOG_PING,
            Command::WatchdogSetPingTimeout { .. } => opcode::WATCHDOG_SET_PING_TIMEOUT,
            Command::WatchdogSetResetDuration { .. } => opcode::WATCHDOG_SET_RESET_DURATION,
            Command::WatchdogGetTripCount => opcode::WATCHDOG_GET_TRIP_COUNT,
            Command::WatchdogClearTripCount => opcode::WATCHDOG_CLEAR_TRIP_COUNT,
            Command::EepromClear => opcode::EEPROM_CLEAR,
            Command::PowerCycleEnable { .. } => opcode::POWER_CYCLE_ENABLE,
            Command::PowerCycleDisable => opcode::POWER_CYCLE_DISABLE,
            Command::PowerCycleSetMaxOnTime { .. } => opcode::POWER_CYCLE_SET_MAX_ON_TIME,
            Command::PowerCycleSleep { .. } => opcode::POWER_CYCLE_SLEEP,
            Command::RelayStatePersistEnable => opcode::RELAY_STATE_PERSIST_ENABLE,
            Command::RelayStatePersistDisable => opcode::RELAY_STATE_PERSIST_DISABLE,
            Command::RelayStatePersistGet => opcode::RELAY_STATE_PERSIST_GET,
            Command::RelayGetState => opcode::RELAY_GET_STATE,
            Command::I2cSetAddress { .. } => opcode::I2C_SET_ADDRESS,
            Command::EepromGetWriteCount => opcode::EEPROM_GET_WRITE_COUNT,
            Command::WatchdogSetResetActiveState { .. } => {
                opcode::WATCHDOG_SET_RESET_ACTIVE_STATE
            }
            Command::WatchdogGetResetActiveState => opcode::WATCHDOG_GET_RESET_ACTIVE_STATE,
            Command::EepromGetShiftCount => opcode::EEPROM_GET_SHIFT_COUNT,
            Command::FirmwareGetVersion => opcode::FIRMWARE_GET_VERSION,
            Command::EepromGetVersion => opcode::EEPROM_GET_VERSION,
            Command::DeviceInfo => opcode::DEVICE_INFO,
        }
    }

    /// Total request length in bytes, opcode included
    pub fn request_len(&self) -> usize {
        match self {
            Command::RelayOnFor { .. } | Command::RelayOffFor { .. } => 4,
            Command::WatchdogSetPingTimeout { .. }
            | Command::WatchdogSetResetDuration { .. }
            | Command::PowerCycleSetMaxOnTime { .. }
            | Command::PowerCycleSleep { .. } => 3,
            Command::PowerCycleEnable { sleep, .. } => {
                if *sleep {
                    3
                } else {
                    2
                }
            }
            Command::RelayOn { .. }
            | Command::RelayOff { .. }
            | Command::WatchdogEnable { .. }
            | Command::I2cSetAddress { .. }
            | Command::WatchdogSetResetActiveState { .. } => 2,
            _ => 1,
        }
    }

    /// Total response length in bytes, status byte included
    ///
    /// Fixed per command, so the reader knows how many bytes to fetch
    /// before the transaction starts.
    pub fn response_len(&self) -> usize {
        match self {
            Command::WatchdogGetTripCount | Command::EepromGetWriteCount => 5,
            Command::RelayStatePersistGet
            | Command::WatchdogGetResetActiveState
            | Command::EepromGetShiftCount
            | Command::EepromGetVersion => 2,
            Command::RelayGetState | Command::FirmwareGetVersion => 3,
            Command::DeviceInfo => 8,
            _ => 1,
        }
    }

    /// Encode this command as request bytes
    pub fn encode(&self) -> Vec<u8, MAX_REQUEST_LEN> {
        let mut buf = Vec::new();
        // Pushes cannot fail: the longest request is opcode + 3 payload
        // bytes and MAX_REQUEST_LEN covers it.
        let _ = buf.push(self.opcode());
        match *self {
            Command::RelayOn { relay }
            | Command::RelayOff { relay }
            | Command::WatchdogEnable { relay } => {
                let _ = buf.push(relay);
            }
            Command::RelayOnFor { relay, seconds } | Command::RelayOffFor { relay, seconds } => {
                let _ = buf.push(relay);
                let _ = buf.extend_from_slice(&seconds.to_le_bytes());
            }
            Command::WatchdogSetPingTimeout { seconds }
            | Command::WatchdogSetResetDuration { seconds }
            | Command::PowerCycleSetMaxOnTime { seconds }
            | Command::PowerCycleSleep { seconds } => {
                let _ = buf.extend_from_slice(&seconds.to_le_bytes());
            }
            Command::PowerCycleEnable { relay, sleep } => {
                let _ = buf.push(relay);
                // Quirk of the device protocol: the flag byte is present
                // only when set. Firmware reads a 1-byte request as
                // "enable without sleep".
                if sleep {
                    let _ = buf.push(1);
                }
            }
            Command::I2cSetAddress { address } => {
                let _ = buf.push(address);
            }
            Command::WatchdogSetResetActiveState { active } => {
                let _ = buf.push(active);
            }
            _ => {}
        }
        buf
    }
}
