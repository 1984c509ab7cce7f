//! The Smart Relay protocol client
//!
//! One method per device capability. Every call performs exactly one bus
//! write followed by one bus read of the command's fixed response length,
//! then decodes the response or surfaces a typed failure.

use smartrelay_hal::I2cBus;
use smartrelay_protocol::{wire, Command, DeviceInfo, RelayState, Status};

use crate::error::Error;

/// Factory-default I2C address of the Smart Relay device
pub const DEFAULT_ADDRESS: u8 = 0x2A;

/// Client for one Smart Relay device
///
/// Holds only the bus handle and the target address; all relay, watchdog
/// and persistence state lives on the device. The stored address never
/// changes, including across [`SmartRelay::i2c_set_address`] - the new
/// address applies after a device reset and reconnecting is the caller's
/// job.
pub struct SmartRelay<BUS> {
    bus: BUS,
    address: u8,
}

impl<BUS> SmartRelay<BUS> {
    /// Create a client talking to the factory-default address
    pub fn new(bus: BUS) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    /// Create a client talking to a specific address
    pub fn with_address(bus: BUS, address: u8) -> Self {
        Self { bus, address }
    }

    /// The device address this client targets
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the client and recover the bus
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS: I2cBus> SmartRelay<BUS> {
    /// Perform one request/response exchange
    ///
    /// `response` must be sized to the command's fixed response length.
    /// On success the buffer holds the full response with the status byte
    /// verified OK.
    fn transfer(
        &mut self,
        command: Command,
        response: &mut [u8],
    ) -> Result<(), Error<BUS::Error>> {
        debug_assert_eq!(response.len(), command.response_len());

        let request = command.encode();
        self.bus.write(self.address, &request).map_err(Error::Bus)?;

        let got = self.bus.read(self.address, response).map_err(Error::Bus)?;
        if got < response.len() {
            return Err(Error::ShortResponse {
                expected: response.len() as u8,
                got: got as u8,
            });
        }

        let status = Status::from_byte(response[0]);
        if !status.is_ok() {
            return Err(Error::Rejected(status));
        }
        Ok(())
    }

    /// Exchange for commands whose response is a bare status byte
    fn execute(&mut self, command: Command) -> Result<(), Error<BUS::Error>> {
        let mut response = [0u8; 1];
        self.transfer(command, &mut response)
    }

    /// Switch a relay on
    ///
    /// Relay ids are not range-checked here; the device refuses unknown
    /// ids with a bad-parameter status.
    pub fn relay_on(&mut self, relay: u8) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayOn { relay })
    }

    /// Switch a relay off
    pub fn relay_off(&mut self, relay: u8) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayOff { relay })
    }

    /// Switch a relay on, reverting after `seconds`
    pub fn relay_on_for(&mut self, relay: u8, seconds: u16) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayOnFor { relay, seconds })
    }

    /// Switch a relay off, reverting after `seconds`
    pub fn relay_off_for(&mut self, relay: u8, seconds: u16) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayOffFor { relay, seconds })
    }

    /// Arm the watchdog, pulsing `relay` when it trips
    pub fn watchdog_enable(&mut self, relay: u8) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogEnable { relay })
    }

    /// Disarm the watchdog
    pub fn watchdog_disable(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogDisable)
    }

    /// Feed the watchdog
    pub fn watchdog_ping(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogPing)
    }

    /// Set how long the device waits for a ping before tripping
    pub fn watchdog_set_ping_timeout(&mut self, seconds: u16) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogSetPingTimeout { seconds })
    }

    /// Set how long a watchdog reset pulse holds the relay
    pub fn watchdog_set_reset_duration(
        &mut self,
        seconds: u16,
    ) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogSetResetDuration { seconds })
    }

    /// Set the reset line active level
    ///
    /// `active` must be 0 or 1; anything else fails with
    /// [`Error::InvalidArgument`] before touching the bus.
    pub fn watchdog_set_reset_active_state(
        &mut self,
        active: u8,
    ) -> Result<(), Error<BUS::Error>> {
        if active > 1 {
            return Err(Error::InvalidArgument);
        }
        self.execute(Command::WatchdogSetResetActiveState { active })
    }

    /// Read the reset line active level (0 or 1)
    pub fn watchdog_get_reset_active_state(&mut self) -> Result<u8, Error<BUS::Error>> {
        let mut response = [0u8; 2];
        self.transfer(Command::WatchdogGetResetActiveState, &mut response)?;
        Ok(u8::from(response[1] != 0))
    }

    /// Read how many times the watchdog has tripped
    pub fn watchdog_get_trip_count(&mut self) -> Result<u32, Error<BUS::Error>> {
        let mut response = [0u8; 5];
        self.transfer(Command::WatchdogGetTripCount, &mut response)?;
        Ok(wire::read_u32_le(&response[1..5]))
    }

    /// Clear the watchdog trip counter
    pub fn watchdog_clear_trip_count(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::WatchdogClearTripCount)
    }

    /// Erase the device EEPROM
    pub fn eeprom_clear(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::EepromClear)
    }

    /// Enable power cycling on `relay`
    ///
    /// With `sleep_enable` the device powers itself down between cycles.
    pub fn power_cycle_enable(
        &mut self,
        relay: u8,
        sleep_enable: bool,
    ) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::PowerCycleEnable {
            relay,
            sleep: sleep_enable,
        })
    }

    /// Disable power cycling
    pub fn power_cycle_disable(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::PowerCycleDisable)
    }

    /// Set the maximum on time before a forced power cycle
    pub fn power_cycle_set_max_on_time(
        &mut self,
        seconds: u16,
    ) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::PowerCycleSetMaxOnTime { seconds })
    }

    /// Power off for `seconds`, then back on
    pub fn power_cycle_sleep(&mut self, seconds: u16) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::PowerCycleSleep { seconds })
    }

    /// Persist relay state across device resets
    pub fn relay_state_persist_enable(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayStatePersistEnable)
    }

    /// Stop persisting relay state
    pub fn relay_state_persist_disable(&mut self) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::RelayStatePersistDisable)
    }

    /// Read whether relay state persistence is enabled
    pub fn relay_state_persist_get(&mut self) -> Result<bool, Error<BUS::Error>> {
        let mut response = [0u8; 2];
        self.transfer(Command::RelayStatePersistGet, &mut response)?;
        Ok(response[1] != 0)
    }

    /// Read the relay state and init bitmasks
    pub fn relay_get_state(&mut self) -> Result<RelayState, Error<BUS::Error>> {
        let mut response = [0u8; 3];
        self.transfer(Command::RelayGetState, &mut response)?;
        Ok(RelayState::from_payload(&response[1..3]))
    }

    /// Change the device I2C address
    ///
    /// The new address takes effect after the device resets. This client
    /// keeps targeting the old address; construct a new client for the
    /// new one.
    pub fn i2c_set_address(&mut self, new_address: u8) -> Result<(), Error<BUS::Error>> {
        self.execute(Command::I2cSetAddress {
            address: new_address,
        })
    }

    /// Read how many EEPROM write cycles the device has performed
    pub fn eeprom_get_write_count(&mut self) -> Result<u32, Error<BUS::Error>> {
        let mut response = [0u8; 5];
        self.transfer(Command::EepromGetWriteCount, &mut response)?;
        Ok(wire::read_u32_le(&response[1..5]))
    }

    /// Read the EEPROM wear-leveling shift counter
    pub fn eeprom_get_shift_count(&mut self) -> Result<u8, Error<BUS::Error>> {
        let mut response = [0u8; 2];
        self.transfer(Command::EepromGetShiftCount, &mut response)?;
        Ok(response[1])
    }

    /// Read the firmware version
    pub fn firmware_get_version(&mut self) -> Result<u16, Error<BUS::Error>> {
        let mut response = [0u8; 3];
        self.transfer(Command::FirmwareGetVersion, &mut response)?;
        Ok(wire::read_u16_le(&response[1..3]))
    }

    /// Read the EEPROM layout version
    pub fn eeprom_get_version(&mut self) -> Result<u8, Error<BUS::Error>> {
        let mut response = [0u8; 2];
        self.transfer(Command::EepromGetVersion, &mut response)?;
        Ok(response[1])
    }

    /// Read vendor/product identification
    pub fn device_info(&mut self) -> Result<DeviceInfo, Error<BUS::Error>> {
        let mut response = [0u8; 8];
        self.transfer(Command::DeviceInfo, &mut response)?;
        Ok(DeviceInfo::from_payload(&response[1..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use smartrelay_protocol::MAX_RESPONSE_LEN;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum BusFault {
        Nack,
    }

    /// Canned bus: records every write, serves a fixed response to reads
    struct MockBus {
        written: Vec<u8, 64>,
        writes: usize,
        write_address: Option<u8>,
        response: Vec<u8, MAX_RESPONSE_LEN>,
        fail_write: bool,
        fail_read: bool,
    }

    impl MockBus {
        fn respond(bytes: &[u8]) -> Self {
            let mut response = Vec::new();
            response.extend_from_slice(bytes).unwrap();
            Self {
                written: Vec::new(),
                writes: 0,
                write_address: None,
                response,
                fail_write: false,
                fail_read: false,
            }
        }

        fn ok() -> Self {
            Self::respond(&[0x00])
        }

        fn failing() -> Self {
            let mut bus = Self::ok();
            bus.fail_write = true;
            bus
        }

        fn failing_on_read() -> Self {
            let mut bus = Self::ok();
            bus.fail_read = true;
            bus
        }
    }

    impl I2cBus for MockBus {
        type Error = BusFault;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusFault> {
            if self.fail_write {
                return Err(BusFault::Nack);
            }
            self.write_address = Some(address);
            self.writes += 1;
            self.written.extend_from_slice(data).unwrap();
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<usize, BusFault> {
            if self.fail_read {
                return Err(BusFault::Nack);
            }
            let n = self.response.len().min(buf.len());
            buf[..n].copy_from_slice(&self.response[..n]);
            Ok(n)
        }
    }

    #[test]
    fn test_relay_on_request_bytes() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.relay_on(3).unwrap();

        let bus = dev.release();
        assert_eq!(bus.written.as_slice(), &[0x01, 3]);
        assert_eq!(bus.write_address, Some(DEFAULT_ADDRESS));
        assert_eq!(bus.writes, 1);
    }

    #[test]
    fn test_custom_address_is_used() {
        let mut dev = SmartRelay::with_address(MockBus::ok(), 0x2B);
        dev.relay_off(0).unwrap();

        let bus = dev.release();
        assert_eq!(bus.written.as_slice(), &[0x02, 0]);
        assert_eq!(bus.write_address, Some(0x2B));
    }

    #[test]
    fn test_timed_relay_duration_is_little_endian() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.relay_on_for(2, 0x1234).unwrap();

        let bus = dev.release();
        assert_eq!(bus.written.as_slice(), &[0x03, 2, 0x34, 0x12]);
    }

    #[test]
    fn test_power_cycle_enable_flag_asymmetry() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.power_cycle_enable(4, false).unwrap();
        assert_eq!(dev.release().written.as_slice(), &[0x0D, 4]);

        let mut dev = SmartRelay::new(MockBus::ok());
        dev.power_cycle_enable(4, true).unwrap();
        assert_eq!(dev.release().written.as_slice(), &[0x0D, 4, 1]);
    }

    #[test]
    fn test_trip_count_decodes_little_endian() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x78, 0x56, 0x34, 0x12]));
        assert_eq!(dev.watchdog_get_trip_count().unwrap(), 0x12345678);
    }

    #[test]
    fn test_eeprom_write_count() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x01, 0x00, 0x00, 0x00]));
        assert_eq!(dev.eeprom_get_write_count().unwrap(), 1);
    }

    #[test]
    fn test_relay_get_state_decodes_masks() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x05, 0x0F]));
        let state = dev.relay_get_state().unwrap();

        assert_eq!(state.state_mask, 0x05);
        assert_eq!(state.init_mask, 0x0F);
        assert!(state.is_on(0));
        assert!(!state.is_on(1));
        assert!(state.is_on(2));
        assert!(!state.is_initialized(7));
    }

    #[test]
    fn test_device_info_decodes_fields() {
        let mut dev = SmartRelay::new(MockBus::respond(&[
            0x00, 0x2A, 0x00, 0x10, 0x27, 0x03, 0x01, 0x02,
        ]));
        let info = dev.device_info().unwrap();

        assert_eq!(info.vendor_id, 0x002A);
        assert_eq!(info.product_id, 0x2710);
        assert_eq!(info.revision, 3);
        assert_eq!(info.firmware_version, 0x0201);
    }

    #[test]
    fn test_firmware_version() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x01, 0x02]));
        assert_eq!(dev.firmware_get_version().unwrap(), 0x0201);

        let bus = dev.release();
        assert_eq!(bus.written.as_slice(), &[0x1A]);
    }

    #[test]
    fn test_persist_get_and_misc_single_byte_reads() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x01]));
        assert!(dev.relay_state_persist_get().unwrap());

        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x00]));
        assert!(!dev.relay_state_persist_get().unwrap());

        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x07]));
        assert_eq!(dev.eeprom_get_shift_count().unwrap(), 0x07);

        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x02]));
        assert_eq!(dev.eeprom_get_version().unwrap(), 2);

        // Active state normalizes any nonzero byte to 1
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0xFF]));
        assert_eq!(dev.watchdog_get_reset_active_state().unwrap(), 1);
    }

    #[test]
    fn test_nonzero_status_is_rejected() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x03]));
        assert_eq!(dev.relay_on(9), Err(Error::Rejected(Status::BadParam)));
    }

    #[test]
    fn test_rejected_read_never_decodes_payload() {
        // Payload bytes after a failure status are garbage; the call must
        // surface the status instead of a decoded value
        let mut dev = SmartRelay::new(MockBus::respond(&[0x01, 0xAA, 0xBB, 0xCC, 0xDD]));
        assert_eq!(
            dev.watchdog_get_trip_count(),
            Err(Error::Rejected(Status::Error))
        );
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x7F]));
        assert_eq!(
            dev.watchdog_ping(),
            Err(Error::Rejected(Status::Other(0x7F)))
        );
    }

    #[test]
    fn test_short_response_is_fatal() {
        let mut dev = SmartRelay::new(MockBus::respond(&[0x00, 0x2A, 0x00]));
        assert_eq!(
            dev.device_info(),
            Err(Error::ShortResponse {
                expected: 8,
                got: 3
            })
        );
    }

    #[test]
    fn test_invalid_active_state_never_touches_the_bus() {
        let mut dev = SmartRelay::new(MockBus::ok());
        assert_eq!(
            dev.watchdog_set_reset_active_state(2),
            Err(Error::InvalidArgument)
        );

        let bus = dev.release();
        assert_eq!(bus.writes, 0);
    }

    #[test]
    fn test_valid_active_state_values() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.watchdog_set_reset_active_state(0).unwrap();
        assert_eq!(dev.release().written.as_slice(), &[0x17, 0]);

        let mut dev = SmartRelay::new(MockBus::ok());
        dev.watchdog_set_reset_active_state(1).unwrap();
        assert_eq!(dev.release().written.as_slice(), &[0x17, 1]);
    }

    #[test]
    fn test_bus_fault_propagates_untouched() {
        let mut dev = SmartRelay::new(MockBus::failing());
        assert_eq!(dev.relay_on(0), Err(Error::Bus(BusFault::Nack)));
    }

    #[test]
    fn test_read_fault_propagates_after_write() {
        let mut dev = SmartRelay::new(MockBus::failing_on_read());
        assert_eq!(
            dev.watchdog_get_trip_count(),
            Err(Error::Bus(BusFault::Nack))
        );

        // The request went out; the fault came from the read leg
        let bus = dev.release();
        assert_eq!(bus.writes, 1);
        assert_eq!(bus.written.as_slice(), &[0x0A]);
    }

    #[test]
    fn test_set_address_does_not_retarget_client() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.i2c_set_address(0x30).unwrap();

        assert_eq!(dev.address(), DEFAULT_ADDRESS);
        let bus = dev.release();
        assert_eq!(bus.written.as_slice(), &[0x15, 0x30]);
        assert_eq!(bus.write_address, Some(DEFAULT_ADDRESS));
    }

    #[test]
    fn test_status_only_commands() {
        let mut dev = SmartRelay::new(MockBus::ok());
        dev.watchdog_enable(1).unwrap();
        dev.watchdog_disable().unwrap();
        dev.watchdog_ping().unwrap();
        dev.watchdog_set_ping_timeout(60).unwrap();
        dev.watchdog_set_reset_duration(5).unwrap();
        dev.watchdog_clear_trip_count().unwrap();
        dev.eeprom_clear().unwrap();
        dev.power_cycle_disable().unwrap();
        dev.power_cycle_set_max_on_time(120).unwrap();
        dev.power_cycle_sleep(3600).unwrap();
        dev.relay_state_persist_enable().unwrap();
        dev.relay_state_persist_disable().unwrap();
        dev.relay_off_for(1, 10).unwrap();

        let bus = dev.release();
        assert_eq!(bus.writes, 13);
    }
}
