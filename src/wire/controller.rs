//! Controller-role register access.
//!
//! Every operation is a blocking request/response sequence on the bus. Failures
//! are the transport's status codes wrapped in [`TransmissionError`]; nothing
//! is retried here.

use embedded_hal::delay::DelayNs;

use crate::wire::{TransmissionError, helpers::chunks, transport::ControllerBus};

/// Time some peripherals need after an address-only presence check before they accept
/// the next transaction.
pub const PRESENCE_SETTLE_MS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Check the device with an empty transaction before every read.
    pub check_presence: bool,
    /// Release the bus after the register address of a read instead of
    /// issuing a repeated start.
    pub stop_after_address: bool,
    /// Wait after a successful presence check, in milliseconds.
    pub settle_delay_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            check_presence: false,
            stop_after_address: false,
            settle_delay_ms: PRESENCE_SETTLE_MS,
        }
    }
}

impl ControllerConfig {
    pub fn with_presence_check(mut self, enabled: bool) -> Self {
        self.check_presence = enabled;
        self
    }

    pub fn with_stop_after_address(mut self, enabled: bool) -> Self {
        self.stop_after_address = enabled;
        self
    }

    pub fn with_settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }
}

/// Register reads and writes against remote devices.
#[derive(Debug)]
pub struct Controller<B, D> {
    bus: B,
    delay: D,
    config: ControllerConfig,
}

impl<B, D> Controller<B, D>
where
    B: ControllerBus,
    D: DelayNs,
{
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_config(bus, delay, ControllerConfig::default())
    }

    pub fn with_config(bus: B, delay: D, config: ControllerConfig) -> Self {
        Self { bus, delay, config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Gives back the transport and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Sends an empty transaction to `address`.
    ///
    /// `Ok` means the device acknowledged its address.
    pub fn check_presence(&mut self, address: u8) -> Result<(), TransmissionError> {
        self.bus.begin_transmission(address);
        let code = self.bus.end_transmission(true);
        TransmissionError::check(code).inspect_err(|err| {
            log::debug!("device {:#04x} absent: {}", address, err);
        })
    }

    /// Reads registers starting at `register` into `data`.
    ///
    /// Returns how many bytes the device delivered, at most `data.len()`
    /// (capped at 255). Extra bytes the transport buffers are drained and
    /// dropped. If the presence check or the address phase fails, its error is
    /// returned and no read is issued.
    pub fn read_bytes(
        &mut self,
        address: u8,
        register: u8,
        data: &mut [u8],
    ) -> Result<usize, TransmissionError> {
        self.read_with_presence(address, register, data, self.config.check_presence)
    }

    /// Writes `data` to registers starting at `register` in one transaction.
    pub fn write_bytes(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), TransmissionError> {
        self.bus.begin_transmission(address);
        self.bus.write(register);
        self.bus.write_all(data);
        let code = self.bus.end_transmission(true);
        TransmissionError::check(code).inspect_err(|err| {
            log::debug!(
                "write of {} bytes to {:#04x}@{:#04x} failed: {}",
                data.len(),
                address,
                register,
                err
            );
        })
    }

    /// Reads `data.len()` bytes in reads of at most `block` bytes each.
    ///
    /// Chunk `k` starts at register `register + k * block`. Only the first
    /// chunk runs the presence check. Stops at the first failing chunk.
    /// Returns the total number of bytes delivered.
    pub fn read_chunked(
        &mut self,
        address: u8,
        register: u8,
        data: &mut [u8],
        block: usize,
    ) -> Result<usize, TransmissionError> {
        let mut check = self.config.check_presence;
        let mut total = 0;
        for chunk in chunks(register, data.len(), block) {
            let dest = &mut data[chunk.offset..chunk.offset + chunk.len];
            total += self
                .read_with_presence(address, chunk.register, dest, check)
                .inspect_err(|_| {
                    log::debug!(
                        "chunked read from {:#04x} aborted at register {:#04x}",
                        address,
                        chunk.register
                    );
                })?;
            check = false;
        }
        Ok(total)
    }

    /// Writes `data` in writes of at most `block` bytes each; stops at the
    /// first failing chunk.
    pub fn write_chunked(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
        block: usize,
    ) -> Result<(), TransmissionError> {
        for chunk in chunks(register, data.len(), block) {
            self.write_bytes(
                address,
                chunk.register,
                &data[chunk.offset..chunk.offset + chunk.len],
            )?;
        }
        Ok(())
    }

    fn read_with_presence(
        &mut self,
        address: u8,
        register: u8,
        data: &mut [u8],
        check: bool,
    ) -> Result<usize, TransmissionError> {
        if check {
            self.check_presence(address)?;
            self.delay.delay_ms(self.config.settle_delay_ms);
        }

        self.bus.begin_transmission(address);
        self.bus.write(register);
        let code = self.bus.end_transmission(self.config.stop_after_address);
        TransmissionError::check(code).inspect_err(|err| {
            log::debug!(
                "address phase {:#04x}@{:#04x} failed: {}",
                address,
                register,
                err
            );
        })?;

        let len = data.len().min(u8::MAX as usize) as u8;
        self.bus.request_from(address, len);
        let mut filled = 0;
        while self.bus.available() > 0 {
            let Some(byte) = self.bus.read() else {
                break;
            };
            if filled < len as usize {
                data[filled] = byte;
                filled += 1;
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::test_support::{MockController, Op, RecordingDelay};

    const DEV: u8 = 0x42;

    fn controller(
        bus: MockController,
        config: ControllerConfig,
    ) -> Controller<MockController, RecordingDelay> {
        Controller::with_config(bus, RecordingDelay::default(), config)
    }

    #[test]
    fn presence_check_returns_code_verbatim() {
        let mut ctl = controller(
            MockController::new().script(&[2]),
            ControllerConfig::default(),
        );
        assert_eq!(ctl.check_presence(DEV), Err(TransmissionError::AddressNack));
        assert_eq!(ctl.check_presence(DEV), Ok(()));
        assert_eq!(
            ctl.bus().ops(),
            &[
                Op::Begin(DEV),
                Op::End { stop: true },
                Op::Begin(DEV),
                Op::End { stop: true },
            ]
        );
        assert_eq!(ctl.bus().count_writes(), 0);
    }

    #[test]
    fn read_uses_repeated_start_by_default() {
        let mut bus = MockController::new();
        bus.device_mut()[0x10..0x14].copy_from_slice(&[1, 2, 3, 4]);
        let mut ctl = controller(bus, ControllerConfig::default());

        let mut buf = [0u8; 4];
        assert_eq!(ctl.read_bytes(DEV, 0x10, &mut buf), Ok(4));
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(
            ctl.bus().ops(),
            &[
                Op::Begin(DEV),
                Op::Write(0x10),
                Op::End { stop: false },
                Op::Request { address: DEV, len: 4 },
            ]
        );
    }

    #[test]
    fn stop_after_address_releases_bus() {
        let mut ctl = controller(
            MockController::new(),
            ControllerConfig::default().with_stop_after_address(true),
        );
        let mut buf = [0u8; 1];
        ctl.read_bytes(DEV, 0, &mut buf).unwrap();
        assert_eq!(ctl.bus().ops()[2], Op::End { stop: true });
    }

    #[test]
    fn nack_on_presence_check_stops_read() {
        let mut ctl = controller(
            MockController::new().script(&[2]),
            ControllerConfig::default().with_presence_check(true),
        );
        let mut buf = [0xEEu8; 4];
        assert_eq!(
            ctl.read_bytes(DEV, 0x10, &mut buf),
            Err(TransmissionError::AddressNack)
        );
        assert_eq!(ctl.bus().count_writes(), 0);
        assert_eq!(buf, [0xEE; 4]);

        let (_, delay) = ctl.release();
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn successful_presence_check_waits_settle_delay() {
        let mut ctl = controller(
            MockController::new(),
            ControllerConfig::default().with_presence_check(true),
        );
        let mut buf = [0u8; 2];
        ctl.read_bytes(DEV, 0, &mut buf).unwrap();

        assert_eq!(
            ctl.bus().ops()[..2],
            [Op::Begin(DEV), Op::End { stop: true }]
        );
        let (_, delay) = ctl.release();
        assert_eq!(delay.total_ns, PRESENCE_SETTLE_MS as u64 * 1_000_000);
    }

    #[test]
    fn address_phase_failure_skips_request() {
        let mut ctl = controller(
            MockController::new().script(&[3]),
            ControllerConfig::default(),
        );
        let mut buf = [0u8; 2];
        assert_eq!(
            ctl.read_bytes(DEV, 0, &mut buf),
            Err(TransmissionError::DataNack)
        );
        assert!(
            !ctl.bus()
                .ops()
                .iter()
                .any(|op| matches!(op, Op::Request { .. }))
        );
    }

    #[test]
    fn short_and_long_deliveries_are_bounded() {
        let mut bus = MockController::new().short_reads(2);
        bus.device_mut()[..4].copy_from_slice(&[9, 8, 7, 6]);
        let mut ctl = controller(bus, ControllerConfig::default());
        let mut buf = [0u8; 4];
        assert_eq!(ctl.read_bytes(DEV, 0, &mut buf), Ok(2));
        assert_eq!(buf, [9, 8, 0, 0]);

        let mut bus = MockController::new().long_reads(3);
        bus.device_mut()[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        let mut ctl = controller(bus, ControllerConfig::default());
        let mut buf = [0u8; 2];
        assert_eq!(ctl.read_bytes(DEV, 0, &mut buf), Ok(2));
        assert_eq!(buf, [1, 2]);
        assert_eq!(ctl.bus().available(), 0);
    }

    #[test]
    fn write_sends_address_then_payload() {
        let mut ctl = controller(MockController::new(), ControllerConfig::default());
        assert_eq!(ctl.write_bytes(DEV, 0x20, &[0xAA, 0xBB]), Ok(()));
        assert_eq!(
            ctl.bus().ops(),
            &[
                Op::Begin(DEV),
                Op::Write(0x20),
                Op::Write(0xAA),
                Op::Write(0xBB),
                Op::End { stop: true },
            ]
        );
        assert_eq!(ctl.bus().device()[0x20..0x22], [0xAA, 0xBB]);
    }

    #[test]
    fn chunked_write_then_read_round_trips() {
        let payload = [10u8, 11, 12, 13, 14, 15, 16, 17, 18, 19];
        let mut ctl = controller(MockController::new(), ControllerConfig::default());

        ctl.write_chunked(DEV, 0x30, &payload, 4).unwrap();
        assert_eq!(
            &ctl.bus().write_payloads()[..],
            &[(0x30, 4), (0x34, 4), (0x38, 2)]
        );

        let mut back = [0u8; 10];
        assert_eq!(ctl.read_chunked(DEV, 0x30, &mut back, 4), Ok(10));
        assert_eq!(back, payload);
    }

    #[test]
    fn chunked_read_checks_presence_only_once() {
        let mut ctl = controller(
            MockController::new(),
            ControllerConfig::default().with_presence_check(true),
        );
        let mut buf = [0u8; 10];
        ctl.read_chunked(DEV, 0, &mut buf, 4).unwrap();

        let checks = ctl
            .bus()
            .ops()
            .windows(2)
            .filter(|w| *w == [Op::Begin(DEV), Op::End { stop: true }])
            .count();
        assert_eq!(checks, 1);
        let requests = ctl
            .bus()
            .ops()
            .iter()
            .filter(|op| matches!(op, Op::Request { .. }))
            .count();
        assert_eq!(requests, 3);
    }

    #[test]
    fn chunked_write_aborts_on_first_failure() {
        let mut ctl = controller(
            MockController::new().script(&[0, 3]),
            ControllerConfig::default(),
        );
        assert_eq!(
            ctl.write_chunked(DEV, 0, &[1; 10], 4),
            Err(TransmissionError::DataNack)
        );
        let transactions = ctl
            .bus()
            .ops()
            .iter()
            .filter(|op| matches!(op, Op::Begin(_)))
            .count();
        assert_eq!(transactions, 2);
    }

    #[test]
    fn chunked_read_aborts_on_first_failure() {
        // Second chunk's address phase fails.
        let mut ctl = controller(
            MockController::new().script(&[0, 4]),
            ControllerConfig::default(),
        );
        let mut buf = [0u8; 8];
        assert_eq!(
            ctl.read_chunked(DEV, 0, &mut buf, 4),
            Err(TransmissionError::Other)
        );
        let requests = ctl
            .bus()
            .ops()
            .iter()
            .filter(|op| matches!(op, Op::Request { .. }))
            .count();
        assert_eq!(requests, 1);
    }
}
