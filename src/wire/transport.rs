//! Capabilities consumed from the underlying two-wire bus driver.
//!
//! The crate never talks to hardware itself. A platform driver implements
//! [`ControllerBus`] to let [`Controller`](crate::wire::Controller) run
//! transactions, and [`TargetBus`] to hand a peripheral engine the bytes of the
//! current event.

/// Controller-role transport.
///
/// Mirrors the classic buffered two-wire driver: bytes written between
/// [`begin_transmission`](Self::begin_transmission) and
/// [`end_transmission`](Self::end_transmission) are queued and sent as one
/// transaction, while [`request_from`](Self::request_from) fills a receive
/// buffer drained through [`read`](Self::read).
pub trait ControllerBus {
    /// Starts queueing a write transaction to the 7-bit device address.
    fn begin_transmission(&mut self, address: u8);

    /// Queues one byte; returns how many bytes were accepted (0 or 1).
    fn write(&mut self, byte: u8) -> usize;

    /// Queues a run of bytes; returns how many were accepted.
    fn write_all(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        for &byte in bytes {
            if self.write(byte) == 0 {
                break;
            }
            written += 1;
        }
        written
    }

    /// Sends the queued transaction and returns the raw status code.
    ///
    /// With `send_stop == false` the bus stays claimed so the next transaction
    /// starts with a repeated start.
    fn end_transmission(&mut self, send_stop: bool) -> u8;

    /// Reads up to `len` bytes from the device into the receive buffer and
    /// returns how many were buffered.
    fn request_from(&mut self, address: u8, len: u8) -> u8;

    /// Bytes still waiting in the receive buffer.
    fn available(&self) -> usize;

    /// Pops the next buffered byte.
    fn read(&mut self) -> Option<u8>;
}

/// Peripheral-role transport, valid for the duration of one bus event.
pub trait TargetBus {
    /// Bytes of the incoming transaction not yet pulled.
    fn available(&self) -> usize;

    /// Pulls the next incoming byte.
    fn read(&mut self) -> Option<u8>;

    /// Queues one outgoing byte; returns how many bytes were accepted (0 or 1).
    fn write(&mut self, byte: u8) -> usize;

    /// Queues a contiguous block; returns how many bytes were accepted.
    fn write_all(&mut self, bytes: &[u8]) -> usize {
        let mut written = 0;
        for &byte in bytes {
            if self.write(byte) == 0 {
                break;
            }
            written += 1;
        }
        written
    }
}

/// Millisecond tick source used to stamp peripheral activity.
pub trait Clock {
    /// Current tick in milliseconds; wraps on overflow.
    fn now_ms(&self) -> u32;
}

/// Clock that always reads zero, for targets that do not track activity time.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClock;

impl Clock for NoClock {
    fn now_ms(&self) -> u32 {
        0
    }
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}
