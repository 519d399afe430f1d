//! Test support utilities - only compiled in test builds.

use core::cell::Cell;

use crate::wire::{
    policy::{ReceiveHook, SendHook},
    transport::{Clock, ControllerBus, TargetBus},
};

/// One event's worth of peripheral-side transport.
pub struct MockTarget {
    rx: heapless::Deque<u8, 512>,
    tx: heapless::Vec<u8, 512>,
    accept: usize,
    write_calls: usize,
    write_all_calls: usize,
}

impl MockTarget {
    /// Transport holding `bytes` as the incoming transaction.
    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut rx = heapless::Deque::new();
        for &b in bytes {
            rx.push_back(b).unwrap();
        }
        Self {
            rx,
            tx: heapless::Vec::new(),
            accept: usize::MAX,
            write_calls: 0,
            write_all_calls: 0,
        }
    }

    /// Caps how many bytes the transport takes this event.
    pub fn accepting(mut self, accept: usize) -> Self {
        self.accept = accept;
        self
    }

    pub fn sent(&self) -> &[u8] {
        &self.tx
    }

    /// Number of single-byte `write` calls.
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// Number of block `write_all` calls.
    pub fn write_all_calls(&self) -> usize {
        self.write_all_calls
    }

    fn push(&mut self, byte: u8) -> bool {
        self.tx.len() < self.accept && self.tx.push(byte).is_ok()
    }
}

impl TargetBus for MockTarget {
    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write(&mut self, byte: u8) -> usize {
        self.write_calls += 1;
        usize::from(self.push(byte))
    }

    fn write_all(&mut self, bytes: &[u8]) -> usize {
        self.write_all_calls += 1;
        bytes.iter().take_while(|&&b| self.push(b)).count()
    }
}

/// Clock the test moves by hand.
pub struct FixedClock {
    now: Cell<u32>,
}

impl FixedClock {
    pub fn new(now: u32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Hook that remembers every byte it was shown, on either direction.
#[derive(Default)]
pub struct RecordingHook {
    seen: heapless::Vec<(usize, u8), 64>,
}

impl RecordingHook {
    pub fn seen(&self) -> &[(usize, u8)] {
        &self.seen
    }
}

impl ReceiveHook for RecordingHook {
    fn on_byte(&mut self, index: usize, value: u8) {
        let _ = self.seen.push((index, value));
    }
}

impl SendHook for RecordingHook {
    fn on_send(&mut self, index: usize, value: u8) {
        let _ = self.seen.push((index, value));
    }
}

/// Controller transport operation, as recorded by [`MockController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Begin(u8),
    Write(u8),
    End { stop: bool },
    Request { address: u8, len: u8 },
}

/// Controller-side transport backed by a simple 256-register device.
///
/// Successful transactions behave like a register-pointer device: the first
/// written byte selects the register, later bytes are stored, and reads return
/// registers from the pointer onward. Status codes can be scripted per
/// `end_transmission` call.
pub struct MockController {
    ops: heapless::Vec<Op, 512>,
    codes: heapless::Deque<u8, 16>,
    device: [u8; 256],
    pointer: u8,
    queued: heapless::Vec<u8, 256>,
    rx: heapless::Deque<u8, 512>,
    short_by: u8,
    extra: u8,
}

impl MockController {
    pub fn new() -> Self {
        Self {
            ops: heapless::Vec::new(),
            codes: heapless::Deque::new(),
            device: [0; 256],
            pointer: 0,
            queued: heapless::Vec::new(),
            rx: heapless::Deque::new(),
            short_by: 0,
            extra: 0,
        }
    }

    /// Next `end_transmission` calls return these codes, then 0.
    pub fn script(mut self, codes: &[u8]) -> Self {
        for &c in codes {
            self.codes.push_back(c).unwrap();
        }
        self
    }

    /// Deliver `n` fewer bytes than requested.
    pub fn short_reads(mut self, n: u8) -> Self {
        self.short_by = n;
        self
    }

    /// Deliver `n` more bytes than requested.
    pub fn long_reads(mut self, n: u8) -> Self {
        self.extra = n;
        self
    }

    pub fn device_mut(&mut self) -> &mut [u8; 256] {
        &mut self.device
    }

    pub fn device(&self) -> &[u8; 256] {
        &self.device
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn count_writes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Write(_)))
            .count()
    }

    /// Payload lengths (address byte excluded) of every transaction that wrote data.
    pub fn write_payloads(&self) -> heapless::Vec<(u8, usize), 16> {
        let mut out = heapless::Vec::new();
        let mut current: Option<(u8, usize)> = None;
        for op in self.ops.iter() {
            match *op {
                Op::Begin(_) => current = None,
                Op::Write(b) => {
                    current = Some(match current {
                        None => (b, 0),
                        Some((reg, n)) => (reg, n + 1),
                    })
                }
                Op::End { .. } => {
                    if let Some((reg, n)) = current.take() {
                        if n > 0 {
                            out.push((reg, n)).unwrap();
                        }
                    }
                }
                Op::Request { .. } => {}
            }
        }
        out
    }
}

impl Default for MockController {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerBus for MockController {
    fn begin_transmission(&mut self, address: u8) {
        self.queued.clear();
        self.ops.push(Op::Begin(address)).unwrap();
    }

    fn write(&mut self, byte: u8) -> usize {
        self.ops.push(Op::Write(byte)).unwrap();
        match self.queued.push(byte) {
            Ok(()) => 1,
            Err(_) => 0,
        }
    }

    fn end_transmission(&mut self, send_stop: bool) -> u8 {
        self.ops.push(Op::End { stop: send_stop }).unwrap();
        let code = self.codes.pop_front().unwrap_or(0);
        if code == 0 {
            if let Some((&reg, payload)) = self.queued.split_first() {
                self.pointer = reg;
                for &b in payload {
                    self.device[self.pointer as usize] = b;
                    self.pointer = self.pointer.wrapping_add(1);
                }
            }
        }
        self.queued.clear();
        code
    }

    fn request_from(&mut self, address: u8, len: u8) -> u8 {
        self.ops.push(Op::Request { address, len }).unwrap();
        let n = len.saturating_sub(self.short_by).saturating_add(self.extra);
        for _ in 0..n {
            self.rx.push_back(self.device[self.pointer as usize]).unwrap();
            self.pointer = self.pointer.wrapping_add(1);
        }
        n
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
