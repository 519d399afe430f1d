//! How many register bytes a peripheral hands back per request event.
//!
//! Transports differ in how much they accept per event: some take a single
//! byte, some take many individual byte writes, some take one bulk write up to
//! an internal buffer size. The strategy is picked once when the register map
//! is built.

use core::ops::Range;

use crate::wire::transport::TargetBus;

/// Per-event limit for transports with a 32-byte event buffer (AVR-class parts).
pub const SMALL_TRANSPORT_CHUNK: u8 = 32;

/// Per-event limit for everything else.
pub const DEFAULT_CHUNK: u8 = 255;

/// Value written when the cursor has run off the end of the register map.
pub const EXHAUSTED_SENTINEL: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendStrategy {
    /// Exactly one byte per event.
    OneByte,
    /// Up to the chunk limit per event, as individual byte writes.
    LoopedBytes,
    /// Up to the chunk limit per event, as one contiguous write.
    #[default]
    Block,
}

impl SendStrategy {
    /// Plans the register range to transmit for one event.
    ///
    /// Pure function of the cursor, the register map length and the chunk
    /// limit. Returns an empty range when the cursor is at or past the end.
    pub fn plan(self, cursor: usize, len: usize, limit: u8) -> Range<usize> {
        if cursor >= len {
            return cursor..cursor;
        }
        let remaining = len - cursor;
        let limit = limit.max(1) as usize;
        let n = match self {
            SendStrategy::OneByte => 1,
            SendStrategy::LoopedBytes | SendStrategy::Block => remaining.min(limit),
        };
        cursor..cursor + n
    }

    /// Hands `bytes` to the transport; returns how many it accepted.
    pub(crate) fn emit<T: TargetBus>(self, bus: &mut T, bytes: &[u8]) -> usize {
        match self {
            SendStrategy::OneByte | SendStrategy::LoopedBytes => {
                let mut sent = 0;
                for &byte in bytes {
                    if bus.write(byte) == 0 {
                        break;
                    }
                    sent += 1;
                }
                sent
            }
            SendStrategy::Block => bus.write_all(bytes),
        }
    }
}
