/// Record of the most recent receive transaction that carried at least one byte.
///
/// Written only at the end of a receive event. Reading it from application
/// code while callbacks are live gives a possibly stale value; take an
/// [`ActivitySnapshot`] through the host handle when both fields must agree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    received_at: u32,
    received_len: usize,
}

impl Activity {
    pub(crate) fn record(&mut self, at: u32, len: usize) {
        self.received_at = at;
        self.received_len = len;
    }

    /// Clock tick of the last non-empty receive event.
    #[inline]
    pub fn last_received_at(&self) -> u32 {
        self.received_at
    }

    /// Byte count of that event, address byte included.
    #[inline]
    pub fn last_received_len(&self) -> usize {
        self.received_len
    }

    /// Milliseconds since the last receive event, wrap-safe.
    pub fn elapsed_since(&self, now: u32) -> u32 {
        now.wrapping_sub(self.received_at)
    }
}

/// Consistent copy of the engine's shared fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub cursor: usize,
    pub last_received_at: u32,
    pub last_received_len: usize,
}
