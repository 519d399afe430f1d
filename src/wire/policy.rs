use core::ops::Range;

/// Decides which register indices a remote controller may not overwrite.
pub trait WriteProtect {
    /// Returns true if writes to `index` must be dropped.
    fn is_protected(&self, index: usize) -> bool;
}

/// Default policy that leaves every register writable.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllWrites {}

impl WriteProtect for AllowAllWrites {
    fn is_protected(&self, _index: usize) -> bool {
        false
    }
}

impl<F> WriteProtect for F
where
    F: Fn(usize) -> bool,
{
    fn is_protected(&self, index: usize) -> bool {
        self(index)
    }
}

/// Protection set backed by a 256-bit mask, one bit per addressable register.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedMask {
    bits: bitmaps::Bitmap<256>,
}

impl ProtectedMask {
    pub fn new() -> Self {
        Self {
            bits: bitmaps::Bitmap::new(),
        }
    }

    /// Marks `index` as protected.
    pub fn protect(mut self, index: u8) -> Self {
        self.bits.set(index as usize, true);
        self
    }

    /// Marks every index in `range` as protected.
    pub fn protect_range(mut self, range: Range<u8>) -> Self {
        for index in range {
            self.bits.set(index as usize, true);
        }
        self
    }
}

impl Default for ProtectedMask {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteProtect for ProtectedMask {
    fn is_protected(&self, index: usize) -> bool {
        index < 256 && self.bits.get(index)
    }
}

/// Protection expressed as up to `R` half-open index ranges.
#[derive(Debug, Clone, Default)]
pub struct ProtectedRanges<const R: usize> {
    ranges: heapless::Vec<Range<usize>, R>,
}

impl<const R: usize> ProtectedRanges<R> {
    pub fn new() -> Self {
        Self {
            ranges: heapless::Vec::new(),
        }
    }

    /// Adds a protected range; hands the range back if all `R` slots are used.
    pub fn push(&mut self, range: Range<usize>) -> Result<(), Range<usize>> {
        self.ranges.push(range)
    }
}

impl<const R: usize> WriteProtect for ProtectedRanges<R> {
    fn is_protected(&self, index: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&index))
    }
}

/// Observer called for every payload byte a controller writes, whether or not
/// the write was applied.
pub trait ReceiveHook {
    fn on_byte(&mut self, index: usize, value: u8);
}

/// Default hook that ignores received bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHook;

impl ReceiveHook for NoHook {
    fn on_byte(&mut self, _index: usize, _value: u8) {}
}

impl<F> ReceiveHook for F
where
    F: FnMut(usize, u8),
{
    fn on_byte(&mut self, index: usize, value: u8) {
        self(index, value)
    }
}

/// Observer called for every register byte the transport accepted during a
/// request event. Not called for the exhausted sentinel.
pub trait SendHook {
    fn on_send(&mut self, index: usize, value: u8);
}

/// Default hook that ignores sent bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSendHook;

impl SendHook for NoSendHook {
    fn on_send(&mut self, _index: usize, _value: u8) {}
}

impl<F> SendHook for F
where
    F: FnMut(usize, u8),
{
    fn on_send(&mut self, index: usize, value: u8) {
        self(index, value)
    }
}
