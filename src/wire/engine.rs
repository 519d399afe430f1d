use crate::wire::{
    activity::{Activity, ActivitySnapshot},
    layout::{Layout, Split, Unified},
    policy::{AllowAllWrites, NoHook, NoSendHook, ReceiveHook, SendHook, WriteProtect},
    strategy::{DEFAULT_CHUNK, EXHAUSTED_SENTINEL, SendStrategy},
    transport::{Clock, NoClock, TargetBus},
};

/// Peripheral-role register map.
///
/// Exposes `N` bytes to a remote controller through a single-byte register
/// address. A controller write sets the address cursor from its first byte and
/// stores the remaining bytes at consecutive registers; a controller read
/// returns bytes from the cursor onward. The cursor persists between events,
/// so a read issued after an address-only write continues from that address.
///
/// [`on_data_received`](Self::on_data_received) and
/// [`on_data_requested`](Self::on_data_requested) are meant to be called from
/// the transport's event callbacks. They never block and never fail; bytes
/// past the end of the map are dropped.
///
/// # Type Parameters
/// - `N`: Register count, at most 255
/// - `L`: Buffer layout ([`Unified`] or [`Split`])
/// - `P`: Write protection policy
/// - `H`: Per-byte receive hook
/// - `C`: Clock used to stamp receive activity
/// - `S`: Per-byte send hook
pub struct RegisterMap<
    const N: usize,
    L = Unified,
    P = AllowAllWrites,
    H = NoHook,
    C = NoClock,
    S = NoSendHook,
> where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    received: [u8; N],
    layout: L,
    protect: P,
    hook: H,
    clock: C,
    send_hook: S,
    strategy: SendStrategy,
    chunk_limit: u8,
    cursor: usize,
    activity: Activity,
}

impl<const N: usize> RegisterMap<N> {
    /// Unified register map with no protection, no hook and block sends.
    pub fn new() -> Self {
        Self::from_parts(
            Unified,
            AllowAllWrites::default(),
            NoHook,
            NoClock,
            NoSendHook,
            SendStrategy::default(),
            DEFAULT_CHUNK,
        )
    }
}

impl<const N: usize> Default for RegisterMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, L, P, H, C, S> core::fmt::Debug for RegisterMap<N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterMap")
            .field("len", &N)
            .field("cursor", &self.cursor)
            .field("strategy", &self.strategy)
            .field("chunk_limit", &self.chunk_limit)
            .field("activity", &self.activity)
            .finish_non_exhaustive()
    }
}

impl<const N: usize, L, P, H, C, S> RegisterMap<N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    const ADDRESSABLE: () = assert!(N <= 255, "register map must fit a one-byte address");

    pub(crate) fn from_parts(
        layout: L,
        protect: P,
        hook: H,
        clock: C,
        send_hook: S,
        strategy: SendStrategy,
        chunk_limit: u8,
    ) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::ADDRESSABLE;

        Self {
            received: [0; N],
            layout,
            protect,
            hook,
            clock,
            send_hook,
            strategy,
            chunk_limit: chunk_limit.max(1),
            cursor: 0,
            activity: Activity::default(),
        }
    }

    /// Handles a completed controller write.
    ///
    /// The first byte becomes the cursor. Every further byte is stored at the
    /// cursor when it is inside the map and not write-protected, reported to
    /// the receive hook either way, and advances the cursor. An event with no
    /// bytes changes nothing.
    pub fn on_data_received<T: TargetBus>(&mut self, bus: &mut T) {
        let mut count = 0usize;
        while bus.available() > 0 {
            let Some(value) = bus.read() else {
                break;
            };
            if count == 0 {
                self.cursor = value as usize;
            } else {
                if self.cursor < N && !self.protect.is_protected(self.cursor) {
                    self.received[self.cursor] = value;
                }
                self.hook.on_byte(self.cursor, value);
                self.cursor += 1;
            }
            count += 1;
        }

        if count > 0 {
            self.activity.record(self.clock.now_ms(), count);
            log::trace!("regmap rx: {} bytes, cursor now {}", count, self.cursor);
        }
    }

    /// Handles a controller read opportunity.
    ///
    /// Sends bytes from the cursor onward, as many as the send strategy and
    /// chunk limit allow, and advances the cursor by the number the transport
    /// accepted. The send hook sees each accepted byte with its register
    /// index. With the cursor at or past the end, sends a single zero byte
    /// and leaves the cursor where it is.
    pub fn on_data_requested<T: TargetBus>(&mut self, bus: &mut T) {
        let range = self.strategy.plan(self.cursor, N, self.chunk_limit);
        if range.is_empty() {
            bus.write(EXHAUSTED_SENTINEL);
            log::trace!("regmap tx: exhausted at {}", self.cursor);
            return;
        }

        let start = range.start;
        let send = self.layout.send_buffer(&self.received);
        let sent = self.strategy.emit(bus, &send[range]);
        for (index, &value) in send.iter().enumerate().skip(start).take(sent) {
            self.send_hook.on_send(index, value);
        }
        self.cursor += sent;
        log::trace!("regmap tx: {} bytes, cursor now {}", sent, self.cursor);
    }

    /// Number of registers.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Register the next event acts on; may be parked past the end.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn chunk_limit(&self) -> u8 {
        self.chunk_limit
    }

    /// Sets the most bytes handed to the transport per request event.
    ///
    /// A limit of zero would stall reads forever and is raised to one.
    pub fn set_chunk_limit(&mut self, limit: u8) {
        self.chunk_limit = limit.max(1);
    }

    #[inline]
    pub fn strategy(&self) -> SendStrategy {
        self.strategy
    }

    #[inline]
    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn snapshot(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            cursor: self.cursor,
            last_received_at: self.activity.last_received_at(),
            last_received_len: self.activity.last_received_len(),
        }
    }

    /// Buffer controller writes land in.
    #[inline]
    pub fn registers(&self) -> &[u8; N] {
        &self.received
    }

    /// Writable access to the receive buffer from application code.
    #[inline]
    pub fn registers_mut(&mut self) -> &mut [u8; N] {
        &mut self.received
    }

    /// Buffer controller reads are served from.
    #[inline]
    pub fn send_registers(&self) -> &[u8; N] {
        self.layout.send_buffer(&self.received)
    }

    /// Stores `data` at `start` in the receive buffer and, for a split
    /// layout, in the send buffer as well.
    ///
    /// # Panics
    /// Panics if `start + data.len() > N`.
    pub fn load_defaults(&mut self, start: usize, data: &[u8]) {
        let end = start + data.len();
        self.received[start..end].copy_from_slice(data);
        if let Some(send) = self.layout.own_send_buffer_mut() {
            send[start..end].copy_from_slice(data);
        }
    }

    pub fn protection(&self) -> &P {
        &self.protect
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn send_hook_mut(&mut self) -> &mut S {
        &mut self.send_hook
    }
}

impl<const N: usize, P, H, C, S> RegisterMap<N, Split<N>, P, H, C, S>
where
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    /// Writable access to the separate send buffer.
    #[inline]
    pub fn send_registers_mut(&mut self) -> &mut [u8; N] {
        &mut self.layout.send
    }
}
