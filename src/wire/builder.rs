use core::marker::PhantomData;

use crate::wire::{
    engine::RegisterMap,
    layout::{Layout, Split, Unified},
    policy::{AllowAllWrites, NoHook, NoSendHook, ReceiveHook, SendHook, WriteProtect},
    shared::SharedRegisterMap,
    strategy::{DEFAULT_CHUNK, SMALL_TRANSPORT_CHUNK, SendStrategy},
    transport::{Clock, NoClock},
};

// Builder states
pub struct NeedSize;
pub struct Ready;

/// Type-state builder for [`RegisterMap`].
///
/// ```
/// use wire_regmap::prelude::*;
///
/// let map = RegisterMapBuilder::new()
///     .size::<32>()
///     .protect(|index: usize| index < 4)
///     .strategy(SendStrategy::Block)
///     .chunk_limit(SMALL_TRANSPORT_CHUNK)
///     .build();
///
/// assert_eq!(map.len(), 32);
/// assert_eq!(map.chunk_limit(), 32);
/// ```
pub struct RegisterMapBuilder<const N: usize, L, P, H, C, S, State> {
    layout: L,
    protect: P,
    hook: H,
    clock: C,
    send_hook: S,
    strategy: SendStrategy,
    chunk_limit: u8,
    _state: PhantomData<State>,
}

impl RegisterMapBuilder<0, Unified, AllowAllWrites, NoHook, NoClock, NoSendHook, NeedSize> {
    pub fn new() -> Self {
        RegisterMapBuilder {
            layout: Unified,
            protect: AllowAllWrites::default(),
            hook: NoHook,
            clock: NoClock,
            send_hook: NoSendHook,
            strategy: SendStrategy::default(),
            chunk_limit: DEFAULT_CHUNK,
            _state: PhantomData,
        }
    }

    /// Sets the register count. Must be at most 255; checked at compile time on `build`.
    pub fn size<const N: usize>(
        self,
    ) -> RegisterMapBuilder<N, Unified, AllowAllWrites, NoHook, NoClock, NoSendHook, Ready> {
        RegisterMapBuilder {
            layout: Unified,
            protect: self.protect,
            hook: self.hook,
            clock: self.clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }
}

impl Default
    for RegisterMapBuilder<0, Unified, AllowAllWrites, NoHook, NoClock, NoSendHook, NeedSize>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, L, P, H, C, S> RegisterMapBuilder<N, L, P, H, C, S, Ready>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    /// One buffer serves both controller writes and reads (the default).
    pub fn unified(self) -> RegisterMapBuilder<N, Unified, P, H, C, S, Ready> {
        let (protect, hook, clock) = (self.protect, self.hook, self.clock);
        RegisterMapBuilder {
            layout: Unified,
            protect,
            hook,
            clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    /// Controller reads come from a separate send buffer.
    pub fn split(self) -> RegisterMapBuilder<N, Split<N>, P, H, C, S, Ready> {
        let (protect, hook, clock) = (self.protect, self.hook, self.clock);
        RegisterMapBuilder {
            layout: Split::new(),
            protect,
            hook,
            clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    /// Registers the controller may not overwrite.
    pub fn protect<P2: WriteProtect>(
        self,
        protect: P2,
    ) -> RegisterMapBuilder<N, L, P2, H, C, S, Ready> {
        let (layout, hook, clock) = (self.layout, self.hook, self.clock);
        RegisterMapBuilder {
            layout,
            protect,
            hook,
            clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    /// Observer for every byte the controller writes.
    pub fn on_write<H2: ReceiveHook>(
        self,
        hook: H2,
    ) -> RegisterMapBuilder<N, L, P, H2, C, S, Ready> {
        let (layout, protect, clock) = (self.layout, self.protect, self.clock);
        RegisterMapBuilder {
            layout,
            protect,
            hook,
            clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    /// Clock used to stamp receive activity.
    pub fn clock<C2: Clock>(self, clock: C2) -> RegisterMapBuilder<N, L, P, H, C2, S, Ready> {
        let (layout, protect, hook) = (self.layout, self.protect, self.hook);
        RegisterMapBuilder {
            layout,
            protect,
            hook,
            clock,
            send_hook: self.send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    /// Observer for every register byte the controller reads.
    pub fn on_read<S2: SendHook>(
        self,
        send_hook: S2,
    ) -> RegisterMapBuilder<N, L, P, H, C, S2, Ready> {
        let (layout, protect, hook, clock) = (self.layout, self.protect, self.hook, self.clock);
        RegisterMapBuilder {
            layout,
            protect,
            hook,
            clock,
            send_hook,
            strategy: self.strategy,
            chunk_limit: self.chunk_limit,
            _state: PhantomData,
        }
    }

    pub fn strategy(mut self, strategy: SendStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Most bytes handed to the transport per request event.
    pub fn chunk_limit(mut self, limit: u8) -> Self {
        self.chunk_limit = limit;
        self
    }

    /// Preset for transports with a 32-byte event buffer.
    pub fn small_transport(self) -> Self {
        self.chunk_limit(SMALL_TRANSPORT_CHUNK)
    }

    pub fn build(self) -> RegisterMap<N, L, P, H, C, S> {
        RegisterMap::from_parts(
            self.layout,
            self.protect,
            self.hook,
            self.clock,
            self.send_hook,
            self.strategy,
            self.chunk_limit,
        )
    }

    /// Builds straight into a [`SharedRegisterMap`] for use from callbacks.
    pub fn build_shared(self) -> SharedRegisterMap<N, L, P, H, C, S> {
        SharedRegisterMap::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{policy::ProtectedMask, test_support::MockTarget};

    #[test]
    fn defaults() {
        let map = RegisterMapBuilder::new().size::<16>().build();
        assert_eq!(map.len(), 16);
        assert_eq!(map.chunk_limit(), DEFAULT_CHUNK);
        assert_eq!(map.strategy(), SendStrategy::Block);
        assert_eq!(map.cursor(), 0);
        assert_eq!(map.registers(), &[0; 16]);
    }

    #[test]
    fn configured_parts_reach_the_engine() {
        let mut map = RegisterMapBuilder::new()
            .size::<8>()
            .split()
            .protect(ProtectedMask::new().protect(1))
            .strategy(SendStrategy::OneByte)
            .small_transport()
            .clock(|| 42u32)
            .build();

        assert_eq!(map.chunk_limit(), SMALL_TRANSPORT_CHUNK);
        assert!(map.protection().is_protected(1));

        map.send_registers_mut()[0] = 0x99;
        let mut bus = MockTarget::with_rx(&[0, 7, 7]);
        map.on_data_received(&mut bus);
        assert_eq!(&map.registers()[..2], &[7, 0]);
        assert_eq!(map.activity().last_received_at(), 42);

        let mut bus = MockTarget::with_rx(&[0]);
        map.on_data_received(&mut bus);
        let mut bus = MockTarget::with_rx(&[]);
        map.on_data_requested(&mut bus);
        assert_eq!(bus.sent(), &[0x99]);
    }

    #[test]
    fn read_hook_reaches_the_engine() {
        let mut reads = 0usize;
        let mut map = RegisterMapBuilder::new()
            .size::<4>()
            .on_read(|_: usize, _: u8| reads += 1)
            .chunk_limit(2)
            .build();

        let mut bus = MockTarget::with_rx(&[]);
        map.on_data_requested(&mut bus);
        assert_eq!(bus.sent(), &[0, 0]);
        assert_eq!(reads, 2);
    }
}
