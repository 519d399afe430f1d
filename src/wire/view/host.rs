use crate::wire::{
    RegisterError,
    activity::{Activity, ActivitySnapshot},
    engine::RegisterMap,
    helpers::range_span,
    layout::{Layout, Split},
    policy::{ReceiveHook, SendHook, WriteProtect},
    slice::{RegSlice, RegSliceMut},
    transport::Clock,
};

/// Application-side view of a register map.
///
/// Obtained from [`HostHandle::with_view`](crate::wire::HostHandle::with_view).
/// Reads and writes here bypass write protection: protection only applies to
/// the remote controller.
pub struct HostView<'a, const N: usize, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    engine: &'a mut RegisterMap<N, L, P, H, C, S>,
}

impl<'a, const N: usize, L, P, H, C, S> core::fmt::Debug for HostView<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostView").finish_non_exhaustive()
    }
}

impl<'a, const N: usize, L, P, H, C, S> HostView<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    pub(crate) fn new(engine: &'a mut RegisterMap<N, L, P, H, C, S>) -> Self {
        Self { engine }
    }

    /// Registers as last written by the controller or the application.
    pub fn registers(&self) -> &[u8; N] {
        self.engine.registers()
    }

    /// Registers the controller reads from.
    pub fn send_registers(&self) -> &[u8; N] {
        self.engine.send_registers()
    }

    pub fn cursor(&self) -> usize {
        self.engine.cursor()
    }

    pub fn activity(&self) -> Activity {
        self.engine.activity()
    }

    pub fn snapshot(&self) -> ActivitySnapshot {
        self.engine.snapshot()
    }

    pub fn chunk_limit(&self) -> u8 {
        self.engine.chunk_limit()
    }

    pub fn set_chunk_limit(&mut self, limit: u8) {
        self.engine.set_chunk_limit(limit)
    }

    /// Copies registers starting at `addr` into `out`.
    pub fn read_range(&self, addr: u8, out: &mut [u8]) -> Result<(), RegisterError> {
        let (start, end) = range_span::<N>(addr, out.len())?;
        out.copy_from_slice(&self.engine.registers()[start..end]);
        Ok(())
    }

    /// Stores `data` at registers starting at `addr`.
    ///
    /// In the unified layout the controller sees these values on its next read.
    pub fn write_range(&mut self, addr: u8, data: &[u8]) -> Result<(), RegisterError> {
        let (start, end) = range_span::<N>(addr, data.len())?;
        self.engine.registers_mut()[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Seeds registers at `addr` in every buffer the layout has, e.g. at
    /// init before the transport is enabled.
    pub fn load_defaults(&mut self, addr: u8, data: &[u8]) -> Result<(), RegisterError> {
        let (start, _) = range_span::<N>(addr, data.len())?;
        self.engine.load_defaults(start, data);
        Ok(())
    }

    /// Typed read access to `len` registers at `addr`.
    pub fn with_ro_slice<F, R>(&self, addr: u8, len: usize, f: F) -> Result<R, RegisterError>
    where
        F: FnOnce(RegSlice<'_>) -> R,
    {
        let (start, end) = range_span::<N>(addr, len)?;
        Ok(f(RegSlice::new(&self.engine.registers()[start..end])))
    }

    /// Typed read-write access to `len` registers at `addr`.
    pub fn with_rw_slice<F, R>(&mut self, addr: u8, len: usize, f: F) -> Result<R, RegisterError>
    where
        F: FnOnce(RegSliceMut<'_>) -> R,
    {
        let (start, end) = range_span::<N>(addr, len)?;
        Ok(f(RegSliceMut::new(
            &mut self.engine.registers_mut()[start..end],
        )))
    }
}

impl<'a, const N: usize, P, H, C, S> HostView<'a, N, Split<N>, P, H, C, S>
where
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    /// Direct access to the whole send buffer.
    pub fn send_registers_mut(&mut self) -> &mut [u8; N] {
        self.engine.send_registers_mut()
    }

    /// Publishes `data` into the send buffer starting at `addr`.
    pub fn publish(&mut self, addr: u8, data: &[u8]) -> Result<(), RegisterError> {
        let (start, end) = range_span::<N>(addr, data.len())?;
        self.engine.send_registers_mut()[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Typed read-write access to the send buffer.
    pub fn with_send_slice<F, R>(&mut self, addr: u8, len: usize, f: F) -> Result<R, RegisterError>
    where
        F: FnOnce(RegSliceMut<'_>) -> R,
    {
        let (start, end) = range_span::<N>(addr, len)?;
        Ok(f(RegSliceMut::new(
            &mut self.engine.send_registers_mut()[start..end],
        )))
    }

    /// Copies the receive buffer into the send buffer.
    pub fn mirror_received(&mut self) {
        let received = *self.engine.registers();
        *self.engine.send_registers_mut() = received;
    }
}
