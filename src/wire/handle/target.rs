#![allow(unsafe_code)]

use crate::wire::{
    layout::Layout,
    policy::{ReceiveHook, SendHook, WriteProtect},
    shared::SharedRegisterMap,
    transport::{Clock, TargetBus},
};

/// Callback-side handle: feeds bus events into the register map.
///
/// From the bus interrupt, call the `*_unchecked` handlers: the interrupt
/// already excludes application code that goes through
/// [`HostHandle::with_view`](crate::wire::HostHandle::with_view), so the
/// handler path takes no lock. The checked handlers are for drivers that
/// deliver events from thread context.
pub struct TargetHandle<'a, const N: usize, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    shared: &'a SharedRegisterMap<N, L, P, H, C, S>,
}

impl<'a, const N: usize, L, P, H, C, S> core::fmt::Debug for TargetHandle<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TargetHandle").finish_non_exhaustive()
    }
}

impl<'a, const N: usize, L, P, H, C, S> Clone for TargetHandle<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize, L, P, H, C, S> Copy for TargetHandle<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
}

impl<'a, const N: usize, L, P, H, C, S> TargetHandle<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    pub(crate) fn new(shared: &'a SharedRegisterMap<N, L, P, H, C, S>) -> Self {
        Self { shared }
    }

    /// Runs the receive handler inside a critical section.
    ///
    /// For drivers that call back from thread context. Inside an interrupt
    /// handler prefer [`Self::on_data_received_unchecked`].
    pub fn on_data_received<T: TargetBus>(&self, bus: &mut T) {
        critical_section::with(|_| unsafe { self.on_data_received_unchecked(bus) })
    }

    /// Runs the request handler inside a critical section.
    ///
    /// Inside an interrupt handler prefer [`Self::on_data_requested_unchecked`].
    pub fn on_data_requested<T: TargetBus>(&self, bus: &mut T) {
        critical_section::with(|_| unsafe { self.on_data_requested_unchecked(bus) })
    }

    /// Runs the receive handler without taking a critical section.
    ///
    /// # Safety
    /// No other code may access the register map for the duration of the
    /// call. This holds inside the bus interrupt when application code only
    /// touches the map through [`HostHandle::with_view`](crate::wire::HostHandle::with_view)
    /// and no other interrupt uses it.
    pub unsafe fn on_data_received_unchecked<T: TargetBus>(&self, bus: &mut T) {
        let engine = unsafe { &mut *self.shared.engine.get() };
        engine.on_data_received(bus);
    }

    /// Runs the request handler without taking a critical section.
    ///
    /// # Safety
    /// Same contract as [`Self::on_data_received_unchecked`].
    pub unsafe fn on_data_requested_unchecked<T: TargetBus>(&self, bus: &mut T) {
        let engine = unsafe { &mut *self.shared.engine.get() };
        engine.on_data_requested(bus);
    }
}
