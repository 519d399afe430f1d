#![allow(unsafe_code)]

use crate::wire::{
    activity::ActivitySnapshot,
    layout::Layout,
    policy::{ReceiveHook, SendHook, WriteProtect},
    shared::SharedRegisterMap,
    transport::Clock,
    view::HostView,
};

/// Application-side handle to a shared register map.
pub struct HostHandle<'a, const N: usize, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    shared: &'a SharedRegisterMap<N, L, P, H, C, S>,
}

impl<'a, const N: usize, L, P, H, C, S> core::fmt::Debug for HostHandle<'a, N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostHandle").finish_non_exhaustive()
    }
}

impl<'a, const N: usize, L, P, H, C, S> HostHandle<'a, N, L, P, H, C, S>
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

    /// Runs `f` with bus callbacks held off, so everything it reads is consistent.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut HostView<'_, N, L, P, H, C, S>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_view_unchecked(f) })
    }

    /// # Safety
    /// Requires exclusive access to the register map: bus callbacks must not
    /// run while `f` executes, e.g. during init before the transport is
    /// enabled.
    pub unsafe fn with_view_unchecked<R>(
        &self,
        f: impl FnOnce(&mut HostView<'_, N, L, P, H, C, S>) -> R,
    ) -> R {
        let engine = unsafe { &mut *self.shared.engine.get() };
        let mut view = HostView::new(engine);
        f(&mut view)
    }

    /// Copies cursor and activity fields in one critical section.
    pub fn snapshot(&self) -> ActivitySnapshot {
        self.with_view(|view| view.snapshot())
    }
}
