#![allow(unsafe_code)]

use core::cell::UnsafeCell;

use crate::wire::{
    engine::RegisterMap,
    handle::{HostHandle, TargetHandle},
    layout::Layout,
    policy::{ReceiveHook, SendHook, WriteProtect},
    transport::Clock,
};

/// Register map that bus callbacks and application code share.
///
/// Place it in a `static`, give the transport's callbacks a
/// [`TargetHandle`] and the main loop a [`HostHandle`]. The two bus events are
/// assumed never to preempt each other; they may preempt the application at
/// any point.
pub struct SharedRegisterMap<const N: usize, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    pub(crate) engine: UnsafeCell<RegisterMap<N, L, P, H, C, S>>,
}

// SAFETY: every access to `engine` goes through a critical section or through
// an `unsafe` entry point whose caller guarantees exclusive access.
unsafe impl<const N: usize, L, P, H, C, S> Sync for SharedRegisterMap<N, L, P, H, C, S>
where
    L: Layout<N> + Send,
    P: WriteProtect + Send,
    H: ReceiveHook + Send,
    C: Clock + Send,
    S: SendHook + Send,
{
}

impl<const N: usize, L, P, H, C, S> SharedRegisterMap<N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    pub fn new(engine: RegisterMap<N, L, P, H, C, S>) -> Self {
        Self {
            engine: UnsafeCell::new(engine),
        }
    }

    /// Handle for the transport's receive and request callbacks.
    pub fn target(&self) -> TargetHandle<'_, N, L, P, H, C, S> {
        TargetHandle::new(self)
    }

    /// Handle for application code.
    pub fn host(&self) -> HostHandle<'_, N, L, P, H, C, S> {
        HostHandle::new(self)
    }

    /// Takes the engine back once no handle is alive.
    pub fn into_inner(self) -> RegisterMap<N, L, P, H, C, S> {
        self.engine.into_inner()
    }
}

impl<const N: usize, L, P, H, C, S> core::fmt::Debug for SharedRegisterMap<N, L, P, H, C, S>
where
    L: Layout<N>,
    P: WriteProtect,
    H: ReceiveHook,
    C: Clock,
    S: SendHook,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedRegisterMap").finish_non_exhaustive()
    }
}
