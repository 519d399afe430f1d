pub mod activity;
pub mod builder;
pub mod controller;
pub mod engine;
pub mod error;
pub mod handle;
pub mod helpers;
pub mod layout;
pub mod policy;
pub mod shared;
pub mod slice;
pub mod strategy;
pub mod transport;
pub mod view;

#[cfg(test)]
mod test_support;

pub use activity::{Activity, ActivitySnapshot};
pub use builder::RegisterMapBuilder;
pub use controller::{Controller, ControllerConfig, PRESENCE_SETTLE_MS};
pub use engine::RegisterMap;
pub use error::{RegisterError, TransmissionError};
pub use handle::{HostHandle, TargetHandle};
pub use layout::{Layout, Split, Unified};
pub use policy::{
    AllowAllWrites, NoHook, NoSendHook, ProtectedMask, ProtectedRanges, ReceiveHook, SendHook,
    WriteProtect,
};
pub use shared::SharedRegisterMap;
pub use slice::{RegSlice, RegSliceMut};
pub use strategy::{DEFAULT_CHUNK, EXHAUSTED_SENTINEL, SMALL_TRANSPORT_CHUNK, SendStrategy};
pub use transport::{Clock, ControllerBus, NoClock, TargetBus};
pub use view::HostView;

pub mod prelude {
    pub use super::{
        Activity, ActivitySnapshot, AllowAllWrites, Clock, Controller, ControllerBus,
        ControllerConfig, DEFAULT_CHUNK, HostHandle, HostView, NoClock, NoHook, NoSendHook,
        ProtectedMask, ProtectedRanges, ReceiveHook, RegSlice, RegSliceMut, RegisterError,
        RegisterMap, RegisterMapBuilder, SMALL_TRANSPORT_CHUNK, SendHook, SendStrategy,
        SharedRegisterMap, Split, TargetBus, TargetHandle, TransmissionError, Unified,
        WriteProtect,
    };
}
