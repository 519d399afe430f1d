//! A `no_std`, no-alloc register-map layer for two-wire (I²C-style) buses.
//!
//! Two roles are covered:
//!
//! - **Controller**: [`Controller`](wire::Controller) reads and writes runs of
//!   registers on a remote device through a one-byte register address, with
//!   optional presence probing and chunked transfers for transports that limit
//!   transaction size.
//! - **Peripheral**: [`RegisterMap`](wire::RegisterMap) exposes a local byte
//!   buffer as registers to a remote controller. It is driven entirely by the
//!   transport's receive and request callbacks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────────────┐
//! │   Application    │         │   Bus callbacks (ISR)    │
//! │                  │         │                          │
//! │  host().         │         │  target().               │
//! │   with_view()    │◀───────▶│   on_data_received_*()   │
//! │   snapshot()     │ shared  │   on_data_requested_*()  │
//! │                  │ buffer  │                          │
//! └──────────────────┘ + cursor└──────────────────────────┘
//! ```
//!
//! - The first byte of every controller write sets the register cursor
//! - Further written bytes are stored at the cursor, which advances per byte
//! - Controller reads return bytes from the cursor onward and advance it
//! - A cursor at or past the end reads as a single `0x00`
//!
//! The engine itself takes no lock. In an interrupt handler use
//! the `*_unchecked` entry points of [`TargetHandle`](wire::TargetHandle); the
//! application side enters a critical section through
//! [`HostHandle::with_view`](wire::HostHandle::with_view), which holds the
//! interrupt off. The checked entry points wrap each event in a critical
//! section for drivers that deliver events from thread context.
//!
//! # Example
//!
//! ```rust,no_run
//! use wire_regmap::prelude::*;
//!
//! // 16 registers; the controller may not overwrite register 0 (device id).
//! let regs = RegisterMapBuilder::new()
//!     .size::<16>()
//!     .protect(|index: usize| index == 0)
//!     .small_transport()
//!     .build_shared();
//!
//! regs.host().with_view(|view| {
//!     view.write_range(0, &[0x5A]).unwrap();
//! });
//!
//! // Inside the bus interrupt, which already excludes the application:
//! // unsafe { regs.target().on_data_received_unchecked(&mut bus) };
//! // unsafe { regs.target().on_data_requested_unchecked(&mut bus) };
//! //
//! // From a driver that calls back outside interrupt context:
//! // regs.target().on_data_received(&mut bus);
//!
//! let snapshot = regs.host().snapshot();
//! let _ = snapshot.last_received_at;
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod wire;

pub mod prelude {
    pub use crate::wire::prelude::*;
}
