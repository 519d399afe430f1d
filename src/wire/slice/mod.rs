//! Typed views over a run of registers.
//!
//! Multi-byte register values are read and written with explicit endianness,
//! since devices on the bus disagree about byte order.

mod macros;

use macros::{register_readers, register_writers};

/// Read-only run of registers.
#[derive(Debug, Clone, Copy)]
pub struct RegSlice<'a>(&'a [u8]);

impl<'a> RegSlice<'a> {
    #[inline]
    pub fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    register_readers!(u16 => 2, i16 => 2, u32 => 4, i32 => 4);
}

/// Read-write run of registers.
#[derive(Debug)]
pub struct RegSliceMut<'a>(&'a mut [u8]);

impl<'a> RegSliceMut<'a> {
    #[inline]
    pub fn new(slice: &'a mut [u8]) -> Self {
        Self(slice)
    }

    register_readers!(u16 => 2, i16 => 2, u32 => 4, i32 => 4);
    register_writers!(u16 => 2, i16 => 2, u32 => 4, i32 => 4);
}
