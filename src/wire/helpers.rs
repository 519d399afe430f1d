//! Address arithmetic shared by the register map views and the controller.

use crate::wire::RegisterError;

/// Calculates the byte offset range for a register address and length.
///
/// Returns `(start_offset, end_offset)` where end is exclusive.
///
/// # Errors
/// * [`RegisterError::ZeroLength`] - if `len` is 0
/// * [`RegisterError::OutOfBounds`] - if the range runs past `N` registers
///
/// # Example
/// ```
/// use wire_regmap::wire::helpers::range_span;
///
/// assert_eq!(range_span::<16>(4, 2), Ok((4, 6)));
/// assert!(range_span::<16>(15, 2).is_err());
/// ```
pub fn range_span<const N: usize>(addr: u8, len: usize) -> Result<(usize, usize), RegisterError> {
    if len == 0 {
        return Err(RegisterError::ZeroLength);
    }

    let offset = addr as usize;
    let end = offset.checked_add(len).ok_or(RegisterError::OutOfBounds)?;

    if end > N {
        return Err(RegisterError::OutOfBounds);
    }

    Ok((offset, end))
}

/// One piece of a chunked transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Register the chunk starts at.
    pub register: u8,
    /// Offset of the chunk inside the caller's buffer.
    pub offset: usize,
    pub len: usize,
}

/// Splits a transfer of `len` bytes starting at `register` into blocks of at
/// most `block` bytes, at registers `register`, `register + block`, and so on.
///
/// Register addresses wrap in the one-byte address space. A `block` of zero
/// yields the whole transfer as one chunk; chunks never exceed 255 bytes, the
/// most a single read request can ask for.
///
/// # Example
/// ```
/// use wire_regmap::wire::helpers::chunks;
///
/// let lens: Vec<_> = chunks(0x10, 10, 4).map(|c| (c.register, c.len)).collect();
/// assert_eq!(lens, [(0x10, 4), (0x14, 4), (0x18, 2)]);
/// ```
pub fn chunks(register: u8, len: usize, block: usize) -> Chunks {
    let block = match block {
        0 => len,
        b => b,
    }
    .clamp(1, u8::MAX as usize);
    Chunks {
        register,
        offset: 0,
        len,
        block,
    }
}

/// Iterator returned by [`chunks`].
#[derive(Debug, Clone)]
pub struct Chunks {
    register: u8,
    offset: usize,
    len: usize,
    block: usize,
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.offset >= self.len {
            return None;
        }
        let len = self.block.min(self.len - self.offset);
        let chunk = Chunk {
            register: self.register.wrapping_add(self.offset as u8),
            offset: self.offset,
            len,
        };
        self.offset += len;
        Some(chunk)
    }
}
