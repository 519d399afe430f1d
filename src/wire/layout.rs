/// Buffer layout of a register map.
///
/// The engine always owns the receive buffer. A layout decides which buffer
/// serves controller reads: the same one ([`Unified`]) or a second buffer kept
/// by the layout itself ([`Split`]).
pub trait Layout<const N: usize> {
    /// Buffer that request events read from.
    fn send_buffer<'a>(&'a self, received: &'a [u8; N]) -> &'a [u8; N];

    /// Separate send buffer, if the layout keeps one.
    fn own_send_buffer_mut(&mut self) -> Option<&mut [u8; N]>;
}

/// One buffer for both directions; controller writes are visible to the next read.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unified;

impl<const N: usize> Layout<N> for Unified {
    #[inline]
    fn send_buffer<'a>(&'a self, received: &'a [u8; N]) -> &'a [u8; N] {
        received
    }

    #[inline]
    fn own_send_buffer_mut(&mut self) -> Option<&mut [u8; N]> {
        None
    }
}

/// Separate send buffer. The engine never copies between the two; the
/// application publishes values into it from ordinary code.
#[derive(Debug, Clone, Copy)]
pub struct Split<const N: usize> {
    pub(crate) send: [u8; N],
}

impl<const N: usize> Split<N> {
    pub fn new() -> Self {
        Self { send: [0; N] }
    }
}

impl<const N: usize> Default for Split<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Layout<N> for Split<N> {
    #[inline]
    fn send_buffer<'a>(&'a self, _received: &'a [u8; N]) -> &'a [u8; N] {
        &self.send
    }

    #[inline]
    fn own_send_buffer_mut(&mut self) -> Option<&mut [u8; N]> {
        Some(&mut self.send)
    }
}
