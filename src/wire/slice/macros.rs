/// Generates `read_<ty>_{le,be}_at` for each listed multi-byte primitive.
macro_rules! register_readers {
    ($($type:ty => $size:literal),* $(,)?) => {
        $(paste::paste! {
            #[doc = "Reads a little-endian `" $type "` starting at register offset `offset`."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<read_ $type _le_at>](&self, offset: usize) -> $type {
                <$type>::from_le_bytes(self.window::<$size>(offset))
            }

            #[doc = "Reads a big-endian `" $type "` starting at register offset `offset`."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<read_ $type _be_at>](&self, offset: usize) -> $type {
                <$type>::from_be_bytes(self.window::<$size>(offset))
            }
        })*

        #[inline]
        fn window<const W: usize>(&self, offset: usize) -> [u8; W] {
            assert!(
                offset + W <= self.0.len(),
                "register read out of bounds: offset {} + size {} > len {}",
                offset, W, self.0.len()
            );
            let mut out = [0u8; W];
            out.copy_from_slice(&self.0[offset..offset + W]);
            out
        }

        /// Reads the register at `offset`.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn read_u8_at(&self, offset: usize) -> u8 {
            self.0[offset]
        }

        /// Copies registers starting at `offset` into `dest`.
        ///
        /// # Panics
        /// Panics if the range exceeds slice bounds.
        #[inline]
        pub fn copy_to_slice_at(&self, offset: usize, dest: &mut [u8]) {
            dest.copy_from_slice(&self.0[offset..offset + dest.len()]);
        }

        #[inline]
        pub fn as_bytes(&self) -> &[u8] {
            &self.0[..]
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.0.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    };
}

/// Generates `write_<ty>_{le,be}_at` for each listed multi-byte primitive.
macro_rules! register_writers {
    ($($type:ty => $size:literal),* $(,)?) => {
        $(paste::paste! {
            #[doc = "Writes a little-endian `" $type "` starting at register offset `offset`."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<write_ $type _le_at>](&mut self, offset: usize, value: $type) {
                self.copy_from_slice_at(offset, &value.to_le_bytes());
            }

            #[doc = "Writes a big-endian `" $type "` starting at register offset `offset`."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<write_ $type _be_at>](&mut self, offset: usize, value: $type) {
                self.copy_from_slice_at(offset, &value.to_be_bytes());
            }
        })*

        /// Sets the register at `offset`.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn write_u8_at(&mut self, offset: usize, value: u8) {
            self.0[offset] = value;
        }

        /// Copies `src` into registers starting at `offset`.
        ///
        /// # Panics
        /// Panics if the range exceeds slice bounds.
        #[inline]
        pub fn copy_from_slice_at(&mut self, offset: usize, src: &[u8]) {
            assert!(
                offset + src.len() <= self.0.len(),
                "register write out of bounds: offset {} + size {} > len {}",
                offset, src.len(), self.0.len()
            );
            self.0[offset..offset + src.len()].copy_from_slice(src);
        }

        #[inline]
        pub fn fill(&mut self, value: u8) {
            self.0.fill(value);
        }
    };
}

pub(super) use register_readers;
pub(super) use register_writers;
