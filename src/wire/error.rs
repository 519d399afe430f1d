/// Failure reported by the bus transport when closing a controller transaction.
///
/// The transport speaks in raw status codes (`0` is success). This type keeps the
/// conventional meanings while preserving any code it does not recognise, so
/// [`TransmissionError::code`] always returns the value the transport produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionError {
    /// Payload exceeded the transport's transaction buffer (code 1).
    DataTooLong,
    /// Address byte was not acknowledged (code 2).
    AddressNack,
    /// A data byte was not acknowledged (code 3).
    DataNack,
    /// Any other bus-level failure (code 4).
    Other,
    /// Transport-specific code outside the conventional range.
    Unknown(u8),
}

impl TransmissionError {
    /// Maps a raw transport status to an error; `0` maps to `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::DataTooLong),
            2 => Some(Self::AddressNack),
            3 => Some(Self::DataNack),
            4 => Some(Self::Other),
            other => Some(Self::Unknown(other)),
        }
    }

    /// Returns the raw transport status this error was built from.
    pub const fn code(self) -> u8 {
        match self {
            Self::DataTooLong => 1,
            Self::AddressNack => 2,
            Self::DataNack => 3,
            Self::Other => 4,
            Self::Unknown(code) => code,
        }
    }

    /// Turns a raw transport status into a `Result`.
    #[inline]
    pub const fn check(code: u8) -> Result<(), Self> {
        match Self::from_code(code) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl core::fmt::Display for TransmissionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransmissionError::DataTooLong => write!(f, "payload exceeded transport capacity"),
            TransmissionError::AddressNack => write!(f, "address not acknowledged"),
            TransmissionError::DataNack => write!(f, "data not acknowledged"),
            TransmissionError::Other => write!(f, "bus error"),
            TransmissionError::Unknown(code) => write!(f, "transport status {code}"),
        }
    }
}

/// Errors from host-side register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// Address or length exceeds the register map.
    OutOfBounds,
    /// Operation attempted with zero length.
    ZeroLength,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterError::OutOfBounds => write!(f, "address or length exceeds register map"),
            RegisterError::ZeroLength => write!(f, "operation attempted with zero length"),
        }
    }
}
