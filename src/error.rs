//! Error handling primitives for the LPS2X driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface, including a missing ACK on `begin`.
    Interface(E),
    /// `WHO_AM_I` returned something other than the LPS2X chip id.
    DeviceIdMismatch(u8),
    /// The software reset bit never cleared within the configured attempt budget.
    ResetTimeout,
    /// The driver has not been initialized successfully yet.
    NotInitialized,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// A register field held an encoding the datasheet does not define.
    UnexpectedRegisterData,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
