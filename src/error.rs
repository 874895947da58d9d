use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{digital::OutputPin, spi::SpiBus};

/// A failure of the bus or one of the control lines
///
/// There is no retry at this layer. After a transport failure the controller
/// state is unknown and the only way back is a full
/// [reinitialization](crate::ili9341::Ili9341::reinitialize).
pub enum TransportError<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Encountered an SPI error
    Spi(SPI::Error),

    /// Encountered an error on the chip select GPIO
    ChipSelect(CS::Error),

    /// Encountered an error on the data/command GPIO
    DataCommand(DC::Error),

    /// Encountered an error on the reset GPIO
    Reset(RST::Error),
}

impl<SPI, CS, DC, RST> Debug for TransportError<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(err) => f.debug_tuple("Spi").field(err).finish(),
            Self::ChipSelect(err) => f.debug_tuple("ChipSelect").field(err).finish(),
            Self::DataCommand(err) => f.debug_tuple("DataCommand").field(err).finish(),
            Self::Reset(err) => f.debug_tuple("Reset").field(err).finish(),
        }
    }
}

impl<SPI, CS, DC, RST> Display for TransportError<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(err) => write!(f, "spi transfer failed: {err:?}"),
            Self::ChipSelect(err) => write!(f, "chip select line failed: {err:?}"),
            Self::DataCommand(err) => write!(f, "data/command line failed: {err:?}"),
            Self::Reset(err) => write!(f, "reset line failed: {err:?}"),
        }
    }
}

/// Driver error type
pub enum Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// The orientation (in degrees) is not one of 0, 90, 180 or 270
    InvalidOrientation(u16),

    /// The pixel coordinate lies outside of the display
    OutOfBounds {
        /// Column
        x: i32,
        /// Row
        y: i32,
    },

    /// The pixel buffer was released, see [`Framebuffer::release`](crate::framebuffer::Framebuffer::release)
    Released,

    /// A transfer failed after the display was initialised
    Transport(TransportError<SPI, CS, DC, RST>),

    /// The power up sequence failed, the display is unusable
    Initialization(TransportError<SPI, CS, DC, RST>),
}

impl<SPI, CS, DC, RST> Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// The underlying transport error, if there is one
    pub fn transport(&self) -> Option<&TransportError<SPI, CS, DC, RST>> {
        match self {
            Self::Transport(err) | Self::Initialization(err) => Some(err),
            _ => None,
        }
    }
}

impl<SPI, CS, DC, RST> Debug for Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidOrientation(degrees) => {
                f.debug_tuple("InvalidOrientation").field(degrees).finish()
            }
            Self::OutOfBounds { x, y } => f
                .debug_struct("OutOfBounds")
                .field("x", x)
                .field("y", y)
                .finish(),
            Self::Released => f.write_str("Released"),
            Self::Transport(err) => f.debug_tuple("Transport").field(err).finish(),
            Self::Initialization(err) => f.debug_tuple("Initialization").field(err).finish(),
        }
    }
}

impl<SPI, CS, DC, RST> Display for Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidOrientation(degrees) => Display::fmt(&InvalidOrientation(*degrees), f),
            Self::OutOfBounds { x, y } => {
                Display::fmt(&FramebufferError::OutOfBounds { x: *x, y: *y }, f)
            }
            Self::Released => Display::fmt(&FramebufferError::Released, f),
            Self::Transport(err) => Display::fmt(err, f),
            Self::Initialization(err) => write!(f, "display initialization failed: {err}"),
        }
    }
}

impl<SPI, CS, DC, RST> From<TransportError<SPI, CS, DC, RST>> for Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn from(err: TransportError<SPI, CS, DC, RST>) -> Self {
        Self::Transport(err)
    }
}

impl<SPI, CS, DC, RST> From<FramebufferError> for Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn from(err: FramebufferError) -> Self {
        match err {
            FramebufferError::OutOfBounds { x, y } => Self::OutOfBounds { x, y },
            FramebufferError::Released => Self::Released,
        }
    }
}

impl<SPI, CS, DC, RST> From<InvalidOrientation> for Error<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn from(err: InvalidOrientation) -> Self {
        Self::InvalidOrientation(err.0)
    }
}

/// Errors of the in-memory pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferError {
    /// The pixel coordinate lies outside of the buffer
    OutOfBounds {
        /// Column
        x: i32,
        /// Row
        y: i32,
    },
    /// The buffer is released and holds no pixels
    Released,
}

impl Display for FramebufferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "pixel ({x}, {y}) is out of bounds"),
            Self::Released => f.write_str("the pixel buffer is released"),
        }
    }
}

/// An orientation other than 0, 90, 180 or 270 degrees was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidOrientation(pub u16);

impl Display for InvalidOrientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "orientation must be 0, 90, 180 or 270 degrees, not {}",
            self.0
        )
    }
}
