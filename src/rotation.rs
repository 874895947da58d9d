//! Display orientation and the memory access control register
//!
//! Each of the four orientations maps to a fixed MADCTL byte. All of them keep
//! the BGR bit set, they only differ in the row/column order and exchange bits:
//!
//! | orientation | MADCTL | MY | MX | MV |
//! |-------------|--------|----|----|----|
//! | 0°          | `0x88` | 1  | 0  | 0  |
//! | 90°         | `0xE8` | 1  | 1  | 1  |
//! | 180°        | `0x48` | 0  | 1  | 0  |
//! | 270°        | `0x28` | 0  | 0  | 1  |

use bit_field::BitField;
use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::error::{InvalidOrientation, TransportError};
use crate::ili9341::command::Command;
use crate::interface::DisplayInterface;

/// Row/column exchange bit of MADCTL
const MADCTL_MV: usize = 5;

const MADCTL_TABLE: [(u16, u8); 4] = [(0, 0x88), (90, 0xE8), (180, 0x48), (270, 0x28)];

/// Display rotation, only 90° increments supported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Orientation {
    /// Parses an angle in degrees
    pub fn from_degrees(degrees: u16) -> Result<Self, InvalidOrientation> {
        match degrees {
            0 => Ok(Orientation::Rotate0),
            90 => Ok(Orientation::Rotate90),
            180 => Ok(Orientation::Rotate180),
            270 => Ok(Orientation::Rotate270),
            other => Err(InvalidOrientation(other)),
        }
    }

    /// The angle in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Rotate0 => 0,
            Orientation::Rotate90 => 90,
            Orientation::Rotate180 => 180,
            Orientation::Rotate270 => 270,
        }
    }

    /// The memory access control byte for this orientation
    pub fn madctl(self) -> u8 {
        MADCTL_TABLE[self as usize].1
    }

    /// Whether rows and columns are exchanged (90° and 270°)
    ///
    /// The pixel buffer is not transposed on rotation. A caller switching between
    /// a transposed and a non transposed orientation of a non square panel has to
    /// draw with swapped width and height, see
    /// [`DisplayGeometry::oriented`](crate::framebuffer::DisplayGeometry::oriented).
    pub fn is_transposed(self) -> bool {
        self.madctl().get_bit(MADCTL_MV)
    }
}

impl TryFrom<u16> for Orientation {
    type Error = InvalidOrientation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Orientation::from_degrees(degrees)
    }
}

/// Looks up the memory access control byte for an angle in degrees
pub fn resolve(degrees: u16) -> Result<u8, InvalidOrientation> {
    MADCTL_TABLE
        .iter()
        .find(|(angle, _)| *angle == degrees)
        .map(|(_, madctl)| *madctl)
        .ok_or(InvalidOrientation(degrees))
}

/// Writes the memory access control register for `orientation`
///
/// A single register write, the pixel buffer stays untouched.
pub(crate) fn apply<SPI, CS, DC, RST>(
    interface: &mut DisplayInterface<SPI, CS, DC, RST>,
    orientation: Orientation,
) -> Result<(), TransportError<SPI, CS, DC, RST>>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    interface.cmd_with_data(Command::MEMORY_ACCESS_CONTROL, &[orientation.madctl()])
}
