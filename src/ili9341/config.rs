use crate::error::InvalidOrientation;
use crate::framebuffer::DisplayGeometry;
use crate::rotation::Orientation;

use super::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Display configuration
///
/// The bus itself is configured by the caller's HAL, see [`SPI_MODE`](crate::SPI_MODE)
/// and [`SPI_FREQUENCY_HZ`](crate::SPI_FREQUENCY_HZ).
pub struct DisplayConfig {
    /// Width of the panel in pixels
    pub width: u16,
    /// Height of the panel in pixels
    pub height: u16,
    /// Orientation written to the controller during initialization
    pub orientation: Orientation,
}

impl DisplayConfig {
    /// Creates a new configuration
    pub const fn new(width: u16, height: u16, orientation: Orientation) -> Self {
        DisplayConfig {
            width,
            height,
            orientation,
        }
    }

    /// Creates a new configuration from an angle in degrees
    ///
    /// Fails for anything but 0, 90, 180 and 270 before any hardware is touched.
    pub fn with_orientation_degrees(
        width: u16,
        height: u16,
        degrees: u16,
    ) -> Result<Self, InvalidOrientation> {
        Ok(DisplayConfig::new(
            width,
            height,
            Orientation::from_degrees(degrees)?,
        ))
    }

    /// Size of the pixel buffer
    pub fn geometry(&self) -> DisplayGeometry {
        DisplayGeometry::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig::new(WIDTH, HEIGHT, Orientation::Rotate0)
    }
}
