//! A Driver for ILI9341/ST7789 class TFT Displays via SPI
//!
//! This driver was built using [`embedded-hal`] traits and keeps a full RGB565
//! frame in memory. Drawing happens in that buffer, a flush sends it to the
//! controller in one memory write.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - [`SPI_MODE`] is used (CPHA = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - The bus is clocked at up to [`SPI_FREQUENCY_HZ`]
//!
//! ### Lines
//!
//! - Chip select, data/command and reset are plain output pins owned by the driver
//! - The backlight is not handled here
//!
//! ### Other....
//!
//! - Buffersize: the framebuffer always holds `width * height * 2` bytes
//! - Colors are stored byte swapped, see [`color::encode_color`]
//!
//! # Examples
//!
//! ```ignore
//! use tft_display::prelude::*;
//!
//! let mut display = Ili9341::new(spi, cs, dc, rst, &mut delay, DisplayConfig::default())?;
//!
//! // draw something into the buffer
//! display.fill(BLACK)?;
//! display.set_pixel(120, 120, encode_color(255, 0, 0))?;
//!
//! // and show it
//! display.flush()?;
//!
//! display.apply_rotation_degrees(90)?;
//! display.power_off(&mut delay)?;
//! ```
//!
//!
#![no_std]

extern crate alloc;

#[cfg(feature = "graphics")]
pub mod graphics;

mod traits;
pub use traits::PixelBuffer;

pub mod color;
pub use color::encode_color;

pub mod error;

pub mod framebuffer;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod rotation;

pub mod ili9341;

#[cfg(test)]
mod test_utils;

/// Includes everything important besides the chosen display
pub mod prelude {
    pub use crate::color::{encode_color, BLACK, BLUE, GREEN, RED, WHITE};
    pub use crate::error::{Error, FramebufferError, InvalidOrientation, TransportError};
    pub use crate::framebuffer::{DisplayGeometry, Framebuffer};
    pub use crate::ili9341::{DisplayConfig, Ili9341};
    pub use crate::rotation::Orientation;
    pub use crate::traits::PixelBuffer;
    pub use crate::{SPI_FREQUENCY_HZ, SPI_MODE};

    #[cfg(feature = "graphics")]
    pub use crate::graphics::Canvas;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// Fastest SPI clock the controller is driven with
pub const SPI_FREQUENCY_HZ: u32 = 62_500_000;
