//! In-memory pixel buffer
//!
//! Every pixel takes two bytes at offset `2 * (y * width + x)`, stored in the
//! byte order the controller expects (see [`color`](crate::color)). Drawing only
//! touches memory, nothing is visible before the buffer is flushed to the
//! controller in one go.
//!
//! On a device with little RAM the buffer can be [released](Framebuffer::release)
//! so another subsystem can use the memory, and [reallocated](Framebuffer::reallocate)
//! later on.

use alloc::{vec, vec::Vec};

use embedded_hal::{digital::OutputPin, spi::SpiBus};
use log::{debug, trace, warn};

use crate::color::{color_from_bytes, color_to_bytes};
use crate::error::{FramebufferError, TransportError};
use crate::ili9341::command::Command;
use crate::interface::DisplayInterface;
use crate::rotation::Orientation;
use crate::traits::PixelBuffer;

/// Bytes per pixel
pub const BYTES_PER_PIXEL: usize = 2;

/// Size of the stand-in buffer of a released framebuffer: a single pixel
pub const PLACEHOLDER_LEN: usize = BYTES_PER_PIXEL;

/// Size of the display in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl DisplayGeometry {
    /// Creates a new geometry
    pub const fn new(width: u16, height: u16) -> Self {
        DisplayGeometry { width, height }
    }

    /// Number of bytes a buffer of this size needs: `2 * width * height`
    pub const fn buffer_len(self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Whether `(x, y)` is a valid pixel coordinate
    pub fn contains(self, x: i32, y: i32) -> bool {
        (0..i32::from(self.width)).contains(&x) && (0..i32::from(self.height)).contains(&y)
    }

    /// Width and height as seen when drawing in `orientation`
    ///
    /// Rotating never changes the buffer. For 90° and 270° the panel's rows and
    /// columns are exchanged, so a caller drawing in one of those has to use the
    /// transposed size.
    pub fn oriented(self, orientation: Orientation) -> Self {
        if orientation.is_transposed() {
            DisplayGeometry::new(self.height, self.width)
        } else {
            self
        }
    }
}

/// Whether a framebuffer holds its pixels
enum BufferState {
    /// Full size buffer, exactly `geometry.buffer_len()` bytes
    Allocated(Vec<u8>),
    /// Single pixel stand-in while the memory is handed to someone else
    Released([u8; PLACEHOLDER_LEN]),
}

/// Owned RGB565 pixel buffer
pub struct Framebuffer {
    geometry: DisplayGeometry,
    state: BufferState,
}

impl Framebuffer {
    /// Allocates a zeroed (black) buffer for `geometry`
    pub fn new(geometry: DisplayGeometry) -> Self {
        Framebuffer {
            geometry,
            state: BufferState::Allocated(vec![0u8; geometry.buffer_len()]),
        }
    }

    /// Size of the buffer in pixels
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.geometry.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.geometry.height
    }

    /// `true` between [release](Framebuffer::release) and [reallocate](Framebuffer::reallocate)
    pub fn is_released(&self) -> bool {
        matches!(self.state, BufferState::Released(_))
    }

    /// The raw bytes
    ///
    /// Returns the single pixel placeholder while the buffer is released.
    pub fn buffer(&self) -> &[u8] {
        match &self.state {
            BufferState::Allocated(buffer) => buffer,
            BufferState::Released(placeholder) => placeholder,
        }
    }

    /// The raw bytes for writing
    ///
    /// Whatever is written here has to use the buffer's pixel layout, nothing is
    /// checked.
    pub fn buffer_mut(&mut self) -> Result<&mut [u8], FramebufferError> {
        match &mut self.state {
            BufferState::Allocated(buffer) => Ok(buffer),
            BufferState::Released(_) => Err(FramebufferError::Released),
        }
    }

    fn offset(&self, x: i32, y: i32) -> Result<usize, FramebufferError> {
        if !self.geometry.contains(x, y) {
            return Err(FramebufferError::OutOfBounds { x, y });
        }
        let index = y as usize * self.geometry.width as usize + x as usize;
        Ok(index * BYTES_PER_PIXEL)
    }

    /// Sets the pixel at `(x, y)` to an encoded color
    ///
    /// Coordinates outside of the buffer are rejected and nothing is written.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), FramebufferError> {
        let offset = self.offset(x, y)?;
        let buffer = self.buffer_mut()?;
        buffer[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color_to_bytes(color));
        Ok(())
    }

    /// Reads the encoded color of the pixel at `(x, y)`
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u16, FramebufferError> {
        let offset = self.offset(x, y)?;
        match &self.state {
            BufferState::Allocated(buffer) => {
                Ok(color_from_bytes([buffer[offset], buffer[offset + 1]]))
            }
            BufferState::Released(_) => Err(FramebufferError::Released),
        }
    }

    /// Sets every pixel to `color`
    pub fn fill(&mut self, color: u16) -> Result<(), FramebufferError> {
        let bytes = color_to_bytes(color);
        for pixel in self.buffer_mut()?.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&bytes);
        }
        Ok(())
    }

    /// Sets every pixel to black
    pub fn clear(&mut self) -> Result<(), FramebufferError> {
        self.buffer_mut()?.fill(0);
        Ok(())
    }

    /// Copies raw pixel data into the buffer, starting at the first pixel
    ///
    /// The bytes go in as they are, without any decoding, so `bytes` has to be in
    /// the buffer's own layout. This is a bulk copy, not an image loader: a wrong
    /// format just ends up as a garbled picture. At most [`buffer_len`](DisplayGeometry::buffer_len)
    /// bytes are taken, the number of copied bytes is returned.
    pub fn load_raw(&mut self, bytes: &[u8]) -> Result<usize, FramebufferError> {
        let buffer = self.buffer_mut()?;
        let len = bytes.len().min(buffer.len());
        buffer[..len].copy_from_slice(&bytes[..len]);
        if len < buffer.len() {
            warn!(
                "raw load filled only {} of {} framebuffer bytes",
                len,
                buffer.len()
            );
        }
        Ok(len)
    }

    /// Frees the pixel memory
    ///
    /// The buffer shrinks to a single pixel placeholder. Drawing is refused until
    /// [reallocate](Framebuffer::reallocate) is called.
    pub fn release(&mut self) {
        debug!("releasing {} framebuffer bytes", self.buffer().len());
        self.state = BufferState::Released([0u8; PLACEHOLDER_LEN]);
    }

    /// Allocates a fresh, zeroed buffer for `geometry`
    ///
    /// Also works on an allocated buffer, which is replaced as a whole.
    pub fn reallocate(&mut self, geometry: DisplayGeometry) {
        debug!(
            "allocating {}x{} framebuffer ({} bytes)",
            geometry.width,
            geometry.height,
            geometry.buffer_len()
        );
        // drop the old buffer first so both never have to fit at the same time
        self.state = BufferState::Released([0u8; PLACEHOLDER_LEN]);
        self.state = BufferState::Allocated(vec![0u8; geometry.buffer_len()]);
        self.geometry = geometry;
    }

    /// Sends the whole buffer to the controller RAM as one memory write
    pub(crate) fn flush<SPI, CS, DC, RST>(
        &self,
        interface: &mut DisplayInterface<SPI, CS, DC, RST>,
    ) -> Result<(), TransportError<SPI, CS, DC, RST>>
    where
        SPI: SpiBus,
        CS: OutputPin,
        DC: OutputPin,
        RST: OutputPin,
    {
        let buffer = self.buffer();
        trace!("flushing {} bytes", buffer.len());
        interface.cmd_with_data(Command::MEMORY_WRITE, buffer)
    }
}

impl PixelBuffer for Framebuffer {
    type Error = FramebufferError;

    fn width(&self) -> u16 {
        self.geometry.width
    }

    fn height(&self) -> u16 {
        self.geometry.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Self::Error> {
        Framebuffer::set_pixel(self, x, y, color)
    }

    fn get_pixel(&self, x: i32, y: i32) -> Result<u16, Self::Error> {
        Framebuffer::get_pixel(self, x, y)
    }

    fn fill(&mut self, color: u16) -> Result<(), Self::Error> {
        Framebuffer::fill(self, color)
    }
}
