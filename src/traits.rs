/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Read/write access to a packed RGB565 pixel buffer
///
/// This is the capability the drawing layer (see the `graphics` feature) is
/// built on: anything that knows its size and can read and write a single
/// pixel can be drawn on. Colors are the 16-bit values produced by
/// [`encode_color`](crate::color::encode_color).
pub trait PixelBuffer {
    /// The error returned for pixel accesses
    type Error;

    /// Width in pixels
    fn width(&self) -> u16;

    /// Height in pixels
    fn height(&self) -> u16;

    /// Write one pixel
    fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Self::Error>;

    /// Read one pixel back
    fn get_pixel(&self, x: i32, y: i32) -> Result<u16, Self::Error>;

    /// Set every pixel to `color`
    fn fill(&mut self, color: u16) -> Result<(), Self::Error> {
        for y in 0..i32::from(self.height()) {
            for x in 0..i32::from(self.width()) {
                self.set_pixel(x, y, color)?;
            }
        }
        Ok(())
    }
}
