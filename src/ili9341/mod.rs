//! A Driver for ILI9341/ST7789 class TFT displays via SPI
//!
//! The driver keeps a full frame in memory. Drawing only changes that buffer,
//! [`flush`](Ili9341::flush) sends it to the controller as a single memory write.
//! Flush once after a batch of drawing, not after every primitive.
//!
//! # Example
//!
//! ```rust, no_run
//! # use embedded_hal_mock::eh1::{delay::NoopDelay, digital::Mock as PinMock, spi::Mock as SpiMock};
//! # fn main() -> Result<(), core::fmt::Error> {
//! use tft_display::{color, ili9341::{DisplayConfig, Ili9341}};
//! # let spi = SpiMock::<u8>::new(&[]);
//! # let (cs, dc, rst) = (PinMock::new(&[]), PinMock::new(&[]), PinMock::new(&[]));
//! # let mut delay = NoopDelay::new();
//!
//! let mut display = Ili9341::new(spi, cs, dc, rst, &mut delay, DisplayConfig::default())
//!     .map_err(|_| core::fmt::Error)?;
//!
//! display.fill(color::BLACK).map_err(|_| core::fmt::Error)?;
//! display.set_pixel(0, 0, color::WHITE).map_err(|_| core::fmt::Error)?;
//! display.set_pixel(239, 239, color::BLUE).map_err(|_| core::fmt::Error)?;
//! display.flush().map_err(|_| core::fmt::Error)?;
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - ILI9341 datasheet, the ST7789 accepts the same power up sequence

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use log::debug;

use crate::error::{Error, TransportError};
use crate::framebuffer::{DisplayGeometry, Framebuffer};
use crate::interface::DisplayInterface;
use crate::rotation::{self, Orientation};

pub(crate) mod command;
use self::command::Command;

mod config;
pub use self::config::DisplayConfig;

/// Width of the handheld's panel
pub const WIDTH: u16 = 240;

/// Height of the handheld's panel
pub const HEIGHT: u16 = 240;

/// Time the controller needs after reset, sleep out, display on and MADCTL
const SETTLE_MS: u32 = 100;

/// How long the reset line is held low (and the time given to come back up)
const RESET_PULSE_MS: u32 = 50;

/// ILI9341/ST7789 driver
pub struct Ili9341<SPI, CS, DC, RST> {
    /// Connection Interface
    interface: DisplayInterface<SPI, CS, DC, RST>,
    /// Frame kept in memory
    framebuffer: Framebuffer,
    /// Orientation last written to the controller
    orientation: Orientation,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver from a SPI bus and the CS, DC and RST lines
    ///
    /// This already initialises the device: the power up sequence is sent, the
    /// pixel buffer allocated and flushed once so the panel starts out black.
    ///
    /// Any failure in here is reported as [`Error::Initialization`], the display
    /// is unusable then.
    pub fn new<DELAY: DelayNs>(
        spi: SPI,
        cs: CS,
        dc: DC,
        rst: RST,
        delay: &mut DELAY,
        config: DisplayConfig,
    ) -> Result<Self, Error<SPI, CS, DC, RST>> {
        let mut interface = DisplayInterface::new(spi, cs, dc, rst);

        init(&mut interface, config.orientation, delay).map_err(Error::Initialization)?;

        let framebuffer = Framebuffer::new(config.geometry());
        framebuffer
            .flush(&mut interface)
            .map_err(Error::Initialization)?;

        Ok(Ili9341 {
            interface,
            framebuffer,
            orientation: config.orientation,
        })
    }

    /// Runs the whole power up sequence again
    ///
    /// This is the way back after a [transport failure](Error::Transport). A
    /// released buffer is allocated again, in any case the buffer is cleared and
    /// flushed.
    pub fn reinitialize<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI, CS, DC, RST>> {
        init(&mut self.interface, self.orientation, delay).map_err(Error::Initialization)?;

        if self.framebuffer.is_released() {
            self.framebuffer.reallocate(self.framebuffer.geometry());
        } else {
            self.framebuffer.clear()?;
        }
        self.framebuffer
            .flush(&mut self.interface)
            .map_err(Error::Initialization)
    }

    /// Resets the controller with the reset line
    ///
    /// The controller loses its configuration, call [`reinitialize`](Ili9341::reinitialize)
    /// afterwards.
    pub fn hardware_reset<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI, CS, DC, RST>> {
        Ok(self.interface.reset(delay, RESET_PULSE_MS)?)
    }

    /// Gives the bus and the lines back, dropping the pixel buffer
    pub fn release_transport(self) -> (SPI, CS, DC, RST) {
        self.interface.release()
    }

    /// Size of the pixel buffer
    pub fn geometry(&self) -> DisplayGeometry {
        self.framebuffer.geometry()
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.framebuffer.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.framebuffer.height()
    }

    /// The in-memory frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The in-memory frame, for drawing with other tools
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Sets the pixel at `(x, y)` in the buffer
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Error<SPI, CS, DC, RST>> {
        Ok(self.framebuffer.set_pixel(x, y, color)?)
    }

    /// Reads the pixel at `(x, y)` from the buffer
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u16, Error<SPI, CS, DC, RST>> {
        Ok(self.framebuffer.get_pixel(x, y)?)
    }

    /// Sets every pixel of the buffer to `color`
    pub fn fill(&mut self, color: u16) -> Result<(), Error<SPI, CS, DC, RST>> {
        Ok(self.framebuffer.fill(color)?)
    }

    /// Sets every pixel of the buffer to black
    pub fn clear(&mut self) -> Result<(), Error<SPI, CS, DC, RST>> {
        Ok(self.framebuffer.clear()?)
    }

    /// Copies raw pixel data into the buffer, see [`Framebuffer::load_raw`]
    pub fn load_raw(&mut self, bytes: &[u8]) -> Result<usize, Error<SPI, CS, DC, RST>> {
        Ok(self.framebuffer.load_raw(bytes)?)
    }

    /// Transmits the whole buffer to the controller
    ///
    /// This is the only thing making drawing visible.
    pub fn flush(&mut self) -> Result<(), Error<SPI, CS, DC, RST>> {
        if self.framebuffer.is_released() {
            return Err(Error::Released);
        }
        Ok(self.framebuffer.flush(&mut self.interface)?)
    }

    /// Frees the pixel buffer so the memory can be used elsewhere
    ///
    /// Drawing and flushing fail with [`Error::Released`] until
    /// [`reallocate`](Ili9341::reallocate) is called. The panel keeps showing
    /// the last flushed frame.
    pub fn release(&mut self) {
        self.framebuffer.release();
    }

    /// Allocates a new, black buffer of the given size
    pub fn reallocate(&mut self, geometry: DisplayGeometry) {
        self.framebuffer.reallocate(geometry);
    }

    /// `true` while the pixel buffer is released
    pub fn is_released(&self) -> bool {
        self.framebuffer.is_released()
    }

    /// Orientation last written to the controller
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Changes the orientation with a single register write
    ///
    /// The buffer keeps its size: width and height are not swapped for 90° and
    /// 270°. Use [`DisplayGeometry::oriented`] and [`reallocate`](Ili9341::reallocate)
    /// if the drawing size has to follow the rotation of a non square panel.
    pub fn apply_rotation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), Error<SPI, CS, DC, RST>> {
        debug!("rotating display to {} degrees", orientation.degrees());
        rotation::apply(&mut self.interface, orientation)?;
        self.orientation = orientation;
        Ok(())
    }

    /// Changes the orientation, given in degrees
    ///
    /// Anything but 0, 90, 180 and 270 fails before the bus is touched.
    pub fn apply_rotation_degrees(&mut self, degrees: u16) -> Result<(), Error<SPI, CS, DC, RST>> {
        let orientation = Orientation::from_degrees(degrees)?;
        self.apply_rotation(orientation)
    }

    /// Inverts all colors on the panel, the buffer is untouched
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<SPI, CS, DC, RST>> {
        let command = if inverted {
            Command::INVERSION_ON
        } else {
            Command::INVERSION_OFF
        };
        Ok(self.interface.cmd(command)?)
    }

    /// Blanks the panel, switches it off and lets the controller sleep
    ///
    /// A released buffer is not allocated just for blanking, the panel is
    /// switched off with whatever it showed.
    pub fn power_off<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI, CS, DC, RST>> {
        debug!("powering display off");
        if !self.framebuffer.is_released() {
            self.framebuffer.clear()?;
            self.framebuffer.flush(&mut self.interface)?;
        }
        self.interface.cmd(Command::DISPLAY_OFF)?;
        delay.delay_ms(SETTLE_MS);
        self.interface.cmd(Command::SLEEP_IN)?;
        delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// Wakes the controller up and switches the panel back on
    pub fn power_on<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), Error<SPI, CS, DC, RST>> {
        debug!("powering display on");
        self.interface.cmd(Command::SLEEP_OUT)?;
        delay.delay_ms(SETTLE_MS);
        self.interface.cmd(Command::DISPLAY_ON)?;
        delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// A drawing surface for embedded-graphics on top of the pixel buffer
    #[cfg(feature = "graphics")]
    pub fn canvas(&mut self) -> crate::graphics::Canvas<'_, Framebuffer> {
        crate::graphics::Canvas::new(&mut self.framebuffer)
    }
}

/// Sends the power up sequence
///
/// The order and the register values are fixed, only MADCTL depends on the
/// orientation.
fn init<SPI, CS, DC, RST, DELAY>(
    interface: &mut DisplayInterface<SPI, CS, DC, RST>,
    orientation: Orientation,
    delay: &mut DELAY,
) -> Result<(), TransportError<SPI, CS, DC, RST>>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    debug!(
        "initializing display, orientation {} degrees",
        orientation.degrees()
    );
    interface.prepare()?;

    interface.cmd(Command::SOFTWARE_RESET)?;
    delay.delay_ms(SETTLE_MS);

    interface.cmd_with_data(Command::POWER_CONTROL_B, &[0x00, 0xC1, 0x30])?;
    interface.cmd_with_data(Command::POWER_ON_SEQUENCE_CONTROL, &[0x64, 0x03, 0x12, 0x81])?;
    interface.cmd_with_data(Command::DRIVER_TIMING_CONTROL_A, &[0x85, 0x00, 0x78])?;
    interface.cmd_with_data(Command::POWER_CONTROL_A, &[0x39, 0x2C, 0x00, 0x34, 0x02])?;
    interface.cmd_with_data(Command::PUMP_RATIO_CONTROL, &[0x20])?;
    interface.cmd_with_data(Command::DRIVER_TIMING_CONTROL_B, &[0x00, 0x00])?;
    interface.cmd_with_data(Command::POWER_CONTROL_1, &[0x23])?;
    interface.cmd_with_data(Command::POWER_CONTROL_2, &[0x10])?;
    interface.cmd_with_data(Command::VCOM_CONTROL_1, &[0x3E, 0x28])?;
    interface.cmd_with_data(Command::VCOM_CONTROL_2, &[0x86])?;

    rotation::apply(interface, orientation)?;
    delay.delay_ms(SETTLE_MS);

    interface.cmd_with_data(Command::VERTICAL_SCROLLING_START, &[0x00])?;
    // 16 bit per pixel
    interface.cmd_with_data(Command::PIXEL_FORMAT_SET, &[0x55])?;
    interface.cmd_with_data(Command::FRAME_RATE_CONTROL_NORMAL, &[0x00, 0x18])?;
    interface.cmd_with_data(Command::DISPLAY_FUNCTION_CONTROL, &[0x08, 0x82, 0x27])?;
    interface.cmd_with_data(Command::ENABLE_3_GAMMA, &[0x00])?;
    interface.cmd_with_data(Command::GAMMA_SET, &[0x01])?;
    interface.cmd_with_data(
        Command::POSITIVE_GAMMA_CORRECTION,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    )?;
    interface.cmd_with_data(
        Command::NEGATIVE_GAMMA_CORRECTION,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    )?;

    interface.cmd(Command::SLEEP_OUT)?;
    delay.delay_ms(SETTLE_MS);

    interface.cmd(Command::DISPLAY_ON)?;
    delay.delay_ms(SETTLE_MS);

    debug!("display initialized");
    Ok(())
}
