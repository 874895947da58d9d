//! SPI Commands for ILI9341/ST7789 class controllers
use crate::traits;

/// Controller commands
///
/// Should rarely (never?) be needed directly.
///
/// The addresses and their descriptions are taken from the ILI9341 datasheet.
/// Read commands are listed for completeness, the bus is write only here.
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// No operation
    NOP = 0x00,
    /// Software reset, all registers go back to their default values.
    ///
    /// Needs 5ms before the next command, 120ms if the display was sleeping.
    SOFTWARE_RESET = 0x01,
    /// Read display identification information
    READ_DISPLAY_ID = 0x04,
    /// Read display status
    READ_DISPLAY_STATUS = 0x09,
    /// Read display power mode
    READ_POWER_MODE = 0x0A,
    /// Read display MADCTL
    READ_MADCTL = 0x0B,
    /// Read display pixel format
    READ_PIXEL_FORMAT = 0x0C,
    /// Read display image format
    READ_IMAGE_FORMAT = 0x0D,
    /// Read display self-diagnostic result
    READ_SELF_DIAGNOSTIC = 0x0F,
    /// Enter the minimum power consumption mode, DC/DC converter and oscillator stop
    SLEEP_IN = 0x10,
    /// Turns off sleep mode.
    ///
    /// Needs 120ms before SLEEP_IN may be sent again.
    SLEEP_OUT = 0x11,
    /// Partial mode on
    PARTIAL_MODE_ON = 0x12,
    /// Normal display mode on
    NORMAL_MODE_ON = 0x13,
    /// Display inversion off
    INVERSION_OFF = 0x20,
    /// Display inversion on
    INVERSION_ON = 0x21,
    /// Selects one of the predefined gamma curves
    GAMMA_SET = 0x26,
    /// Stops showing the frame memory, the memory content is kept
    DISPLAY_OFF = 0x28,
    /// Shows the frame memory
    DISPLAY_ON = 0x29,
    /// Column address set
    COLUMN_ADDRESS_SET = 0x2A,
    /// Page address set
    PAGE_ADDRESS_SET = 0x2B,
    /// Transfers data from the host into the frame memory, starting at the
    /// current column/page start address.
    MEMORY_WRITE = 0x2C,
    /// Transfers data from the frame memory to the host
    MEMORY_READ = 0x2E,
    /// Partial area
    PARTIAL_AREA = 0x30,
    /// Vertical scrolling definition
    VERTICAL_SCROLLING_DEFINITION = 0x33,
    /// Memory access control (MADCTL)
    ///
    /// Row/column order and exchange plus RGB/BGR order, see [`rotation`](crate::rotation).
    MEMORY_ACCESS_CONTROL = 0x36,
    /// Vertical scrolling start address
    VERTICAL_SCROLLING_START = 0x37,
    /// COLMOD: pixel format set
    ///
    /// 0x55 selects 16 bit per pixel for both the RGB and the MCU interface.
    PIXEL_FORMAT_SET = 0x3A,
    /// Brightness, hardware dependent
    WRITE_DISPLAY_BRIGHTNESS = 0x51,
    /// Read display brightness
    READ_DISPLAY_BRIGHTNESS = 0x52,
    /// Write CTRL display
    WRITE_CTRL_DISPLAY = 0x53,
    /// Read CTRL display
    READ_CTRL_DISPLAY = 0x54,
    /// Write content adaptive brightness control
    WRITE_CABC = 0x55,
    /// Read content adaptive brightness control
    READ_CABC = 0x56,
    /// Write CABC minimum brightness
    WRITE_CABC_MINIMUM = 0x5E,
    /// Read CABC minimum brightness
    READ_CABC_MINIMUM = 0x5F,
    /// Frame rate control (in normal mode/full colors)
    FRAME_RATE_CONTROL_NORMAL = 0xB1,
    /// Frame rate control (in idle mode/8 colors)
    FRAME_RATE_CONTROL_IDLE = 0xB2,
    /// Frame rate control (in partial mode/full colors)
    FRAME_RATE_CONTROL_PARTIAL = 0xB3,
    /// Display inversion control
    INVERSION_CONTROL = 0xB4,
    /// Display function control
    DISPLAY_FUNCTION_CONTROL = 0xB6,
    /// Power control 1, GVDD level
    POWER_CONTROL_1 = 0xC0,
    /// Power control 2, step up factor
    POWER_CONTROL_2 = 0xC1,
    /// VCOM control 1, VCOMH and VCOML voltages
    VCOM_CONTROL_1 = 0xC5,
    /// VCOM control 2, VCOM offset
    VCOM_CONTROL_2 = 0xC7,
    /// Power control A
    POWER_CONTROL_A = 0xCB,
    /// Power control B
    POWER_CONTROL_B = 0xCF,
    /// Read ID 1
    READ_ID_1 = 0xDA,
    /// Read ID 2
    READ_ID_2 = 0xDB,
    /// Read ID 3
    READ_ID_3 = 0xDC,
    /// Read ID 4
    READ_ID_4 = 0xDD,
    /// Positive gamma correction, 15 bytes
    POSITIVE_GAMMA_CORRECTION = 0xE0,
    /// Negative gamma correction, 15 bytes
    NEGATIVE_GAMMA_CORRECTION = 0xE1,
    /// Driver timing control A
    DRIVER_TIMING_CONTROL_A = 0xE8,
    /// Driver timing control B
    DRIVER_TIMING_CONTROL_B = 0xEA,
    /// Power on sequence control
    POWER_ON_SEQUENCE_CONTROL = 0xED,
    /// Enable 3 gamma control
    ENABLE_3_GAMMA = 0xF2,
    /// Pump ratio control
    PUMP_RATIO_CONTROL = 0xF7,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}
