//! RGB565 color encoding for the controller
//!
//! The controller expects every pixel as 16 bit RGB565, most significant byte first.
//! The framebuffer stores a pixel little endian (low byte at the lower address), so
//! the colors handed out by [`encode_color`] already have their two bytes swapped:
//! storing them little endian puts the RGB565 high byte first on the wire.
//!
//! Forgetting the swap doesn't fail loudly, the display just renders the channels
//! mixed up.

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{raw::RawU16, Rgb565};
#[cfg(feature = "graphics")]
use embedded_graphics_core::prelude::IntoStorage;

/// Black
pub const BLACK: u16 = encode_color(0, 0, 0);
/// White
pub const WHITE: u16 = encode_color(255, 255, 255);
/// Red
pub const RED: u16 = encode_color(255, 0, 0);
/// Green
pub const GREEN: u16 = encode_color(0, 255, 0);
/// Blue
pub const BLUE: u16 = encode_color(0, 0, 255);

/// Converts an 8 bit per channel color into the display's native pixel value
///
/// The channels are truncated to 5 (red), 6 (green) and 5 (blue) bits by keeping
/// their most significant bits and packed as RGB565. The two bytes of the packed
/// value are then swapped, see the [module docs](self).
pub const fn encode_color(r: u8, g: u8, b: u8) -> u16 {
    let r5 = ((r & 0b1111_1000) >> 3) as u16;
    let g6 = ((g & 0b1111_1100) >> 2) as u16;
    let b5 = ((b & 0b1111_1000) >> 3) as u16;
    let rgb565 = (r5 << 11) | (g6 << 5) | b5;

    swap_bytes(rgb565)
}

/// Splits an encoded color into the two bytes stored in the buffer
///
/// The first byte goes to the lower address and is transmitted first.
pub const fn color_to_bytes(color: u16) -> [u8; 2] {
    [(color & 0x00FF) as u8, (color >> 8) as u8]
}

/// Reads an encoded color back from its two stored bytes
///
/// `bytes[0]` is the byte at the lower address: `bytes[1] * 256 + bytes[0]`.
pub const fn color_from_bytes(bytes: [u8; 2]) -> u16 {
    (bytes[1] as u16) << 8 | bytes[0] as u16
}

/// Undoes the byte swap of [`encode_color`] and returns the packed RGB565 value
pub const fn to_rgb565(color: u16) -> u16 {
    swap_bytes(color)
}

/// Turns a packed RGB565 value into the display's native pixel value
pub const fn from_rgb565(rgb565: u16) -> u16 {
    swap_bytes(rgb565)
}

/// Decodes an encoded color into its 8 bit channels
///
/// The bits dropped by [`encode_color`] are gone, so only the upper 5/6/5 bits
/// of each channel come back.
pub const fn decode_color(color: u16) -> (u8, u8, u8) {
    let rgb565 = to_rgb565(color);
    let r = ((rgb565 >> 11) & 0x1F) as u8;
    let g = ((rgb565 >> 5) & 0x3F) as u8;
    let b = (rgb565 & 0x1F) as u8;
    (r << 3, g << 2, b << 3)
}

const fn swap_bytes(value: u16) -> u16 {
    let lsb = value & 0x00FF;
    let msb = (value & 0xFF00) >> 8;
    (lsb << 8) | msb
}

/// Native pixel value of an embedded-graphics color
#[cfg(feature = "graphics")]
pub fn from_graphics(color: Rgb565) -> u16 {
    from_rgb565(color.into_storage())
}

/// embedded-graphics color of a native pixel value
#[cfg(feature = "graphics")]
pub fn into_graphics(color: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(to_rgb565(color)))
}
