use image::RgbaImage;

use crate::{geometry::ScreenPoint, util::Rgb};

/// Destination of rendered pixels.
pub trait PixelSink {
    fn set(&mut self, point: ScreenPoint, color: Rgb);
}

impl PixelSink for RgbaImage {
    /// Pixels outside of the image are dropped.
    fn set(&mut self, point: ScreenPoint, color: Rgb) {
        if point.x < self.width() && point.y < self.height() {
            self.put_pixel(point.x, point.y, color_to_image(color));
        }
    }
}

/// Maps a 0-1 f32 rgb pixel to an opaque pixel compatible with module image.
pub fn color_to_image(color: Rgb) -> image::Rgba<u8> {
    let quantize = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).floor() as u8;
    image::Rgba([quantize(color.r), quantize(color.g), quantize(color.b), 255])
}
