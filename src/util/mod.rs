use crate::geometry::FloatType;

/// Linear color, channels nominally in the 0-1 range.
pub type Rgb = rgb::RGB<FloatType>;

pub const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

/// Componentwise product of two colors.
pub fn modulate(a: Rgb, b: Rgb) -> Rgb {
    Rgb::new(a.r * b.r, a.g * b.g, a.b * b.b)
}

pub fn rgb_from_array(channels: [FloatType; 3]) -> Rgb {
    Rgb::new(channels[0], channels[1], channels[2])
}
