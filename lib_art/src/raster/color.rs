use serde::{Deserialize, Serialize};

/// A pixel type a [`Canvas`](super::Canvas) can hold.
pub trait Pixel: Copy + PartialEq + std::fmt::Debug + Send + Sync {
    /// Number of 8-bit channels written per pixel.
    const CHANNELS: usize;

    /// Appends the channels in storage order.
    fn write_channels(&self, out: &mut Vec<u8>);

    /// Per-channel `round(self + t * (other - self))`.
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let value = from as f64 + t * (to as f64 - from as f64);
    value.round().clamp(0.0, 255.0) as u8
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    pub const fn opaque(self) -> Rgba {
        self.with_alpha(255)
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drops the alpha channel.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl From<Rgb> for Rgba {
    fn from(color: Rgb) -> Self {
        color.opaque()
    }
}

impl Pixel for Rgb {
    const CHANNELS: usize = 3;

    fn write_channels(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b]);
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        Rgb::new(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        )
    }
}

impl Pixel for Rgba {
    const CHANNELS: usize = 4;

    fn write_channels(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b, self.a]);
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        Rgba::new(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
            lerp_channel(self.a, other.a, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let from = Rgb::new(0, 0, 100);
        let to = Rgb::new(10, 50, 180);

        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
    }

    #[test]
    fn test_lerp_rounds_half_away_from_zero() {
        let from = Rgb::new(0, 0, 0);
        let to = Rgb::new(1, 3, 255);

        // 0.5, 1.5, 127.5
        assert_eq!(from.lerp(&to, 0.5), Rgb::new(1, 2, 128));
    }

    #[test]
    fn test_lerp_descending() {
        let from = Rgba::new(200, 100, 0, 255);
        let to = Rgba::new(0, 0, 0, 0);
        assert_eq!(from.lerp(&to, 0.25), Rgba::new(150, 75, 0, 191));
    }

    #[test]
    fn test_rgb_serde_as_array() {
        let color: Rgb = serde_json::from_str("[43, 87, 154]").unwrap();
        assert_eq!(color, Rgb::new(43, 87, 154));
        assert_eq!(serde_json::to_string(&color).unwrap(), "[43,87,154]");
    }
}
