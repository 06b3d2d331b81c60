//! Straight-alpha colors with channels in `0.0..=1.0`.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
    /// Default divider color.
    pub const LIGHT_GRAY: Color = Color::from_rgb_u8(0xd3, 0xd3, 0xd3);
    pub const TRANSPARENT: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Fully transparent colors paint nothing.
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}
