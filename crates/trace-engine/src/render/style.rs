/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From 0-255 channels and a 0.0 - 1.0 alpha, as in CSS `rgba()`.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// From a `0xRRGGBB` literal, fully opaque.
    pub fn hex(rgb: u32) -> Self {
        Self::rgba8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Colors and sizes used by the draw list builder.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub grid_size: f32,
    pub grid_light: Color,
    pub grid_light_width: f32,
    pub grid_dark: Color,
    /// Darker ruling every `grid_dark_every` fine lines.
    pub grid_dark_every: u32,
    pub margin: Color,
    /// Margin line sits this many grid cells from the left edge.
    pub margin_cells: u32,

    pub outline: Color,
    pub outline_width: f32,
    pub guide_dash: Color,
    pub guide_dash_width: f32,
    /// Dash length and gap length.
    pub dash_pattern: (f32, f32),
    pub traced: Color,
    /// Completed segments are drawn at `outline_width * traced_scale`.
    pub traced_scale: f32,
    pub live: Color,
    pub live_width: f32,
    pub final_letter: Color,

    pub dot: Color,
    pub dot_active: Color,
    pub dot_passed: Color,
    pub dot_radius: f32,
    pub dot_active_radius: f32,
    /// Active dot radius when the stroke has not been started yet.
    pub dot_first_radius: f32,
    pub label: Color,
    pub label_min_size: f32,

    pub glyph_tint: Color,
    pub trail: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            grid_light: Color::hex(0xd1e9ff),
            grid_light_width: 0.7,
            grid_dark: Color::hex(0xa8d8ff),
            grid_dark_every: 4,
            margin: Color::hex(0xffacac),
            margin_cells: 2,

            outline: Color::rgba8(220, 220, 220, 0.7),
            outline_width: 45.0,
            guide_dash: Color::rgba8(130, 130, 130, 0.9),
            guide_dash_width: 3.0,
            dash_pattern: (8.0, 6.0),
            traced: Color::rgba8(0, 180, 0, 0.5),
            traced_scale: 0.95,
            live: Color::rgba8(60, 60, 255, 0.7),
            live_width: 30.0,
            final_letter: Color::rgba8(0, 60, 120, 0.85),

            dot: Color::rgba8(180, 180, 180, 0.9),
            dot_active: Color::hex(0xffa500),
            dot_passed: Color::rgba8(120, 220, 120, 0.8),
            dot_radius: 7.0,
            dot_active_radius: 9.0,
            dot_first_radius: 12.0,
            label: Color::BLACK,
            label_min_size: 9.0,

            glyph_tint: Color::rgba8(200, 200, 200, 0.4),
            trail: Color::hex(0x2196f3),
        }
    }
}
