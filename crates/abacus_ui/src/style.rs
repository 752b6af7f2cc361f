//! Colors used to paint the abacus.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Light wood, used for the frame and the tracks.
    pub const WOOD: Self = Self::rgb(188, 157, 118);
    /// Bead green.
    pub const BEAD_GREEN: Self = Self::rgb(73, 137, 30);

    /// Creates a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// The colors [`paint`](crate::render::paint) uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Surface fill behind the abacus.
    pub background: Color,
    /// The four frame bars.
    pub frame: Color,
    /// The bar each row's beads slide along.
    pub track: Color,
    /// Bead fill.
    pub bead: Color,
}

impl Palette {
    /// Light wood frame with green beads on black.
    pub const CLASSIC: Self = Self {
        background: Color::BLACK,
        frame: Color::WOOD,
        track: Color::WOOD,
        bead: Color::BEAD_GREEN,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}
