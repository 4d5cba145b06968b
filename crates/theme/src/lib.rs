pub mod colors;
pub mod gradient;
pub mod style;

pub use colors::Color;
pub use gradient::{usage_color, usage_rgb, Band};

/// Fixed dark palette and type sizes for the widget.
///
/// Colours are not user-configurable; the only visual preference is the
/// idle opacity, applied per frame through the `alpha` arguments in
/// [`style`].
#[derive(Debug, Clone)]
pub struct Theme {
    pub background:  Color,
    /// Unfilled part of the bar.
    pub track:       Color,
    pub border:      Color,
    /// "Claude Usage" header text.
    pub title:       Color,
    /// "resets in Nd" text.
    pub muted:       Color,
    pub foreground:  Color,
    /// Hovered context-menu entry.
    pub highlight:   Color,
    pub title_size:  f32,
    pub small_size:  f32,
    pub label_size:  f32,
    pub menu_size:   f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0x1a, 0x1a, 0x2e),
            track:      Color::from_rgb8(0x0d, 0x0d, 0x1a),
            border:     Color::from_rgb8(0x33, 0x33, 0x55),
            title:      Color::from_rgb8(0x88, 0x88, 0xaa),
            muted:      Color::from_rgb8(0x66, 0x66, 0x80),
            foreground: Color::WHITE,
            highlight:  Color::from_rgb8(0x33, 0x33, 0x55),
            title_size: 11.0,
            small_size: 9.0,
            label_size: 15.0,
            menu_size:  12.0,
        }
    }
}
