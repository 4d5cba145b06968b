//! Green → yellow → red colour ramp for the usage bar.

use crate::colors::Color;

/// Piecewise-linear segment of the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 0 – 50 %: green toward yellow.
    Low,
    /// 50 – 80 %: yellow toward orange.
    Mid,
    /// 80 – 100 %: orange toward red.
    High,
}

impl Band {
    pub fn of(pct: u8) -> Self {
        match pct {
            0..=49  => Band::Low,
            50..=79 => Band::Mid,
            _       => Band::High,
        }
    }

    /// Channels for `pct` evaluated on this segment's line, even outside its
    /// own range. Adjacent bands agree at their shared boundary.
    pub fn rgb(self, pct: u8) -> [u8; 3] {
        let pct = f32::from(pct.min(100));
        let (r, g, b) = match self {
            Band::Low => {
                let t = pct / 50.0;
                (40.0 + t * 215.0, 200.0, 80.0)
            }
            Band::Mid => {
                let t = (pct - 50.0) / 30.0;
                (255.0, 200.0 - t * 130.0, 80.0 - t * 50.0)
            }
            Band::High => {
                let t = (pct - 80.0) / 20.0;
                (255.0, 70.0 - t * 50.0, 30.0 + t * 30.0)
            }
        };
        [channel(r), channel(g), channel(b)]
    }
}

fn channel(v: f32) -> u8 {
    // Truncate, then pin into the byte range.
    v.clamp(0.0, 255.0) as u8
}

/// 8-bit channels of the bar colour at `pct` (clamped to 100).
pub fn usage_rgb(pct: u8) -> [u8; 3] {
    let pct = pct.min(100);
    Band::of(pct).rgb(pct)
}

/// Bar and label colour at `pct`.
pub fn usage_color(pct: u8) -> Color {
    let [r, g, b] = usage_rgb(pct);
    Color::from_rgb8(r, g, b)
}
