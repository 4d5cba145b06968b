//! Container and button styles. Every function takes the current window
//! alpha so the idle opacity fades the whole widget, not just the background.

use crate::{colors::Color, Theme};
use iced::{
    widget::{button, container},
    Background, Border,
};

/// Outer frame: background plus a one-pixel border.
pub fn frame(theme: &Theme, alpha: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.background.with_alpha(alpha).to_iced())),
        border: Border {
            color: theme.border.with_alpha(alpha).to_iced(),
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// Empty part of the usage bar.
pub fn track(theme: &Theme, alpha: f32) -> container::Style {
    solid(theme.track, alpha)
}

/// Filled part of the usage bar.
pub fn fill(color: Color, alpha: f32) -> container::Style {
    solid(color, alpha)
}

fn solid(color: Color, alpha: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(color.with_alpha(alpha).to_iced())),
        ..Default::default()
    }
}

/// Flat context-menu entry that lights up under the pointer.
pub fn menu_entry(theme: &Theme, status: button::Status, alpha: f32) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => theme.highlight.with_alpha(alpha),
        button::Status::Active | button::Status::Disabled => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(background.to_iced())),
        text_color: theme.foreground.with_alpha(alpha).to_iced(),
        border: Border::default(),
        ..Default::default()
    }
}
