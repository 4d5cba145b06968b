use chrono::NaiveDate;
use iced::{
    widget::{column, container, mouse_area, row, text},
    Alignment, Element, Length, Padding,
};
use usage_config::WidgetConfig;
use usage_core::{event::Message, state::UsageState, ResetDay};
use usage_theme::{style, usage_color, Theme};

/// Horizontal inner padding on both sides of the widget.
pub const PAD_X: f32 = 8.0;
/// Fixed column holding the `"NN%"` label.
pub const LABEL_WIDTH: f32 = 44.0;
/// Space between the bar and its label.
pub const GAP: f32 = 6.0;
/// Left + right frame border.
pub const FRAME_BORDER: f32 = 2.0;
pub const BAR_HEIGHT: f32 = 16.0;

/// Header ("Claude Usage" · "resets in Nd") above a colour-coded bar and
/// its percentage label.
///
/// Interactive:
/// - press on the header or label starts a window drag
/// - double-click on the bar opens the exact-value prompt
#[derive(Debug, Default)]
pub struct UsageMeter;

impl UsageMeter {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        state: &UsageState,
        config: &WidgetConfig,
        theme: &'a Theme,
        alpha: f32,
        today: NaiveDate,
    ) -> Element<'a, Message> {
        let pct   = state.percentage;
        let color = usage_color(pct);

        // ── Header ────────────────────────────────────────────────────────────
        let header = row![
            text("Claude Usage")
                .size(theme.title_size)
                .color(theme.title.with_alpha(alpha).to_iced()),
            container(
                text(reset_label(config.reset_day, today))
                    .size(theme.small_size)
                    .color(theme.muted.with_alpha(alpha).to_iced()),
            )
            .align_right(Length::Fill),
        ]
        .align_y(Alignment::Center);

        let header = mouse_area(container(header).padding(Padding {
            top:    5.0,
            right:  PAD_X,
            bottom: 0.0,
            left:   PAD_X,
        }))
        .on_press(Message::DragStarted);

        // ── Bar ───────────────────────────────────────────────────────────────
        let total  = bar_pixel_width(config.width);
        let filled = fill_width(pct, total);

        let fill = container(text(""))
            .width(Length::Fixed(filled))
            .height(Length::Fill)
            .style(move |_: &iced::Theme| style::fill(color, alpha));

        let bar = container(fill)
            .width(Length::Fixed(total))
            .height(Length::Fixed(BAR_HEIGHT))
            .style(move |_: &iced::Theme| style::track(theme, alpha));

        let bar = mouse_area(bar).on_double_click(Message::PromptRequested);

        // ── Label ─────────────────────────────────────────────────────────────
        let label = container(
            text(format!("{pct}%"))
                .size(theme.label_size)
                .color(color.with_alpha(alpha).to_iced()),
        )
        .align_right(Length::Fixed(LABEL_WIDTH));

        let label = mouse_area(label).on_press(Message::DragStarted);

        let bar_row = container(
            row![bar, label].spacing(GAP).align_y(Alignment::Center),
        )
        .padding(Padding {
            top:    2.0,
            right:  PAD_X,
            bottom: 6.0,
            left:   PAD_X,
        });

        column![header, bar_row].into()
    }
}

/// Pixel width of the bar track for a window `window_width` pixels wide.
pub fn bar_pixel_width(window_width: u32) -> f32 {
    (window_width as f32 - 2.0 * PAD_X - LABEL_WIDTH - GAP - FRAME_BORDER).max(0.0)
}

/// Filled share of a `total`-pixel track at `pct` percent.
pub fn fill_width(pct: u8, total: f32) -> f32 {
    f32::from(pct.min(100)) / 100.0 * total
}

/// `"resets in Nd"` for the header.
pub fn reset_label(reset_day: ResetDay, today: NaiveDate) -> String {
    format!("resets in {}d", reset_day.whole_days_until_reset(today))
}
