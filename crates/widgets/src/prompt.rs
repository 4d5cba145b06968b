use iced::{
    widget::{button, column, row, text, text_input, Button},
    Alignment, Element, Length,
};
use thiserror::Error;
use usage_core::{event::Message, state::MAX_PERCENTAGE};
use usage_theme::{style, usage_color, Theme};

/// Widget id of the text field, used to focus it when the prompt opens.
pub const PROMPT_INPUT: &str = "percent-prompt";

/// Why a prompt entry was rejected. Shown inline under the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("enter a whole number")]
    NotANumber,
    #[error("{0} is outside 0–100")]
    OutOfRange(i64),
}

/// Parse a user-typed percentage. Surrounding whitespace is ignored.
pub fn parse_percentage(input: &str) -> Result<u8, PromptError> {
    let value: i64 = input.trim().parse().map_err(|_| PromptError::NotANumber)?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_PERCENTAGE)
        .ok_or(PromptError::OutOfRange(value))
}

/// Exact-value entry shown below the meter.
///
/// Invalid input keeps the prompt open with an error, so the user can
/// correct it or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentPrompt {
    input: String,
    error: Option<PromptError>,
}

impl PercentPrompt {
    /// Extra window height needed to show the prompt.
    pub const HEIGHT: f32 = 70.0;

    /// Prompt pre-filled with the current value.
    pub fn new(current: u8) -> Self {
        Self {
            input: current.to_string(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&PromptError> {
        self.error.as_ref()
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
        self.error = None;
    }

    /// Validate the current input. On failure the error is kept for display.
    pub fn submit(&mut self) -> Option<u8> {
        match parse_percentage(&self.input) {
            Ok(value) => Some(value),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    pub fn view<'a>(&'a self, theme: &'a Theme, alpha: f32) -> Element<'a, Message> {
        let action = move |s: &'static str, message: Message| -> Button<'a, Message> {
            button(text(s).size(theme.menu_size))
                .on_press(message)
                .padding([3, 8])
                .style(move |_: &iced::Theme, status| style::menu_entry(theme, status, alpha))
        };

        let input = text_input("0-100", &self.input)
            .id(PROMPT_INPUT)
            .on_input(Message::PromptInputChanged)
            .on_submit(Message::PromptSubmitted)
            .size(theme.menu_size)
            .padding(3)
            .width(Length::Fill);

        let controls = row![
            input,
            action("Set", Message::PromptSubmitted),
            action("Cancel", Message::PromptCancelled),
        ]
        .spacing(4)
        .align_y(Alignment::Center);

        let error = self.error().map(ToString::to_string).unwrap_or_default();

        column![
            text("Enter usage percentage (0–100):")
                .size(theme.small_size)
                .color(theme.title.with_alpha(alpha).to_iced()),
            controls,
            text(error)
                .size(theme.small_size)
                .color(usage_color(100).with_alpha(alpha).to_iced()),
        ]
        .spacing(4)
        .padding([4, 8])
        .into()
    }
}
