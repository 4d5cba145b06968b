use iced::{
    widget::{button, column, container, rule, text},
    Element, Length,
};
use usage_core::event::Message;
use usage_theme::{style, Theme};

const ENTRY_HEIGHT: f32 = 22.0;
const SEPARATOR_HEIGHT: f32 = 7.0;

/// One clickable row of the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    SetExact,
    Bump(i32),
    Reset,
    Exit,
}

impl MenuEntry {
    pub fn label(self) -> String {
        match self {
            MenuEntry::SetExact => "Set Usage %...".to_string(),
            MenuEntry::Bump(step) => format!("+{step} %"),
            MenuEntry::Reset => "Reset to 0 %".to_string(),
            MenuEntry::Exit => "Exit".to_string(),
        }
    }

    pub fn message(self) -> Message {
        match self {
            MenuEntry::SetExact => Message::PromptRequested,
            MenuEntry::Bump(step) => Message::Adjust(step),
            MenuEntry::Reset => Message::Reset,
            MenuEntry::Exit => Message::Exit,
        }
    }
}

/// Menu rows top to bottom; `None` draws a separator.
const LAYOUT: [Option<MenuEntry>; 9] = [
    Some(MenuEntry::SetExact),
    None,
    Some(MenuEntry::Bump(5)),
    Some(MenuEntry::Bump(10)),
    Some(MenuEntry::Bump(25)),
    None,
    Some(MenuEntry::Reset),
    None,
    Some(MenuEntry::Exit),
];

/// Right-click menu rendered inside the (temporarily taller) window.
#[derive(Debug, Default)]
pub struct ContextMenu;

impl ContextMenu {
    pub fn new() -> Self {
        Self
    }

    /// Entries in display order, separators skipped.
    pub fn entries() -> impl Iterator<Item = MenuEntry> {
        LAYOUT.into_iter().flatten()
    }

    /// Extra window height needed to show the menu.
    pub fn height() -> f32 {
        LAYOUT
            .iter()
            .map(|row| if row.is_some() { ENTRY_HEIGHT } else { SEPARATOR_HEIGHT })
            .sum()
    }

    pub fn view<'a>(&'a self, theme: &'a Theme, alpha: f32) -> Element<'a, Message> {
        let rows = LAYOUT.iter().map(|row| -> Element<'a, Message> {
            match row {
                Some(entry) => button(text(entry.label()).size(theme.menu_size))
                    .on_press(entry.message())
                    .width(Length::Fill)
                    .height(Length::Fixed(ENTRY_HEIGHT))
                    .padding([3, 10])
                    .style(move |_: &iced::Theme, status| style::menu_entry(theme, status, alpha))
                    .into(),
                None => container(rule::horizontal(1.0f32))
                    .height(Length::Fixed(SEPARATOR_HEIGHT))
                    .padding([3, 6])
                    .into(),
            }
        });

        column(rows).width(Length::Fill).into()
    }
}
