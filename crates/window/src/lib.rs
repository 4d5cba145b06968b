//! Floating always-on-top window for `usage-widget`.
//!
//! Owns the Iced application loop and wires together:
//! - pointer input on the meter (drag, scroll, right-click, double-click, hover)
//! - the in-window context menu and percentage prompt
//! - window move events (position persistence)
//! - config file watcher (live reload on change)
//! - 60-second timer (weekly rollover check)

use chrono::Local;
use futures::channel::mpsc::Sender;
use iced::{
    event, keyboard, mouse,
    mouse::ScrollDelta,
    widget::{column, container, mouse_area, operation},
    window, Element, Length, Point, Size, Subscription, Task,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use usage_config::{default_path, load as load_config, save as save_config, ConfigWatcher, WidgetConfig};
use usage_core::{event::Message as AppMessage, paths, StateStore};
use usage_theme::{style, Theme};
use usage_widgets::{ContextMenu, PercentPrompt, UsageMeter, PROMPT_INPUT};

/// How often the weekly boundary is re-checked while idle.
const ROLLOVER_INTERVAL: Duration = Duration::from_secs(60);
/// Distance from the monitor's top-right corner on first launch.
const SCREEN_MARGIN: f32 = 20.0;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the widget and block until the user exits.
pub fn run() -> iced::Result {
    let config_path = default_path();
    let config = load_config(&config_path);
    let settings = window_settings(&config);

    let boot = move || {
        UsageWidget::with_config(config.clone(), config_path.clone(), paths::state_path())
    };

    iced::application(boot, UsageWidget::update, UsageWidget::view)
        .title("Claude Usage")
        .subscription(UsageWidget::subscription)
        .style(UsageWidget::style)
        .window(settings)
        .run()
}

fn window_settings(config: &WidgetConfig) -> window::Settings {
    let position = match config.position() {
        Some((x, y)) => window::Position::Specific(Point::new(x as f32, y as f32)),
        None => window::Position::SpecificWith(top_right),
    };

    window::Settings {
        size: Size::new(config.width as f32, config.height as f32),
        position,
        resizable: false,
        decorations: false,
        transparent: true,
        level: window::Level::AlwaysOnTop,
        ..window::Settings::default()
    }
}

fn top_right(window: Size, monitor: Size) -> Point {
    Point::new(
        (monitor.width - window.width - SCREEN_MARGIN).max(0.0),
        SCREEN_MARGIN,
    )
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level application messages.
#[derive(Debug, Clone)]
pub enum Message {
    /// Propagate a core event-bus message.
    App(AppMessage),
    /// Any event that reveals the id of our window.
    WindowSeen(window::Id),
    /// The window's top-left corner moved (drag or compositor placement).
    WindowMoved(window::Id, Point),
    /// Periodic rollover check.
    Tick,
}

// ── State ─────────────────────────────────────────────────────────────────────

/// What is shown below the meter.
#[derive(Debug, Clone, PartialEq)]
enum Overlay {
    Hidden,
    Menu,
    Prompt(PercentPrompt),
}

impl Overlay {
    fn extra_height(&self) -> f32 {
        match self {
            Overlay::Hidden    => 0.0,
            Overlay::Menu      => ContextMenu::height(),
            Overlay::Prompt(_) => PercentPrompt::HEIGHT,
        }
    }
}

pub struct UsageWidget {
    config:      WidgetConfig,
    config_path: PathBuf,
    store:       StateStore,
    theme:       Theme,
    meter:       UsageMeter,
    menu:        ContextMenu,
    overlay:     Overlay,
    hovered:     bool,
    window:      Option<window::Id>,
}

impl UsageWidget {
    /// Start from an already loaded config; only the state file is read here.
    /// `config_path` is where later moves and reloads go.
    pub fn with_config(config: WidgetConfig, config_path: PathBuf, state_path: PathBuf) -> Self {
        let store = StateStore::load(state_path, config.reset_day);

        info!(
            "Usage {}% (week of {}, resets {})",
            store.percentage(),
            store
                .state()
                .week_start
                .map_or_else(|| "?".to_string(), |d| d.to_string()),
            config.reset_day,
        );

        Self {
            config,
            config_path,
            store,
            theme:   Theme::default(),
            meter:   UsageMeter::new(),
            menu:    ContextMenu::new(),
            overlay: Overlay::Hidden,
            hovered: false,
            window:  None,
        }
    }

    /// Current window opacity: opaque under the pointer, configured otherwise.
    fn alpha(&self) -> f32 {
        if self.hovered {
            1.0
        } else {
            self.config.opacity
        }
    }

    fn window_size(&self) -> Size {
        Size::new(
            self.config.width as f32,
            self.config.height as f32 + self.overlay.extra_height(),
        )
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.check_rollover();
                Task::none()
            }
            Message::WindowSeen(id) => {
                self.window.get_or_insert(id);
                Task::none()
            }
            Message::WindowMoved(id, position) => {
                self.window.get_or_insert(id);
                self.remember_position(position);
                Task::none()
            }
            Message::App(msg) => self.handle_app(msg),
        }
    }

    fn handle_app(&mut self, msg: AppMessage) -> Task<Message> {
        match msg {
            AppMessage::DragStarted => {
                if let Some(id) = self.window {
                    return window::drag(id);
                }
            }
            AppMessage::HoverChanged(hovered) => {
                self.hovered = hovered;
            }
            AppMessage::Adjust(delta) => {
                if delta == 0 {
                    return Task::none();
                }
                if matches!(self.overlay, Overlay::Prompt(_)) {
                    debug!("Ignoring {delta:+} while the prompt is open");
                    return Task::none();
                }
                self.store.adjust(delta);
                return self.set_overlay(Overlay::Hidden);
            }
            AppMessage::MenuToggled => {
                return match self.overlay {
                    Overlay::Hidden    => self.set_overlay(Overlay::Menu),
                    Overlay::Menu      => self.set_overlay(Overlay::Hidden),
                    Overlay::Prompt(_) => Task::none(),
                };
            }
            AppMessage::PromptRequested => {
                if !matches!(self.overlay, Overlay::Prompt(_)) {
                    let prompt = PercentPrompt::new(self.store.percentage());
                    return Task::batch([
                        self.set_overlay(Overlay::Prompt(prompt)),
                        operation::focus(PROMPT_INPUT),
                    ]);
                }
            }
            AppMessage::PromptInputChanged(input) => {
                if let Overlay::Prompt(prompt) = &mut self.overlay {
                    prompt.set_input(input);
                }
            }
            AppMessage::PromptSubmitted => {
                let accepted = match &mut self.overlay {
                    Overlay::Prompt(prompt) => prompt.submit(),
                    _ => None,
                };
                if let Some(value) = accepted {
                    self.store.set_percentage(i32::from(value));
                    return self.set_overlay(Overlay::Hidden);
                }
            }
            AppMessage::PromptCancelled => {
                return self.set_overlay(Overlay::Hidden);
            }
            AppMessage::Reset => {
                self.store.reset();
                return self.set_overlay(Overlay::Hidden);
            }
            AppMessage::ConfigReloaded => {
                return self.reload_config();
            }
            AppMessage::Exit => {
                self.shutdown();
                return iced::exit();
            }
        }
        Task::none()
    }

    /// Switch what is shown under the meter and resize the window to fit.
    fn set_overlay(&mut self, overlay: Overlay) -> Task<Message> {
        if self.overlay == overlay {
            return Task::none();
        }
        self.overlay = overlay;
        self.resize()
    }

    fn resize(&self) -> Task<Message> {
        match self.window {
            Some(id) => window::resize(id, self.window_size()),
            None => Task::none(),
        }
    }

    fn remember_position(&mut self, position: Point) {
        let x = position.x.round() as i32;
        let y = position.y.round() as i32;
        if self.config.position() == Some((x, y)) {
            return;
        }
        self.config.position_x = Some(x);
        self.config.position_y = Some(y);
        self.persist_config();
    }

    fn check_rollover(&mut self) {
        let today = Local::now().date_naive();
        if self.store.check_rollover(self.config.reset_day, today) {
            info!("Weekly reset applied");
        }
    }

    fn reload_config(&mut self) -> Task<Message> {
        let fresh = load_config(&self.config_path);
        if !fresh.differs_ignoring_position(&self.config) {
            return Task::none();
        }

        info!("Config reloaded");
        let resized = fresh.width != self.config.width || fresh.height != self.config.height;
        // The running window owns its position.
        self.config = WidgetConfig {
            position_x: self.config.position_x,
            position_y: self.config.position_y,
            ..fresh
        };
        self.check_rollover();

        if resized {
            self.resize()
        } else {
            Task::none()
        }
    }

    fn persist_config(&self) {
        if let Err(e) = save_config(&self.config_path, &self.config) {
            warn!("{e}; keeping config in memory only");
        }
    }

    /// Final flush before the process exits.
    fn shutdown(&mut self) {
        info!("Exiting at {}%", self.store.percentage());
        if let Err(e) = self.store.save() {
            warn!("{e}");
        }
        self.persist_config();
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let alpha = self.alpha();
        let theme = &self.theme;
        let today = Local::now().date_naive();

        let mut content =
            column![self.meter.view(self.store.state(), &self.config, theme, alpha, today)];
        match &self.overlay {
            Overlay::Hidden => {}
            Overlay::Menu => content = content.push(self.menu.view(theme, alpha)),
            Overlay::Prompt(prompt) => content = content.push(prompt.view(theme, alpha)),
        }

        let framed = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_: &iced::Theme| style::frame(theme, alpha));

        let widget: Element<'_, AppMessage> = mouse_area(framed)
            .on_enter(AppMessage::HoverChanged(true))
            .on_exit(AppMessage::HoverChanged(false))
            .on_right_press(AppMessage::MenuToggled)
            .on_scroll(|delta| AppMessage::Adjust(scroll_step(delta)))
            .into();

        widget.map(Message::App)
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let tick = iced::time::every(ROLLOVER_INTERVAL).map(|_| Message::Tick);

        Subscription::batch([
            tick,
            event::listen_with(window_event),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    /// The surface stays transparent; the frame paints the faded background.
    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: iced::Color::TRANSPARENT,
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches `~/.claude_usage/config.json` for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::App(AppMessage::ConfigReloaded));
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Keep only the runtime events the widget cares about.
fn window_event(event: iced::Event, _status: event::Status, id: window::Id) -> Option<Message> {
    match event {
        iced::Event::Window(window::Event::Moved(position)) => {
            Some(Message::WindowMoved(id, position))
        }
        iced::Event::Window(window::Event::Opened { .. } | window::Event::Focused)
        | iced::Event::Mouse(mouse::Event::CursorEntered) => Some(Message::WindowSeen(id)),
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => key_message(&key),
        _ => None,
    }
}

/// Escape closes whatever is open under the meter.
fn key_message(key: &keyboard::Key) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::App(AppMessage::PromptCancelled))
        }
        _ => None,
    }
}

/// One percentage point per wheel notch: up = +1, down = −1.
fn scroll_step(delta: ScrollDelta) -> i32 {
    let y = match delta {
        ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
    };
    if y > 0.0 {
        1
    } else if y < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use usage_core::ResetDay;

    fn widget_in(dir: &Path) -> UsageWidget {
        let config_path = dir.join("config.json");
        UsageWidget::with_config(load_config(&config_path), config_path, dir.join("state.json"))
    }

    fn write_state(dir: &Path, percentage: u8) {
        let week_start = ResetDay::Monday.week_start(Local::now().date_naive());
        std::fs::write(
            dir.join("state.json"),
            format!(r#"{{"percentage": {percentage}, "week_start": "{week_start}"}}"#),
        )
        .unwrap();
    }

    fn saved_percentage(dir: &Path) -> u64 {
        let raw = std::fs::read_to_string(dir.join("state.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        json["percentage"].as_u64().unwrap()
    }

    fn app(msg: AppMessage) -> Message {
        Message::App(msg)
    }

    #[test]
    fn scroll_up_from_47_saves_48() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 47);
        let mut widget = widget_in(dir.path());

        let up = ScrollDelta::Lines { x: 0.0, y: 1.0 };
        let _ = widget.update(app(AppMessage::Adjust(scroll_step(up))));

        assert_eq!(widget.store.percentage(), 48);
        assert_eq!(saved_percentage(dir.path()), 48);
    }

    #[test]
    fn scroll_down_at_zero_stays_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = widget_in(dir.path());

        let down = ScrollDelta::Pixels { x: 0.0, y: -3.0 };
        let _ = widget.update(app(AppMessage::Adjust(scroll_step(down))));
        assert_eq!(widget.store.percentage(), 0);
    }

    #[test]
    fn menu_reset_clears_usage() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 81);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::MenuToggled));
        assert_eq!(widget.overlay, Overlay::Menu);

        let _ = widget.update(app(AppMessage::Reset));
        assert_eq!(widget.store.percentage(), 0);
        assert_eq!(widget.overlay, Overlay::Hidden);
        assert_eq!(saved_percentage(dir.path()), 0);
    }

    #[test]
    fn menu_bump_clamps_and_closes_menu() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 90);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::MenuToggled));
        let _ = widget.update(app(AppMessage::Adjust(25)));
        assert_eq!(widget.store.percentage(), 100);
        assert_eq!(widget.overlay, Overlay::Hidden);
    }

    #[test]
    fn right_click_toggles_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::MenuToggled));
        assert_eq!(widget.window_size().height, 52.0 + ContextMenu::height());
        let _ = widget.update(app(AppMessage::MenuToggled));
        assert_eq!(widget.overlay, Overlay::Hidden);
        assert_eq!(widget.window_size(), Size::new(230.0, 52.0));
    }

    #[test]
    fn prompt_accepts_valid_value() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 10);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::PromptRequested));
        let _ = widget.update(app(AppMessage::PromptInputChanged("64".into())));
        let _ = widget.update(app(AppMessage::PromptSubmitted));

        assert_eq!(widget.store.percentage(), 64);
        assert_eq!(widget.overlay, Overlay::Hidden);
        assert_eq!(saved_percentage(dir.path()), 64);
    }

    #[test]
    fn prompt_rejects_out_of_range_and_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 10);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::PromptRequested));
        let _ = widget.update(app(AppMessage::PromptInputChanged("150".into())));
        let _ = widget.update(app(AppMessage::PromptSubmitted));

        assert_eq!(widget.store.percentage(), 10);
        match &widget.overlay {
            Overlay::Prompt(prompt) => assert!(prompt.error().is_some()),
            other => panic!("prompt closed: {other:?}"),
        }
    }

    #[test]
    fn prompt_blocks_scroll_until_dismissed() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 20);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(app(AppMessage::PromptRequested));
        let _ = widget.update(app(AppMessage::Adjust(1)));
        assert_eq!(widget.store.percentage(), 20);

        let _ = widget.update(app(AppMessage::PromptCancelled));
        let _ = widget.update(app(AppMessage::Adjust(1)));
        assert_eq!(widget.store.percentage(), 21);
    }

    #[test]
    fn hover_toggles_opacity_only() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 33);
        let mut widget = widget_in(dir.path());

        assert_eq!(widget.alpha(), 0.85);
        let _ = widget.update(app(AppMessage::HoverChanged(true)));
        assert_eq!(widget.alpha(), 1.0);
        let _ = widget.update(app(AppMessage::HoverChanged(false)));
        assert_eq!(widget.alpha(), 0.85);
        assert_eq!(widget.store.percentage(), 33);
    }

    #[test]
    fn drag_leaves_state_alone() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 33);
        let mut widget = widget_in(dir.path());

        let _ = widget.update(Message::WindowSeen(window::Id::unique()));
        let _ = widget.update(app(AppMessage::DragStarted));
        assert_eq!(widget.store.percentage(), 33);
    }

    #[test]
    fn missing_config_opens_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let widget = widget_in(dir.path());
        assert_eq!(widget.config, WidgetConfig::default());
        assert_eq!(widget.window_size(), Size::new(230.0, 52.0));
    }

    #[test]
    fn moving_the_window_persists_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = widget_in(dir.path());

        let _ = widget.update(Message::WindowMoved(window::Id::unique(), Point::new(640.4, 12.6)));
        assert_eq!(widget.config.position(), Some((640, 13)));

        let reloaded = load_config(dir.path().join("config.json"));
        assert_eq!(reloaded.position(), Some((640, 13)));
    }

    #[test]
    fn reload_applies_opacity_but_keeps_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = widget_in(dir.path());
        let _ = widget.update(Message::WindowMoved(window::Id::unique(), Point::new(100.0, 200.0)));

        let edited = WidgetConfig {
            opacity: 0.5,
            position_x: Some(0),
            position_y: Some(0),
            ..WidgetConfig::default()
        };
        save_config(dir.path().join("config.json"), &edited).unwrap();

        let _ = widget.update(app(AppMessage::ConfigReloaded));
        assert_eq!(widget.config.opacity, 0.5);
        assert_eq!(widget.config.position(), Some((100, 200)));
    }

    #[test]
    fn exit_flushes_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = widget_in(dir.path());
        let _ = widget.update(app(AppMessage::Exit));
        assert!(dir.path().join("config.json").exists());
        assert!(dir.path().join("state.json").exists());
    }

    #[test]
    fn escape_dismisses_prompt_and_menu() {
        let dir = tempfile::tempdir().unwrap();
        write_state(dir.path(), 40);
        let mut widget = widget_in(dir.path());
        let escape = keyboard::Key::Named(keyboard::key::Named::Escape);

        let _ = widget.update(app(AppMessage::PromptRequested));
        let _ = widget.update(app(AppMessage::PromptInputChanged("90".into())));
        let _ = widget.update(key_message(&escape).unwrap());
        assert_eq!(widget.overlay, Overlay::Hidden);
        assert_eq!(widget.store.percentage(), 40);

        let _ = widget.update(app(AppMessage::MenuToggled));
        let _ = widget.update(key_message(&escape).unwrap());
        assert_eq!(widget.overlay, Overlay::Hidden);

        assert!(key_message(&keyboard::Key::Character("a".into())).is_none());
    }

    #[test]
    fn boot_uses_the_given_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let on_disk = WidgetConfig { opacity: 0.3, ..WidgetConfig::default() };
        save_config(&config_path, &on_disk).unwrap();

        let given = WidgetConfig { opacity: 0.6, width: 300, ..WidgetConfig::default() };
        let widget =
            UsageWidget::with_config(given.clone(), config_path, dir.path().join("state.json"));
        assert_eq!(widget.config, given);
        assert_eq!(widget.alpha(), 0.6);
        assert_eq!(widget.window_size(), Size::new(300.0, 52.0));
    }

    #[test]
    fn scroll_step_direction() {
        assert_eq!(scroll_step(ScrollDelta::Lines { x: 0.0, y: 2.0 }), 1);
        assert_eq!(scroll_step(ScrollDelta::Pixels { x: 0.0, y: -40.0 }), -1);
        assert_eq!(scroll_step(ScrollDelta::Lines { x: 1.0, y: 0.0 }), 0);
    }

    #[test]
    fn first_launch_sits_in_top_right_corner() {
        let p = top_right(Size::new(230.0, 52.0), Size::new(1920.0, 1080.0));
        assert_eq!(p, Point::new(1670.0, 20.0));
    }
}
