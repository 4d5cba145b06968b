/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Pointer input on the meter   → `DragStarted`, `HoverChanged`, `Adjust`, `MenuToggled`
/// - Context menu entries         → `Adjust`, `PromptRequested`, `Reset`, `Exit`
/// - Percentage prompt            → `Prompt*`
/// - Config watcher task          → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Pointer ───────────────────────────────────────────────────────────────
    /// Primary button pressed on a drag handle; the OS performs the move.
    DragStarted,
    /// Pointer entered (`true`) or left (`false`) the widget.
    HoverChanged(bool),
    /// Relative change in percentage points (scroll ±1, menu bumps +5/+10/+25).
    Adjust(i32),
    /// Right-click: open the context menu, or close it if already open.
    MenuToggled,

    // ── Percentage prompt ─────────────────────────────────────────────────────
    /// Open the exact-value prompt (menu entry or double-click on the bar).
    PromptRequested,
    /// Prompt text edited.
    PromptInputChanged(String),
    /// Enter pressed or "Set" clicked.
    PromptSubmitted,
    /// Cancel or Escape: close the prompt or menu without changes.
    PromptCancelled,

    // ── Actions ───────────────────────────────────────────────────────────────
    /// Set the percentage back to 0.
    Reset,
    /// Config file changed on disk.
    ConfigReloaded,
    /// Flush everything and quit.
    Exit,
}
