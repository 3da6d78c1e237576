//! Global key event dispatch: maps a key chord onto a session command.
//! The router is stateless — it only reads the small context snapshot the
//! caller hands it, and it never touches a handle or the store itself.

/// Physical key of interest. Letters arrive as `Char` and are matched
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Tab,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// One key event as delivered by the host, with modifier state and whether
/// the event targeted a text-entry control.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    /// Events aimed at an input field are ignored entirely: no command
    /// fires and the host must not suppress the default behavior.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        KeyEvent { key, shift: false, alt: false, in_text_input: false }
    }

    pub fn shifted(key: Key) -> Self {
        KeyEvent { shift: true, ..Self::plain(key) }
    }

    pub fn alted(key: Key) -> Self {
        KeyEvent { alt: true, ..Self::plain(key) }
    }
}

/// What the router can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleMuteAll,
    TogglePlayAll,
    FocusNext,
    FocusPrev,
    ClearFocused,
    DeleteFocused,
    EnterEditMode,
    ExitEditMode,
    /// Asks for confirmation before running.
    ResetLayout,
    /// Asks for confirmation before running.
    ResetAll,
    AddCell,
    MoveFocused { dx: i32, dy: i32 },
    ResizeFocused { dw: i32, dh: i32 },
}

/// The slice of session state the dispatch table needs.
#[derive(Debug, Clone, Copy)]
pub struct DispatchCtx {
    pub stream_count: usize,
    pub focus: Option<usize>,
    pub edit_mode: bool,
}

/// Route one key event to a command, or `None` when nothing applies.
///
/// Whenever this returns `Some`, the host should suppress the event's
/// default behavior (notably Space scrolling the page).
pub fn route(event: &KeyEvent, ctx: &DispatchCtx) -> Option<Command> {
    if event.in_text_input {
        return None;
    }
    match event.key {
        Key::Char(c) => match (c.to_ascii_lowercase(), event.shift, event.alt) {
            ('m', false, false) => Some(Command::ToggleMuteAll),
            ('e', false, false) => Some(Command::EnterEditMode),
            ('e', true, false) => Some(Command::ExitEditMode),
            ('r', true, false) => Some(Command::ResetLayout),
            ('r', false, true) => Some(Command::ResetAll),
            ('a', false, false) if ctx.edit_mode => Some(Command::AddCell),
            _ => None,
        },
        Key::Space if !event.shift && !event.alt => Some(Command::TogglePlayAll),
        Key::Tab if !event.alt && ctx.stream_count > 0 => {
            if event.shift {
                Some(Command::FocusPrev)
            } else {
                Some(Command::FocusNext)
            }
        }
        Key::Backspace if !event.shift && !event.alt && ctx.focus.is_some() => {
            Some(Command::ClearFocused)
        }
        Key::Delete if !event.shift && !event.alt && ctx.focus.is_some() => {
            Some(Command::DeleteFocused)
        }
        Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
            if ctx.edit_mode && ctx.focus.is_some() && !event.alt =>
        {
            let (dx, dy) = match event.key {
                Key::ArrowLeft => (-1, 0),
                Key::ArrowRight => (1, 0),
                Key::ArrowUp => (0, -1),
                _ => (0, 1),
            };
            if event.shift {
                Some(Command::ResizeFocused { dw: dx, dh: dy })
            } else {
                Some(Command::MoveFocused { dx, dy })
            }
        }
        _ => None,
    }
}
