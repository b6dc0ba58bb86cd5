use std::fmt;

/// Where the search box stands relative to the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Input and URL agree; URL changes may rewrite the input.
    #[default]
    Idle,
    /// The user edited the input and the debounce has not settled yet.
    /// URL changes never overwrite the input in this state.
    Typing,
    /// A navigation was issued; the next route change carrying the last
    /// synced term is our own echo.
    AwaitingNavigation,
    /// A product detail page was just entered. Settled input does not
    /// navigate until the guard window closes.
    SuppressedAtDetail { typing: bool },
}

impl SyncState {
    pub fn is_typing(self) -> bool {
        matches!(
            self,
            SyncState::Typing | SyncState::SuppressedAtDetail { typing: true }
        )
    }

    pub fn is_suppressed(self) -> bool {
        matches!(self, SyncState::SuppressedAtDetail { .. })
    }

    /// State after a keystroke.
    pub fn on_keystroke(self) -> Self {
        match self {
            SyncState::SuppressedAtDetail { .. } => SyncState::SuppressedAtDetail { typing: true },
            _ => SyncState::Typing,
        }
    }

    /// State once the detail guard window closes.
    pub fn on_guard_elapsed(self) -> Self {
        match self {
            SyncState::SuppressedAtDetail { typing: true } => SyncState::Typing,
            SyncState::SuppressedAtDetail { typing: false } => SyncState::Idle,
            other => other,
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncState::Idle => "idle",
            SyncState::Typing => "typing",
            SyncState::AwaitingNavigation => "awaiting-navigation",
            SyncState::SuppressedAtDetail { typing: false } => "suppressed-at-detail",
            SyncState::SuppressedAtDetail { typing: true } => "suppressed-at-detail+typing",
        };
        f.write_str(name)
    }
}
