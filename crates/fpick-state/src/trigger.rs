#![forbid(unsafe_code)]

//! Open/closed state of the candidate menu and why it was opened.

/// Interaction that requested the menu to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerReason {
    /// The user typed into the query input.
    Input,
    /// The query input gained focus.
    Focus,
    /// An explicit action, e.g. a toggle button.
    Manual,
}

/// Which candidate to focus when the menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// First focusable candidate.
    First,
    /// Last focusable candidate.
    Last,
}

/// Result of a state change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Closed → Open.
    Opened,
    /// Open → Closed.
    Closed,
    /// No change of the open flag.
    Unchanged,
}

/// Open flag plus the reason and focus strategy captured at open time.
///
/// The trigger reason and focus strategy are written only on a Closed → Open
/// request; asking an already open menu to open again keeps both.
#[derive(Debug, Clone, Default)]
pub struct MenuTrigger {
    open: bool,
    reason: Option<TriggerReason>,
    focus_strategy: Option<FocusStrategy>,
}

impl MenuTrigger {
    /// A closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Reason recorded by the last Closed → Open request.
    pub fn trigger_reason(&self) -> Option<TriggerReason> {
        self.reason
    }

    /// Focus strategy of the current open.
    pub fn focus_strategy(&self) -> Option<FocusStrategy> {
        self.focus_strategy
    }

    pub(crate) fn open(
        &mut self,
        focus_strategy: Option<FocusStrategy>,
        reason: Option<TriggerReason>,
    ) -> Transition {
        if self.open {
            return Transition::Unchanged;
        }
        self.focus_strategy = focus_strategy;
        self.reason = reason;
        self.open = true;
        Transition::Opened
    }

    pub(crate) fn close(&mut self) -> Transition {
        if !self.open {
            return Transition::Unchanged;
        }
        self.open = false;
        self.focus_strategy = None;
        Transition::Closed
    }

    pub(crate) fn toggle(
        &mut self,
        focus_strategy: Option<FocusStrategy>,
        reason: Option<TriggerReason>,
    ) -> Transition {
        if self.open {
            self.close()
        } else {
            self.open(focus_strategy, reason)
        }
    }
}
