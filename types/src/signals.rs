use serde::{Deserialize, Serialize};

/// External signals that decide whether list reordering is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub screen_on: bool,
    pub panel_expanded: bool,
    /// Ambient display is pulsing a notification.
    pub pulsing: bool,
}

impl Signals {
    /// Reordering is allowed unless the user is looking at the expanded
    /// panel on a lit screen, and never while pulsing.
    #[must_use]
    pub fn allows_reordering(self) -> bool {
        (!self.screen_on || !self.panel_expanded) && !self.pulsing
    }
}
