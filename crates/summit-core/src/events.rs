use serde::{Deserialize, Serialize};

/// Presentation tier for a notification, used by HUD/dialog presenters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Counter changes with no dialog.
    #[default]
    Ambient,
    /// Shown in a dismissable dialog.
    Notice,
    /// Run-ending outcomes (summit, fall).
    Urgent,
}

/// A game event that can be surfaced to the player as text.
pub trait Notify {
    fn priority(&self) -> Priority;

    /// Human-readable text, or `None` when the event carries no message.
    fn message(&self) -> Option<String>;
}
