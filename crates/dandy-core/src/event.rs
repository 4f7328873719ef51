#![forbid(unsafe_code)]

//! Page events delivered by the host, and what the host should do afterwards.

/// An event the controller reacts to.
///
/// Hosts serialize delivery: handlers never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum PageEvent {
    /// A navigation entry was clicked.
    Click {
        /// Index of the entry in the navigation list.
        entry: usize,
    },
    /// The scroll position changed.
    Scroll,
    /// The promotion form was submitted.
    Submit,
}

impl PageEvent {
    /// DOM event type that carries this event.
    pub const fn dom_type(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Scroll => "scroll",
            Self::Submit => "submit",
        }
    }
}

/// Whether the host must suppress its default action for a handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Disposition {
    /// Let the host proceed (follow the link, etc).
    #[default]
    Default,
    /// Suppress the host's default action.
    PreventDefault,
}

impl Disposition {
    #[inline]
    pub const fn is_prevented(self) -> bool {
        matches!(self, Self::PreventDefault)
    }
}
