//! What a dispatched command hands back to the session.

use serde::{Deserialize, Serialize};

use crate::content::{ContactCard, Portfolio};
use crate::probe::DeviceInfo;

/// Data behind the `fastfetch` profile widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub title: String,
    pub art: String,
    pub contact: ContactCard,
    #[serde(flatten)]
    pub device: DeviceInfo,
}

impl ProfileSummary {
    pub fn new(portfolio: &Portfolio, device: DeviceInfo) -> Self {
        Self {
            name: portfolio.profile.name.clone(),
            title: portfolio.profile.title.clone(),
            art: portfolio.profile.art.clone(),
            contact: portfolio.contact.clone(),
            device,
        }
    }
}

/// Result of a handler
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Markup text, revealed by the animator
    Text(String),
    /// Rendered as the profile widget, never animated
    Profile(Box<ProfileSummary>),
    /// Rendered as the contact widget, never animated
    Contact(ContactCard),
    /// Nothing to render
    None,
}

impl CommandOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Structured payloads bypass the animator
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Profile(_) | Self::Contact(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Side effect requested by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Empty the transcript
    Clear,
    /// Switch to the globe view
    ShowGlobe,
    /// Return from the globe view
    HideGlobe,
}

/// Output plus optional signal
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub output: CommandOutput,
    pub signal: Option<Signal>,
}

impl Dispatch {
    pub fn output(output: CommandOutput) -> Self {
        Self { output, signal: None }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::output(CommandOutput::text(text))
    }

    pub fn none() -> Self {
        Self::output(CommandOutput::None)
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }
}
