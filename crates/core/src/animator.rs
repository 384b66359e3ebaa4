//! Typewriter reveal of markup text.
//!
//! Text is revealed one unit at a time: a whole tag, a whole character entity,
//! or a single character. A revealed prefix therefore never ends inside a tag
//! or an entity.
//!
//! [`TypingAnimation`] is the resumable state the session drives from the UI
//! event loop; [`typewrite`] drives the same state on tokio timers for
//! non-interactive output. Both poll the interrupt flag once before each unit,
//! after the preceding delay has elapsed.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

static TAG_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<[^>]+>").expect("tag unit pattern"));
static ENTITY_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&[a-zA-Z0-9#]+;").expect("entity unit pattern"));

/// The unit starting at byte offset `at`, empty at or past the end
///
/// `at` must lie on a char boundary.
pub fn next_unit(text: &str, at: usize) -> &str {
    let Some(rest) = text.get(at..) else {
        return "";
    };

    if let Some(tag) = TAG_UNIT.find(rest) {
        return tag.as_str();
    }
    if let Some(entity) = ENTITY_UNIT.find(rest) {
        return entity.as_str();
    }
    rest.chars().next().map_or("", |c| &rest[..c.len_utf8()])
}

/// Iterate over the units of `text`
pub fn units(text: &str) -> Units<'_> {
    Units { text, at: 0 }
}

pub struct Units<'a> {
    text: &'a str,
    at: usize,
}

impl<'a> Iterator for Units<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let unit = next_unit(self.text, self.at);
        if unit.is_empty() {
            return None;
        }
        self.at += unit.len();
        Some(unit)
    }
}

/// Delays between revealed units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Before the first unit
    pub settle: Duration,
    /// Between units
    pub per_unit: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self { settle: Duration::from_millis(50), per_unit: Duration::ZERO }
    }
}

impl Cadence {
    /// No delays at all
    pub fn instant() -> Self {
        Self { settle: Duration::ZERO, per_unit: Duration::ZERO }
    }
}

/// Reveal progress through one output string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingAnimation {
    source: String,
    position: usize,
}

impl TypingAnimation {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), position: 0 }
    }

    /// Reveal the next unit, returning it
    pub fn advance(&mut self) -> Option<&str> {
        let start = self.position;
        let len = next_unit(&self.source, start).len();
        if len == 0 {
            return None;
        }
        self.position += len;
        Some(&self.source[start..self.position])
    }

    /// Everything revealed so far
    pub fn revealed(&self) -> &str {
        &self.source[..self.position]
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.source.len()
    }
}

/// How a [`typewrite`] run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typed {
    Completed,
    Interrupted,
}

/// Reveal `text` into `sink` on the given cadence until done or cancelled
pub async fn typewrite<F>(text: &str, cadence: Cadence, token: &CancellationToken, mut sink: F) -> Typed
where
    F: FnMut(&str),
{
    tokio::time::sleep(cadence.settle).await;

    let mut animation = TypingAnimation::new(text);
    loop {
        if token.is_cancelled() {
            tracing::debug!(revealed = animation.revealed().len(), total = text.len(), "typewriter interrupted");
            return Typed::Interrupted;
        }

        let Some(unit) = animation.advance() else {
            break;
        };
        sink(unit);

        if animation.is_complete() {
            break;
        }
        if cadence.per_unit.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(cadence.per_unit).await;
        }
    }

    Typed::Completed
}
