mod event_loop;
mod rendering;

use crate::event_handler::{EventHandler, KeyAction};

use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Result;
use termfolio_core::{Session, Signal, Tick};
use tokio::time::Instant;

/// Units revealed per redraw when the cadence has no per-unit delay
pub const UNITS_PER_FRAME: usize = 4;

/// Main TUI application
///
/// Owns the [`Session`] and the view state around it (scroll offset, globe
/// frame, pending startup commands). The event loop feeds it key events and
/// animation deadlines; [`App::render`] draws it.
pub struct App {
    pub(crate) session: Session,
    pub(crate) should_exit: bool,
    /// Rows scrolled back from the bottom of the transcript
    pub(crate) scroll: usize,
    pub(crate) max_scroll: usize,
    pub(crate) page: usize,
    pub(crate) globe_frame: u64,
    pending: VecDeque<String>,
    animation_deadline: Option<Instant>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            should_exit: false,
            scroll: 0,
            max_scroll: 0,
            page: 10,
            globe_frame: 0,
            pending: VecDeque::new(),
            animation_deadline: None,
        };
        app.sync_animation();
        app
    }

    /// Queue lines to run once the session is idle, in order
    pub fn queue_commands<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.extend(commands.into_iter().map(Into::into));
        self.sync_animation();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn globe_frame(&self) -> u64 {
        self.globe_frame
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    /// When the next animation unit is due
    pub fn animation_deadline(&self) -> Option<Instant> {
        self.animation_deadline
    }

    /// Run the TUI until the user quits
    pub async fn run(&mut self) -> Result<()> {
        event_loop::run(self).await
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Resize(width, height) = event {
            self.session.set_screen(width, height);
            return;
        }

        let input_empty = self.session.input().is_empty();
        if let Some(action) = EventHandler::handle_event(&event, self.session.globe_active(), input_empty) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: KeyAction) {
        if action.touches_input() {
            self.scroll = 0;
        }

        match action {
            KeyAction::Session(key) => {
                let signals = self.session.handle_key(key);
                self.apply_signals(&signals);
            }
            KeyAction::PageUp => self.scroll = (self.scroll + self.page).min(self.max_scroll),
            KeyAction::PageDown => self.scroll = self.scroll.saturating_sub(self.page),
            KeyAction::LeaveGlobe => {
                if let Some(signal) = self.session.leave_globe() {
                    self.apply_signals(&[signal]);
                }
            }
            KeyAction::Exit => {
                tracing::info!("exit requested");
                self.should_exit = true;
            }
        }
        self.sync_animation();
    }

    /// Reveal the next batch of units
    pub fn tick_animation(&mut self) {
        self.animation_deadline = None;
        for _ in 0..UNITS_PER_FRAME {
            match self.session.tick() {
                Tick::Revealed { next } if next.is_zero() => continue,
                Tick::Revealed { next } => {
                    self.animation_deadline = Some(Instant::now() + next);
                    break;
                }
                Tick::Finished | Tick::Interrupted | Tick::Idle => break,
            }
        }
        self.sync_animation();
    }

    /// Advance the globe animation by one frame
    pub fn advance_globe(&mut self) {
        self.globe_frame = self.globe_frame.wrapping_add(1);
    }

    fn apply_signals(&mut self, signals: &[Signal]) {
        for signal in signals {
            tracing::debug!(?signal, "session signal");
            match signal {
                Signal::Clear => self.scroll = 0,
                Signal::ShowGlobe => self.globe_frame = 0,
                Signal::HideGlobe => {}
            }
        }
    }

    /// Start queued commands once idle and keep the deadline in step with the session
    fn sync_animation(&mut self) {
        while !self.session.is_animating() {
            let Some(line) = self.pending.pop_front() else { break };
            let signals = self.session.execute(&line);
            self.apply_signals(&signals);
        }

        match self.session.next_delay() {
            Some(delay) if self.animation_deadline.is_none() => {
                self.animation_deadline = Some(Instant::now() + delay);
            }
            Some(_) => {}
            None => self.animation_deadline = None,
        }
    }
}
