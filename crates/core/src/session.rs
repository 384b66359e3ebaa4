//! Terminal session: transcript, recall buffer, input line and animation.
//!
//! A [`Session`] is driven by two entry points. [`Session::handle_key`] takes
//! keyboard input; [`Session::tick`] advances the typewriter and is called by
//! the front end once the delay it last reported ([`Session::next_delay`]) has
//! elapsed. Nothing in here sleeps or spawns.
//!
//! ```text
//! IdleInput --Enter--> Submitting --text--> Animating --done--> IdleInput
//!                          |                    |
//!                          +--payload/clear-----+--Ctrl+C--> Interrupted --tick--> IdleInput
//! ```

mod input;
mod transcript;

pub use input::{InputState, RecallBuffer};
pub use transcript::{Transcript, TranscriptEntry};

use chrono::Local;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::animator::{Cadence, TypingAnimation};
use crate::config::TerminalConfig;
use crate::interpreter::{DispatchContext, Interpreter};
use crate::output::{CommandOutput, Signal};
use crate::probe::EnvironmentSignals;
use crate::registry;
use crate::sanitize::escape_html;
use crate::suggest;

pub const WELCOME_COMMAND: &str = "welcome";

pub const WELCOME_MESSAGE: &str = "Welcome to my portfolio terminal!<br>Type 'help' to see available commands.";

/// Marker appended to interrupted lines
pub const INTERRUPT_MARKER: &str = r#"<span class="text-red-400">^C</span>"#;

/// Separator between Tab completion candidates (two no-break spaces)
pub const MATCH_SEPARATOR: &str = "\u{a0}\u{a0}";

/// Keys the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Tab,
    Up,
    Down,
    /// Ctrl+C / Cmd+C
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    IdleInput,
    /// Transient while the interpreter runs
    Submitting,
    Animating,
    /// Interrupt raised, not yet observed by [`Session::tick`]
    Interrupted,
}

/// Outcome of one [`Session::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing is animating
    Idle,
    /// A unit was revealed; tick again after `next`
    Revealed { next: Duration },
    /// Output fully revealed
    Finished,
    /// Animation stopped by an interrupt
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// `user@host` shown in the prompt
    pub identity: String,
    pub max_input_len: usize,
    pub cadence: Cadence,
    /// Play the scripted welcome on creation
    pub welcome: bool,
    pub signals: EnvironmentSignals,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            identity: TerminalConfig::default().identity(),
            max_input_len: 1000,
            cadence: Cadence::default(),
            welcome: true,
            signals: EnvironmentSignals::default(),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &TerminalConfig, signals: EnvironmentSignals) -> Self {
        Self {
            identity: config.identity(),
            max_input_len: config.max_input_len,
            cadence: config.cadence(),
            welcome: config.welcome,
            signals,
        }
    }
}

/// Two-line shell prompt for `identity`
pub fn prompt(identity: &str) -> String {
    format!(
        concat!(
            r#"<span class="text-green-400">┌─(</span><span class="text-indigo-500 font-bold">{}</span>"#,
            r#"<span class="text-green-400">)-[~]</span><br>"#,
            r#"<span class="text-green-400">└─</span><span class="text-indigo-500">$</span>&nbsp;"#,
        ),
        escape_html(identity)
    )
}

pub struct Session {
    interpreter: Interpreter,
    transcript: Transcript,
    input: InputState,
    recall: RecallBuffer,
    phase: Phase,
    animation: Option<TypingAnimation>,
    next_delay: Option<Duration>,
    interrupt: CancellationToken,
    globe_active: bool,
    prompt: String,
    identity: String,
    cadence: Cadence,
    signals: EnvironmentSignals,
    started: Instant,
}

impl Session {
    pub fn new(interpreter: Interpreter, options: SessionOptions) -> Self {
        let mut session = Self {
            interpreter,
            transcript: Transcript::new(),
            input: InputState::new(options.max_input_len),
            recall: RecallBuffer::new(),
            phase: Phase::IdleInput,
            animation: None,
            next_delay: None,
            interrupt: CancellationToken::new(),
            globe_active: false,
            prompt: prompt(&options.identity),
            identity: options.identity,
            cadence: options.cadence,
            signals: options.signals,
            started: Instant::now(),
        };

        if options.welcome {
            let echo = session.echo_line(WELCOME_COMMAND);
            session.transcript.push_line(echo);
            session.start_animation(WELCOME_MESSAGE.to_string());
        }
        session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn recall(&self) -> &RecallBuffer {
        &self.recall
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn globe_active(&self) -> bool {
        self.globe_active
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating | Phase::Interrupted)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Delay before the next [`Session::tick`] is due, while animating
    pub fn next_delay(&self) -> Option<Duration> {
        if self.is_animating() { self.next_delay } else { None }
    }

    /// Handle to the flag raised by [`Key::Interrupt`]
    pub fn interrupt_token(&self) -> CancellationToken {
        self.interrupt.clone()
    }

    /// Record the visible terminal size for `fastfetch`
    pub fn set_screen(&mut self, width: u16, height: u16) {
        self.signals.screen_width = width;
        self.signals.screen_height = height;
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<Signal> {
        match key {
            Key::Char(c) => self.input.insert_char(c),
            Key::Backspace => self.input.backspace(),
            Key::Delete => self.input.delete(),
            Key::Left => self.input.move_left(),
            Key::Right => self.input.move_right(),
            Key::Home => self.input.move_home(),
            Key::End => self.input.move_end(),
            Key::Up => self.recall_previous(),
            Key::Down => self.recall_next(),
            Key::Tab => self.complete(),
            Key::Interrupt => self.interrupt(),
            Key::Enter => return self.submit(),
        }
        Vec::new()
    }

    /// Submit the input line; ignored while animating
    pub fn submit(&mut self) -> Vec<Signal> {
        if self.is_animating() {
            tracing::trace!("enter ignored while animating");
            return Vec::new();
        }
        let line = self.input.take();
        self.submit_line(&line)
    }

    /// Run a line as though it had been typed and submitted
    pub fn execute(&mut self, line: &str) -> Vec<Signal> {
        if self.is_animating() {
            tracing::debug!(line, "execute ignored while animating");
            return Vec::new();
        }
        self.input.clear();
        self.submit_line(line)
    }

    /// Leave the globe view without going through `exit`
    pub fn leave_globe(&mut self) -> Option<Signal> {
        if !self.globe_active {
            return None;
        }
        self.globe_active = false;
        Some(Signal::HideGlobe)
    }

    /// Raise the interrupt flag or cancel the pending line
    pub fn interrupt(&mut self) {
        match self.phase {
            Phase::Animating => {
                tracing::debug!("interrupt raised during animation");
                self.interrupt.cancel();
                self.phase = Phase::Interrupted;
            }
            Phase::Interrupted | Phase::Submitting => {}
            Phase::IdleInput => {
                let pending = self.input.take();
                let line = format!("{}{}", self.echo_line(&pending), INTERRUPT_MARKER);
                self.transcript.push_line(line);
                self.transcript.push_blank();
            }
        }
    }

    /// Advance the animation by one unit
    pub fn tick(&mut self) -> Tick {
        if !self.is_animating() {
            return Tick::Idle;
        }

        if self.interrupt.is_cancelled() {
            self.transcript.append_to_last(INTERRUPT_MARKER);
            self.transcript.push_blank();
            self.finish_animation();
            return Tick::Interrupted;
        }

        let Some(animation) = self.animation.as_mut() else {
            self.finish_animation();
            return Tick::Idle;
        };

        if let Some(unit) = animation.advance() {
            self.transcript.append_to_last(unit);
        }

        if animation.is_complete() {
            self.transcript.push_blank();
            self.finish_animation();
            Tick::Finished
        } else {
            let next = self.cadence.per_unit;
            self.next_delay = Some(next);
            Tick::Revealed { next }
        }
    }

    /// Tick until the current animation ends
    pub fn finish(&mut self) -> Tick {
        loop {
            match self.tick() {
                Tick::Revealed { .. } => continue,
                done => return done,
            }
        }
    }

    fn echo_line(&self, typed: &str) -> String {
        format!(r#"{}<span class="text-green-400">{}</span>"#, self.prompt, escape_html(typed))
    }

    fn submit_line(&mut self, line: &str) -> Vec<Signal> {
        if line.trim().is_empty() {
            self.transcript.push_line(self.prompt.clone());
            self.transcript.push_blank();
            return Vec::new();
        }

        self.recall.push(line);
        let echo = self.echo_line(line);
        self.transcript.push_line(echo);
        self.phase = Phase::Submitting;

        let signals = self.signals.clone().with_uptime(self.started.elapsed());
        let ctx = DispatchContext {
            globe_active: self.globe_active,
            now: Local::now(),
            signals: &signals,
            identity: &self.identity,
        };
        let dispatch = self.interpreter.dispatch(line, &ctx);

        let mut emitted = Vec::new();
        if let Some(signal) = dispatch.signal {
            match signal {
                Signal::Clear => self.transcript.clear(),
                Signal::ShowGlobe => self.globe_active = true,
                Signal::HideGlobe => self.globe_active = false,
            }
            emitted.push(signal);
        }

        match dispatch.output {
            CommandOutput::Text(text) => self.start_animation(text),
            CommandOutput::Profile(summary) => self.push_payload(TranscriptEntry::Profile(summary)),
            CommandOutput::Contact(card) => self.push_payload(TranscriptEntry::Contact(card)),
            CommandOutput::None => self.phase = Phase::IdleInput,
        }
        emitted
    }

    fn push_payload(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
        self.transcript.push_blank();
        self.phase = Phase::IdleInput;
    }

    fn start_animation(&mut self, text: String) {
        if self.interrupt.is_cancelled() {
            self.interrupt = CancellationToken::new();
        }
        self.transcript.push_blank();
        self.animation = Some(TypingAnimation::new(text));
        self.next_delay = Some(self.cadence.settle);
        self.phase = Phase::Animating;
    }

    fn finish_animation(&mut self) {
        self.animation = None;
        self.next_delay = None;
        self.phase = Phase::IdleInput;
    }

    fn recall_previous(&mut self) {
        if let Some(entry) = self.recall.previous_entry() {
            let entry = entry.to_string();
            self.input.set(&entry);
        }
    }

    fn recall_next(&mut self) {
        match self.recall.next_entry() {
            Some(entry) => {
                let entry = entry.to_string();
                self.input.set(&entry);
            }
            None => self.input.clear(),
        }
    }

    fn complete(&mut self) {
        let prefix = self.input.text().trim().to_lowercase();
        if prefix.is_empty() {
            return;
        }

        let matches = suggest::prefix_matches(&prefix, registry::names());
        match matches.as_slice() {
            [] => {}
            [only] => self.input.set(&format!("{} ", only)),
            // listing lines would land after the animating line
            _ if self.is_animating() => {}
            many => {
                let typed = format!("{}{}", self.prompt, escape_html(self.input.text()));
                self.transcript.push_line(typed);
                self.transcript.push_line(many.join(MATCH_SEPARATOR));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn session() -> Session {
        Session::new(
            Interpreter::new(Portfolio::builtin()),
            SessionOptions { welcome: false, cadence: Cadence::instant(), ..Default::default() },
        )
    }

    fn type_line(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.handle_key(Key::Char(c));
        }
    }

    fn run(session: &mut Session, text: &str) -> Vec<Signal> {
        type_line(session, text);
        let signals = session.handle_key(Key::Enter);
        session.finish();
        signals
    }

    fn lines(session: &Session) -> Vec<String> {
        session.transcript().iter().map(|e| e.as_line().unwrap_or("<payload>").to_string()).collect()
    }

    #[test]
    fn test_welcome_script() {
        let mut session = Session::new(Interpreter::new(Portfolio::builtin()), SessionOptions::default());
        assert_eq!(session.phase(), Phase::Animating);
        assert_eq!(session.next_delay(), Some(Duration::from_millis(50)));
        assert_eq!(session.transcript().len(), 2);
        assert!(lines(&session)[0].ends_with(r#"<span class="text-green-400">welcome</span>"#));

        assert_eq!(session.finish(), Tick::Finished);
        let lines = lines(&session);
        assert_eq!(lines[1], WELCOME_MESSAGE);
        assert_eq!(lines[2], "");
        assert_eq!(session.phase(), Phase::IdleInput);
        assert!(session.recall().is_empty());
    }

    #[test]
    fn test_prompt_shape() {
        let p = prompt("daroh@terminal");
        assert!(p.starts_with(r#"<span class="text-green-400">┌─(</span>"#));
        assert!(p.contains(r#"<span class="text-indigo-500 font-bold">daroh@terminal</span>"#));
        assert!(p.ends_with(r#"<span class="text-indigo-500">$</span>&nbsp;"#));
    }

    #[test]
    fn test_blank_enter_pushes_prompt_only() {
        let mut session = session();
        type_line(&mut session, "   ");
        session.handle_key(Key::Enter);
        assert_eq!(lines(&session), vec![session.prompt().to_string(), String::new()]);
        assert_eq!(session.phase(), Phase::IdleInput);
        assert!(session.recall().is_empty());
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_submit_text_animates() {
        let mut session = session();
        type_line(&mut session, "whoami");
        session.handle_key(Key::Enter);
        assert_eq!(session.phase(), Phase::Animating);
        assert_eq!(session.recall().entries(), ["whoami"]);
        assert_eq!(session.recall().cursor(), 1);
        assert!(session.input().is_empty());
        assert_eq!(session.tick(), Tick::Revealed { next: Duration::ZERO });
        assert_eq!(lines(&session)[1], "d");

        assert_eq!(session.finish(), Tick::Finished);
        let lines = lines(&session);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(r#"<span class="text-green-400">whoami</span>"#));
        assert_eq!(lines[1], "daroh@terminal");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_typed_input_is_escaped_in_echo_line() {
        let mut session = session();
        run(&mut session, "echo <b>hi</b>");
        let lines = lines(&session);
        assert!(lines[0].contains(r#"<span class="text-green-400">echo &lt;b&gt;hi&lt;/b&gt;</span>"#));
        assert_eq!(lines[1], "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_payload_skips_animation() {
        let mut session = session();
        type_line(&mut session, "contact");
        session.handle_key(Key::Enter);
        assert_eq!(session.phase(), Phase::IdleInput);
        assert_eq!(session.tick(), Tick::Idle);
        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[1], TranscriptEntry::Contact(_)));
        assert!(entries[2].is_blank());
    }

    #[test]
    fn test_fastfetch_reflects_screen() {
        let mut session = session();
        session.set_screen(120, 40);
        run(&mut session, "fastfetch");
        match &session.transcript().entries()[1] {
            TranscriptEntry::Profile(summary) => assert_eq!(summary.device.resolution, "120x40"),
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_ignored_while_animating() {
        let mut session = session();
        type_line(&mut session, "help");
        session.handle_key(Key::Enter);
        session.tick();
        let before = session.transcript().len();

        type_line(&mut session, "about");
        assert!(session.handle_key(Key::Enter).is_empty());
        assert_eq!(session.transcript().len(), before);
        assert_eq!(session.input().text(), "about");
        assert_eq!(session.recall().len(), 1);
        assert!(session.execute("skills").is_empty());
        assert_eq!(session.recall().len(), 1);
    }

    #[test]
    fn test_interrupt_mid_animation() {
        let mut session = session();
        type_line(&mut session, "help");
        session.handle_key(Key::Enter);
        session.tick();
        session.tick();
        let before = session.transcript().len();

        session.handle_key(Key::Interrupt);
        assert_eq!(session.phase(), Phase::Interrupted);
        session.handle_key(Key::Interrupt);
        assert_eq!(session.tick(), Tick::Interrupted);

        let lines = lines(&session);
        assert_eq!(lines.len(), before + 1);
        assert_eq!(lines[before - 1], format!("Av{}", INTERRUPT_MARKER));
        assert_eq!(lines[before], "");
        assert_eq!(lines.iter().filter(|l| l.contains("^C")).count(), 1);
        assert_eq!(session.phase(), Phase::IdleInput);
        assert_eq!(session.tick(), Tick::Idle);
    }

    #[test]
    fn test_interrupt_before_first_unit() {
        let mut session = Session::new(Interpreter::new(Portfolio::builtin()), SessionOptions::default());
        session.handle_key(Key::Interrupt);
        assert_eq!(session.tick(), Tick::Interrupted);
        assert_eq!(lines(&session)[1], INTERRUPT_MARKER);
    }

    #[test]
    fn test_next_animation_after_interrupt_runs() {
        let mut session = session();
        type_line(&mut session, "help");
        session.handle_key(Key::Enter);
        session.handle_key(Key::Interrupt);
        session.tick();

        run(&mut session, "whoami");
        assert!(lines(&session).contains(&"daroh@terminal".to_string()));
    }

    #[test]
    fn test_interrupt_while_idle() {
        let mut session = session();
        type_line(&mut session, "abo");
        session.handle_key(Key::Interrupt);
        let lines = lines(&session);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!(r#"<span class="text-green-400">abo</span>{}"#, INTERRUPT_MARKER)));
        assert_eq!(lines[1], "");
        assert!(session.input().is_empty());
        assert_eq!(session.phase(), Phase::IdleInput);
        assert!(session.recall().is_empty());
    }

    #[test]
    fn test_tab_unique_match() {
        let mut session = session();
        type_line(&mut session, "fa");
        session.handle_key(Key::Tab);
        assert_eq!(session.input().text(), "fastfetch ");
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_tab_includes_hidden_names() {
        let mut session = session();
        type_line(&mut session, "su");
        session.handle_key(Key::Tab);
        assert_eq!(session.input().text(), "sudo ");
    }

    #[test]
    fn test_tab_many_matches() {
        let mut session = session();
        type_line(&mut session, "e");
        session.handle_key(Key::Tab);
        assert_eq!(session.input().text(), "e");
        let lines = lines(&session);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("&nbsp;e"));
        assert_eq!(lines[1], "experience\u{a0}\u{a0}education\u{a0}\u{a0}exit\u{a0}\u{a0}echo");
    }

    #[test]
    fn test_tab_no_match_or_blank_is_noop() {
        let mut session = session();
        session.handle_key(Key::Tab);
        type_line(&mut session, "zz");
        session.handle_key(Key::Tab);
        assert_eq!(session.input().text(), "zz");
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_tab_while_animating() {
        let mut session = session();
        type_line(&mut session, "help");
        session.handle_key(Key::Enter);
        let before = session.transcript().len();

        type_line(&mut session, "e");
        session.handle_key(Key::Tab);
        assert_eq!(session.transcript().len(), before);
        session.handle_key(Key::Backspace);
        type_line(&mut session, "ab");
        session.handle_key(Key::Tab);
        assert_eq!(session.input().text(), "about ");
    }

    #[test]
    fn test_recall_navigation() {
        let mut session = session();
        run(&mut session, "about");
        run(&mut session, "skills");

        session.handle_key(Key::Up);
        assert_eq!(session.input().text(), "skills");
        session.handle_key(Key::Up);
        assert_eq!(session.input().text(), "about");
        session.handle_key(Key::Up);
        session.handle_key(Key::Up);
        assert_eq!(session.input().text(), "about");
        assert_eq!(session.recall().cursor(), 0);

        session.handle_key(Key::Down);
        assert_eq!(session.input().text(), "skills");
        session.handle_key(Key::Down);
        assert_eq!(session.input().text(), "");
        session.handle_key(Key::Down);
        assert_eq!(session.input().text(), "");
        assert_eq!(session.recall().cursor(), 2);
    }

    #[test]
    fn test_up_with_empty_recall() {
        let mut session = session();
        type_line(&mut session, "x");
        session.handle_key(Key::Up);
        assert_eq!(session.input().text(), "x");
    }

    #[test]
    fn test_input_cap() {
        let mut session = Session::new(
            Interpreter::new(Portfolio::builtin()),
            SessionOptions { welcome: false, max_input_len: 4, ..Default::default() },
        );
        type_line(&mut session, "echo hello");
        assert_eq!(session.input().text(), "echo");
    }

    #[test]
    fn test_clear_empties_transcript() {
        let mut session = session();
        run(&mut session, "about");
        let signals = run(&mut session, "clear");
        assert_eq!(signals, vec![Signal::Clear]);
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::IdleInput);
        assert_eq!(session.recall().len(), 2);
    }

    #[test]
    fn test_globe_lifecycle() {
        let mut session = session();
        assert_eq!(run(&mut session, "globe"), vec![Signal::ShowGlobe]);
        assert!(session.globe_active());

        assert!(run(&mut session, "clear").is_empty());
        assert!(!session.transcript().is_empty());

        assert_eq!(run(&mut session, "exit"), vec![Signal::HideGlobe]);
        assert!(!session.globe_active());
        assert_eq!(session.leave_globe(), None);

        run(&mut session, "globe");
        assert_eq!(session.leave_globe(), Some(Signal::HideGlobe));
        assert!(!session.globe_active());
    }

    #[test]
    fn test_unknown_command_suggests() {
        let mut session = session();
        run(&mut session, "ech");
        let out = lines(&session)[1].clone();
        assert!(out.contains("Command not found: ech"));
        assert!(out.contains(">echo</span>"));
    }

    #[test]
    fn test_execute_runs_line() {
        let mut session = session();
        session.execute("whoami");
        session.finish();
        assert_eq!(lines(&session)[1], "daroh@terminal");
        assert_eq!(session.recall().entries(), ["whoami"]);
    }

    #[test]
    fn test_empty_output_animation() {
        let mut session = session();
        type_line(&mut session, "echo");
        session.handle_key(Key::Enter);
        assert_eq!(session.tick(), Tick::Finished);
        assert_eq!(lines(&session), vec![lines(&session)[0].clone(), String::new(), String::new()]);
    }

    #[test]
    fn test_revealed_line_is_whole_units_each_tick() {
        let mut session = session();
        type_line(&mut session, "skills");
        session.handle_key(Key::Enter);
        while let Tick::Revealed { .. } = session.tick() {
            let last = session.transcript().last().and_then(TranscriptEntry::as_line).unwrap_or_default();
            assert_eq!(last.matches('<').count(), last.matches('>').count());
        }
    }
}
