pub mod animator;
pub mod config;
pub mod content;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod output;
pub mod probe;
pub mod registry;
pub mod sanitize;
pub mod session;
pub mod suggest;

pub use animator::{Cadence, Typed, TypingAnimation, next_unit, typewrite, units};
pub use config::{Config, ConfigError, ContentConfig, TerminalConfig};
pub use content::{ContactCard, Portfolio, Profile, Project, SkillGroup};
pub use error::{ContentError, Error, Result};
pub use interpreter::{DispatchContext, Interpreter, Resolution, resolve};
pub use logging::{LogFormat, LogTarget, init_logging};
pub use output::{CommandOutput, Dispatch, ProfileSummary, Signal};
pub use probe::{DeviceInfo, EnvironmentSignals, GpuSignal, probe};
pub use registry::{COMMANDS, CommandKind, CommandSpec};
pub use sanitize::{escape_html, render_safe, sanitize};
pub use session::{
    InputState, Key, Phase, RecallBuffer, Session, SessionOptions, Tick, Transcript, TranscriptEntry, prompt,
};
