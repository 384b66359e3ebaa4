pub mod app;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod markup;
pub mod theme;

pub use app::App;
pub use event_handler::{EventHandler, KeyAction};
pub use layout::{TerminalLayout, screen_size};
pub use markup::{to_lines, to_plain_text};
pub use theme::Theme;
