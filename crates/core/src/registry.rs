//! Static command table.
//!
//! Declaration order matters: `help` lists visible commands in this order and
//! suggestion ties resolve to the earliest entry.

/// The commands the interpreter knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Fastfetch,
    About,
    Projects,
    Skills,
    Experience,
    Education,
    Contact,
    Clear,
    Globe,
    Exit,
    Sudo,
    Echo,
    Date,
    Whoami,
}

/// Registry metadata for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Listed by `help`
    pub visible: bool,
}

const fn spec(kind: CommandKind, name: &'static str, description: &'static str, visible: bool) -> CommandSpec {
    CommandSpec { kind, name, description, visible }
}

pub const COMMANDS: &[CommandSpec] = &[
    spec(CommandKind::Help, "help", "Show available commands", true),
    spec(CommandKind::Fastfetch, "fastfetch", "Display a summary of my profile", true),
    spec(CommandKind::About, "about", "Learn about me", true),
    spec(CommandKind::Projects, "projects", "View my projects", true),
    spec(CommandKind::Skills, "skills", "Explore my technical expertise", true),
    spec(CommandKind::Experience, "experience", "View my work experience", true),
    spec(CommandKind::Education, "education", "See my education background", true),
    spec(CommandKind::Contact, "contact", "Get my contact information", true),
    spec(CommandKind::Clear, "clear", "Clear the terminal", true),
    spec(CommandKind::Globe, "globe", "Launch interactive globe", true),
    spec(CommandKind::Exit, "exit", "Exit the current view (e.g., globe)", false),
    spec(CommandKind::Sudo, "sudo", "Try to get root access (just for fun)", false),
    spec(CommandKind::Echo, "echo", "Echo back your text", false),
    spec(CommandKind::Date, "date", "Show current date and time", false),
    spec(CommandKind::Whoami, "whoami", "Display current user", false),
];

/// Find a command by exact name
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Every registered name, hidden ones included, in declaration order
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|cmd| cmd.name)
}

/// Commands shown by `help`
pub fn visible() -> impl Iterator<Item = &'static CommandSpec> {
    COMMANDS.iter().filter(|cmd| cmd.visible)
}
