//! Line resolution and command handlers.

use chrono::{DateTime, Local};

use crate::content::{Portfolio, Project};
use crate::output::{CommandOutput, Dispatch, ProfileSummary, Signal};
use crate::probe::{EnvironmentSignals, probe};
use crate::registry::{self, CommandKind, CommandSpec};
use crate::sanitize::escape_html;
use crate::suggest;

/// Live state a handler may read
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub globe_active: bool,
    pub now: DateTime<Local>,
    pub signals: &'a EnvironmentSignals,
    /// `user@host`
    pub identity: &'a str,
}

/// How a line was resolved against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Command { spec: &'static CommandSpec, args: Vec<String> },
    /// Lowercased first token of an unregistered line
    Unknown(String),
    Empty,
}

/// Resolve a raw line
///
/// The command token is matched lowercased; arguments keep their case.
pub fn resolve(line: &str) -> Resolution {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Resolution::Empty;
    }

    if let Some(spec) = registry::lookup(&trimmed.to_lowercase()) {
        return Resolution::Command { spec, args: Vec::new() };
    }

    let mut tokens = trimmed.split_whitespace();
    let token = tokens.next().map(str::to_lowercase).unwrap_or_default();
    match registry::lookup(&token) {
        Some(spec) => Resolution::Command { spec, args: tokens.map(str::to_string).collect() },
        None => Resolution::Unknown(token),
    }
}

pub struct Interpreter {
    portfolio: Portfolio,
}

impl Interpreter {
    pub fn new(portfolio: Portfolio) -> Self {
        Self { portfolio }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Run one input line
    pub fn dispatch(&self, line: &str, ctx: &DispatchContext<'_>) -> Dispatch {
        match resolve(line) {
            Resolution::Empty => Dispatch::none(),
            Resolution::Unknown(token) => not_found(&token),
            Resolution::Command { spec, args } => {
                tracing::debug!(command = spec.name, args = args.len(), "dispatching command");
                self.run(spec.kind, &args, ctx)
            }
        }
    }

    fn run(&self, kind: CommandKind, args: &[String], ctx: &DispatchContext<'_>) -> Dispatch {
        let portfolio = &self.portfolio;
        match kind {
            CommandKind::Help => Dispatch::text(help()),
            CommandKind::Fastfetch => {
                let summary = ProfileSummary::new(portfolio, probe(ctx.signals));
                Dispatch::output(CommandOutput::Profile(Box::new(summary)))
            }
            CommandKind::About => Dispatch::text(portfolio.about.clone()),
            CommandKind::Projects => Dispatch::text(projects(portfolio)),
            CommandKind::Skills => Dispatch::text(skills(portfolio)),
            CommandKind::Experience => Dispatch::text(portfolio.experience.clone()),
            CommandKind::Education => Dispatch::text(portfolio.education.clone()),
            CommandKind::Contact => Dispatch::output(CommandOutput::Contact(portfolio.contact.clone())),
            CommandKind::Clear if ctx.globe_active => {
                Dispatch::text("Cannot clear the terminal while the globe is active. Use 'exit' to return.")
            }
            CommandKind::Clear => Dispatch::none().with_signal(Signal::Clear),
            CommandKind::Globe => Dispatch::text("Launching globe... Please use 'exit' to return to the terminal.")
                .with_signal(Signal::ShowGlobe),
            CommandKind::Exit if ctx.globe_active => {
                Dispatch::text("Returning to the terminal.").with_signal(Signal::HideGlobe)
            }
            CommandKind::Exit => Dispatch::text("Nothing to exit."),
            CommandKind::Sudo => {
                Dispatch::text(r#"<span class="text-red">Permission denied.</span> Nice try though! 😄"#)
            }
            CommandKind::Echo => Dispatch::text(escape_html(&args.join(" "))),
            CommandKind::Date => Dispatch::text(ctx.now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()),
            CommandKind::Whoami => Dispatch::text(ctx.identity),
        }
    }
}

fn not_found(token: &str) -> Dispatch {
    let suggestion = suggest::closest(token, registry::names());
    tracing::debug!(token, ?suggestion, "command not found");

    let mut text = format!(
        r#"<span class="text-red-400">Command not found: {}</span><br>Type 'help' for a list of available commands."#,
        escape_html(token)
    );
    if let Some(name) = suggestion {
        text.push_str(&format!(r#"<br>Did you mean '<span class="text-yellow-400">{}</span>'?"#, name));
    }
    Dispatch::text(text)
}

fn help() -> String {
    let lines: Vec<String> =
        registry::visible().map(|cmd| format!("&nbsp;- {}: {}", cmd.name, cmd.description)).collect();
    format!("Available commands:<br>{}", lines.join("<br>"))
}

fn project_entry(number: usize, project: &Project) -> String {
    let date = project.date.as_ref().map(|d| format!(r#" <span class="text-gray-400">({})</span>"#, d)).unwrap_or_default();
    format!(
        concat!(
            r#"&nbsp;&nbsp;<span class="text-cyan-400">{}. {}</span>{}<br>"#,
            "&nbsp;&nbsp;&nbsp;&nbsp;{}<br>",
            r#"&nbsp;&nbsp;&nbsp;&nbsp;<span class="text-blue-400">Tech:</span> {}"#,
        ),
        number, project.title, date, project.description, project.stack
    )
}

fn projects(portfolio: &Portfolio) -> String {
    let sections = [
        ("Development Projects", &portfolio.projects),
        ("Machine Learning Projects", &portfolio.ml_projects),
        ("Personal Projects", &portfolio.personal_projects),
    ];

    let mut number = 0;
    let rendered: Vec<String> = sections
        .iter()
        .map(|(heading, list)| {
            let entries: Vec<String> = list
                .iter()
                .map(|project| {
                    number += 1;
                    project_entry(number, project)
                })
                .collect();
            format!(r#"<span class="text-yellow-400">{}</span><br>{}"#, heading, entries.join("<br><br>"))
        })
        .collect();

    format!(r#"<span class="text-green-400">All Projects</span><br><br>{}"#, rendered.join("<br><br>"))
}

fn skills(portfolio: &Portfolio) -> String {
    let lines: Vec<String> = portfolio
        .skills
        .iter()
        .map(|s| format!(r#"&nbsp;&nbsp;<span class="text-yellow-400">{}:</span> {}"#, s.category, s.items))
        .collect();
    format!(r#"<span class="text-green-400">Technical Skills</span><br>{}"#, lines.join("<br>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SkillGroup;
    use chrono::TimeZone;

    struct Fixture {
        signals: EnvironmentSignals,
        now: DateTime<Local>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                signals: EnvironmentSignals::default(),
                now: Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 11).earliest().unwrap(),
            }
        }

        fn ctx(&self, globe_active: bool) -> DispatchContext<'_> {
            DispatchContext { globe_active, now: self.now, signals: &self.signals, identity: "daroh@terminal" }
        }
    }

    fn run(line: &str) -> Dispatch {
        let fixture = Fixture::new();
        Interpreter::new(Portfolio::builtin()).dispatch(line, &fixture.ctx(false))
    }

    fn text(line: &str) -> String {
        run(line).output.as_text().map(str::to_string).unwrap_or_default()
    }

    #[test]
    fn test_resolve_whole_line() {
        assert!(matches!(resolve("  HELP "), Resolution::Command { spec, args } if spec.name == "help" && args.is_empty()));
        assert_eq!(resolve("   "), Resolution::Empty);
        assert_eq!(resolve("Foo bar"), Resolution::Unknown("foo".to_string()));
    }

    #[test]
    fn test_resolve_keeps_argument_case() {
        match resolve("ECHO Hello   World") {
            Resolution::Command { spec, args } => {
                assert_eq!(spec.kind, CommandKind::Echo);
                assert_eq!(args, vec!["Hello", "World"]);
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_help_lists_visible_commands() {
        let out = text("help");
        let lines: Vec<&str> = out.split("<br>").collect();
        assert_eq!(lines[0], "Available commands:");
        assert_eq!(lines.len(), 1 + registry::visible().count());
        for (line, cmd) in lines[1..].iter().zip(registry::visible()) {
            assert_eq!(*line, format!("&nbsp;- {}: {}", cmd.name, cmd.description));
        }
        assert!(!out.contains("sudo"));
    }

    #[test]
    fn test_not_found_with_suggestion() {
        let out = text("ech");
        assert!(out.contains("Command not found: ech"));
        assert!(out.contains("Type 'help' for a list of available commands."));
        assert!(out.contains(r#"Did you mean '<span class="text-yellow-400">echo</span>'?"#));
    }

    #[test]
    fn test_not_found_escapes_token() {
        let out = text("<img> x");
        assert!(out.contains("Command not found: &lt;img&gt;"));
    }

    #[test]
    fn test_echo_escapes_arguments() {
        assert_eq!(text("echo <b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(text("echo it's  \"fine\""), "it&#039;s &quot;fine&quot;");
        assert_eq!(text("echo"), "");
    }

    #[test]
    fn test_blank_line_is_silent() {
        let dispatch = run("   ");
        assert_eq!(dispatch.output, CommandOutput::None);
        assert_eq!(dispatch.signal, None);
    }

    #[test]
    fn test_output_kinds_are_stable() {
        let fixture = Fixture::new();
        let interpreter = Interpreter::new(Portfolio::builtin());
        for name in registry::names() {
            let first = interpreter.dispatch(name, &fixture.ctx(false));
            let second = interpreter.dispatch(name, &fixture.ctx(false));
            assert_eq!(first, second, "{name} is not deterministic");
        }
    }

    #[test]
    fn test_payload_commands() {
        match run("fastfetch").output {
            CommandOutput::Profile(summary) => {
                assert_eq!(summary.name, "Daroh Sou");
                assert_eq!(summary.device.os, "Unknown OS");
            }
            other => panic!("expected profile payload, got {other:?}"),
        }
        assert!(matches!(run("contact").output, CommandOutput::Contact(c) if c.email == "hello@daroh.me"));
    }

    #[test]
    fn test_clear_signals() {
        let fixture = Fixture::new();
        let interpreter = Interpreter::new(Portfolio::builtin());

        let idle = interpreter.dispatch("clear", &fixture.ctx(false));
        assert_eq!(idle.signal, Some(Signal::Clear));
        assert_eq!(idle.output, CommandOutput::None);

        let globe = interpreter.dispatch("clear", &fixture.ctx(true));
        assert_eq!(globe.signal, None);
        assert!(globe.output.as_text().unwrap().starts_with("Cannot clear the terminal"));
    }

    #[test]
    fn test_globe_and_exit() {
        let fixture = Fixture::new();
        let interpreter = Interpreter::new(Portfolio::builtin());

        let show = interpreter.dispatch("globe", &fixture.ctx(false));
        assert_eq!(show.signal, Some(Signal::ShowGlobe));
        assert_eq!(show.output.as_text(), Some("Launching globe... Please use 'exit' to return to the terminal."));

        let hide = interpreter.dispatch("exit", &fixture.ctx(true));
        assert_eq!(hide.signal, Some(Signal::HideGlobe));

        let nothing = interpreter.dispatch("exit", &fixture.ctx(false));
        assert_eq!(nothing.signal, None);
        assert_eq!(nothing.output.as_text(), Some("Nothing to exit."));
    }

    #[test]
    fn test_date_and_whoami() {
        assert!(text("date").starts_with("Mon Oct 19 2026 14:03:11 GMT"));
        assert_eq!(text("whoami"), "daroh@terminal");
    }

    #[test]
    fn test_sudo() {
        assert_eq!(text("sudo rm -rf /"), r#"<span class="text-red">Permission denied.</span> Nice try though! 😄"#);
    }

    #[test]
    fn test_projects_numbering_is_continuous() {
        let out = text("projects");
        assert!(out.starts_with(r#"<span class="text-green-400">All Projects</span><br><br>"#));
        assert!(out.contains("1. Terminal Portfolio</span> <span class=\"text-gray-400\">(2025)</span>"));
        assert!(out.contains("2. Event Ticketing Platform"));
        assert!(out.contains("3. Handwriting Recognition</span><br>"));
        assert!(out.contains("4. Generative Sketches"));
        let dev = out.find("Development Projects").unwrap();
        let ml = out.find("Machine Learning Projects").unwrap();
        let personal = out.find("Personal Projects").unwrap();
        assert!(dev < ml && ml < personal);
    }

    #[test]
    fn test_skills() {
        let mut portfolio = Portfolio::builtin();
        portfolio.skills = vec![
            SkillGroup { category: "Languages".into(), items: "Rust".into() },
            SkillGroup { category: "Tools".into(), items: "Git".into() },
        ];
        let fixture = Fixture::new();
        let out = Interpreter::new(portfolio).dispatch("skills", &fixture.ctx(false));
        assert_eq!(
            out.output.as_text(),
            Some(concat!(
                r#"<span class="text-green-400">Technical Skills</span><br>"#,
                r#"&nbsp;&nbsp;<span class="text-yellow-400">Languages:</span> Rust<br>"#,
                r#"&nbsp;&nbsp;<span class="text-yellow-400">Tools:</span> Git"#,
            ))
        );
    }
}
