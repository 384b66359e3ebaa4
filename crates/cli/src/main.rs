use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use termfolio_core::logging::LoggingConfig;
use termfolio_core::registry;
use termfolio_core::{
    Cadence, CommandOutput, Config, ContactCard, Dispatch, DispatchContext, EnvironmentSignals, Interpreter,
    LogTarget, Portfolio, ProfileSummary, Session, SessionOptions, Signal, Typed, init_logging, render_safe,
    typewrite,
};
use termfolio_ui::{App, screen_size, to_plain_text};
use tokio_util::sync::CancellationToken;

/// Per-unit delay for `exec --animate` when the config has none
const EXEC_TYPING_DELAY: Duration = Duration::from_millis(8);

/// termfolio - a portfolio you browse from a terminal prompt
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "A terminal portfolio with a typewriter shell", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to termfolio.toml (default: $TERMFOLIO_CONFIG or the user config dir)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive terminal
    Start {
        /// Directory relative content paths are resolved against
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Run a command after the welcome (repeatable)
        #[arg(short, long = "run", value_name = "CMD")]
        run: Vec<String>,
    },
    /// Execute a single command and print its output
    Exec {
        /// Command to execute
        #[arg(required = true, value_name = "CMD")]
        command: String,

        /// Arguments to pass to the command
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Print a JSON report instead of text
        #[arg(long, conflicts_with = "animate")]
        json: bool,

        /// Type the output out (Ctrl+C interrupts)
        #[arg(long)]
        animate: bool,
    },
    /// List registered commands
    Commands {
        /// Include hidden commands
        #[arg(short, long)]
        all: bool,
    },
    /// Write the example configuration
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// `exec --json` output
#[derive(Debug, Serialize)]
struct ExecReport<'a> {
    line: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markup: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a ProfileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<&'a ContactCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<Signal>,
}

impl<'a> ExecReport<'a> {
    fn new(line: &'a str, dispatch: &'a Dispatch) -> Self {
        let mut report =
            Self { line, kind: "none", text: None, markup: None, profile: None, contact: None, signal: dispatch.signal };
        match &dispatch.output {
            CommandOutput::Text(markup) => {
                report.kind = "text";
                report.text = Some(to_plain_text(&render_safe(markup)));
                report.markup = Some(markup);
            }
            CommandOutput::Profile(summary) => {
                report.kind = "profile";
                report.profile = Some(summary);
            }
            CommandOutput::Contact(card) => {
                report.kind = "contact";
                report.contact = Some(card);
            }
            CommandOutput::None => {}
        }
        report
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => return cmd_init(cli.config.as_deref(), force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "termfolio", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Commands { all } => {
            for row in command_rows(all) {
                println!("{}", row);
            }
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    let target = match cli.command {
        Commands::Start { .. } => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let mut logging = LoggingConfig::from(config.logging.clone());
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    let _guard = init_logging(Some(logging), target).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Start { dir, run } => cmd_start(config, dir, run, cli.verbose).await,
        Commands::Exec { command, args, json, animate } => cmd_exec(&config, &command, &args, json, animate).await,
        Commands::Init { .. } | Commands::Completions { .. } | Commands::Commands { .. } => Ok(()),
    }
}

/// Resolve a relative `[content] path` against `dir` and load the portfolio
fn load_portfolio(config: &Config, dir: Option<&Path>) -> Result<Portfolio> {
    let mut config = config.clone();
    if let (Some(dir), Some(path)) = (dir, config.content.path.as_ref())
        && path.is_relative()
    {
        config.content.path = Some(dir.join(path));
    }
    config.portfolio().context("Failed to load portfolio content")
}

/// Start the interactive terminal
async fn cmd_start(config: Config, dir: Option<PathBuf>, run: Vec<String>, verbose: bool) -> Result<()> {
    let started = Instant::now();
    let portfolio = load_portfolio(&config, dir.as_deref())?;

    if verbose {
        println!("{} Identity: {}", "Info:".blue().bold(), config.terminal.identity().cyan());
        if let Some(path) = &config.content.path {
            println!("{} Content: {}", "Info:".blue().bold(), path.display());
        }
        for line in &run {
            println!("{} Queued: {}", "Info:".blue().bold(), line.cyan());
        }
    }

    let options = SessionOptions::from_config(&config.terminal, EnvironmentSignals::detect(started));
    let session = Session::new(Interpreter::new(portfolio), options);

    let mut app = App::new(session);
    app.queue_commands(run);
    app.run().await.context("Terminal session failed")?;

    Ok(())
}

/// Run one line through the interpreter outside any session
fn dispatch_line(config: &Config, portfolio: Portfolio, line: &str, signals: &EnvironmentSignals) -> Dispatch {
    let identity = config.terminal.identity();
    let interpreter = Interpreter::new(portfolio);
    let ctx = DispatchContext { globe_active: false, now: chrono::Local::now(), signals, identity: &identity };
    interpreter.dispatch(line, &ctx)
}

/// Execute a single command and print its output
async fn cmd_exec(config: &Config, command: &str, args: &[String], json: bool, animate: bool) -> Result<()> {
    let started = Instant::now();
    let portfolio = load_portfolio(config, None)?;

    let mut signals = EnvironmentSignals::detect(started);
    if let Some((width, height)) = screen_size() {
        signals = signals.with_screen(width, height);
    }

    let line = std::iter::once(command).chain(args.iter().map(String::as_str)).collect::<Vec<_>>().join(" ");
    let dispatch = dispatch_line(config, portfolio, &line, &signals);
    tracing::debug!(%line, signal = ?dispatch.signal, "exec dispatched");

    if json {
        let report = ExecReport::new(&line, &dispatch);
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to encode report")?);
        return Ok(());
    }

    match &dispatch.output {
        CommandOutput::Text(markup) => {
            let text = to_plain_text(&render_safe(markup));
            if animate {
                let mut cadence = config.terminal.cadence();
                if cadence.per_unit.is_zero() {
                    cadence.per_unit = EXEC_TYPING_DELAY;
                }
                animate_text(&text, cadence).await?;
            } else {
                println!("{}", text);
            }
        }
        CommandOutput::Profile(summary) => print_profile(summary),
        CommandOutput::Contact(card) => print_contact(card),
        CommandOutput::None => {}
    }

    Ok(())
}

async fn animate_text(text: &str, cadence: Cadence) -> Result<()> {
    let token = CancellationToken::new();
    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    };

    let mut stdout = std::io::stdout();
    let mut write_error = None;
    let typed = typewrite(text, cadence, &token, |unit| {
        if let Err(e) = stdout.write_all(unit.as_bytes()).and_then(|_| stdout.flush()) {
            write_error.get_or_insert(e);
        }
    })
    .await;
    watcher.abort();

    if let Some(e) = write_error {
        return Err(e).context("Failed to write output");
    }
    match typed {
        Typed::Completed => println!(),
        Typed::Interrupted => println!("{}", "^C".red()),
    }
    Ok(())
}

fn print_profile(summary: &ProfileSummary) {
    let device = &summary.device;
    println!("{}", summary.name.green().bold());
    println!("{}", summary.title);
    println!("{}", "-".repeat(summary.name.len() + summary.title.len() + 3).dimmed());
    let fields = [
        ("OS", device.os.as_str()),
        ("Kernel", device.kernel.as_str()),
        ("Uptime", device.uptime.as_str()),
        ("Shell", device.shell.as_str()),
        ("Terminal", device.terminal.as_str()),
        ("Resolution", device.resolution.as_str()),
        ("CPU", device.cpu.as_str()),
        ("GPU", device.gpu.as_str()),
        ("Timezone", device.timezone.as_str()),
        ("Language", device.language.as_str()),
    ];
    for (label, value) in fields {
        println!("{} {}", format!("{}:", label).yellow().bold(), value);
    }
    println!();
    print_contact(&summary.contact);
}

fn print_contact(card: &ContactCard) {
    println!("{} {}", "Email:".yellow().bold(), card.email);
    println!("{} {}", "GitHub:".yellow().bold(), card.github_url());
    println!("{} {}", "LinkedIn:".yellow().bold(), card.linkedin_url());
}

/// One row per registered command, in registry order
fn command_rows(all: bool) -> Vec<String> {
    let width = registry::COMMANDS.iter().map(|cmd| cmd.name.len()).max().unwrap_or(0);
    registry::COMMANDS
        .iter()
        .filter(|cmd| all || cmd.visible)
        .map(|cmd| {
            let mut row = format!("{:<width$}  {}", cmd.name, cmd.description, width = width);
            if !cmd.visible {
                row.push_str(" (hidden)");
            }
            row
        })
        .collect()
}

/// Write the example config to `path` or the default location
fn cmd_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Could not determine a config directory")?,
    };
    write_example_config(&path, force)?;
    println!("{} Created config at {}", "Success:".green().bold(), path.display());
    Ok(())
}

fn write_example_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, Config::example()).context("Failed to write config")?;
    Ok(())
}
