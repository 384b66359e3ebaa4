use ratatui::Terminal;
use ratatui::backend::TestBackend;
use termfolio_core::{Cadence, Interpreter, Key, Portfolio, Session, SessionOptions};
use termfolio_ui::{App, KeyAction};

fn create_test_app(welcome: bool) -> App {
    let session = Session::new(
        Interpreter::new(Portfolio::builtin()),
        SessionOptions { welcome, cadence: Cadence::instant(), ..Default::default() },
    );
    App::new(session)
}

fn run(app: &mut App, line: &str) {
    for c in line.chars() {
        app.handle_action(KeyAction::Session(Key::Char(c)));
    }
    app.handle_action(KeyAction::Session(Key::Enter));
    finish(app);
}

fn finish(app: &mut App) {
    while app.animation_deadline().is_some() {
        app.tick_animation();
    }
}

fn render(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    output
}

#[test]
fn test_welcome_renders_after_animation() {
    let mut app = create_test_app(true);
    finish(&mut app);

    let content = render(&mut app, 80, 24);
    assert!(content.contains("┌─(daroh@terminal)-[~]"));
    assert!(content.contains("Welcome to my portfolio terminal!"));
    assert!(content.contains("Type 'help' to see available commands."));
    assert!(content.contains("[Enter] run"));
}

#[test]
fn test_typed_input_is_visible() {
    let mut app = create_test_app(false);
    for c in "abo".chars() {
        app.handle_action(KeyAction::Session(Key::Char(c)));
    }

    let content = render(&mut app, 60, 10);
    assert!(content.contains("└─$ abo"));
}

#[test]
fn test_help_lists_visible_commands() {
    let mut app = create_test_app(false);
    run(&mut app, "help");

    let content = render(&mut app, 100, 40);
    assert!(content.contains("Available commands:"));
    assert!(content.contains("fastfetch"));
    assert!(content.contains("globe"));
    assert!(!content.contains("sudo"));
}

#[test]
fn test_fastfetch_renders_profile_card() {
    let mut app = create_test_app(false);
    app.handle_event(crossterm::event::Event::Resize(120, 50));
    run(&mut app, "fastfetch");

    let content = render(&mut app, 120, 50);
    assert!(content.contains("Daroh Sou"));
    assert!(content.contains("Resolution: 120x50"));
    assert!(content.contains("GitHub:"));
}

#[test]
fn test_contact_renders_card() {
    let mut app = create_test_app(false);
    run(&mut app, "contact");

    let content = render(&mut app, 100, 20);
    assert!(content.contains("╭─ Contact"));
    assert!(content.contains("https://github.com/"));
}

#[test]
fn test_globe_takes_upper_screen() {
    let mut app = create_test_app(false);
    run(&mut app, "globe");
    assert!(app.session().globe_active());

    let content = render(&mut app, 140, 40);
    let first_line = content.lines().next().unwrap();
    assert!(first_line.contains("globe"));
    assert!(content.contains("[Esc] leave globe"));

    app.handle_action(KeyAction::LeaveGlobe);
    let content = render(&mut app, 140, 40);
    assert!(!content.lines().next().unwrap().contains("globe"));
}

#[test]
fn test_unknown_command_suggests() {
    let mut app = create_test_app(false);
    run(&mut app, "ech");

    let content = render(&mut app, 80, 12);
    assert!(content.contains("Command not found: ech"));
    assert!(content.contains("echo"));
}

#[test]
fn test_escaped_echo_stays_literal() {
    let mut app = create_test_app(false);
    run(&mut app, "echo <b>hi</b>");

    let content = render(&mut app, 80, 12);
    assert!(content.contains("<b>hi</b>"));
}

#[test]
fn test_clear_empties_screen() {
    let mut app = create_test_app(true);
    finish(&mut app);
    run(&mut app, "clear");

    let content = render(&mut app, 80, 12);
    assert!(!content.contains("Welcome"));
    assert!(content.contains("└─$"));
}

#[test]
fn test_scrollback_shows_older_lines() {
    let mut app = create_test_app(true);
    finish(&mut app);
    for _ in 0..6 {
        run(&mut app, "whoami");
    }

    let bottom = render(&mut app, 80, 8);
    assert!(!bottom.contains("Welcome"));

    for _ in 0..10 {
        app.handle_action(KeyAction::PageUp);
        render(&mut app, 80, 8);
    }
    let top = render(&mut app, 80, 8);
    assert!(top.contains("Welcome"));
}
