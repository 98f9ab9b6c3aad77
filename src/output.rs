//! Terminal lines for people running the cleaner by hand.
//!
//! Each line carries a short tag (`info:`, `warn:`, ...). The tag is colored
//! only when the stream it goes to is a terminal. Progress and success go to
//! stdout, problems to stderr.

use owo_colors::{OwoColorize, Style};

#[derive(Clone, Copy)]
enum Sink {
    Stdout,
    Stderr,
}

impl Sink {
    fn is_terminal(self) -> bool {
        match self {
            Sink::Stdout => atty::is(atty::Stream::Stdout),
            Sink::Stderr => atty::is(atty::Stream::Stderr),
        }
    }
}

fn render(tag: &str, style: Style, msg: &str, color: bool) -> String {
    if color {
        format!("{} {msg}", tag.style(style))
    } else {
        format!("{tag} {msg}")
    }
}

fn emit(sink: Sink, tag: &str, style: Style, msg: &str) {
    let line = render(tag, style, msg, sink.is_terminal());
    match sink {
        Sink::Stdout => println!("{line}"),
        Sink::Stderr => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Sink::Stdout, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Sink::Stderr, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Sink::Stderr, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Sink::Stdout, "ok:", Style::new().green().bold(), msg);
}

/// Untagged stdout line. `Removed <path>` / `Would remove <path>` go here so
/// build scripts can grep for them.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
