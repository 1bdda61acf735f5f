//! Styled terminal messages.

use console::{style, StyledObject};

/// Whether styling is disabled via `NO_COLOR`.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

fn header_text(text: &str, plain: bool) -> String {
    let line = format!("=== {text} ===");
    if plain {
        line
    } else {
        style(line).bold().cyan().to_string()
    }
}

type Paint = fn(StyledObject<&str>) -> StyledObject<&str>;

fn tagged(tag: &str, text: &str, plain: bool, paint: Paint) -> String {
    if plain {
        format!("[{tag}] {text}")
    } else {
        format!("{} {text}", paint(style(tag)).bold())
    }
}

/// Print a styled header.
pub fn print_header(text: &str) {
    println!("{}", header_text(text, is_color_disabled()));
}

/// Print a success message.
pub fn print_success(text: &str) {
    println!("{}", tagged("OK", text, is_color_disabled(), |s| s.green()));
}

/// Print a warning on stderr.
pub fn print_warning(text: &str) {
    eprintln!("{}", tagged("WARN", text, is_color_disabled(), |s| s.yellow()));
}

/// Print an error message on stderr.
pub fn print_error(text: &str) {
    eprintln!("{}", tagged("ERROR", text, is_color_disabled(), |s| s.red()));
}
