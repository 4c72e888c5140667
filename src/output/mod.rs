//! Styled terminal output for sfx-migrate
//!
//! Progress goes to stdout; errors go to stderr.

use owo_colors::{OwoColorize, Rgb};

const GREEN: Rgb = Rgb(152, 225, 152);
const RED: Rgb = Rgb(255, 160, 160);
const YELLOW: Rgb = Rgb(255, 230, 160);
const BLUE: Rgb = Rgb(160, 200, 255);
const LAVENDER: Rgb = Rgb(181, 174, 254);
const TEAL: Rgb = Rgb(120, 180, 195);
const GREY: Rgb = Rgb(160, 160, 160);

fn status_line(symbol: &str, color: Rgb, message: &str) -> String {
    format!("{} {}", symbol.color(color).bold(), message.bright_white())
}

/// Print a success message with a checkmark
pub fn success(message: &str) {
    println!("{}", status_line("✓", GREEN, message));
}

/// Print an error message to stderr
pub fn error(message: &str) {
    eprintln!("{}", status_line("✗", RED, message));
}

pub fn warning(message: &str) {
    println!("{}", status_line("⚠", YELLOW, message));
}

pub fn info(message: &str) {
    println!("{}", status_line("ℹ", BLUE, message));
}

/// Print a phase header followed by a rule
pub fn section(title: &str) {
    println!("\n{}", title.color(LAVENDER).bold());
    println!("{}", "─".repeat(50).color(GREY));
}

pub fn key_value(key: &str, value: &str) {
    println!("  {} {}", format!("{}:", key).color(GREY), value.bright_white());
}

/// Echo a provisioner command line before it runs
pub fn command(command_line: &str) {
    println!(
        "{} {}",
        "[command]".color(TEAL).bold(),
        command_line.color(YELLOW)
    );
}

/// Print captured tool output or other low-priority detail
pub fn dimmed(message: &str) {
    println!("{}", message.color(GREY));
}

pub fn blank() {
    println!();
}
