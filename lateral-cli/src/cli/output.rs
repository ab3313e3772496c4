//! Small colored output helpers for user-facing status text

use colored::*;

pub fn section_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

pub fn info(message: &str) {
    println!("  {message}");
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}
