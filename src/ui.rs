//! User interface module - styled output and the caption prompt.

use std::io::{self, Write};

use console::style;

use crate::error::Result;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Returns whether the process is attached to an interactive terminal.
pub fn is_interactive() -> bool {
    console::user_attended()
}

/// Prompts for a caption on the terminal.
///
/// An empty answer yields an empty caption.
///
/// # Returns
/// * `Ok(String)` - The entered caption, trimmed
/// * `Err` - If input error occurs
pub fn prompt_caption() -> Result<String> {
    print!("Caption [empty]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}
