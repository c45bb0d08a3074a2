use colored::Colorize;

/// Print a success message with a green checkmark.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning with a yellow bang to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {}", "!".yellow(), message);
}

/// Print a neutral progress line.
pub fn info(message: &str) {
    println!("{} {}", "·".dimmed(), message);
}
