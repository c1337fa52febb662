use colored::Colorize;
use std::fmt::Display;

// Console helpers for startup and shutdown messages; request-time logging goes through `log`.

pub fn log_success(message: impl Display) {
    println!("{}: {}", "Success".bright_green(), message.to_string().green());
}

pub fn log_warning(message: impl Display) {
    println!("{}: {}", "Warning".bright_yellow(), message.to_string().yellow());
}

pub fn log_error(message: impl Display) {
    eprintln!("{}: {}", "Error".bright_red().bold(), message.to_string().red());
}

pub fn log_fatal(message: impl Display) {
    eprintln!("{}: {}", "FATAL".bright_red().bold(), message.to_string().bright_red().bold());
}
