//! CLI command handlers for `calendurr`.
//!
//! Each command is implemented in its own submodule. Schedule and report
//! handlers return user-facing error messages; `main` prints them and exits.

pub mod config;
pub mod report;
pub mod schedule;

use std::io::{self, Write};

/// Ask a yes/no question on stdin; anything but `y`/`yes` means no
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
