//! stdin/stdout terminal

use std::io::{self, BufRead, Write};

use wallet_core::{Result, Terminal, WalletError};

/// Blocking line-based terminal on the process's stdio
pub struct StdTerminal {
    color: bool,
}

impl StdTerminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, label: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, label)
        } else {
            label.to_string()
        }
    }
}

impl Terminal for StdTerminal {
    fn prompt(&mut self, message: &str) -> Result<String> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(WalletError::UserCancelled("end of input".to_string()));
        }

        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn info(&mut self, message: &str) {
        println!("{}", message);
    }

    fn success(&mut self, message: &str) {
        println!("{} {}", self.paint("32", "✓"), message);
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {}", self.paint("33", "Warning:"), message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", self.paint("31", "Error:"), message);
    }
}
