//! User interaction seam for the workflow

use crate::error::Result;

/// Line-oriented user interaction.
///
/// `prompt` returns the entered line without its line terminator and must
/// not trim other whitespace: exact-match confirmations depend on it.
pub trait Terminal {
    fn prompt(&mut self, message: &str) -> Result<String>;
    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Prompt with a default used when the answer is blank; the answer is trimmed
pub fn prompt_default(term: &mut dyn Terminal, message: &str, default: &str) -> Result<String> {
    let answer = term.prompt(&format!("{} [{}]: ", message, default))?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Yes/no question. Blank input selects `default`; only `y`/`yes` mean yes
/// when the default is no, and only `n`/`no` mean no when the default is yes.
pub fn confirm(term: &mut dyn Terminal, message: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let answer = term.prompt(&format!("{} {}: ", message, hint))?;
    let answer = answer.trim().to_ascii_lowercase();

    if answer.is_empty() {
        return Ok(default);
    }

    if default {
        Ok(!(answer == "n" || answer == "no"))
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTerminal;

    #[test]
    fn test_prompt_default() {
        let mut term = ScriptedTerminal::new(["", "  bob  "]);

        let first = prompt_default(&mut term, "Account name", "alice").unwrap();
        let second = prompt_default(&mut term, "Account name", "alice").unwrap();
        assert_eq!(first, "alice");
        assert_eq!(second, "bob");
        assert!(term.prompts()[0].contains("[alice]"));
    }

    #[test]
    fn test_confirm_defaults() {
        let mut term = ScriptedTerminal::new(["", "", "Y", "yes", "n", "maybe", "maybe"]);

        assert!(!confirm(&mut term, "Overwrite?", false).unwrap());
        assert!(confirm(&mut term, "Run faucet?", true).unwrap());
        assert!(confirm(&mut term, "Overwrite?", false).unwrap());
        assert!(confirm(&mut term, "Overwrite?", false).unwrap());
        assert!(!confirm(&mut term, "Run faucet?", true).unwrap());
        assert!(!confirm(&mut term, "Overwrite?", false).unwrap());
        assert!(confirm(&mut term, "Run faucet?", true).unwrap());

        assert!(term.prompts()[0].ends_with("[y/N]: "));
        assert!(term.prompts()[1].ends_with("[Y/n]: "));
    }
}
