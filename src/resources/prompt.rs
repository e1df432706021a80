//! Blocking yes/no confirmation prompt.

use std::io::{BufRead as _, Write as _};

/// Asks the user to confirm a destructive step.
///
/// The engine only ever sees this trait; tests substitute a scripted
/// implementation so no transition ever blocks on real input.
pub trait Confirm: Send + Sync {
    /// Ask `question` and block until the user answers.
    fn confirm(&self, question: &str) -> bool;
}

/// [`Confirm`] implementation that reads answers from standard input.
///
/// Accepts case-insensitive `yes`/`y` and `no`/`n`; anything else
/// re-prompts. There is no timeout. EOF on stdin is treated as a decline
/// so a closed input stream cannot spin the prompt loop forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmer;

impl Confirm for StdinConfirmer {
    fn confirm(&self, question: &str) -> bool {
        let stdin = std::io::stdin();
        loop {
            print!("{question} <Yes|No> ");
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            if let Some(answer) = parse_answer(&line) {
                return answer;
            }
        }
    }
}

/// Interpret one line of input; `None` means re-prompt.
#[must_use]
pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_yes_variants() {
        assert_eq!(parse_answer("yes"), Some(true));
        assert_eq!(parse_answer("y"), Some(true));
        assert_eq!(parse_answer("YES"), Some(true));
        assert_eq!(parse_answer("  Y \n"), Some(true));
    }

    #[test]
    fn accepts_no_variants() {
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("No\n"), Some(false));
    }

    #[test]
    fn anything_else_reprompts() {
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer("yess"), None);
        assert_eq!(parse_answer("0"), None);
    }
}
