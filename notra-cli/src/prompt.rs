//! Overwrite confirmation

use async_trait::async_trait;
use std::io::{self, IsTerminal, Write};

/// Asks the user before existing files are overwritten
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Whether a user is attached who can answer
    fn is_interactive(&self) -> bool;

    /// Ask whether `target_dir` may be overwritten
    ///
    /// Returns `false` for a "no", an empty answer, end of input, or an
    /// interrupt.
    async fn confirm_overwrite(&self, target_dir: &str) -> io::Result<bool>;
}

/// Prompt on the controlling terminal via stdin/stdout
pub struct TerminalPrompt;

#[async_trait]
impl ConfirmPrompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    async fn confirm_overwrite(&self, target_dir: &str) -> io::Result<bool> {
        if !self.is_interactive() {
            return Ok(false);
        }

        print!("Directory \"{target_dir}\" already exists. Do you want to overwrite it? [y/N]: ");
        io::stdout().flush()?;

        let read_answer = tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            io::stdin().read_line(&mut input).map(|_| input)
        });

        let interrupted = async {
            // If the handler cannot be installed, fall back to waiting on stdin
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            answer = read_answer => {
                let input = answer.map_err(io::Error::other)??;
                Ok(is_affirmative(&input))
            }
            _ = interrupted => {
                println!();
                Ok(false)
            }
        }
    }
}

/// `y` or `yes`, case-insensitive; everything else declines
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
