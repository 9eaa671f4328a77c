use std::io::{self, BufRead, Write};

use mixxtools_recon::Prompt;

/// Operator interaction over stdout + stdin. Prompts go to stderr so piped
/// stdout stays clean.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        eprint!("{prompt}");
        io::stderr().flush().ok();
        let mut buf = String::new();
        let n = io::stdin().lock().read_line(&mut buf)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while awaiting operator input",
            ));
        }
        Ok(buf.trim().to_string())
    }
}

/// Ask a `(y/*)` question; anything but `y` is a refusal.
pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = StdinPrompt.ask(question)?;
    Ok(answer == "y")
}
