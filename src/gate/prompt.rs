use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::{authorize, GateError};
use crate::roster::Roster;

const MAX_ATTEMPTS: usize = 3;

/// Prompts for the candidate's email address. Input is visible: the gate
/// is an existence check, not a secret.
pub fn prompt_for_email() -> Result<String> {
    print!("Email address: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read email from stdin")?;

    let email = input.trim();

    if email.is_empty() {
        anyhow::bail!("Email cannot be empty");
    }

    Ok(email.to_string())
}

/// Interactive gate: prompt for an email and check it against the roster,
/// re-prompting on unknown emails up to a few attempts.
pub fn gate_interactive(roster: &Roster) -> Result<String> {
    println!("Sign in to take the assessment.");
    println!();

    for attempt in 1..=MAX_ATTEMPTS {
        let email = prompt_for_email()?;
        match authorize(roster, &email) {
            Ok(normalized) => return Ok(normalized),
            Err(GateError::NotRegistered(_)) => {
                eprintln!("You are not authorised to take this test.");
                if attempt < MAX_ATTEMPTS {
                    eprintln!("Try again, or ask to be added to the roster.");
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    anyhow::bail!("No authorised email after {} attempts", MAX_ATTEMPTS)
}
