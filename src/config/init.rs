use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::questionnaire::Questionnaire;
use crate::roster::get_roster_path;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("persona-fit Configuration Wizard");
    println!("================================");
    println!();

    // 1. Roster location
    println!("The roster is the candidate table: who may take the assessment,");
    println!("their profile scores, and where results are written back.");
    let roster_str = prompt_with_default(
        "Roster path",
        &get_roster_path().display().to_string(),
    )?;
    let roster = PathBuf::from(roster_str);

    // 2. Questionnaire
    println!();
    println!("The built-in questionnaire is a 20-item Mini-IPIP style Big Five set.");
    let questionnaire = if prompt_yes_no("Export it to a YAML file for customization?", false)? {
        let default_q_path = crate::config::get_config_dir().join("questionnaire.yaml");
        let q_str = prompt_with_default(
            "Questionnaire path",
            &default_q_path.display().to_string(),
        )?;
        let q_path = PathBuf::from(q_str);

        let yaml = serde_saphyr::to_string(&Questionnaire::builtin())
            .map_err(|e| anyhow::anyhow!("Failed to serialize questionnaire: {}", e))?;
        if let Some(parent) = q_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&q_path, &yaml)
            .with_context(|| format!("Failed to write questionnaire to {}", q_path.display()))?;
        println!("Questionnaire written to {}", q_path.display());

        Some(q_path)
    } else {
        None
    };

    // 3. Results card verbosity
    println!();
    let show_descriptions =
        prompt_yes_no("Show trait descriptions on the results card?", true)?;

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        roster: Some(roster),
        questionnaire,
        show_descriptions,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Register candidates with `persona-fit register <email>`, then run `persona-fit` to start.");

    Ok(())
}
