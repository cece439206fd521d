use super::types::Roster;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default roster file path (~/.config/persona-fit/roster.json)
pub fn get_roster_path() -> PathBuf {
    crate::config::get_config_dir().join("roster.json")
}

/// Load the roster from a JSON file
///
/// If the file doesn't exist, returns a new empty roster.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.exists() {
        return Ok(Roster::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open roster file at {}", path.display()))?;

    let roster: Roster = serde_json::from_reader(file).context("Failed to load roster")?;

    // Version check
    if roster.version != 1 {
        anyhow::bail!("Unsupported roster version: {}", roster.version);
    }

    Ok(roster)
}

/// Save the roster to a JSON file atomically
///
/// Uses atomic-write-file to ensure the file is never left in a corrupted
/// state. Creates the config directory if it doesn't exist.
pub fn save_roster(path: &Path, roster: &Roster) -> Result<()> {
    // Ensure config directory exists
    crate::config::ensure_config_dir()?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, roster).context("Failed to serialize roster")?;

    file.commit().context("Failed to save roster")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("persona_fit_test_missing.json");
        // Ensure it doesn't exist
        let _ = std::fs::remove_file(&temp_path);

        let roster = load_roster(&temp_path).unwrap();
        assert_eq!(roster.version, 1);
        assert!(roster.candidates.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("persona_fit_test_roundtrip.json");
        // Ensure clean state
        let _ = std::fs::remove_file(&temp_path);

        let mut roster = Roster::new();
        roster.register("ada@example.com", Some(40.0));
        roster.register("grace@example.com", None);

        save_roster(&temp_path, &roster).unwrap();

        let loaded = load_roster(&temp_path).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.candidates.len(), 2);
        assert!(loaded.contains("ada@example.com"));
        assert_eq!(loaded.profile_score("ada@example.com"), Some(40.0));
        assert_eq!(loaded.profile_score("grace@example.com"), None);

        // Cleanup
        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_path = env::temp_dir().join("persona_fit_test_version.json");
        std::fs::write(&temp_path, r#"{"version": 99, "candidates": {}}"#).unwrap();

        let result = load_roster(&temp_path);
        assert!(result.is_err());

        let _ = std::fs::remove_file(&temp_path);
    }
}
