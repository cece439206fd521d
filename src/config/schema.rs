use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration.
///
/// Everything is optional: with no config file the built-in questionnaire
/// and the default roster path are used.
///
/// Example YAML:
/// ```yaml
/// roster: /home/hr/candidates/roster.json
/// questionnaire: /home/hr/candidates/questions.yaml
/// show_descriptions: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the roster file (default: ~/.config/persona-fit/roster.json)
    #[serde(default)]
    pub roster: Option<PathBuf>,

    /// Path to a custom questionnaire YAML (default: built-in Mini-IPIP set)
    #[serde(default)]
    pub questionnaire: Option<PathBuf>,

    /// Show trait descriptions on the results card (default: true)
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,
}

fn default_show_descriptions() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: None,
            questionnaire: None,
            show_descriptions: default_show_descriptions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_empty_parse() {
        // Missing config file and empty YAML must behave identically
        let parsed: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(Config::default(), parsed);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.roster.is_none());
        assert!(config.questionnaire.is_none());
        assert!(config.show_descriptions);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
roster: /tmp/roster.json
questionnaire: /tmp/questions.yaml
show_descriptions: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.roster, Some(PathBuf::from("/tmp/roster.json")));
        assert_eq!(
            config.questionnaire,
            Some(PathBuf::from("/tmp/questions.yaml"))
        );
        assert!(!config.show_descriptions);
    }

    #[test]
    fn test_partial_config_parse() {
        let config: Config = serde_saphyr::from_str("roster: /tmp/r.json\n").unwrap();
        assert_eq!(config.roster, Some(PathBuf::from("/tmp/r.json")));
        assert!(config.questionnaire.is_none());
        assert!(config.show_descriptions);
    }
}
