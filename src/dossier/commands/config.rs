use crate::commands::{CmdMessage, CmdResult};
use crate::config::DossierConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Shows or changes the configuration.
///
/// A new value is written to `config_dir` when there is one; otherwise it
/// only lasts for the session. Seed dossiers and the id strategy are read at
/// startup, so changing them affects the next session.
pub fn run(
    config: &mut DossierConfig,
    config_dir: Option<&Path>,
    action: ConfigAction,
) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config.clone())),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(value) => result.add_message(CmdMessage::info(value)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut updated = config.clone();
            if let Err(e) = updated.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            if let Some(dir) = config_dir {
                updated.save(dir)?;
                tracing::debug!(key = %key, dir = %dir.display(), "config saved");
            }
            *config = updated;

            let display_value = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config.clone());
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_value
            )));
            if config_dir.is_none() {
                result.add_message(CmdMessage::warning(
                    "No config directory; the change lasts for this session only",
                ));
            }
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn show_all_returns_the_effective_config() {
        let mut config = DossierConfig::default();
        let result = run(&mut config, None, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(DossierConfig::default()));
    }

    #[test]
    fn show_key_reports_value_or_unknown_key() {
        let mut config = DossierConfig::default();
        let result = run(
            &mut config,
            None,
            ConfigAction::ShowKey("cover-subtitle".to_string()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "Dossier de prensa");

        let result = run(&mut config, None, ConfigAction::ShowKey("nope".to_string())).unwrap();
        assert!(result.has_level(MessageLevel::Error));
    }

    #[test]
    fn set_writes_the_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = DossierConfig::default();
        let result = run(
            &mut config,
            Some(temp_dir.path()),
            ConfigAction::Set("cover-subtitle".to_string(), "Resumen".to_string()),
        )
        .unwrap();

        assert!(result.has_level(MessageLevel::Success));
        assert_eq!(config.cover_subtitle, "Resumen");
        let loaded = DossierConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.cover_subtitle, "Resumen");
    }

    #[test]
    fn invalid_value_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = DossierConfig::default();
        let result = run(
            &mut config,
            Some(temp_dir.path()),
            ConfigAction::Set("thumbnail-scale".to_string(), "huge".to_string()),
        )
        .unwrap();

        assert!(result.has_level(MessageLevel::Error));
        assert_eq!(config, DossierConfig::default());
        assert!(!temp_dir.path().join("config.json").exists());
    }

    #[test]
    fn set_without_a_directory_only_lasts_the_session() {
        let mut config = DossierConfig::default();
        let result = run(
            &mut config,
            None,
            ConfigAction::Set("id-strategy".to_string(), "timestamp".to_string()),
        )
        .unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(config.get("id-strategy").unwrap(), "timestamp");
    }
}
