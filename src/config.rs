use crate::error::{GradeError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repograde.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repograde/config.toml";

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const NARRATIVE_KEY_ENV: &str = "OPENAI_API_KEY";

/// Explicit configuration for the fetch layer and the optional narrative
/// collaborator. Nothing here is ambient: the provider is constructed from
/// this object, so tests can exercise the collaborator path and the fallback
/// path independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeConfig {
    pub github: Option<GithubConfig>,
    pub narrative: Option<NarrativeConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NarrativeConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl GradeConfig {
    /// GitHub token, environment taking precedence over config files.
    pub fn github_token(&self) -> Option<String> {
        std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                self.github
                    .as_ref()
                    .and_then(|github| github.token.clone())
            })
    }

    pub fn github_api_base(&self) -> Option<String> {
        self.github
            .as_ref()
            .and_then(|github| github.api_base.clone())
    }

    /// API key for the narrative collaborator; `None` disables it and routes
    /// summary/roadmap generation to the deterministic fallback.
    pub fn narrative_api_key(&self) -> Option<String> {
        if self
            .narrative
            .as_ref()
            .map(|narrative| narrative.disabled)
            .unwrap_or(false)
        {
            return None;
        }
        std::env::var(NARRATIVE_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.narrative
                    .as_ref()
                    .and_then(|narrative| narrative.api_key.clone())
            })
    }

    pub fn narrative_model(&self) -> Option<String> {
        self.narrative
            .as_ref()
            .and_then(|narrative| narrative.model.clone())
    }

    pub fn narrative_base_url(&self) -> Option<String> {
        self.narrative
            .as_ref()
            .and_then(|narrative| narrative.base_url.clone())
    }
}

pub fn load_config(cwd: &Path) -> Result<GradeConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(cwd, global.as_deref())
}

pub(crate) fn load_config_with_global(
    cwd: &Path,
    global_path: Option<&Path>,
) -> Result<GradeConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &cwd.join(DEFAULT_CONFIG_FILE))?;

    let cfg: GradeConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| GradeError::ConfigParse(e.to_string()))?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| GradeError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_when_no_files_exist() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.github.is_none());
        assert!(cfg.narrative.is_none());
    }

    #[test]
    fn local_file_overrides_global_values() {
        let cwd = TempDir::new().expect("cwd temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[github]
token = "global-token"

[narrative]
model = "gpt-4"
"#,
        )
        .expect("global config should write");

        fs::write(
            cwd.path().join(DEFAULT_CONFIG_FILE),
            r#"
[github]
token = "local-token"
"#,
        )
        .expect("local config should write");

        let cfg = load_config_with_global(cwd.path(), Some(&global_path))
            .expect("load should succeed");
        assert_eq!(
            cfg.github.as_ref().and_then(|g| g.token.as_deref()),
            Some("local-token")
        );
        assert_eq!(cfg.narrative_model().as_deref(), Some("gpt-4"));
    }

    #[test]
    fn disabled_narrative_section_yields_no_api_key() {
        let cwd = TempDir::new().expect("temp dir should be created");
        fs::write(
            cwd.path().join(DEFAULT_CONFIG_FILE),
            r#"
[narrative]
api_key = "sk-test"
disabled = true
"#,
        )
        .expect("config should write");

        let cfg = load_config_with_global(cwd.path(), None).expect("load should succeed");
        assert!(cfg.narrative_api_key().is_none());
    }

    #[test]
    fn malformed_config_surfaces_parse_error() {
        let cwd = TempDir::new().expect("temp dir should be created");
        fs::write(cwd.path().join(DEFAULT_CONFIG_FILE), "[github\ntoken = 1")
            .expect("config should write");

        let err = load_config_with_global(cwd.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains("config parse error"));
    }
}
