use std::fs;

use assert_matches::assert_matches;
use camino_tempfile::tempdir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serial_test::serial;
use tc_conversation::ReasoningPolicy;
use tc_split::Delimiters;
use test_log::test;

use super::*;

pub(crate) struct EnvVarGuard {
    name: String,
    original_value: Option<String>,
}

impl EnvVarGuard {
    pub fn set(name: &str, value: &str) -> Self {
        let name = name.to_string();
        let original_value = std::env::var(&name).ok();
        unsafe { std::env::set_var(&name, value) };
        Self {
            name,
            original_value,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(ref original) = self.original_value {
            unsafe { std::env::set_var(&self.name, original) };
        } else {
            unsafe { std::env::remove_var(&self.name) };
        }
    }
}

#[test]
#[serial(env_vars)]
fn test_defaults_without_file() {
    let tmp = tempdir().unwrap();
    let config = load(tmp.path().join(CONFIG_FILE).as_std_path(), true).unwrap();

    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.model.name, "deepseek-r1:14b");
    assert!((config.model.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.reasoning.policy(), ReasoningPolicy::default());
    assert_eq!(config.delimiters.delimiters().unwrap(), Delimiters::default());
    assert_eq!(config.storage.dir, "conversation_history");
    assert!(config.storage.autosave);
}

#[test]
#[serial(env_vars)]
fn test_required_file_must_exist() {
    let tmp = tempdir().unwrap();
    let error = load(tmp.path().join("missing.toml").as_std_path(), false).unwrap_err();

    assert_matches!(error, Error::Schematic(_));
}

#[test]
#[serial(env_vars)]
fn test_file_overrides_defaults() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(&path, indoc! {r#"
        [model]
        name = "qwen3:8b"
        temperature = 0.2

        [reasoning]
        show = false

        [delimiters]
        open = "[["
        close = "]]"
        separator = " | "
    "#})
    .unwrap();

    let config = load(path.as_std_path(), true).unwrap();

    assert_eq!(config.model.name, "qwen3:8b");
    assert!((config.model.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.reasoning.policy(), ReasoningPolicy {
        show: false,
        min_chars: 10,
    });
    assert_eq!(
        config.delimiters.delimiters().unwrap(),
        Delimiters::new("[[", "]]").unwrap().with_separator(" | ")
    );

    // Untouched sections keep their defaults.
    assert_eq!(config.ollama.base_url, "http://localhost:11434");
}

#[test]
#[serial(env_vars)]
fn test_env_overrides_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(&path, indoc! {r#"
        [model]
        name = "from-file"

        [storage]
        dir = "from-file"
    "#})
    .unwrap();

    let _model = EnvVarGuard::set("THINKCHAT_MODEL", "from-env");
    let _url = EnvVarGuard::set("THINKCHAT_OLLAMA_BASE_URL", "http://10.0.0.2:11434");
    let _show = EnvVarGuard::set("THINKCHAT_SHOW_REASONING", "false");

    let config = load(path.as_std_path(), true).unwrap();

    assert_eq!(config.model.name, "from-env");
    assert_eq!(config.ollama.base_url, "http://10.0.0.2:11434");
    assert!(!config.reasoning.show);
    assert_eq!(config.storage.dir, "from-file");
}

#[test]
#[serial(env_vars)]
fn test_temperature_out_of_range() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(&path, "[model]\ntemperature = 2.5\n").unwrap();

    let error = load(path.as_std_path(), true).unwrap_err();
    assert_matches!(error, Error::InvalidConfigValue { key, .. } if key == "model.temperature");
}

#[test]
#[serial(env_vars)]
fn test_identical_delimiters_are_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(&path, "[delimiters]\nopen = \"##\"\nclose = \"##\"\n").unwrap();

    let error = load(path.as_std_path(), true).unwrap_err();
    assert_eq!(
        error,
        Error::Delimiters(tc_split::Error::IdenticalMarkers("##".to_owned()))
    );
}

#[test]
fn test_validate_temperature_bounds() {
    assert!(model::validate_temperature(0.0).is_ok());
    assert!(model::validate_temperature(2.0).is_ok());
    assert!(model::validate_temperature(-0.1).is_err());
    assert!(model::validate_temperature(f32::NAN).is_err());
}

#[test]
fn test_storage_path() {
    let storage = StorageConfig {
        dir: "history".to_owned(),
        autosave: true,
    };

    assert_eq!(storage.path(), std::path::PathBuf::from("history"));
}

#[test]
fn test_partial_sections_are_exported() {
    let partial = PartialAppConfig {
        model: Some(PartialModelConfig {
            name: Some("llama3".to_owned()),
            ..Default::default()
        }),
        storage: Some(PartialStorageConfig::default()),
        ..Default::default()
    };

    assert_eq!(
        partial.model.and_then(|model| model.name).as_deref(),
        Some("llama3")
    );
    assert_eq!(partial.storage, Some(PartialStorageConfig::default()));
    assert_eq!(partial.ollama, None::<PartialOllamaConfig>);
    assert_eq!(partial.reasoning, None::<PartialReasoningConfig>);
    assert_eq!(partial.delimiters, None::<PartialDelimitersConfig>);
}
