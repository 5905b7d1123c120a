use std::{
    fs,
    path::Path,
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;
use shared::domain::Flags;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "yeold.toml";
const ENV_PREFIX: &str = "YEOLD__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub debounce_ms: u64,
    pub prepend: bool,
    pub append: bool,
    pub prefix: String,
    pub suffix: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            prepend: true,
            append: true,
            prefix: "Hark! ".into(),
            suffix: " Huzzah!".into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn initial_flags(&self) -> Flags {
        Flags {
            prepend: self.prepend,
            append: self.append,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    debounce_ms: Option<u64>,
    prepend: Option<bool>,
    append: Option<bool>,
    prefix: Option<String>,
    suffix: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then `yeold.toml` in the working directory, then `YEOLD__*` variables.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), process_env)
}

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable config file"),
        }
    }

    apply_env(&mut settings, env);
    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.debounce_ms {
        settings.debounce_ms = v;
    }
    if let Some(v) = file_cfg.prepend {
        settings.prepend = v;
    }
    if let Some(v) = file_cfg.append {
        settings.append = v;
    }
    if let Some(v) = file_cfg.prefix {
        settings.prefix = v;
    }
    if let Some(v) = file_cfg.suffix {
        settings.suffix = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| env(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("DEBOUNCE_MS").and_then(|v| parse_or_warn("DEBOUNCE_MS", &v)) {
        settings.debounce_ms = v;
    }
    if let Some(v) = var("PREPEND").and_then(|v| parse_or_warn("PREPEND", &v)) {
        settings.prepend = v;
    }
    if let Some(v) = var("APPEND").and_then(|v| parse_or_warn("APPEND", &v)) {
        settings.append = v;
    }
    if let Some(v) = var("PREFIX") {
        settings.prefix = v;
    }
    if let Some(v) = var("SUFFIX") {
        settings.suffix = v;
    }
    if let Some(v) = var("LOG") {
        settings.log_filter = v;
    }
}

fn parse_or_warn<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(variable = %format!("{ENV_PREFIX}{name}"), value = raw, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_config(tag: &str, contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("yeold_config_test_{tag}_{suffix}.toml"));
        fs::write(&path, contents).expect("write config");
        path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings_from(Path::new("/nonexistent/yeold.toml"), no_env);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.debounce_window(), Duration::from_millis(200));
        assert_eq!(settings.initial_flags(), Flags::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_config("file", "debounce_ms = 50\nappend = false\nprefix = \"Lo! \"\n");

        let settings = load_settings_from(&path, no_env);

        assert_eq!(settings.debounce_ms, 50);
        assert!(settings.prepend);
        assert!(!settings.append);
        assert_eq!(settings.prefix, "Lo! ");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn env_overrides_file() {
        let path = temp_config("env", "debounce_ms = 50\n");
        let vars = HashMap::from([
            ("YEOLD__DEBOUNCE_MS".to_string(), "75".to_string()),
            ("YEOLD__PREPEND".to_string(), "false".to_string()),
            ("YEOLD__LOG".to_string(), "debug".to_string()),
        ]);

        let settings = load_settings_from(&path, |key| vars.get(key).cloned());

        assert_eq!(settings.debounce_ms, 75);
        assert!(!settings.prepend);
        assert_eq!(settings.log_filter, "debug");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn unparseable_env_values_are_ignored() {
        let vars = HashMap::from([
            ("YEOLD__DEBOUNCE_MS".to_string(), "soon".to_string()),
            ("YEOLD__APPEND".to_string(), "maybe".to_string()),
        ]);

        let settings =
            load_settings_from(Path::new("/nonexistent/yeold.toml"), |key| vars.get(key).cloned());

        assert_eq!(settings.debounce_ms, 200);
        assert!(settings.append);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_config("malformed", "debounce_ms = \"fast\"\n");

        let settings = load_settings_from(&path, no_env);

        assert_eq!(settings, Settings::default());
        fs::remove_file(path).expect("cleanup");
    }
}
