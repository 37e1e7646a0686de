use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone)]
pub struct Settings {
    pub directory_url: String,
    pub task_service_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_url: "https://jsonplaceholder.typicode.com".into(),
            task_service_url: "https://jsonplaceholder.typicode.com".into(),
        }
    }
}

/// Defaults, overridden by `taskboard.toml`, overridden by environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("taskboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("directory_url") {
                settings.directory_url = v.clone();
            }
            if let Some(v) = file_cfg.get("task_service_url") {
                settings.task_service_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("TASKBOARD_DIRECTORY_URL") {
        settings.directory_url = v;
    }
    if let Ok(v) = std::env::var("APP__DIRECTORY_URL") {
        settings.directory_url = v;
    }

    if let Ok(v) = std::env::var("TASKBOARD_TASK_SERVICE_URL") {
        settings.task_service_url = v;
    }
    if let Ok(v) = std::env::var("APP__TASK_SERVICE_URL") {
        settings.task_service_url = v;
    }

    settings
}
