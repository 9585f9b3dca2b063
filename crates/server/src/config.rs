use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub data_path: PathBuf,
    pub default_country: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            data_path: "data/owid-covid-data.csv".into(),
            default_country: charts::DEFAULT_COUNTRY.into(),
        }
    }
}

/// Defaults, overridden by an optional `dashboard.toml` in the working
/// directory, overridden in turn by environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_file_values(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("DASHBOARD_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("DASHBOARD_DATA_PATH") {
        settings.data_path = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("DASHBOARD_DEFAULT_COUNTRY") {
        settings.default_country = v;
    }

    settings
}

fn apply_file_values(settings: &mut Settings, values: &HashMap<String, String>) {
    if let Some(v) = values.get("bind_addr") {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = values.get("data_path") {
        settings.data_path = PathBuf::from(v);
    }
    if let Some(v) = values.get("default_country") {
        settings.default_country = v.clone();
    }
}
