use std::{collections::HashMap, fs};

use tracing::warn;

const SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cocktails_url: String,
    pub orders_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cocktails_url: "http://localhost:3000/cocktails".into(),
            orders_url: "http://localhost:3000/api/orders".into(),
        }
    }
}

/// Defaults, then `catalog.toml` in the working directory, then env vars.
pub fn load_settings() -> Settings {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from_sources(raw.as_deref(), &|key: &str| std::env::var(key).ok())
}

pub(crate) fn settings_from_sources(
    raw_file: Option<&str>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("cocktails_url") {
                    settings.cocktails_url = v.clone();
                }
                if let Some(v) = file_cfg.get("orders_url") {
                    settings.orders_url = v.clone();
                }
            }
            Err(err) => warn!(error = %err, "ignoring malformed {SETTINGS_FILE}"),
        }
    }

    if let Some(v) = env("CATALOG_COCKTAILS_URL") {
        settings.cocktails_url = v;
    }
    if let Some(v) = env("APP__COCKTAILS_URL") {
        settings.cocktails_url = v;
    }

    if let Some(v) = env("CATALOG_ORDERS_URL") {
        settings.orders_url = v;
    }
    if let Some(v) = env("APP__ORDERS_URL") {
        settings.orders_url = v;
    }

    let defaults = Settings::default();
    settings.cocktails_url = normalize_url(&settings.cocktails_url, &defaults.cocktails_url);
    settings.orders_url = normalize_url(&settings.orders_url, &defaults.orders_url);
    settings
}

pub(crate) fn normalize_url(raw_url: &str, fallback: &str) -> String {
    let url = raw_url.trim().trim_end_matches('/');
    if url.is_empty() {
        return fallback.to_string();
    }
    url.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
