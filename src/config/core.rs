use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;
use std::path::Path;

use super::LinkerSettings;
use super::overrides::filter_unset;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "FLEET_DOCLINK_";

pub struct LinkerConfig {
    figment: Figment,
}

impl LinkerConfig {
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let user_base = Self::user_config_base_path();

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))                   // 1. Defaults (lowest)
            .merge(Toml::file(format!("{}.toml", user_base)))      // 2. User config
            .merge(Json::file(format!("{}.json", user_base)))
            .merge(Yaml::file(format!("{}.yaml", user_base)))
            .merge(Yaml::file(format!("{}.yml", user_base)))
            .merge(Toml::file("fleet-doclink.toml"))               // 3. Repo config
            .merge(Json::file("fleet-doclink.json"))
            .merge(Yaml::file("fleet-doclink.yaml"))
            .merge(Yaml::file("fleet-doclink.yml"));

        if let Some(path) = custom_config {                        // 4. Custom config
            figment = Self::merge_file(figment, path)?;
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__")); // 5. Environment

        if let Some(cli) = cli_overrides {                         // 6. CLI (highest)
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(filter_unset(cli)));
        }

        Ok(LinkerConfig { figment })
    }

    fn merge_file(figment: Figment, path: &str) -> Result<Figment> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let figment = match extension.as_str() {
            "json" => figment.merge(Json::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            "toml" | "" => figment.merge(Toml::file(path)),
            other => anyhow::bail!("Unsupported config format '{}' for {}", other, path),
        };
        Ok(figment)
    }

    /// Typed view of the merged configuration
    pub fn settings(&self) -> Result<LinkerSettings> {
        self.figment
            .extract()
            .context("Invalid fleet-doclink configuration")
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        let value = self.figment.extract_inner(path)?;
        Ok(value)
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/fleet-doclink/config", home),
            Err(_) => "~/.config/fleet-doclink/config".to_string(),
        }
    }
}
