use crate::chart::OrphanPolicy;
use clap::Parser;
use dotenvy::dotenv;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
struct Cli {
    #[clap(long, env = "ORGCHART_PORT")]
    port: Option<u16>,

    #[clap(long, env = "ORGCHART_CONFIG_PATH")]
    config: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub port: u16,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthSettings {
    /// Comma-separated list of allowed frontend origins.
    pub frontend_origin: Option<String>,
    #[serde(default)]
    pub jwt: JwtSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtSettings {
    pub issuer: String,
    pub audience: String,
    pub signing_key: Option<String>,
    #[serde(default = "default_access_ttl_seconds")]
    pub access_ttl_seconds: i64,
}

fn default_access_ttl_seconds() -> i64 {
    15 * 60
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            issuer: "orgchart".to_string(),
            audience: "orgchart".to_string(),
            signing_key: None,
            access_ttl_seconds: default_access_ttl_seconds(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ChartSettings {
    /// What to do with team members whose subfunction reference dangles.
    #[serde(default)]
    pub on_orphan: OrphanPolicy,
}

impl Settings {
    #[allow(clippy::result_large_err)]
    pub fn new() -> Result<Self, figment::Error> {
        dotenv().ok();
        let cli = Cli::parse();

        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        // 1. System Config
        figment = figment.merge(Toml::file("/etc/orgchart/config.toml"));

        // 2. User Config
        if let Some(config_dir) = dirs::config_dir() {
            figment = figment.merge(Toml::file(config_dir.join("orgchart/config.toml")));
        }

        // 3. Local Config
        figment = figment.merge(Toml::file("orgchart.toml"));

        // 4. CLI Config File (Overrides previous files)
        if let Some(config_path) = &cli.config {
            figment = figment.merge(Toml::file(config_path));
        }

        // 5. Environment Variables
        // Prefixed with ORGCHART_ (e.g. ORGCHART_PORT=8080, ORGCHART_DATABASE__URL=...)
        figment = figment.merge(Env::prefixed("ORGCHART_").split("__"));

        // 6. CLI Arguments (Overrides everything)
        if let Some(port) = cli.port {
            figment = figment.merge(("port", port));
        }

        figment.extract()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 3000,
            debug: false,
            database: DatabaseSettings {
                url: "sqlite://orgchart.db?mode=rwc".to_string(),
            },
            auth: AuthSettings::default(),
            chart: ChartSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_policy_deserializes_from_config_strings() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_orphan: OrphanPolicy,
        }

        let warn: Wrapper = serde_json::from_str(r#"{"on_orphan":"warn"}"#).unwrap();
        assert_eq!(warn.on_orphan, OrphanPolicy::Warn);

        let error: Wrapper = serde_json::from_str(r#"{"on_orphan":"error"}"#).unwrap();
        assert_eq!(error.on_orphan, OrphanPolicy::Error);
    }

    #[test]
    fn defaults_keep_the_original_silent_drop() {
        let settings = Settings::default();
        assert_eq!(settings.chart.on_orphan, OrphanPolicy::Drop);
        assert_eq!(settings.port, 3000);
    }
}
