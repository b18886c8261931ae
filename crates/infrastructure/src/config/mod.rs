//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `providers`: Supabase, speech, voice and transliteration services
//! - `storage`: upload and output directories, upload limits
//! - `security`: session key encryption

mod providers;
mod security;
mod server;
mod storage;

use std::{collections::HashMap, fmt, path::Path};

use serde::{Deserialize, Serialize};

pub use providers::{SpeechAppConfig, SupabaseAppConfig, TransliterationAppConfig, VoiceAppConfig};
pub use security::SecurityConfig;
pub use server::{LogFormat, ServerConfig};
pub use storage::StorageConfig;

/// Environment variable prefix for structured overrides
/// (e.g. `ECHO_FORGE_SERVER__PORT`)
pub const ENV_PREFIX: &str = "ECHO_FORGE";

/// Well-known variables honoured on top of the prefixed ones, and the keys
/// they override
const WELL_KNOWN_VARS: [(&str, &str); 5] = [
    ("PORT", "server.port"),
    ("SUPABASE_URL", "supabase.url"),
    ("SUPABASE_SERVICE_ROLE_KEY", "supabase.service_role_key"),
    ("OPENAI_API_KEY", "speech.api_key"),
    ("ELEVENLABS_API_KEY", "voice.api_key"),
];

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    /// Insecure settings are reported at startup
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub supabase: SupabaseAppConfig,

    /// Speech-to-text (OpenAI)
    #[serde(default)]
    pub speech: SpeechAppConfig,

    /// Voice cloning and synthesis (ElevenLabs)
    #[serde(default)]
    pub voice: VoiceAppConfig,

    #[serde(default)]
    pub transliteration: TransliterationAppConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the process
    /// environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"), std::env::vars().collect())
    }

    /// Load configuration from `file` (extension optional, may be missing)
    /// and an explicit variable map
    ///
    /// Precedence, lowest first: built-in defaults, the file, prefixed
    /// `ECHO_FORGE_*` variables, well-known variables such as `PORT`.
    pub fn load_from(
        file: &Path,
        vars: HashMap<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in WELL_KNOWN_VARS {
            let value = vars.get(var).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn missing() -> &'static Path {
        Path::new("/nonexistent/echo-forge-config")
    }

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::load_from(missing(), HashMap::new()).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.upload_dir, Path::new("uploads/audio"));
        assert!(config.speech.api_key.is_none());
        assert!(config.security.session_encryption_key.is_none());
    }

    #[test]
    fn well_known_variables_override() {
        let config = AppConfig::load_from(
            missing(),
            vars(&[
                ("PORT", "8080"),
                ("SUPABASE_URL", "https://abc.supabase.co"),
                ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
                ("OPENAI_API_KEY", "sk-openai"),
                ("ELEVENLABS_API_KEY", "xi-key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.supabase.url, "https://abc.supabase.co");
        assert_eq!(
            config
                .supabase
                .service_role_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            Some("service-key".to_string())
        );
        assert!(config.speech.to_openai_config().has_api_key());
        assert!(config.voice.to_elevenlabs_config().has_api_key());
    }

    #[test]
    fn prefixed_variables_use_double_underscore() {
        let config = AppConfig::load_from(
            missing(),
            vars(&[
                ("ECHO_FORGE_ENVIRONMENT", "production"),
                ("ECHO_FORGE_SERVER__HOST", "127.0.0.1"),
                ("ECHO_FORGE_STORAGE__UPLOAD_DIR", "/tmp/up"),
                (
                    "ECHO_FORGE_SERVER__ALLOWED_ORIGINS",
                    "https://a.example,https://b.example",
                ),
            ]),
        )
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.upload_dir, Path::new("/tmp/up"));
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn well_known_port_beats_prefixed_port() {
        let config = AppConfig::load_from(
            missing(),
            vars(&[("ECHO_FORGE_SERVER__PORT", "4000"), ("PORT", "5000")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn empty_well_known_variable_is_ignored() {
        let config = AppConfig::load_from(missing(), vars(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.speech.api_key.is_none());
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "environment = \"production\"\n\n[server]\nport = 9000\nlog_format = \"json\"\n\n[storage]\noutput_dir = \"/srv/out\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path(), HashMap::new()).unwrap();
        assert!(config.is_production());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.storage.output_dir, Path::new("/srv/out"));
    }

    #[test]
    fn secrets_are_not_serialized_or_printed() {
        let config = AppConfig::load_from(
            missing(),
            vars(&[
                ("OPENAI_API_KEY", "sk-very-secret"),
                ("SUPABASE_SERVICE_ROLE_KEY", "service-very-secret"),
            ]),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("very-secret"));
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Dev".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }
}
