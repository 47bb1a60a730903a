use super::types::{
    InterviewConfig, RawAuthConfig, RawInterviewConfig, RawServerConfig, ServerConfig,
    default_allowed_origins, DEFAULT_HOST, DEFAULT_PORT,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use interview_core::AuthConfig;
use std::path::{Path, PathBuf};

/// Overrides the JWT signing secret
pub const JWT_SECRET_ENV: &str = "INTERVIEW_JWT_SECRET";
/// Supplies the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Overrides the project config directory
pub const PROJECT_CONFIG_DIR_ENV: &str = "INTERVIEW_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<InterviewConfig> {
        Self::load_from(
            Self::user_config_path().as_deref(),
            &Self::project_config_path(),
            |key| std::env::var(key).ok(),
        )
    }

    /// Load from explicit paths with a custom environment lookup
    pub fn load_from(
        user_path: Option<&Path>,
        project_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<InterviewConfig> {
        let mut raw = RawInterviewConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_layer(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_layer(project_path)?);
        }

        let mut config = Self::finalize(raw);

        // Layer 3: Environment
        Self::apply_env(&mut config, env);

        Ok(config)
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "interview").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with INTERVIEW_PROJECT_CONFIG_DIR
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var(PROJECT_CONFIG_DIR_ENV) {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".interview/config.toml")
        }
    }

    fn read_layer(path: &Path) -> Result<RawInterviewConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawInterviewConfig, overlay: RawInterviewConfig) -> RawInterviewConfig {
        let mut profiles = base.profiles;
        profiles.extend(overlay.profiles);

        RawInterviewConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                allowed_origins: overlay
                    .server
                    .allowed_origins
                    .or(base.server.allowed_origins),
            },
            auth: RawAuthConfig {
                secret: overlay.auth.secret.or(base.auth.secret),
                ttl_minutes: overlay.auth.ttl_minutes.or(base.auth.ttl_minutes),
                leeway_seconds: overlay.auth.leeway_seconds.or(base.auth.leeway_seconds),
            },
            session: overlay.session.or(base.session),
            scoring: overlay.scoring.or(base.scoring),
            assessor: overlay.assessor.or(base.assessor),
            storage: overlay.storage.or(base.storage),
            profiles,
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawInterviewConfig) -> InterviewConfig {
        let auth_defaults = AuthConfig::default();

        InterviewConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
                allowed_origins: raw
                    .server
                    .allowed_origins
                    .unwrap_or_else(default_allowed_origins),
            },
            session: raw.session.unwrap_or_default(),
            scoring: raw.scoring.unwrap_or_default(),
            assessor: raw.assessor.unwrap_or_default(),
            auth: AuthConfig {
                secret: raw.auth.secret.unwrap_or(auth_defaults.secret),
                ttl_minutes: raw.auth.ttl_minutes.unwrap_or(auth_defaults.ttl_minutes),
                leeway_seconds: raw
                    .auth
                    .leeway_seconds
                    .unwrap_or(auth_defaults.leeway_seconds),
            },
            storage: raw.storage.unwrap_or_default(),
            profiles: raw.profiles,
        }
    }

    fn apply_env(config: &mut InterviewConfig, env: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = env(JWT_SECRET_ENV).filter(|s| !s.is_empty()) {
            config.auth.secret = secret;
        }
        if let Some(key) = env(OPENAI_API_KEY_ENV).filter(|s| !s.is_empty()) {
            config.assessor.openai_api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::AssessorProvider;
    use interview_core::auth::DEV_SECRET;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_from(
            Some(&dir.path().join("user.toml")),
            &dir.path().join("project.toml"),
            no_env,
        )
        .unwrap();

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.auth.secret, DEV_SECRET);
        assert_eq!(config.auth.ttl_minutes, 120);
    }

    #[test]
    fn project_layer_overrides_only_what_it_sets() {
        let dir = TempDir::new().unwrap();
        let user = write(
            &dir,
            "user.toml",
            r#"
[server]
host = "127.0.0.1"
port = 9000

[auth]
ttl_minutes = 30

[profiles]
sales = ["Sell me this pen."]
"#,
        );
        let project = write(
            &dir,
            "project.toml",
            r#"
[server]
port = 9100

[assessor]
provider = "openai"

[profiles]
general = ["Why this company?"]
"#,
        );

        let config = ConfigLoader::load_from(Some(&user), &project, no_env).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.auth.ttl_minutes, 30);
        assert_eq!(config.assessor.provider, AssessorProvider::OpenAi);
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles["general"], vec!["Why this company?"]);
    }

    #[test]
    fn environment_overrides_files() {
        let dir = TempDir::new().unwrap();
        let project = write(
            &dir,
            "project.toml",
            r#"
[auth]
secret = "from-file"
"#,
        );
        let env: HashMap<&str, &str> = HashMap::from([
            (JWT_SECRET_ENV, "from-env"),
            (OPENAI_API_KEY_ENV, "sk-env"),
        ]);

        let config = ConfigLoader::load_from(None, &project, |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.auth.secret, "from-env");
        assert_eq!(config.assessor.openai_api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = TempDir::new().unwrap();
        let project = write(&dir, "project.toml", "[server\nport = ");

        let err = ConfigLoader::load_from(None, &project, no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("project.toml"));
    }
}
