use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use rpcsign_core::{Context, Error, ProvideCredential, Result};
use serde::Deserialize;

/// ProfileCredentialProvider loads credentials from the aliyun CLI config file.
///
/// The file (default `~/.aliyun/config.json`) holds a list of profiles and the
/// name of the current one. Profiles in `AK` and `StsToken` mode are
/// supported; other modes need network round trips and are skipped.
///
/// Resolution of the profile name:
///
/// 1. [`Config::profile`] or `ALIBABA_CLOUD_PROFILE`
/// 2. `current` in the config file
/// 3. `default`
#[derive(Debug, Default)]
pub struct ProfileCredentialProvider {
    config: Config,
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ProfileCredentialProvider with explicit config values.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CliConfig {
    #[serde(default)]
    current: String,
    #[serde(default)]
    profiles: Vec<CliProfile>,
}

#[derive(Default, Deserialize)]
struct CliProfile {
    name: String,
    #[serde(default)]
    mode: String,
    #[serde(default)]
    access_key_id: String,
    #[serde(default)]
    access_key_secret: String,
    #[serde(default)]
    sts_token: String,
}

impl std::fmt::Debug for CliProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliProfile")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.clone().from_env(ctx);

        let Some(path) = ctx.expand_home_dir(config.config_file()) else {
            debug!("failed to expand homedir for path: {}", config.config_file());
            return Ok(None);
        };
        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read aliyun config file {path}: {err}");
                return Ok(None);
            }
        };

        let cli: CliConfig = serde_json::from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse aliyun config file {path}")).with_source(e)
        })?;

        let name = match config.profile {
            Some(name) => name,
            None if !cli.current.is_empty() => cli.current.clone(),
            None => "default".to_string(),
        };
        let Some(profile) = cli.profiles.into_iter().find(|p| p.name == name) else {
            debug!("profile {name} not found in aliyun config file {path}");
            return Ok(None);
        };

        let security_token = match profile.mode.as_str() {
            "AK" | "" => None,
            "StsToken" => Some(profile.sts_token).filter(|v| !v.is_empty()),
            mode => {
                debug!("profile {name} uses unsupported mode {mode}, skipping");
                return Ok(None);
            }
        };

        if profile.access_key_id.is_empty() || profile.access_key_secret.is_empty() {
            return Err(Error::config_invalid(format!(
                "profile {name} in {path} has no access key"
            )));
        }

        Ok(Some(Credential {
            access_key_id: profile.access_key_id,
            access_key_secret: profile.access_key_secret,
            security_token,
            expires_in: None,
        }))
    }
}
