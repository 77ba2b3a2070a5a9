use crate::{Config, Credential};
use async_trait::async_trait;
use rpcsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads credentials from [`Config`] and environment variables.
///
/// Fields set on the config win over the environment:
/// - `ALIBABA_CLOUD_ACCESS_KEY_ID`: The Alibaba Cloud access key ID
/// - `ALIBABA_CLOUD_ACCESS_KEY_SECRET`: The Alibaba Cloud access key secret
/// - `ALIBABA_CLOUD_SECURITY_TOKEN`: The Alibaba Cloud security token (optional)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider {
    config: Config,
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider reading only the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EnvCredentialProvider with explicit config values.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.clone().from_env(ctx);

        match (config.access_key_id, config.access_key_secret) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => Ok(Some(Credential {
                access_key_id: ak,
                access_key_secret: sk,
                security_token: config.security_token.filter(|v| !v.is_empty()),
                expires_in: None,
            })),
            _ => Ok(None),
        }
    }
}
