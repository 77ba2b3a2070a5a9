use crate::provide_credential::{EnvCredentialProvider, ProfileCredentialProvider};
use crate::{Config, Credential};
use async_trait::async_trait;
use rpcsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider tries the default credential sources in order.
///
/// Resolution order:
///
/// 1. Config fields and environment variables
/// 2. aliyun CLI config file
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new `DefaultCredentialProvider` sharing `config` across sources.
    pub fn with_config(config: Config) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::with_config(config.clone()))
            .push(ProfileCredentialProvider::with_config(config));

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// ```
    /// use rpcsign_aliyun_rpc::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("access_key", "secret_key"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use rpcsign_core::StaticEnv;
    use rpcsign_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;
    use std::io::Write;

    fn ctx(envs: HashMap<String, String>) -> Context {
        Context::new()
            .with_file_read(TokioFileRead)
            .with_env(StaticEnv {
                home_dir: None,
                envs,
            })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx(HashMap::new())).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let envs = HashMap::from_iter([
            (
                ALIBABA_CLOUD_ACCESS_KEY_ID.to_string(),
                "access_key_id".to_string(),
            ),
            (
                ALIBABA_CLOUD_ACCESS_KEY_SECRET.to_string(),
                "secret_access_key".to_string(),
            ),
        ]);

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx(envs)).await.unwrap().unwrap();

        assert_eq!("access_key_id", credential.access_key_id);
        assert_eq!("secret_access_key", credential.access_key_secret);
    }

    #[tokio::test]
    async fn test_default_loader_falls_back_to_profile() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"current":"default","profiles":[{"name":"default","mode":"AK","access_key_id":"file_ak","access_key_secret":"file_sk"}]}"#,
        )
        .unwrap();
        let envs = HashMap::from_iter([(
            ALIBABA_CLOUD_CONFIG_FILE.to_string(),
            file.path().to_string_lossy().to_string(),
        )]);

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx(envs)).await.unwrap().unwrap();

        assert_eq!("file_ak", credential.access_key_id);
        assert_eq!("file_sk", credential.access_key_secret);
    }
}
