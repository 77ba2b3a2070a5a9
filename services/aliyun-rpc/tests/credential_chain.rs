//! Integration tests for ProvideCredentialChain with aliyun RPC credentials.

use async_trait::async_trait;
use rpcsign_aliyun_rpc::{Credential, DefaultCredentialProvider, EnvCredentialProvider};
use rpcsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result, StaticEnv};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock provider that tracks how many times it was called.
#[derive(Debug)]
struct CountingProvider {
    name: String,
    return_credential: bool,
    call_count: Arc<AtomicUsize>,
}

#[async_trait]
impl ProvideCredential for CountingProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.return_credential {
            Ok(Some(Credential::new(
                &format!("{}_key", self.name),
                &format!("{}_secret", self.name),
            )))
        } else {
            Ok(None)
        }
    }
}

fn counting(name: &str, return_credential: bool) -> (CountingProvider, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (
        CountingProvider {
            name: name.to_string(),
            return_credential,
            call_count: count.clone(),
        },
        count,
    )
}

#[tokio::test]
async fn test_chain_stops_at_first_success() {
    let ctx = Context::new();

    let (p1, c1) = counting("provider1", false);
    let (p2, c2) = counting("provider2", true);
    let (p3, c3) = counting("provider3", true);
    let chain = ProvideCredentialChain::new().push(p1).push(p2).push(p3);

    let cred = chain.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!(cred.access_key_id, "provider2_key");
    assert_eq!(c1.load(Ordering::SeqCst), 1);
    assert_eq!(c2.load(Ordering::SeqCst), 1);
    assert_eq!(c3.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_default_provider_push_front_wins() {
    let ctx = Context::new().with_env(StaticEnv {
        home_dir: None,
        envs: HashMap::from([
            (
                "ALIBABA_CLOUD_ACCESS_KEY_ID".to_string(),
                "env_key".to_string(),
            ),
            (
                "ALIBABA_CLOUD_ACCESS_KEY_SECRET".to_string(),
                "env_secret".to_string(),
            ),
        ]),
    });

    let (front, count) = counting("front", true);
    let provider = DefaultCredentialProvider::new().push_front(front);
    let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();

    assert_eq!(cred.access_key_id, "front_key");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_custom_chain_with_env() {
    let ctx = Context::new().with_env(StaticEnv {
        home_dir: None,
        envs: HashMap::from([
            (
                "ALIBABA_CLOUD_ACCESS_KEY_ID".to_string(),
                "env_key".to_string(),
            ),
            (
                "ALIBABA_CLOUD_ACCESS_KEY_SECRET".to_string(),
                "env_secret".to_string(),
            ),
        ]),
    });

    let (empty, _) = counting("empty", false);
    let provider = DefaultCredentialProvider::with_chain(
        ProvideCredentialChain::new()
            .push(empty)
            .push(EnvCredentialProvider::new()),
    );
    let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!(cred.access_key_id, "env_key");
}
