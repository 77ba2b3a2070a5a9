use std::env;

use chrono::TimeZone;
use chrono::Utc;
use log::{debug, warn};
use pretty_assertions::assert_eq;
use rpcsign_aliyun_rpc::response::{parse_json_body, ErrorPolicy};
use rpcsign_aliyun_rpc::{
    build_string_to_sign, canonical_query_string, sign, to_query_string, DefaultCredentialProvider,
    RequestSigner, StaticCredentialProvider,
};
use rpcsign_core::{Context, OsEnv, ParameterMap, Signer, SigningRequest};
use rpcsign_file_read_tokio::TokioFileRead;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn describe_regions() -> SigningRequest {
    SigningRequest::new(http::Method::GET)
        .with_param("Action", "DescribeRegions")
        .with_param("Format", "XML")
        .with_param("Version", "2014-05-26")
}

#[tokio::test]
async fn test_signer_reproduces_golden_signature() -> anyhow::Result<()> {
    init_logger();

    let builder = RequestSigner::new()
        .with_time(Utc.with_ymd_and_hms(2016, 2, 23, 12, 46, 24).unwrap())
        .with_nonce("3ee8c1b8-83d3-44af-a94f-4e0ad82fd6cf");
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("testid", "testsecret"),
        builder,
    );

    let mut req = describe_regions();
    signer.sign(&mut req).await?;

    assert_eq!(req.params.get("Signature"), Some("OLeaidS1JvxuMvnyHOwuJ+uX5qY="));
    assert_eq!(
        to_query_string(&req.params),
        "AccessKeyId=testid&Action=DescribeRegions&Format=XML\
         &Signature=OLeaidS1JvxuMvnyHOwuJ%2BuX5qY%3D&SignatureMethod=HMAC-SHA1\
         &SignatureNonce=3ee8c1b8-83d3-44af-a94f-4e0ad82fd6cf&SignatureVersion=1.0\
         &Timestamp=2016-02-23T12%3A46%3A24Z&Version=2014-05-26"
    );
    Ok(())
}

#[test]
fn test_key_order_invariance() -> anyhow::Result<()> {
    let pairs = [
        ("Action", "RunInstances"),
        ("RegionId", "cn-hangzhou"),
        ("InstanceName", "web 01"),
        ("Tag.1.Key", "env"),
        ("Tag.1.Value", "prod*"),
    ];
    let forward: ParameterMap = pairs.iter().copied().collect();
    let backward: ParameterMap = pairs.iter().rev().copied().collect();

    assert_eq!(canonical_query_string(&forward), canonical_query_string(&backward));
    let a = build_string_to_sign("POST", &forward)?;
    let b = build_string_to_sign("POST", &backward)?;
    assert_eq!(a, b);
    assert_eq!(sign(&a, "secret"), sign(&b, "secret"));
    Ok(())
}

#[test]
fn test_resign_after_transport_roundtrip() -> anyhow::Result<()> {
    let mut params = ParameterMap::from([("Action", "Describe"), ("Name", "a b+c")]);
    let first = rpcsign_aliyun_rpc::sign_parameters("GET", &mut params, "secret")?;

    // What the server sees after decoding the transmitted query string.
    let received = ParameterMap::from_query(&to_query_string(&params));
    assert_eq!(received, params);

    let mut resigned = received.clone();
    let second = rpcsign_aliyun_rpc::sign_parameters("GET", &mut resigned, "secret")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_parallel_signing_is_consistent() {
    let params = ParameterMap::from([("Action", "Describe"), ("B", "2")]);
    let expected = sign(&build_string_to_sign("GET", &params).unwrap(), "secret");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let params = params.clone();
            std::thread::spawn(move || {
                sign(&build_string_to_sign("GET", &params).unwrap(), "secret")
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

fn init_live_signer() -> Option<(Signer<rpcsign_aliyun_rpc::Credential>, String)> {
    init_logger();
    let _ = dotenv::dotenv();

    if env::var("RPCSIGN_ALIYUN_RPC_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let endpoint = env::var("RPCSIGN_ALIYUN_RPC_ENDPOINT")
        .unwrap_or_else(|_| "https://ecs.aliyuncs.com".to_string());
    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    Some((signer, endpoint))
}

#[tokio::test]
async fn test_describe_regions_live() -> anyhow::Result<()> {
    let Some((signer, endpoint)) = init_live_signer() else {
        warn!("RPCSIGN_ALIYUN_RPC_TEST is not set, skipped");
        return Ok(());
    };

    let mut req = SigningRequest::new(http::Method::GET)
        .with_param("Action", "DescribeRegions")
        .with_param("Format", "JSON")
        .with_param("Version", "2014-05-26");
    signer.sign(&mut req).await?;

    let url = format!("{endpoint}/?{}", to_query_string(&req.params));
    let resp = reqwest::get(&url).await?;
    let status = resp.status();
    let body = resp.bytes().await?;
    debug!("got response: {status} {}", String::from_utf8_lossy(&body));

    let body = parse_json_body(&body)?;
    assert!(
        !ErrorPolicy::new().has_error(Some(&body)),
        "request failed: {:?}",
        body.get("Code")
    );
    assert!(status.is_success());
    Ok(())
}
