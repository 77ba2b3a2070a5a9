use rpcsign_aliyun_rpc::{to_query_string, DefaultCredentialProvider, RequestSigner};
use rpcsign_core::{Context, OsEnv, Signer, SigningRequest};
use rpcsign_file_read_tokio::TokioFileRead;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Run with RUST_LOG=debug to see the canonical query string and string to sign.
    env_logger::init();

    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let mut req = SigningRequest::new(http::Method::GET)
        .with_param("Action", "DescribeRegions")
        .with_param("Format", "JSON")
        .with_param("Version", "2014-05-26");
    signer.sign(&mut req).await?;

    if !req.params.contains_key("Signature") {
        println!("No credential found, set ALIBABA_CLOUD_ACCESS_KEY_ID and ALIBABA_CLOUD_ACCESS_KEY_SECRET");
        return Ok(());
    }

    println!("https://ecs.aliyuncs.com/?{}", to_query_string(&req.params));
    Ok(())
}
