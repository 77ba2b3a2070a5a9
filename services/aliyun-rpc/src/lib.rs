//! Aliyun RPC signing implementation for rpcsign.
//!
//! This crate signs RPC-style (query-parameter) requests to Alibaba Cloud
//! services such as ECS, RDS or STS with signature version 1.0.
//!
//! ## Overview
//!
//! Signing is three pure steps:
//!
//! 1. [`percent_encode`] escapes every byte outside `A-Z a-z 0-9 - _ . ~`.
//! 2. [`build_string_to_sign`] sorts the parameters by key and builds
//!    `METHOD&%2F&encode(canonical_query_string)`.
//! 3. [`sign`] computes base64(HMAC-SHA1(secret + "&", string_to_sign)).
//!
//! [`RequestSigner`] wires these into the `rpcsign_core` signer, injecting
//! `AccessKeyId`, `Timestamp`, `SignatureNonce` and the other auth
//! parameters before adding `Signature`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rpcsign_aliyun_rpc::{to_query_string, DefaultCredentialProvider, RequestSigner};
//! use rpcsign_core::{Context, OsEnv, Signer, SigningRequest};
//! use rpcsign_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() -> rpcsign_core::Result<()> {
//!     let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//!     let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//!     let mut req = SigningRequest::new(http::Method::GET)
//!         .with_param("Action", "DescribeRegions")
//!         .with_param("Version", "2014-05-26")
//!         .with_param("Format", "JSON");
//!     signer.sign(&mut req).await?;
//!
//!     let url = format!("https://ecs.aliyuncs.com/?{}", to_query_string(&req.params));
//!     println!("{url}");
//!     Ok(())
//! }
//! ```
//!
//! ## Without a signer
//!
//! ```
//! use rpcsign_aliyun_rpc::sign_parameters;
//! use rpcsign_core::ParameterMap;
//!
//! let mut params = ParameterMap::from([("Action", "Describe")]);
//! let signature = sign_parameters("GET", &mut params, "secret").unwrap();
//! assert_eq!(params.get("Signature"), Some(signature.as_str()));
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export ALIBABA_CLOUD_ACCESS_KEY_ID=your-access-key-id
//! export ALIBABA_CLOUD_ACCESS_KEY_SECRET=your-access-key-secret
//! export ALIBABA_CLOUD_SECURITY_TOKEN=your-sts-token  # Optional, for STS
//! ```
//!
//! ### Configuration File
//!
//! Credentials can also come from the aliyun CLI configuration file
//! (`~/.aliyun/config.json`, override with `ALIBABA_CLOUD_CONFIG_FILE`),
//! selecting a profile with `ALIBABA_CLOUD_PROFILE`.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod encode;
pub use encode::{percent_encode, percent_encode_bytes, percent_encode_opt};

mod canonical;
pub use canonical::{build_string_to_sign, canonical_query_string, to_query_string};

mod sign_request;
pub use sign_request::{sign, sign_parameters, RequestSigner, SigningKey};

mod nonce;
pub use nonce::generate_nonce;

pub mod response;

mod provide_credential;
pub use provide_credential::*;
