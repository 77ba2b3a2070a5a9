//! Core components for signing RPC-style cloud API requests.
//!
//! This crate provides the service-neutral building blocks of the rpcsign
//! workspace. Service crates such as `rpcsign-aliyun-rpc` implement the actual
//! signature algorithm on top of it.
//!
//! ## Overview
//!
//! - **Data model**: [`ParameterMap`] and [`SigningRequest`] describe the request to sign.
//! - **Context**: holds the file reader and environment used while loading credentials.
//! - **Traits**: [`ProvideCredential`] loads credentials, [`SignRequest`] signs requests.
//! - **Signer**: orchestrates credential loading, caching and signing.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use rpcsign_core::{
//!     Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential,
//!     SigningRequest,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<MyCredential>> {
//!         Ok(Some(MyCredential { key: "my-key".to_string() }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _: &Context,
//!         req: &mut SigningRequest,
//!         cred: Option<&MyCredential>,
//!     ) -> Result<()> {
//!         if let Some(cred) = cred {
//!             req.params.insert("Key", cred.key.clone());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyProvider, MySigner);
//! let mut req = SigningRequest::new(http::Method::GET).with_param("Action", "Describe");
//! signer.sign(&mut req).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC-SHA1 and base64 helpers
//! - [`time`]: UTC timestamp helpers
//! - [`utils`]: redaction of secrets for logging

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, NoopEnv, NoopFileRead, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod request;
pub use request::{ParameterMap, SigningRequest};
mod signer;
pub use signer::Signer;
