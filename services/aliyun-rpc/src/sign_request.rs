// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::canonical::build_string_to_sign;
use crate::constants::*;
use crate::credential::Credential;
use crate::nonce::generate_nonce;
use async_trait::async_trait;
use log::debug;
use rpcsign_core::hash::base64_hmac_sha1;
use rpcsign_core::time::{format_iso8601, now, DateTime};
use rpcsign_core::utils::Redact;
use rpcsign_core::{Context, ParameterMap, Result, SignRequest, SigningRequest};
use std::fmt::{Debug, Formatter};

/// SigningKey is the HMAC key of the RPC signature: the secret followed by `&`.
///
/// It lives only for the duration of one signing operation and never shows
/// up in `Debug` output.
pub struct SigningKey(String);

impl SigningKey {
    /// Derive the signing key from the raw access key secret.
    pub fn new(secret: &str) -> Self {
        let mut key = String::with_capacity(secret.len() + SEPARATOR.len());
        key.push_str(secret);
        key.push_str(SEPARATOR);
        Self(key)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningKey")
            .field(&Redact::from(&self.0))
            .finish()
    }
}

/// Sign a string to sign with the access key secret.
///
/// Computes HMAC-SHA1 keyed with `secret + "&"` over the UTF-8 bytes of
/// `string_to_sign`, then encodes the digest with the standard padded base64
/// alphabet. SHA1 is weak by modern standards but is what the service
/// verifies, so it must not be replaced.
pub fn sign(string_to_sign: &str, secret: &str) -> String {
    let key = SigningKey::new(secret);
    base64_hmac_sha1(key.as_bytes(), string_to_sign.as_bytes())
}

/// Sign `params` and insert the result as the `Signature` parameter.
///
/// Any `Signature` already present is ignored while computing the new one and
/// then replaced, so signing the same map twice gives the same result.
pub fn sign_parameters(method: &str, params: &mut ParameterMap, secret: &str) -> Result<String> {
    let string_to_sign = build_string_to_sign(method, params)?;
    let signature = sign(&string_to_sign, secret);
    params.insert(SIGNATURE, signature.clone());
    Ok(signature)
}

/// RequestSigner signs aliyun RPC requests.
///
/// It injects `AccessKeyId`, `SignatureMethod`, `SignatureVersion`,
/// `Timestamp`, `SignatureNonce` and, for STS credentials, `SecurityToken`
/// before computing `Signature`. Business parameters such as `Action`,
/// `Version`, `Format` or `RegionId` are the caller's responsibility.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the signature nonce.
    ///
    /// # Note
    ///
    /// Reusing a nonce makes the service reject the request as a replay.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        self.nonce.clone().unwrap_or_else(generate_nonce)
    }

    /// Inject the auth parameters of `cred` into `req` and sign it.
    pub fn sign_with_credential(&self, req: &mut SigningRequest, cred: &Credential) -> Result<()> {
        let params = &mut req.params;
        params.insert(ACCESS_KEY_ID, cred.access_key_id.as_str());
        params.insert(SIGNATURE_METHOD, SIGNATURE_METHOD_HMAC_SHA1);
        params.insert(SIGNATURE_VERSION, SIGNATURE_VERSION_1_0);
        params.insert(TIMESTAMP, format_iso8601(self.get_time()));
        params.insert(SIGNATURE_NONCE, self.get_nonce());
        match &cred.security_token {
            Some(token) => params.insert(SECURITY_TOKEN, token.as_str()),
            None => params.remove(SECURITY_TOKEN),
        };

        sign_parameters(req.method.as_str(), params, &cred.access_key_secret)?;
        debug!(
            "signed request with access key id {:?}",
            Redact::from(&cred.access_key_id)
        );

        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut SigningRequest,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            debug!("credential not found, leaving request unsigned");
            return Ok(());
        };

        self.sign_with_credential(req, cred)
    }
}
