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

use crate::constants::*;
use rpcsign_core::utils::Redact;
use rpcsign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for signing aliyun RPC requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_SECRET`]
    pub access_key_secret: Option<String>,
    /// `security_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_SECURITY_TOKEN`]
    pub security_token: Option<String>,
    /// `profile` selects the aliyun CLI profile, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_PROFILE`]
    /// - the `current` profile of the config file otherwise
    pub profile: Option<String>,
    /// `config_file` is the aliyun CLI config path, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_CONFIG_FILE`]
    /// - default to [`DEFAULT_CONFIG_FILE`]
    pub config_file: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("security_token", &Redact::from(&self.security_token))
            .field("profile", &self.profile)
            .field("config_file", &self.config_file)
            .finish()
    }
}

impl Config {
    /// Load config from env, keeping fields that are already set.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let fields = [
            (&mut self.access_key_id, ALIBABA_CLOUD_ACCESS_KEY_ID),
            (&mut self.access_key_secret, ALIBABA_CLOUD_ACCESS_KEY_SECRET),
            (&mut self.security_token, ALIBABA_CLOUD_SECURITY_TOKEN),
            (&mut self.profile, ALIBABA_CLOUD_PROFILE),
            (&mut self.config_file, ALIBABA_CLOUD_CONFIG_FILE),
        ];
        for (field, key) in fields {
            if field.is_none() {
                *field = ctx.env_var(key);
            }
        }

        self
    }

    /// The config file path to read, before home dir expansion.
    pub fn config_file(&self) -> &str {
        self.config_file.as_deref().unwrap_or(DEFAULT_CONFIG_FILE)
    }
}
