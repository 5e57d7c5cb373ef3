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
use crate::Credential;
use log::debug;
use sigv4kit_core::utils::Redact;
use sigv4kit_core::{Env, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config for aws services.
///
/// Fields left as `None` can be filled from the environment with
/// [`Config::from_env`]. Convert into a [`Credential`] once every field is
/// known.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// `service` has no standard env value and must be set by the caller.
    pub service: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl Config {
    /// Set the service name.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }

    /// Load config from env, keeping fields that are already set.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id = env.var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var(AWS_SECRET_ACCESS_KEY);
        }
        if self.region.is_none() {
            self.region = env
                .var(AWS_REGION)
                .or_else(|| env.var(AWS_DEFAULT_REGION));
        }

        debug!("config loaded from env: {self:?}");
        self
    }
}

impl TryFrom<Config> for Credential {
    type Error = Error;

    fn try_from(cfg: Config) -> Result<Self> {
        let field = |name: &str, v: Option<String>| {
            v.filter(|v| !v.is_empty())
                .ok_or_else(|| Error::credential_missing(format!("{name} is not configured")))
        };

        Ok(Credential {
            access_key_id: field("access_key_id", cfg.access_key_id)?,
            secret_access_key: field("secret_access_key", cfg.secret_access_key)?,
            region: field("region", cfg.region)?,
            service: field("service", cfg.service)?,
        })
    }
}
