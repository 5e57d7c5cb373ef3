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


use sigv4kit_core::utils::Redact;
use sigv4kit_core::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Credential that holds everything needed to sign a request.
///
/// The value is only borrowed during signing and never mutated. The secret
/// access key is never logged; `Debug` prints it redacted.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for aws services.
    pub access_key_id: String,
    /// Secret access key for aws services.
    pub secret_access_key: String,
    /// Region of the endpoint, for example `us-east-1`.
    pub region: String,
    /// Service name of the endpoint, for example `s3` or `execute-api`.
    pub service: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key_id: &str, secret_access_key: &str, region: &str, service: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// Check that every field is present.
    ///
    /// Returns [`sigv4kit_core::ErrorKind::CredentialMissing`] naming the
    /// first empty field.
    pub fn check(&self) -> Result<()> {
        let fields = [
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("region", &self.region),
            ("service", &self.service),
        ];

        match fields.iter().find(|(_, v)| v.is_empty()) {
            Some((name, _)) => Err(Error::credential_missing(format!("{name} is empty"))),
            None => Ok(()),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}
