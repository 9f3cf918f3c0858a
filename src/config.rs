// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Policy engine configuration.
//!
//! The configuration lists the certificate authority sources the AIK
//! certificates are checked against:
//!
//! ```json
//! {
//!   "ca-sources": [
//!     { "name": "privacy", "path": "PrivacyCA.p12.pem", "format": "pem-bundle" },
//!     { "name": "privacy-local", "path": "PrivacyCA.cer", "format": "der" }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the certificate directory.

use crate::store::{CertificateAuthorityLoader, CertificateSource, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyConfig {
    #[serde(rename = "ca-sources", default)]
    pub ca_sources: Vec<CertificateSource>,
}

impl PolicyConfig {
    pub fn load_json(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }

    /// The remote and local Privacy CA files in `dir`
    pub fn with_default_sources(dir: &Path) -> Self {
        Self {
            ca_sources: CertificateAuthorityLoader::with_default_sources(dir)
                .sources()
                .to_vec(),
        }
    }

    /// Anchor relative source paths in `dir`
    pub fn resolve(mut self, dir: &Path) -> Self {
        for source in self.ca_sources.iter_mut() {
            if source.path.is_relative() {
                source.path = dir.join(&source.path);
            }
        }
        self
    }

    pub fn loader(&self) -> CertificateAuthorityLoader {
        CertificateAuthorityLoader::new(self.ca_sources.clone())
    }
}
