// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::trustanchor::TrustAnchorSet;
use log::{debug, info, warn};
use openssl::x509::X509;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// May contain multiple certificates from remote Privacy CAs
pub const PRIVACY_CA_BUNDLE: &str = "PrivacyCA.p12.pem";

/// Contains the certificate of the local Privacy CA
pub const PRIVACY_CA_CERTIFICATE: &str = "PrivacyCA.cer";

/// Encoding of a certificate source file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// One or more PEM-encoded certificates
    PemBundle,
    /// Exactly one DER-encoded certificate
    Der,
}

/// A named file holding one or more trusted certificate authorities
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CertificateSource {
    /// Logical name of the authority, e.g., "privacy"
    pub name: String,

    pub path: PathBuf,

    pub format: SourceFormat,
}

impl CertificateSource {
    pub fn pem_bundle(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            format: SourceFormat::PemBundle,
        }
    }

    pub fn der(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            format: SourceFormat::Der,
        }
    }

    /// Read and decode all the certificates in this source
    pub fn read(&self) -> Result<Vec<X509>, Error> {
        let contents = fs::read(&self.path)
            .map_err(|e| Error::Io(format!("{}: {e}", self.path.display())))?;

        match self.format {
            SourceFormat::PemBundle => {
                let certs = X509::stack_from_pem(&contents)
                    .map_err(|e| Error::Syntax(format!("{}: {e}", self.path.display())))?;

                if certs.is_empty() {
                    return Err(Error::Syntax(format!(
                        "{}: no PEM certificates found",
                        self.path.display()
                    )));
                }

                Ok(certs)
            }
            SourceFormat::Der => X509::from_der(&contents)
                .map(|c| vec![c])
                .map_err(|e| Error::Syntax(format!("{}: {e}", self.path.display()))),
        }
    }
}

/// Assembles the set of trusted AIK certificate authorities from a list of
/// independent sources.  A source that is missing or malformed is skipped
/// with a warning: the loader itself never fails, and may legitimately
/// produce an empty set.
#[derive(Clone, Debug, Default)]
pub struct CertificateAuthorityLoader {
    sources: Vec<CertificateSource>,
}

impl CertificateAuthorityLoader {
    pub fn new(sources: Vec<CertificateSource>) -> Self {
        Self { sources }
    }

    /// The remote Privacy CA bundle and the local Privacy CA certificate,
    /// both looked up in `dir`
    pub fn with_default_sources(dir: &Path) -> Self {
        Self::new(vec![
            CertificateSource::pem_bundle("privacy", dir.join(PRIVACY_CA_BUNDLE)),
            CertificateSource::der("privacy-local", dir.join(PRIVACY_CA_CERTIFICATE)),
        ])
    }

    pub fn sources(&self) -> &[CertificateSource] {
        &self.sources
    }

    pub fn load(&self) -> TrustAnchorSet {
        let mut anchors = TrustAnchorSet::new();

        for source in self.sources.iter() {
            let certs = match source.read() {
                Ok(certs) => certs,
                Err(e) => {
                    warn!(
                        "Cannot load {} certificate authorities from {}: {}",
                        source.name,
                        source.path.display(),
                        e
                    );
                    continue;
                }
            };

            let n = certs.len();

            for cert in certs {
                if let Err(e) = anchors.insert(cert) {
                    warn!("Skipping certificate from {}: {}", source.path.display(), e);
                }
            }

            debug!("Added {} certificate(s) from {}", n, source.path.display());
        }

        info!("Loaded {} trusted AIK certificate authorities", anchors.len());

        anchors
    }
}
