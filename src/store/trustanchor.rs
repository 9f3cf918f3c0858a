// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use openssl::hash::MessageDigest;
use openssl::x509::{X509Ref, X509};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// SHA-256 digest of the DER encoding of a certificate
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of the supplied certificate
    pub fn of(cert: &X509Ref) -> Result<Self, Error> {
        let digest = cert
            .digest(MessageDigest::sha256())
            .map_err(|e| Error::Syntax(format!("fingerprinting certificate: {e}")))?;

        let mut fp = [0u8; 32];
        fp.copy_from_slice(&digest);

        Ok(Self(fp))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

/// The set of root certificates trusted to issue AIK certificates.
/// Certificates are indexed by their [`Fingerprint`], so adding the same
/// certificate from two different sources keeps a single copy.  Two sets
/// compare equal when they hold the same fingerprints.
#[derive(Clone, Default)]
pub struct TrustAnchorSet {
    anchors: BTreeMap<Fingerprint, X509>,
}

impl TrustAnchorSet {
    /// Returns a new empty TrustAnchorSet
    pub fn new() -> Self {
        Self {
            anchors: BTreeMap::new(),
        }
    }

    /// Add a certificate to the set.  Returns false if an identical
    /// certificate was already present.
    pub fn insert(&mut self, cert: X509) -> Result<bool, Error> {
        let fp = Fingerprint::of(&cert)?;

        if self.anchors.contains_key(&fp) {
            return Ok(false);
        }

        self.anchors.insert(fp, cert);

        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.anchors.contains_key(fp)
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &Fingerprint> {
        self.anchors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &X509> {
        self.anchors.values()
    }

    /// Lookup the anchor whose public key verifies the signature on `cert`
    pub fn find_issuer(&self, cert: &X509Ref) -> Option<&X509> {
        self.anchors.values().find(|anchor| {
            anchor
                .public_key()
                .and_then(|pkey| cert.verify(&pkey))
                .unwrap_or(false)
        })
    }
}

impl PartialEq for TrustAnchorSet {
    fn eq(&self, other: &Self) -> bool {
        self.anchors.keys().eq(other.anchors.keys())
    }
}

impl Eq for TrustAnchorSet {}

impl Hash for TrustAnchorSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for fp in self.anchors.keys() {
            fp.hash(state);
        }
    }
}

impl std::fmt::Debug for TrustAnchorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.anchors.keys()).finish()
    }
}
