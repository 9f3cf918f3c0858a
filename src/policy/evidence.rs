// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::base64::Bytes;
use super::errors::Error;
use super::measurement::Measurement;
use openssl::hash::MessageDigest;
use openssl::x509::X509;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The measurements and identity proof reported by the host under
/// attestation.  Quote verification and PCR extraction happen upstream: by
/// the time evidence reaches the policy engine it is plain data.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostEvidence {
    /// Reported PCR values, indexed by PCR number
    #[serde(default)]
    #[serde_as(as = "BTreeMap<_, serde_with::hex::Hex>")]
    pub pcrs: BTreeMap<u8, Vec<u8>>,

    /// Event log entries, grouped by the PCR they were extended into
    #[serde(rename = "event-log", default)]
    pub event_log: BTreeMap<u8, Vec<Measurement>>,

    /// DER-encoded AIK certificate, base64 in JSON
    #[serde(rename = "aik-certificate", default)]
    pub aik_certificate: Option<Bytes>,

    /// The nonce the quote was produced for
    #[serde(default)]
    pub challenge: Option<String>,
}

impl HostEvidence {
    pub fn new() -> Self {
        Default::default()
    }

    /// Decode evidence from its JSON representation
    pub fn load_json(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }

    pub fn with_pcr(mut self, index: u8, value: &[u8]) -> Self {
        self.pcrs.insert(index, value.to_vec());
        self
    }

    pub fn with_event_log(mut self, index: u8, entries: Vec<Measurement>) -> Self {
        self.event_log.insert(index, entries);
        self
    }

    pub fn with_aik_certificate(mut self, der: Vec<u8>) -> Self {
        self.aik_certificate = Some(Bytes::from(der));
        self
    }

    pub fn pcr(&self, index: u8) -> Option<&[u8]> {
        self.pcrs.get(&index).map(Vec::as_slice)
    }

    pub fn event_log(&self, index: u8) -> Option<&[Measurement]> {
        self.event_log.get(&index).map(Vec::as_slice)
    }

    pub fn aik_certificate(&self) -> Option<&[u8]> {
        self.aik_certificate.as_ref().map(Bytes::as_slice)
    }

    /// SHA-1 fingerprint of the AIK certificate, hex encoded.  None when the
    /// host supplied no certificate or an undecodable one.
    pub fn aik_fingerprint(&self) -> Option<String> {
        let cert = X509::from_der(self.aik_certificate()?).ok()?;
        let digest = cert.digest(MessageDigest::sha1()).ok()?;

        Some(hex::encode(digest))
    }
}
