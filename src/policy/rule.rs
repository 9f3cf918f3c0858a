// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::digest_for_len;
use super::evidence::HostEvidence;
use super::fault::{Fault, FaultKind};
use super::marker::TrustMarker;
use super::measurement::{Measurement, PcrValue};
use crate::store::TrustAnchorSet;
use openssl::hash::hash;
use openssl::x509::{X509NameRef, X509};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What a rule checks
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// The AIK certificate is signed by one of the trusted authorities
    AikCertificateTrusted { anchors: Arc<TrustAnchorSet> },

    /// A PCR holds exactly the expected value
    PcrMatchesConstant { expected: PcrValue },

    /// The event log of a PCR contains all the expected measurements.  Other
    /// entries may be present.
    PcrEventLogIncludes {
        pcr: u8,
        expected: BTreeSet<Measurement>,
    },

    /// Replaying the event log of a PCR yields the reported PCR value
    PcrEventLogIntegrity { pcr: u8 },
}

/// A trust rule, tagged with the markers of the layers it vouches for.
/// Rules are immutable once built and compare by value, so the same rule
/// contributed twice collapses into one policy entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    kind: RuleKind,
    markers: BTreeSet<TrustMarker>,
}

impl Rule {
    fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            markers: BTreeSet::new(),
        }
    }

    pub fn aik_certificate_trusted(anchors: Arc<TrustAnchorSet>) -> Self {
        Self::new(RuleKind::AikCertificateTrusted { anchors })
    }

    pub fn pcr_matches_constant(expected: PcrValue) -> Self {
        Self::new(RuleKind::PcrMatchesConstant { expected })
    }

    pub fn pcr_event_log_includes(
        pcr: u8,
        expected: impl IntoIterator<Item = Measurement>,
    ) -> Self {
        Self::new(RuleKind::PcrEventLogIncludes {
            pcr,
            expected: expected.into_iter().collect(),
        })
    }

    pub fn pcr_event_log_integrity(pcr: u8) -> Self {
        Self::new(RuleKind::PcrEventLogIntegrity { pcr })
    }

    /// Tag the rule with the supplied markers, in addition to any it
    /// already carries
    pub fn with_markers(mut self, markers: impl IntoIterator<Item = TrustMarker>) -> Self {
        self.markers.extend(markers);
        self
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn markers(&self) -> &BTreeSet<TrustMarker> {
        &self.markers
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            RuleKind::AikCertificateTrusted { .. } => "aik-certificate-trusted",
            RuleKind::PcrMatchesConstant { .. } => "pcr-matches-constant",
            RuleKind::PcrEventLogIncludes { .. } => "pcr-event-log-includes",
            RuleKind::PcrEventLogIntegrity { .. } => "pcr-event-log-integrity",
        }
    }

    pub fn is_aik_certificate_trusted(&self) -> bool {
        matches!(self.kind, RuleKind::AikCertificateTrusted { .. })
    }

    pub fn is_pcr_event_log_includes(&self) -> bool {
        matches!(self.kind, RuleKind::PcrEventLogIncludes { .. })
    }

    /// Check the evidence against this rule.  An empty result means the rule
    /// is satisfied.  Missing or malformed evidence is reported as a fault,
    /// never as an error, so that one bad input can't stop the appraisal of
    /// the remaining rules.
    pub fn evaluate(&self, evidence: &HostEvidence) -> Vec<Fault> {
        match &self.kind {
            RuleKind::AikCertificateTrusted { anchors } => {
                evaluate_aik_certificate(anchors, evidence)
            }
            RuleKind::PcrMatchesConstant { expected } => evaluate_pcr_constant(expected, evidence),
            RuleKind::PcrEventLogIncludes { pcr, expected } => {
                evaluate_event_log_includes(*pcr, expected, evidence)
            }
            RuleKind::PcrEventLogIntegrity { pcr } => {
                evaluate_event_log_integrity(*pcr, evidence)
            }
        }
    }
}

fn evaluate_aik_certificate(anchors: &TrustAnchorSet, evidence: &HostEvidence) -> Vec<Fault> {
    let der = match evidence.aik_certificate() {
        None => {
            return vec![Fault::new(
                FaultKind::AikCertificateMissing,
                "host did not supply an AIK certificate",
            )]
        }
        Some(der) => der,
    };

    let aik = match X509::from_der(der) {
        Err(_) => {
            return vec![Fault::new(
                FaultKind::AikCertificateInvalid,
                "AIK certificate is not a DER-encoded X.509 certificate",
            )]
        }
        Ok(aik) => aik,
    };

    if anchors.is_empty() {
        return vec![Fault::new(
            FaultKind::AikCertificateNotTrusted,
            "no trusted AIK certificate authorities are loaded",
        )];
    }

    if anchors.find_issuer(&aik).is_some() {
        return vec![];
    }

    vec![Fault::new(
        FaultKind::AikCertificateNotTrusted,
        format!(
            "AIK certificate issued by '{}' is not signed by any of the {} trusted authorities",
            display_name(aik.issuer_name()),
            anchors.len()
        ),
    )]
}

fn display_name(name: &X509NameRef) -> String {
    name.entries()
        .filter_map(|e| e.data().as_utf8().ok().map(|s| s.to_string()))
        .collect::<Vec<String>>()
        .join(", ")
}

fn evaluate_pcr_constant(expected: &PcrValue, evidence: &HostEvidence) -> Vec<Fault> {
    match evidence.pcr(expected.index) {
        None => vec![Fault::new(
            FaultKind::PcrValueMissing,
            format!("PCR {} was not reported", expected.index),
        )],
        Some(actual) if actual == expected.value.as_slice() => vec![],
        Some(actual) => vec![Fault::new(
            FaultKind::PcrValueMismatch,
            format!(
                "PCR {} is {}, expected {}",
                expected.index,
                hex::encode(actual),
                hex::encode(&expected.value)
            ),
        )],
    }
}

fn evaluate_event_log_includes(
    pcr: u8,
    expected: &BTreeSet<Measurement>,
    evidence: &HostEvidence,
) -> Vec<Fault> {
    let log = match evidence.event_log(pcr) {
        None => {
            return vec![Fault::new(
                FaultKind::PcrEventLogMissing,
                format!("no event log was reported for PCR {pcr}"),
            )]
        }
        Some(log) => log,
    };

    let missing: Vec<String> = expected
        .iter()
        .filter(|m| !log.contains(*m))
        .map(|m| m.to_string())
        .collect();

    if missing.is_empty() {
        return vec![];
    }

    vec![Fault::new(
        FaultKind::PcrEventLogMissingExpectedEntries,
        format!(
            "PCR {pcr} event log lacks {} expected entries: {}",
            missing.len(),
            missing.join(", ")
        ),
    )]
}

fn evaluate_event_log_integrity(pcr: u8, evidence: &HostEvidence) -> Vec<Fault> {
    let log = match evidence.event_log(pcr) {
        None => {
            return vec![Fault::new(
                FaultKind::PcrEventLogMissing,
                format!("no event log was reported for PCR {pcr}"),
            )]
        }
        Some(log) => log,
    };

    let reported = match evidence.pcr(pcr) {
        None => {
            return vec![Fault::new(
                FaultKind::PcrValueMissing,
                format!("PCR {pcr} was not reported"),
            )]
        }
        Some(v) => v,
    };

    match replay(reported.len(), log) {
        Err(detail) => vec![Fault::new(
            FaultKind::PcrEventLogInvalid,
            format!("PCR {pcr}: {detail}"),
        )],
        Ok(computed) if computed == reported => vec![],
        Ok(computed) => vec![Fault::new(
            FaultKind::PcrValueMismatch,
            format!(
                "PCR {pcr} is {}, its event log replays to {}",
                hex::encode(reported),
                hex::encode(computed)
            ),
        )],
    }
}

/// Extend a zeroed register with every entry of the log, in order
pub fn replay(len: usize, log: &[Measurement]) -> Result<Vec<u8>, String> {
    let md = digest_for_len(len).ok_or_else(|| format!("unsupported PCR size {len}"))?;

    let mut register = vec![0u8; len];

    for m in log.iter() {
        if m.value.len() != len {
            return Err(format!(
                "event '{}' has a {}-byte digest in a {len}-byte PCR bank",
                m.label,
                m.value.len()
            ));
        }

        register.extend_from_slice(&m.value);

        // the hash only fails on internal openssl errors
        register = hash(md, &register)
            .map_err(|_| "cannot compute PCR extend".to_string())?
            .to_vec();
    }

    Ok(register)
}
