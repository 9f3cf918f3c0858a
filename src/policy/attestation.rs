// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::evidence::HostEvidence;
use super::host::HostDescriptor;
use super::marker::TrustMarker;
use super::report::TrustReport;
use ear::TrustVector;
use serde::Serialize;

/// Per-layer trust flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrustStatus {
    pub bios: bool,
    pub vmm: bool,
    pub location: bool,
    pub trusted: bool,
}

impl TrustStatus {
    pub fn from_report(report: &TrustReport) -> Self {
        let bios = report.is_trusted(TrustMarker::Bios);
        let vmm = report.is_trusted(TrustMarker::Vmm);

        Self {
            bios,
            vmm,
            location: report.is_trusted(TrustMarker::Location),
            // BIOS and VMM must have been checked, and no rule may have failed
            trusted: bios && vmm && report.trusted(),
        }
    }
}

/// The summary of one attestation of a host
#[derive(Clone, Debug, Serialize)]
pub struct HostAttestation {
    #[serde(rename = "host-name")]
    pub host_name: String,

    #[serde(rename = "host-uuid", skip_serializing_if = "Option::is_none")]
    pub host_uuid: Option<String>,

    /// SHA-1 fingerprint of the AIK certificate
    #[serde(rename = "aik-fingerprint", skip_serializing_if = "Option::is_none")]
    pub aik_fingerprint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,

    #[serde(rename = "trust-status")]
    pub status: TrustStatus,

    #[serde(rename = "trust-report")]
    pub report: TrustReport,

    #[serde(rename = "trust-vector")]
    pub trust_vector: TrustVector,
}

impl HostAttestation {
    pub fn new(host: &HostDescriptor, evidence: &HostEvidence, report: TrustReport) -> Self {
        Self {
            host_name: host.name.clone(),
            host_uuid: host.uuid.clone(),
            aik_fingerprint: evidence.aik_fingerprint(),
            challenge: evidence.challenge.clone(),
            status: TrustStatus::from_report(&report),
            trust_vector: report.trust_vector(),
            report,
        }
    }

    pub fn is_trusted(&self) -> bool {
        self.status.trusted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PcrValue, Rule};
    use crate::testutil;
    use hex_literal::hex;

    const PCR_0: [u8; 20] = hex!("3a3f780f11a4b49969fcaa80cd6e3957c33b2275");
    const PCR_17: [u8; 20] = hex!("1717171717171717171717171717171717171717");

    fn rules() -> Vec<Rule> {
        vec![
            Rule::pcr_matches_constant(PcrValue::new(0, &PCR_0)).with_markers([TrustMarker::Bios]),
            Rule::pcr_matches_constant(PcrValue::new(17, &PCR_17))
                .with_markers([TrustMarker::Vmm]),
        ]
    }

    #[test]
    fn trusted_host() {
        let ca = testutil::make_ca("Privacy CA");
        let aik = testutil::issue_aik(&ca, "aik").to_der().unwrap();

        let evidence = HostEvidence {
            challenge: Some("nonce-1".to_string()),
            ..HostEvidence::new()
                .with_pcr(0, &PCR_0)
                .with_pcr(17, &PCR_17)
                .with_aik_certificate(aik)
        };

        let host = testutil::host();
        let report = TrustReport::appraise(&rules(), &evidence);

        let a = HostAttestation::new(&host, &evidence, report);

        assert!(a.is_trusted());
        assert!(a.status.bios && a.status.vmm);
        assert!(!a.status.location);
        assert_eq!(a.host_name, host.name);
        assert_eq!(a.aik_fingerprint.as_ref().map(String::len), Some(40));
        assert_eq!(a.challenge.as_deref(), Some("nonce-1"));
    }

    #[test]
    fn failed_location_rule() {
        let mut rules = rules();
        rules.push(
            Rule::pcr_matches_constant(PcrValue::new(22, &PCR_17))
                .with_markers([TrustMarker::Location]),
        );

        let evidence = HostEvidence::new()
            .with_pcr(0, &PCR_0)
            .with_pcr(17, &PCR_17)
            .with_pcr(22, &PCR_0);

        let report = TrustReport::appraise(&rules, &evidence);
        let a = HostAttestation::new(&testutil::host(), &evidence, report);

        assert!(a.status.bios && a.status.vmm);
        assert!(!a.status.location);
        assert!(!a.is_trusted());
    }

    #[test]
    fn failed_untagged_rule() {
        let mut rules = rules();
        rules.push(Rule::pcr_matches_constant(PcrValue::new(18, &PCR_17)));

        let evidence = HostEvidence::new().with_pcr(0, &PCR_0).with_pcr(17, &PCR_17);

        let report = TrustReport::appraise(&rules, &evidence);
        let a = HostAttestation::new(&testutil::host(), &evidence, report);

        assert!(a.status.bios && a.status.vmm);
        assert!(!a.is_trusted());
    }

    #[test]
    fn untrusted_vmm() {
        let evidence = HostEvidence::new().with_pcr(0, &PCR_0);

        let report = TrustReport::appraise(&rules(), &evidence);
        let a = HostAttestation::new(&testutil::host(), &evidence, report);

        assert!(a.status.bios);
        assert!(!a.status.vmm);
        assert!(!a.is_trusted());
        assert!(a.aik_fingerprint.is_none());

        let j = serde_json::to_value(&a).unwrap();
        assert_eq!(j["trust-status"]["trusted"], false);
        assert_eq!(j["host-name"], "host-01");
        assert!(j.get("aik-fingerprint").is_none());
    }
}
