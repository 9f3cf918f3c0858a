// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

mod common;

use common::{issue_aik, make_ca, TestCa};
use hex_literal::hex;
use hosttrust::config::PolicyConfig;
use hosttrust::policy::{
    host_policy, replay, FaultKind, HostAttestation, HostDescriptor, HostEvidence,
    IntelHostTrustPolicyFactory, Measurement, TrustMarker, TrustPolicy, VendorTrustPolicyFactory,
    MODULE_PCR,
};
use hosttrust::store::{
    CertificateAuthorityLoader, Fingerprint, MemoBaselineStore, TrustAnchorSet, PRIVACY_CA_BUNDLE,
};
use std::fs;
use std::path::Path;

const PCR_0: [u8; 20] = hex!("3a3f780f11a4b49969fcaa80cd6e3957c33b2275");
const PCR_0_BAD: [u8; 20] = hex!("0000000000000000000000000000000000000000");
const PCR_17: [u8; 20] = hex!("1717171717171717171717171717171717171717");
const PCR_18: [u8; 20] = hex!("1818181818181818181818181818181818181818");

fn modules() -> Vec<Measurement> {
    vec![
        Measurement::new("xen.gz", &hex!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")),
        Measurement::new("vmlinuz", &hex!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb")),
    ]
}

fn aik(ca: &TestCa, cn: &str) -> Vec<u8> {
    issue_aik(ca, cn).to_der().unwrap()
}

fn write_bundle(dir: &Path, ca: &TestCa) {
    fs::write(dir.join(PRIVACY_CA_BUNDLE), ca.cert.to_pem().unwrap()).unwrap();
}

fn factory(dir: &Path) -> IntelHostTrustPolicyFactory<MemoBaselineStore> {
    let mut rvs = MemoBaselineStore::new();
    rvs.load_json(common::BASELINES).unwrap();

    IntelHostTrustPolicyFactory::new(rvs, PolicyConfig::with_default_sources(dir).loader())
}

fn policy(dir: &Path, host: &HostDescriptor) -> TrustPolicy {
    host_policy(&factory(dir), host).unwrap()
}

fn good_evidence(aik: Vec<u8>) -> HostEvidence {
    let log = modules();
    let pcr_19 = replay(20, &log).unwrap();

    HostEvidence::new()
        .with_pcr(0, &PCR_0)
        .with_pcr(17, &PCR_17)
        .with_pcr(18, &PCR_18)
        .with_pcr(MODULE_PCR, &pcr_19)
        .with_event_log(MODULE_PCR, log)
        .with_aik_certificate(aik)
}

#[test]
fn trusted_host() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let ca = make_ca("Privacy CA");
    write_bundle(dir.path(), &ca);

    let host = HostDescriptor::load_json(common::HOST).unwrap();
    let evidence = good_evidence(aik(&ca, "aik"));

    let report = policy(dir.path(), &host).appraise(&evidence);

    assert!(report.trusted());
    assert_eq!(report.faults(TrustMarker::Bios), Some(&[][..]));
    assert_eq!(report.faults(TrustMarker::Vmm), Some(&[][..]));

    let a = HostAttestation::new(&host, &evidence, report);
    assert!(a.is_trusted());
    assert!(a.aik_fingerprint.is_some());
}

#[test]
fn bios_measurement_mismatch() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let ca = make_ca("Privacy CA");
    write_bundle(dir.path(), &ca);

    let host = HostDescriptor::load_json(common::HOST).unwrap();
    let evidence = good_evidence(aik(&ca, "aik")).with_pcr(0, &PCR_0_BAD);

    let report = policy(dir.path(), &host).appraise(&evidence);

    let bios = report.faults(TrustMarker::Bios).unwrap();
    assert_eq!(bios.len(), 1);
    assert_eq!(bios[0].kind, FaultKind::PcrValueMismatch);

    assert!(report.is_trusted(TrustMarker::Vmm));
    assert!(!report.trusted());
}

#[test]
fn aik_signed_by_unknown_authority() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let ca = make_ca("Privacy CA");
    let rogue = make_ca("Rogue CA");
    write_bundle(dir.path(), &ca);

    let host = HostDescriptor::load_json(common::HOST).unwrap();
    let evidence = good_evidence(aik(&rogue, "aik"));

    let report = policy(dir.path(), &host).appraise(&evidence);

    for marker in [TrustMarker::Bios, TrustMarker::Vmm] {
        let faults = report.faults(marker).unwrap();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::AikCertificateNotTrusted);
    }
}

#[test]
fn module_event_log_gated_by_manifest_list() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let ca = make_ca("Privacy CA");
    write_bundle(dir.path(), &ca);

    let evidence = HostEvidence::new()
        .with_pcr(0, &PCR_0)
        .with_pcr(17, &PCR_17)
        .with_pcr(18, &PCR_18)
        .with_event_log(MODULE_PCR, vec![])
        .with_aik_certificate(aik(&ca, "aik"));

    let inclusion_faults = |host: &HostDescriptor| {
        policy(dir.path(), host)
            .appraise(&evidence)
            .faults(TrustMarker::Vmm)
            .unwrap()
            .iter()
            .filter(|f| f.kind == FaultKind::PcrEventLogMissingExpectedEntries)
            .count()
    };

    let mut host = HostDescriptor::load_json(common::HOST).unwrap();
    assert!(inclusion_faults(&host) >= 1);

    host.vmm.required_manifest_list = vec!["0".to_string(), "17".to_string(), "18".to_string()];
    assert_eq!(inclusion_faults(&host), 0);
}

#[test]
fn comparison_ignores_identity() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");

    let host = HostDescriptor::load_json(common::HOST).unwrap();

    // no AIK certificate, and no trusted authority at all
    let mut evidence = good_evidence(vec![]);
    evidence.aik_certificate = None;

    let rules = factory(dir.path())
        .comparison_rules_for_vmm(&host.vmm, &host)
        .unwrap();
    assert!(rules.iter().all(|r| !r.is_aik_certificate_trusted()));

    let report = rules.appraise(&evidence);
    assert!(report.trusted());
}

#[test]
fn loader_skips_absent_source() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let a = make_ca("Remote CA");
    write_bundle(dir.path(), &a);

    let s = CertificateAuthorityLoader::with_default_sources(dir.path()).load();

    let mut expected = TrustAnchorSet::new();
    expected.insert(a.cert.clone()).unwrap();

    assert_eq!(s, expected);
    assert!(s.contains(&Fingerprint::of(&a.cert).unwrap()));
}

#[test]
fn no_trusted_authority() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let ca = make_ca("Privacy CA");

    let host = HostDescriptor::load_json(common::HOST).unwrap();
    let evidence = good_evidence(aik(&ca, "aik"));

    let report = policy(dir.path(), &host).appraise(&evidence);

    assert!(!report.trusted());
    assert_eq!(
        report.faults(TrustMarker::Bios).unwrap()[0].kind,
        FaultKind::AikCertificateNotTrusted
    );
}
