// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The policy module turns a host descriptor into a [`TrustPolicy`], the set
//! of [`Rule`]s the host must satisfy, and appraises [`HostEvidence`] against
//! it to produce a [`TrustReport`].
//!
//! # Example
//!
//! The following example builds the policy of a host using an in-memory
//! baseline store and an (empty) set of trusted AIK certificate authorities.
//! With no trusted authority, the host can't be trusted whatever PCR values
//! it reports.
//!
//! ```
//! use hosttrust::policy::{host_policy, HostDescriptor, HostEvidence, IntelHostTrustPolicyFactory};
//! use hosttrust::store::{MemoBaselineStore, TrustAnchorSet};
//! use std::sync::Arc;
//!
//! const jbl: &str = r#"{
//!     "bios": [ {
//!         "name": "Intel_BIOS", "version": "S5500.86B", "oem": "Intel Corporation",
//!         "pcrs": [ { "index": 0, "value": "3a3f780f11a4b49969fcaa80cd6e3957c33b2275" } ]
//!     } ],
//!     "vmm": [ {
//!         "name": "Intel_Xen", "version": "4.1.2", "os-name": "RHEL", "os-version": "6.4",
//!         "pcrs": [ { "index": 17, "value": "1717171717171717171717171717171717171717" } ]
//!     } ]
//! }"#;
//!
//! let mut rvs = MemoBaselineStore::new();
//! rvs.load_json(jbl).expect("loading baselines");
//!
//! let factory = IntelHostTrustPolicyFactory::with_trust_anchors(rvs, Arc::new(TrustAnchorSet::new()));
//!
//! const jhost: &str = r#"{
//!     "name": "host-01",
//!     "vendor": "intel",
//!     "bios": { "name": "Intel_BIOS", "version": "S5500.86B", "oem": "Intel Corporation" },
//!     "vmm": { "name": "Intel_Xen", "version": "4.1.2", "os-name": "RHEL", "os-version": "6.4" }
//! }"#;
//!
//! let host = HostDescriptor::load_json(jhost).expect("loading host");
//!
//! let policy = host_policy(&factory, &host).expect("assembling policy");
//!
//! const jev: &str = r#"{
//!     "pcrs": {
//!         "0": "3a3f780f11a4b49969fcaa80cd6e3957c33b2275",
//!         "17": "1717171717171717171717171717171717171717"
//!     }
//! }"#;
//!
//! let evidence = HostEvidence::load_json(jev).expect("loading evidence");
//!
//! let report = policy.appraise(&evidence);
//!
//! assert!(!report.trusted());
//! ```

pub use self::attestation::{HostAttestation, TrustStatus};
pub use self::base64::Bytes;
pub use self::common::MODULE_PCR;
pub use self::errors::Error;
pub use self::evidence::HostEvidence;
pub use self::factory::{host_policy, IntelHostTrustPolicyFactory, VendorTrustPolicyFactory};
pub use self::fault::{Fault, FaultKind};
pub use self::host::{Bios, HostDescriptor, Vmm};
pub use self::marker::TrustMarker;
pub use self::measurement::{Measurement, PcrValue};
pub use self::report::TrustReport;
pub use self::rule::{replay, Rule, RuleKind};
pub use self::trustpolicy::TrustPolicy;

mod attestation;
mod base64;
pub mod common;
mod errors;
mod evidence;
mod factory;
mod fault;
mod host;
mod marker;
mod measurement;
mod report;
mod rule;
mod trustpolicy;
