// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::evidence::HostEvidence;
use super::fault::Fault;
use super::marker::TrustMarker;
use super::rule::Rule;
use ear::claim::*;
use ear::TrustVector;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of appraising a host: the faults raised by the rules of each
/// marker.  A marker is listed iff at least one evaluated rule carried it,
/// so a marker with an empty list was checked and found compliant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrustReport {
    markers: BTreeMap<TrustMarker, Vec<Fault>>,

    /// faults raised by rules that carry no marker
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unmarked: Vec<Fault>,

    #[serde(skip)]
    identity_checked: bool,
}

impl TrustReport {
    /// Evaluate all the supplied rules, without stopping at the first
    /// failure, and fold their faults into a report.  The faults of a rule
    /// are recorded under each of its markers.  Fault lists are sorted, so
    /// the report does not depend on the order in which rules are visited.
    pub fn appraise<'a, I>(rules: I, evidence: &HostEvidence) -> Self
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let mut report = TrustReport::default();

        for rule in rules {
            let faults = rule.evaluate(evidence);

            debug!(
                "rule {} {:?}: {} fault(s)",
                rule.name(),
                rule.markers(),
                faults.len()
            );

            if rule.is_aik_certificate_trusted() {
                report.identity_checked = true;
            }

            if rule.markers().is_empty() {
                report.unmarked.extend(faults.iter().cloned());
            }

            for marker in rule.markers().iter() {
                report
                    .markers
                    .entry(*marker)
                    .or_default()
                    .extend(faults.iter().cloned());
            }
        }

        for faults in report.markers.values_mut() {
            faults.sort();
        }
        report.unmarked.sort();

        report
    }

    /// True iff no rule raised a fault, whether or not it carried a marker
    pub fn trusted(&self) -> bool {
        self.unmarked.is_empty() && self.markers.values().all(Vec::is_empty)
    }

    /// True iff the marker was checked and no rule raised a fault for it
    pub fn is_trusted(&self, marker: TrustMarker) -> bool {
        self.markers
            .get(&marker)
            .map(Vec::is_empty)
            .unwrap_or(false)
    }

    pub fn faults(&self, marker: TrustMarker) -> Option<&[Fault]> {
        self.markers.get(&marker).map(Vec::as_slice)
    }

    /// Faults of the rules that were not tagged with any marker
    pub fn unmarked_faults(&self) -> &[Fault] {
        &self.unmarked
    }

    pub fn markers(&self) -> impl Iterator<Item = &TrustMarker> {
        self.markers.keys()
    }

    pub fn fault_count(&self) -> usize {
        self.unmarked.len() + self.markers.values().map(Vec::len).sum::<usize>()
    }

    /// Project the report onto an AR4SI trustworthiness vector
    pub fn trust_vector(&self) -> TrustVector {
        let mut tvec = TrustVector::default();

        let faults: Vec<&Fault> = self
            .markers
            .values()
            .flatten()
            .chain(self.unmarked.iter())
            .collect();

        if faults.iter().any(|f| f.kind.is_identity()) {
            tvec.instance_identity.set(UNTRUSTWORTHY_INSTANCE);
        } else if self.identity_checked {
            tvec.instance_identity.set(TRUSTWORTHY_INSTANCE);
        }

        if faults.iter().any(|f| !f.kind.is_identity()) {
            tvec.executables.set(UNRECOGNIZED_RUNTIME);
        } else if self.markers.contains_key(&TrustMarker::Vmm) {
            tvec.executables.set(APPROVED_RUNTIME);
        } else if self.markers.contains_key(&TrustMarker::Bios) {
            tvec.executables.set(APPROVED_BOOT);
        }

        tvec
    }
}
