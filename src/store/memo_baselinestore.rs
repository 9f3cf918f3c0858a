// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::baseline::{Baselines, BiosBaseline, VmmBaseline};
use super::errors::Error;
use super::IBaselineRuleProvider;
use crate::policy::{Bios, HostDescriptor, Rule, TrustMarker, Vmm, MODULE_PCR};
use log::debug;
use multimap::MultiMap;
use std::collections::HashSet;

type BiosKey = (String, String, String);
type VmmKey = (String, String, String, String);

fn bios_key(name: &str, version: &str, oem: &str) -> BiosKey {
    (name.to_string(), version.to_string(), oem.to_string())
}

fn vmm_key(name: &str, version: &str, os_name: &str, os_version: &str) -> VmmKey {
    (
        name.to_string(),
        version.to_string(),
        os_name.to_string(),
        os_version.to_string(),
    )
}

/// The store where BIOS and hypervisor baselines are stashed
#[derive(Debug, Default)]
pub struct MemoBaselineStore {
    /// BIOS baselines, indexed by name, version and OEM
    b: MultiMap<BiosKey, BiosBaseline>,

    /// hypervisor baselines, indexed by name, version, OS name and OS version
    v: MultiMap<VmmKey, VmmBaseline>,
}

impl MemoBaselineStore {
    pub fn new() -> Self {
        Self {
            b: MultiMap::new(),
            v: MultiMap::new(),
        }
    }

    /// Add to an existing (and possibly empty) store the baselines loaded
    /// from the given JSON file
    pub fn load_json(&mut self, j: &str) -> Result<(), Error> {
        let v = Baselines::parse(j)?;

        for bb in v.bios.into_iter().flatten() {
            self.b.insert(bios_key(&bb.name, &bb.version, &bb.oem), bb);
        }

        for vb in v.vmm.into_iter().flatten() {
            self.v.insert(
                vmm_key(&vb.name, &vb.version, &vb.os_name, &vb.os_version),
                vb,
            );
        }

        Ok(())
    }

    /// Lookup all baselines for the given BIOS
    pub fn lookup_bios(&self, bios: &Bios) -> Option<&Vec<BiosBaseline>> {
        self.b.get_vec(&bios_key(&bios.name, &bios.version, &bios.oem))
    }

    /// Lookup all baselines for the given hypervisor
    pub fn lookup_vmm(&self, vmm: &Vmm) -> Option<&Vec<VmmBaseline>> {
        self.v
            .get_vec(&vmm_key(&vmm.name, &vmm.version, &vmm.os_name, &vmm.os_version))
    }

    fn vmm_baselines(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<&Vec<VmmBaseline>, Error> {
        self.lookup_vmm(vmm).ok_or_else(|| {
            Error::UnknownBaseline(format!(
                "no baseline for hypervisor {} {} ({} {}) of host {}",
                vmm.name, vmm.version, vmm.os_name, vmm.os_version, host.name
            ))
        })
    }
}

impl IBaselineRuleProvider for MemoBaselineStore {
    fn constant_pcr_rules_for_bios(
        &self,
        bios: &Bios,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error> {
        let baselines = self.lookup_bios(bios).ok_or_else(|| {
            Error::UnknownBaseline(format!(
                "no baseline for BIOS {} {} ({}) of host {}",
                bios.name, bios.version, bios.oem, host.name
            ))
        })?;

        let rules: HashSet<Rule> = baselines
            .iter()
            .flat_map(|b| b.pcrs.iter())
            .map(|pcr| Rule::pcr_matches_constant(pcr.clone()).with_markers([TrustMarker::Bios]))
            .collect();

        debug!("{} BIOS PCR rule(s) for host {}", rules.len(), host.name);

        Ok(rules)
    }

    fn constant_pcr_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error> {
        let rules: HashSet<Rule> = self
            .vmm_baselines(vmm, host)?
            .iter()
            .flat_map(|b| b.pcrs.iter())
            .map(|pcr| Rule::pcr_matches_constant(pcr.clone()).with_markers([TrustMarker::Vmm]))
            .collect();

        debug!("{} VMM PCR rule(s) for host {}", rules.len(), host.name);

        Ok(rules)
    }

    fn event_log_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error> {
        let baselines = self.vmm_baselines(vmm, host)?;

        let modules = baselines.iter().flat_map(|b| b.modules.iter().cloned());

        let rules = HashSet::from([
            Rule::pcr_event_log_includes(MODULE_PCR, modules).with_markers([TrustMarker::Vmm]),
            Rule::pcr_event_log_integrity(MODULE_PCR).with_markers([TrustMarker::Vmm]),
        ]);

        Ok(rules)
    }
}
