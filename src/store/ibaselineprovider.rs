// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use crate::policy::{Bios, HostDescriptor, Rule, Vmm};
use std::collections::HashSet;

/// Source of the rules derived from a host's known-good measurement
/// baseline.  The policy factories union these rules into the policies they
/// assemble without looking into how the expected values were obtained.
pub trait IBaselineRuleProvider: Send + Sync {
    /// Rules requiring each BIOS baseline PCR to hold its expected value
    fn constant_pcr_rules_for_bios(
        &self,
        bios: &Bios,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error>;

    /// Rules requiring each hypervisor baseline PCR to hold its expected value
    fn constant_pcr_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error>;

    /// Rules requiring the module event log to contain the expected modules
    fn event_log_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<HashSet<Rule>, Error>;
}
