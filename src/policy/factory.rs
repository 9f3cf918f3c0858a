// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::MODULE_PCR;
use super::errors::Error;
use super::host::{Bios, HostDescriptor, Vmm};
use super::marker::TrustMarker;
use super::rule::Rule;
use super::trustpolicy::TrustPolicy;
use crate::store::{
    CertificateAuthorityLoader, IBaselineRuleProvider, ITrustAnchorStore, LazyTrustAnchorStore,
};
use log::debug;

/// Assembles the rules a host of a given vendor must satisfy to be trusted
/// at each layer.
pub trait VendorTrustPolicyFactory: Send + Sync {
    /// Rules for the BIOS layer
    fn rules_for_bios(&self, bios: &Bios, host: &HostDescriptor) -> Result<TrustPolicy, Error>;

    /// Rules for the hypervisor layer
    fn rules_for_vmm(&self, vmm: &Vmm, host: &HostDescriptor) -> Result<TrustPolicy, Error>;

    /// Rules for the location layer.  A vendor that can't vouch for location
    /// returns [`Error::Unsupported`], which callers must not read as "no
    /// rules needed".
    fn rules_for_location(&self, location: &str, host: &HostDescriptor)
        -> Result<TrustPolicy, Error>;

    /// The hypervisor measurement rules only, without the AIK certificate
    /// check.  Used to compare the measurements of two known hosts.
    fn comparison_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<TrustPolicy, Error>;
}

/// Policy factory for hosts with Intel TXT.  Requires the AIK certificate to
/// be signed by a trusted Privacy CA, and the PCRs to match the baselines
/// supplied by `P`.
pub struct IntelHostTrustPolicyFactory<P, T = LazyTrustAnchorStore> {
    reader: P,
    cacerts: T,
}

impl<P: IBaselineRuleProvider> IntelHostTrustPolicyFactory<P> {
    /// The trusted authorities are read from `loader`'s sources on first
    /// use, and kept for the lifetime of the factory
    pub fn new(reader: P, loader: CertificateAuthorityLoader) -> Self {
        Self {
            reader,
            cacerts: LazyTrustAnchorStore::new(loader),
        }
    }
}

impl<P: IBaselineRuleProvider, T: ITrustAnchorStore> IntelHostTrustPolicyFactory<P, T> {
    pub fn with_trust_anchors(reader: P, cacerts: T) -> Self {
        Self { reader, cacerts }
    }

    fn aik_certificate_rule(&self, marker: TrustMarker) -> Rule {
        Rule::aik_certificate_trusted(self.cacerts.trust_anchors()).with_markers([marker])
    }

    fn vmm_measurement_rules(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<TrustPolicy, Error> {
        let mut rules = TrustPolicy::new();

        rules.extend(self.reader.constant_pcr_rules_for_vmm(vmm, host)?);

        // hosts that don't measure their modules into PCR 19 would always
        // fail the event log rules
        if vmm.requires_pcr(MODULE_PCR) {
            rules.extend(self.reader.event_log_rules_for_vmm(vmm, host)?);
        } else {
            debug!(
                "host {} does not require PCR {}, skipping module rules",
                host.name, MODULE_PCR
            );
        }

        Ok(rules)
    }
}

impl<P: IBaselineRuleProvider, T: ITrustAnchorStore> VendorTrustPolicyFactory
    for IntelHostTrustPolicyFactory<P, T>
{
    fn rules_for_bios(&self, bios: &Bios, host: &HostDescriptor) -> Result<TrustPolicy, Error> {
        let mut rules = TrustPolicy::new();

        rules.insert(self.aik_certificate_rule(TrustMarker::Bios));
        rules.extend(self.reader.constant_pcr_rules_for_bios(bios, host)?);

        Ok(rules)
    }

    fn rules_for_vmm(&self, vmm: &Vmm, host: &HostDescriptor) -> Result<TrustPolicy, Error> {
        let mut rules = self.vmm_measurement_rules(vmm, host)?;

        rules.insert(self.aik_certificate_rule(TrustMarker::Vmm));

        Ok(rules)
    }

    // tboot does not measure location into PCR 22
    fn rules_for_location(
        &self,
        _location: &str,
        host: &HostDescriptor,
    ) -> Result<TrustPolicy, Error> {
        Err(Error::Unsupported(format!(
            "location policy is not supported for host {} (vendor {})",
            host.name, host.vendor
        )))
    }

    fn comparison_rules_for_vmm(
        &self,
        vmm: &Vmm,
        host: &HostDescriptor,
    ) -> Result<TrustPolicy, Error> {
        self.vmm_measurement_rules(vmm, host)
    }
}

/// The full policy of a host: BIOS and hypervisor rules, plus location
/// rules when the host declares a location
pub fn host_policy(
    factory: &dyn VendorTrustPolicyFactory,
    host: &HostDescriptor,
) -> Result<TrustPolicy, Error> {
    let mut rules = factory.rules_for_bios(&host.bios, host)?;

    rules.extend(factory.rules_for_vmm(&host.vmm, host)?);

    if let Some(location) = &host.location {
        rules.extend(factory.rules_for_location(location, host)?);
    }

    Ok(rules)
}
