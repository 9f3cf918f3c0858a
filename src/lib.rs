// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Host trust policy engine.
//!
//! This crate decides whether a measured host can be trusted at its BIOS,
//! hypervisor (VMM) and location layers.  For each host a vendor-specific
//! factory assembles a policy, i.e., a set of rules derived from the host's
//! known-good baselines and from the trusted Privacy CA certificates.  The
//! policy is then evaluated against the evidence reported by the host.
//!
//! The API allows:
//! * Loading the trusted AIK certificate authorities from PEM and DER sources
//! * Loading BIOS and hypervisor baselines from JSON
//! * Assembling the trust policy of a host
//! * Appraising host evidence and summarising the outcome per trust layer

pub mod config;
pub mod policy;
pub mod registry;
pub mod store;

#[cfg(test)]
mod testutil;
