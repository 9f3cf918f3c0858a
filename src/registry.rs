// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Selection of the trust policy factory matching a host's vendor.

use crate::policy::{Error, HostDescriptor, VendorTrustPolicyFactory};
use log::debug;
use std::collections::HashMap;

/// Vendor trust policy factories, indexed by vendor id.  Vendor ids are
/// matched case-insensitively.
#[derive(Default)]
pub struct VendorRegistry {
    factories: HashMap<String, Box<dyn VendorTrustPolicyFactory>>,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` for `vendor`, replacing any previous registration.
    /// Returns the replaced factory, if any.
    pub fn register(
        &mut self,
        vendor: &str,
        factory: Box<dyn VendorTrustPolicyFactory>,
    ) -> Option<Box<dyn VendorTrustPolicyFactory>> {
        debug!("registering trust policy factory for vendor {vendor}");

        self.factories.insert(vendor.to_lowercase(), factory)
    }

    pub fn lookup(&self, vendor: &str) -> Result<&dyn VendorTrustPolicyFactory, Error> {
        self.factories
            .get(&vendor.to_lowercase())
            .map(|f| f.as_ref())
            .ok_or_else(|| Error::UnknownVendor(vendor.to_string()))
    }

    /// The factory for the vendor of `host`
    pub fn for_host(&self, host: &HostDescriptor) -> Result<&dyn VendorTrustPolicyFactory, Error> {
        self.lookup(&host.vendor)
    }

    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for VendorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
