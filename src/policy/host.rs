// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::StringWithSeparator;

/// The BIOS measured launch environment a host is registered with
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Bios {
    pub name: String,
    pub version: String,
    pub oem: String,
}

/// The hypervisor measured launch environment a host is registered with
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Vmm {
    pub name: String,

    pub version: String,

    #[serde(rename = "os-name")]
    pub os_name: String,

    #[serde(rename = "os-version")]
    pub os_version: String,

    /// PCR indices this hypervisor is expected to report, e.g. "0,17,18,19"
    #[serde(rename = "required-manifest-list", default)]
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    pub required_manifest_list: Vec<String>,
}

impl Vmm {
    /// Whether `index` appears in the required manifest list
    pub fn requires_pcr(&self, index: u8) -> bool {
        let index = index.to_string();

        self.required_manifest_list
            .iter()
            .any(|pcr| pcr.trim() == index)
    }
}

/// Descriptor of a registered host
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostDescriptor {
    pub name: String,

    #[serde(default)]
    pub uuid: Option<String>,

    /// Selects the vendor trust policy factory
    pub vendor: String,

    pub bios: Bios,

    pub vmm: Vmm,

    #[serde(default)]
    pub location: Option<String>,
}

impl HostDescriptor {
    pub fn load_json(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))
    }
}
