// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use crate::policy::common::{is_valid_digest, is_valid_pcr_index};
use crate::policy::{Measurement, PcrValue};
use serde::{Deserialize, Serialize};

/// A known-good BIOS measured launch environment: the values its PCRs take
/// on a trusted boot.  There may be multiple records for the same BIOS, the
/// policy requires all of their PCR values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BiosBaseline {
    pub name: String,

    pub version: String,

    pub oem: String,

    pub pcrs: Vec<PcrValue>,
}

/// A known-good hypervisor measured launch environment.  Besides constant
/// PCR values, it lists the modules the hypervisor is expected to measure
/// into the module PCR.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VmmBaseline {
    pub name: String,

    pub version: String,

    #[serde(rename = "os-name")]
    pub os_name: String,

    #[serde(rename = "os-version")]
    pub os_version: String,

    pub pcrs: Vec<PcrValue>,

    #[serde(default)]
    pub modules: Vec<Measurement>,
}

/// JSON format for BIOS and hypervisor baselines
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Baselines {
    pub bios: Option<Vec<BiosBaseline>>,
    pub vmm: Option<Vec<VmmBaseline>>,
}

impl Baselines {
    /// Parse and validate baselines from JSON
    pub fn parse(j: &str) -> Result<Self, Error> {
        let v: Baselines = serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        for b in v.bios.iter().flatten() {
            validate_pcrs(&b.name, &b.pcrs)?;
        }

        for b in v.vmm.iter().flatten() {
            validate_pcrs(&b.name, &b.pcrs)?;

            for m in b.modules.iter() {
                if !is_valid_digest(&m.value) {
                    return Err(Error::Sema(format!(
                        "{}: module {} has a {}-byte digest",
                        b.name,
                        m.label,
                        m.value.len()
                    )));
                }
            }
        }

        Ok(v)
    }
}

fn validate_pcrs(name: &str, pcrs: &[PcrValue]) -> Result<(), Error> {
    for p in pcrs.iter() {
        if !is_valid_pcr_index(p.index) {
            return Err(Error::Sema(format!("{name}: PCR index {} out of range", p.index)));
        }

        if !is_valid_digest(&p.value) {
            return Err(Error::Sema(format!(
                "{name}: PCR {} has a {}-byte value",
                p.index,
                p.value.len()
            )));
        }
    }

    Ok(())
}
