// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// An event log entry: the digest a component was measured into a PCR with,
/// labelled with the component name (e.g., a module file name)
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Measurement {
    pub label: String,

    #[serde_as(as = "serde_with::hex::Hex")]
    pub value: Vec<u8>,
}

impl Measurement {
    pub fn new(label: &str, value: &[u8]) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_vec(),
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.label, hex::encode(&self.value))
    }
}

/// The expected or reported value of one PCR
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct PcrValue {
    pub index: u8,

    #[serde_as(as = "serde_with::hex::Hex")]
    pub value: Vec<u8>,
}

impl PcrValue {
    pub fn new(index: u8, value: &[u8]) -> Self {
        Self {
            index,
            value: value.to_vec(),
        }
    }
}
