// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// The layer of the host a rule vouches for.  Markers only group rules and
/// their faults in the [`TrustReport`](super::TrustReport).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrustMarker {
    Bios,
    Vmm,
    Location,
}

impl TrustMarker {
    pub fn name(&self) -> &'static str {
        match self {
            TrustMarker::Bios => "BIOS",
            TrustMarker::Vmm => "VMM",
            TrustMarker::Location => "LOCATION",
        }
    }
}

impl std::fmt::Display for TrustMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
