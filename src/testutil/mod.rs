// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

mod certs;

pub use self::certs::{issue_aik, make_ca};

use crate::policy::{Bios, HostDescriptor, Vmm};
use crate::store::TrustAnchorSet;
use openssl::x509::X509;
use std::sync::Arc;

pub fn anchors(certs: &[&X509]) -> Arc<TrustAnchorSet> {
    let mut s = TrustAnchorSet::new();
    for c in certs {
        s.insert((*c).clone()).unwrap();
    }
    Arc::new(s)
}

/// A host matching the baselines used across the unit tests
pub fn host() -> HostDescriptor {
    HostDescriptor {
        name: "host-01".to_string(),
        uuid: Some("1a2b3c4d-0000-0000-0000-000000000001".to_string()),
        vendor: "intel".to_string(),
        bios: Bios {
            name: "Intel_BIOS".to_string(),
            version: "S5500.86B".to_string(),
            oem: "Intel Corporation".to_string(),
        },
        vmm: Vmm {
            name: "Intel_Xen".to_string(),
            version: "4.1.2".to_string(),
            os_name: "RHEL".to_string(),
            os_version: "6.4".to_string(),
            required_manifest_list: vec!["0".to_string(), "17".to_string(), "18".to_string()],
        },
        location: None,
    }
}
