// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[path = "../../src/testutil/certs.rs"]
mod certs;

pub use self::certs::{issue_aik, make_ca, TestCa};

pub const BASELINES: &str = r#"{
    "bios": [
        {
            "name": "Intel_BIOS",
            "version": "S5500.86B",
            "oem": "Intel Corporation",
            "pcrs": [
                { "index": 0, "value": "3a3f780f11a4b49969fcaa80cd6e3957c33b2275" }
            ]
        }
    ],
    "vmm": [
        {
            "name": "Intel_Xen",
            "version": "4.1.2",
            "os-name": "RHEL",
            "os-version": "6.4",
            "pcrs": [
                { "index": 17, "value": "1717171717171717171717171717171717171717" },
                { "index": 18, "value": "1818181818181818181818181818181818181818" }
            ],
            "modules": [
                { "label": "xen.gz", "value": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
                { "label": "vmlinuz", "value": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb" }
            ]
        }
    ]
}"#;

pub const HOST: &str = r#"{
    "name": "host-01",
    "uuid": "1a2b3c4d-0000-0000-0000-000000000001",
    "vendor": "intel",
    "bios": { "name": "Intel_BIOS", "version": "S5500.86B", "oem": "Intel Corporation" },
    "vmm": {
        "name": "Intel_Xen",
        "version": "4.1.2",
        "os-name": "RHEL",
        "os-version": "6.4",
        "required-manifest-list": "0,17,18,19"
    }
}"#;
