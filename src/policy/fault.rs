// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultKind {
    AikCertificateMissing,
    AikCertificateInvalid,
    AikCertificateNotTrusted,
    PcrValueMissing,
    PcrValueMismatch,
    PcrEventLogMissing,
    PcrEventLogMissingExpectedEntries,
    PcrEventLogInvalid,
}

impl FaultKind {
    pub fn name(&self) -> &'static str {
        match self {
            FaultKind::AikCertificateMissing => "aik-certificate-missing",
            FaultKind::AikCertificateInvalid => "aik-certificate-invalid",
            FaultKind::AikCertificateNotTrusted => "aik-certificate-not-trusted",
            FaultKind::PcrValueMissing => "pcr-value-missing",
            FaultKind::PcrValueMismatch => "pcr-value-mismatch",
            FaultKind::PcrEventLogMissing => "pcr-event-log-missing",
            FaultKind::PcrEventLogMissingExpectedEntries => {
                "pcr-event-log-missing-expected-entries"
            }
            FaultKind::PcrEventLogInvalid => "pcr-event-log-invalid",
        }
    }

    /// Faults raised against the host's attestation identity rather than
    /// against its measurements
    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            FaultKind::AikCertificateMissing
                | FaultKind::AikCertificateInvalid
                | FaultKind::AikCertificateNotTrusted
        )
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One way in which the evidence failed to satisfy a rule
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fault {
    pub kind: FaultKind,
    pub detail: String,
}

impl Fault {
    pub fn new(kind: FaultKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}
