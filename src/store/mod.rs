// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Stores backing the policy engine: the trusted AIK certificate authorities
//! and the known-good measurement baselines from which PCR rules are derived.

pub use self::baseline::{Baselines, BiosBaseline, VmmBaseline};
pub use self::cacerts::{
    CertificateAuthorityLoader, CertificateSource, SourceFormat, PRIVACY_CA_BUNDLE,
    PRIVACY_CA_CERTIFICATE,
};
pub use self::errors::Error;
pub use self::ibaselineprovider::IBaselineRuleProvider;
pub use self::itrustanchorstore::ITrustAnchorStore;
pub use self::lazy_trustanchorstore::LazyTrustAnchorStore;
pub use self::memo_baselinestore::MemoBaselineStore;
pub use self::trustanchor::{Fingerprint, TrustAnchorSet};

mod baseline;
mod cacerts;
mod errors;
mod ibaselineprovider;
mod itrustanchorstore;
mod lazy_trustanchorstore;
mod memo_baselinestore;
mod trustanchor;
