// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::trustanchor::TrustAnchorSet;
use std::sync::Arc;

/// Interface to the store where the trusted AIK certificate authorities are
/// stashed.
pub trait ITrustAnchorStore: Send + Sync {
    /// Return the current set of trust anchors.  The returned set is shared
    /// and must not change for the lifetime of the store.
    fn trust_anchors(&self) -> Arc<TrustAnchorSet>;
}

/// A fixed, already populated set
impl ITrustAnchorStore for Arc<TrustAnchorSet> {
    fn trust_anchors(&self) -> Arc<TrustAnchorSet> {
        Arc::clone(self)
    }
}
