// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::cacerts::CertificateAuthorityLoader;
use super::trustanchor::TrustAnchorSet;
use super::ITrustAnchorStore;
use std::sync::{Arc, OnceLock};

/// Trust anchor store populated from the configured certificate sources on
/// first access.  The loaded set is final: it is never reloaded, not even
/// when it came out empty.
#[derive(Debug)]
pub struct LazyTrustAnchorStore {
    loader: CertificateAuthorityLoader,
    anchors: OnceLock<Arc<TrustAnchorSet>>,
}

impl LazyTrustAnchorStore {
    pub fn new(loader: CertificateAuthorityLoader) -> Self {
        Self {
            loader,
            anchors: OnceLock::new(),
        }
    }

    /// Whether the certificate sources have been read already
    pub fn is_loaded(&self) -> bool {
        self.anchors.get().is_some()
    }
}

impl ITrustAnchorStore for LazyTrustAnchorStore {
    fn trust_anchors(&self) -> Arc<TrustAnchorSet> {
        // concurrent first callers block until the single load completes
        Arc::clone(self.anchors.get_or_init(|| Arc::new(self.loader.load())))
    }
}
