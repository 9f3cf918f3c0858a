// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use crate::store;

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error("Unknown vendor: {0}")]
    UnknownVendor(String),
    #[error("Store error: {0}")]
    Store(#[from] store::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e) | Error::Unsupported(e) | Error::UnknownVendor(e) => {
                write!(f, "{}", e)
            }
            Error::Store(e) => write!(f, "{:?}", e),
        }
    }
}
