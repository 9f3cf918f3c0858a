// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use openssl::hash::MessageDigest;

/// The PCR into which the hypervisor measures its loaded modules
pub const MODULE_PCR: u8 = 19;

/// Highest PCR index on a TPM 1.2 / 2.0 PC client platform
pub const MAX_PCR: u8 = 23;

pub fn is_valid_pcr_index(index: u8) -> bool {
    index <= MAX_PCR
}

/// SHA-1, SHA-256, SHA-384 and SHA-512 PCR banks
pub fn is_valid_digest(value: &[u8]) -> bool {
    matches!(value.len(), 20 | 32 | 48 | 64)
}

/// The bank hash algorithm implied by the size of a PCR value
pub fn digest_for_len(len: usize) -> Option<MessageDigest> {
    match len {
        20 => Some(MessageDigest::sha1()),
        32 => Some(MessageDigest::sha256()),
        48 => Some(MessageDigest::sha384()),
        64 => Some(MessageDigest::sha512()),
        _ => None,
    }
}
