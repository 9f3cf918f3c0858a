// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::evidence::HostEvidence;
use super::report::TrustReport;
use super::rule::Rule;
use std::collections::hash_set;
use std::collections::HashSet;

/// The set of rules a host must satisfy.  Adding a rule that is already in
/// the policy is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrustPolicy {
    rules: HashSet<Rule>,
}

impl TrustPolicy {
    pub fn new() -> Self {
        Self {
            rules: HashSet::new(),
        }
    }

    /// Returns false if an equal rule was already present
    pub fn insert(&mut self, rule: Rule) -> bool {
        self.rules.insert(rule)
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Evaluate every rule against the evidence
    pub fn appraise(&self, evidence: &HostEvidence) -> TrustReport {
        TrustReport::appraise(self.rules.iter(), evidence)
    }
}

impl Extend<Rule> for TrustPolicy {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter)
    }
}

impl FromIterator<Rule> for TrustPolicy {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TrustPolicy {
    type Item = Rule;
    type IntoIter = hash_set::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a TrustPolicy {
    type Item = &'a Rule;
    type IntoIter = hash_set::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
