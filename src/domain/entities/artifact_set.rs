//! Artifact Set Entity
//!
//! Type → ordered-unique members. Iteration is lexicographic by type, then by
//! member, so anything serialized from a set is deterministic regardless of
//! insertion order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ArtifactRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactSet {
    types: BTreeMap<String, BTreeSet<String>>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a reference. Returns `false` if it was already present.
    pub fn insert(&mut self, artifact: ArtifactRef) -> bool {
        self.insert_member(artifact.type_name(), artifact.member())
    }

    pub fn insert_member(&mut self, type_name: &str, member: &str) -> bool {
        self.types
            .entry(type_name.to_string())
            .or_default()
            .insert(member.to_string())
    }

    pub fn contains(&self, artifact: &ArtifactRef) -> bool {
        self.types
            .get(artifact.type_name())
            .is_some_and(|members| members.contains(artifact.member()))
    }

    /// Number of `(type, member)` pairs
    pub fn len(&self) -> usize {
        self.types.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.values().all(BTreeSet::is_empty)
    }

    /// Number of distinct types
    pub fn type_count(&self) -> usize {
        self.types.values().filter(|m| !m.is_empty()).count()
    }

    /// Types with their sorted members, sorted by type name
    pub fn types(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.types
            .iter()
            .filter(|(_, members)| !members.is_empty())
            .map(|(name, members)| (name.as_str(), members))
    }

    /// All pairs in serialization order
    pub fn iter(&self) -> impl Iterator<Item = ArtifactRef> + '_ {
        self.types()
            .flat_map(|(t, members)| members.iter().map(move |m| ArtifactRef::new(t, m)))
    }

    /// A fresh set containing everything in `self` and `additions`.
    pub fn union<'a>(&self, additions: impl IntoIterator<Item = &'a ArtifactRef>) -> Self {
        let mut next = self.clone();
        for artifact in additions {
            next.insert(artifact.clone());
        }
        next
    }

    pub fn is_superset_of(&self, other: &ArtifactSet) -> bool {
        other.iter().all(|artifact| self.contains(&artifact))
    }
}

impl FromIterator<ArtifactRef> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = ArtifactRef>>(iter: I) -> Self {
        let mut set = Self::new();
        for artifact in iter {
            set.insert(artifact);
        }
        set
    }
}

impl Extend<ArtifactRef> for ArtifactSet {
    fn extend<I: IntoIterator<Item = ArtifactRef>>(&mut self, iter: I) {
        for artifact in iter {
            self.insert(artifact);
        }
    }
}
