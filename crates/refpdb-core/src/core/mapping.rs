use super::references::{ReferenceError, ReferenceId};

/// Ordered association of reference identifiers to the raw text fetched for them.
///
/// Entries keep their insertion order, which for a fetch run is the order of the static
/// identifier list. Each identifier can appear at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: Vec<(ReferenceId, String)>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Duplicate`] if `id` is already present; the map is left
    /// unchanged in that case.
    pub fn insert(&mut self, id: ReferenceId, text: impl Into<String>) -> Result<(), ReferenceError> {
        if self.contains(id) {
            return Err(ReferenceError::Duplicate(id));
        }
        self.entries.push((id, text.into()));
        Ok(())
    }

    pub fn contains(&self, id: ReferenceId) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == id)
    }

    pub fn get(&self, id: ReferenceId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReferenceId, &str)> {
        self.entries.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn ids(&self) -> impl Iterator<Item = ReferenceId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Total size of all stored texts in bytes.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|(_, text)| text.len()).sum()
    }

    /// Checks that every identifier in `expected` has an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Incomplete`] listing the missing identifiers in the
    /// order they appear in `expected`.
    pub fn ensure_complete(&self, expected: &[ReferenceId]) -> Result<(), ReferenceError> {
        let missing: Vec<ReferenceId> = expected
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReferenceError::Incomplete { missing })
        }
    }
}
