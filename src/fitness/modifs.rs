//! Modification ledger produced by moves.

use crate::representation::Attribute;

/// One ledger entry: the value of `index` before and after a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modif<T> {
    pub index: usize,
    pub before: T,
    pub after: T,
}

/// Records which attributes a move changed, in insertion order.
///
/// Each index appears at most once. Editing the same index repeatedly keeps
/// the first recorded `before` and the latest `after`, so a ledger always
/// describes the net change from the source solution to the neighbor. This
/// is what makes incremental fitness formulas sound.
///
/// An empty ledger carries no information about the change; evaluators
/// treat it as a request for a full recomputation.
///
/// # Examples
///
/// ```
/// use u_metabench::fitness::Modifs;
///
/// let mut m = Modifs::new();
/// m.add_modif(2, 'a' as u8, 'b' as u8);
/// m.add_modif(2, 'b' as u8, 'c' as u8);
/// assert_eq!(m.get(2), Some(('a' as u8, 'c' as u8)));
/// assert_eq!(m.get(0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Modifs<T> {
    entries: Vec<Modif<T>>,
}

impl<T> Default for Modifs<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Attribute> Modifs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Records that `index` went from `before` to `after`.
    ///
    /// If `index` was already recorded, only its after-value is replaced.
    pub fn add_modif(&mut self, index: usize, before: T, after: T) {
        match self.entries.iter_mut().find(|m| m.index == index) {
            Some(entry) => entry.after = after,
            None => self.entries.push(Modif {
                index,
                before,
                after,
            }),
        }
    }

    /// `(before, after)` recorded for `index`, if any.
    pub fn get(&self, index: usize) -> Option<(T, T)> {
        self.entries
            .iter()
            .find(|m| m.index == index)
            .map(|m| (m.before, m.after))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.iter().any(|m| m.index == index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Modif<T>> {
        self.entries.iter()
    }

    /// Touched indices in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|m| m.index)
    }

    /// Writes every after-value into `values`.
    ///
    /// # Panics
    /// Panics if an entry's index is out of range for `values`.
    pub fn replay(&self, values: &mut [T]) {
        for m in &self.entries {
            values[m.index] = m.after;
        }
    }

    /// Order-independent identity of the ledger content.
    ///
    /// Two ledgers have equal keys iff they record the same before/after
    /// pairs on the same indices.
    pub fn content_key(&self) -> Vec<(usize, u64, u64)> {
        let mut key: Vec<(usize, u64, u64)> = self
            .entries
            .iter()
            .map(|m| (m.index, m.before.ledger_key(), m.after.ledger_key()))
            .collect();
        key.sort_unstable();
        key
    }
}

impl<T: Attribute> PartialEq for Modifs<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.content_key() == other.content_key()
    }
}

impl<'a, T> IntoIterator for &'a Modifs<T> {
    type Item = &'a Modif<T>;
    type IntoIter = std::slice::Iter<'a, Modif<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
