use std::collections::HashMap;
use std::hash::Hash;

/// A sequence partitioned by key.
///
/// Groups are kept in the order their key was first seen, and values within a
/// group keep their input order until explicitly sorted. Both orders matter:
/// the first drives the tie-break of every ranked table, the second the
/// chronology of a contract's returns.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries<K, V> {
    groups: Vec<(K, Vec<V>)>,
}

impl<K, V> GroupedSeries<K, V> {
    /// Iterates over `(key, values)` in first-seen key order.
    pub fn groups(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    /// Stable-sorts the values of every group by `f`.
    pub fn sort_groups_by_key<T, F>(&mut self, mut f: F)
    where
        T: Ord,
        F: FnMut(&V) -> T,
    {
        for (_, values) in &mut self.groups {
            values.sort_by_key(&mut f);
        }
    }

    /// Replaces every group's values, stopping at the first error.
    pub fn try_map_groups<W, E, F>(self, mut f: F) -> Result<GroupedSeries<K, W>, E>
    where
        F: FnMut(&K, Vec<V>) -> Result<Vec<W>, E>,
    {
        let groups = self
            .groups
            .into_iter()
            .map(|(key, values)| {
                let mapped = f(&key, values)?;
                Ok((key, mapped))
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(GroupedSeries { groups })
    }
}

impl<K: PartialEq, V> GroupedSeries<K, V> {
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for GroupedSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<V>)> = Vec::new();
        for (key, value) in iter {
            match index.get(&key) {
                Some(&slot) => groups[slot].1.push(value),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![value]));
                }
            }
        }
        Self { groups }
    }
}
