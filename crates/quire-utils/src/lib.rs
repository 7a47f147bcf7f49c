//! Small helpers shared by the quire crates: a NaN-free float, a stable
//! hash and a couple of slice adapters.

#[macro_use]
mod macros;
mod scalar;

pub use self::scalar::Scalar;

use std::hash::Hash;

use siphasher::sip128::{Hasher128, SipHasher13};

/// A 128-bit SipHash-1-3 of a value, stable across runs.
pub fn hash128<T: Hash + ?Sized>(value: &T) -> u128 {
    let mut hasher = SipHasher13::new();
    value.hash(&mut hasher);
    hasher.finish128().as_u128()
}

/// Slice adapters missing from the standard library.
pub trait SliceExt<T> {
    /// Drop the leading elements for which `pred` holds.
    fn trim_start_matches<F>(&self, pred: F) -> &[T]
    where
        F: FnMut(&T) -> bool;

    /// Drop the trailing elements for which `pred` holds.
    fn trim_end_matches<F>(&self, pred: F) -> &[T]
    where
        F: FnMut(&T) -> bool;

    /// Iterate over maximal runs of neighbours that map to the same key.
    fn group_by_key<K, F>(&self, key: F) -> GroupByKey<'_, T, F>
    where
        F: FnMut(&T) -> K,
        K: PartialEq;
}

impl<T> SliceExt<T> for [T] {
    fn trim_start_matches<F>(&self, mut pred: F) -> &[T]
    where
        F: FnMut(&T) -> bool,
    {
        let start = self.iter().position(|item| !pred(item)).unwrap_or(self.len());
        &self[start..]
    }

    fn trim_end_matches<F>(&self, mut pred: F) -> &[T]
    where
        F: FnMut(&T) -> bool,
    {
        let end = self.iter().rposition(|item| !pred(item)).map_or(0, |i| i + 1);
        &self[..end]
    }

    fn group_by_key<K, F>(&self, key: F) -> GroupByKey<'_, T, F> {
        GroupByKey { rest: self, key }
    }
}

/// Iterator returned by [`SliceExt::group_by_key`].
pub struct GroupByKey<'a, T, F> {
    rest: &'a [T],
    key: F,
}

impl<'a, T, K, F> Iterator for GroupByKey<'a, T, F>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = (K, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let (first, tail) = self.rest.split_first()?;
        let key = (self.key)(first);
        let len = 1 + tail.iter().take_while(|item| (self.key)(item) == key).count();
        let (group, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some((key, group))
    }
}
