use std::cmp::Ordering;

/// The comparison strategy used to pick the next head during a collation.
///
/// A generalisation of [`Ord`]: the orderer is passed by reference and may
/// carry state of its own (a key extraction closure, for instance), while
/// the compared type needs no ordering of its own.
pub trait Orderer<T> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// An orderer that delegates to the `Ord` implementation of the type itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdOrderer {}

impl OrdOrderer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<T: Ord> Orderer<T> for OrdOrderer {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// An orderer that compares values by a key extracted from them.
#[derive(Debug, Clone)]
pub struct KeyOrderer<F> {
    key_extractor: F,
}

impl<F> KeyOrderer<F> {
    pub fn new<T, K>(key_extractor: F) -> Self
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Self { key_extractor }
    }
}

impl<F, T, K> Orderer<T> for KeyOrderer<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        let left = (self.key_extractor)(left);
        let right = (self.key_extractor)(right);
        left.cmp(&right)
    }
}

/// An orderer that delegates to a comparison function.
#[derive(Debug, Clone)]
pub struct FuncOrderer<F> {
    comparator: F,
}

impl<F> FuncOrderer<F> {
    pub fn new<T>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        Self { comparator }
    }
}

impl<F, T> Orderer<T> for FuncOrderer<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.comparator)(left, right)
    }
}
