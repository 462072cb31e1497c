use std::cmp::Ordering;

use crate::{
    collate::Collate,
    lookahead::Lookahead,
    orderer::{FuncOrderer, KeyOrderer, OrdOrderer},
};

/// Lookahead entry point for all iterators.
pub trait IteratorLookaheadExt: Iterator {
    /// Wraps the iterator in a [`Lookahead`] buffer, enabling peeking,
    /// prepending and random access into the upcoming items.
    fn lookahead(self) -> Lookahead<Self>
    where
        Self: Sized,
    {
        Lookahead::new(self)
    }
}

impl<I> IteratorLookaheadExt for I where I: Iterator {}

/// Collation entry point for collections of iterables whose items carry
/// their own ordering.
pub trait CollateOrdExtension: IntoIterator + Sized
where
    Self::Item: IntoIterator,
{
    /// Merges the inputs into a single sorted iterator using the native
    /// ordering on the item type. Every input must already be sorted
    /// ascending.
    fn collate(self) -> Collate<<Self::Item as IntoIterator>::IntoIter, OrdOrderer>;
}

impl<S, T> CollateOrdExtension for S
where
    S: IntoIterator,
    S::Item: IntoIterator<Item = T>,
    T: Ord,
{
    fn collate(self) -> Collate<<Self::Item as IntoIterator>::IntoIter, OrdOrderer> {
        Collate::new(self, OrdOrderer::new())
    }
}

/// Collation entry points for custom orderings.
pub trait CollateByExtension: IntoIterator + Sized
where
    Self::Item: IntoIterator,
{
    /// Merges the inputs into a single sorted iterator using a custom
    /// comparator function. Every input must already be sorted by the same
    /// comparator.
    fn collate_by<F>(
        self,
        comparator: F,
    ) -> Collate<<Self::Item as IntoIterator>::IntoIter, FuncOrderer<F>>
    where
        F: Fn(
            &<Self::Item as IntoIterator>::Item,
            &<Self::Item as IntoIterator>::Item,
        ) -> Ordering;

    /// Merges the inputs into a single sorted iterator using a key
    /// extraction function. Every input must already be sorted by that key.
    fn collate_by_key<F, K>(
        self,
        key_extractor: F,
    ) -> Collate<<Self::Item as IntoIterator>::IntoIter, KeyOrderer<F>>
    where
        F: Fn(&<Self::Item as IntoIterator>::Item) -> K,
        K: Ord;
}

impl<S> CollateByExtension for S
where
    S: IntoIterator,
    S::Item: IntoIterator,
{
    fn collate_by<F>(
        self,
        comparator: F,
    ) -> Collate<<Self::Item as IntoIterator>::IntoIter, FuncOrderer<F>>
    where
        F: Fn(
            &<Self::Item as IntoIterator>::Item,
            &<Self::Item as IntoIterator>::Item,
        ) -> Ordering,
    {
        Collate::new(self, FuncOrderer::new(comparator))
    }

    fn collate_by_key<F, K>(
        self,
        key_extractor: F,
    ) -> Collate<<Self::Item as IntoIterator>::IntoIter, KeyOrderer<F>>
    where
        F: Fn(&<Self::Item as IntoIterator>::Item) -> K,
        K: Ord,
    {
        Collate::new(self, KeyOrderer::new(key_extractor))
    }
}
