use std::{collections::VecDeque, iter::Fuse};

use thiserror::Error;

/// The error produced by [`Lookahead::slice`] when the requested
/// bounds are not a valid slice description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SliceError {
    /// A slice must make progress in one direction or the other.
    #[error("slice step must not be zero")]
    ZeroStep,
}

/// A python-style slice description over the upcoming items of a
/// [`Lookahead`].
///
/// All three fields are optional. A missing `start`/`stop` means "from the
/// front" / "to the end" for a forward step, and "from the back" / "past the
/// front" for a backward one. Negative values count from the end of the
/// sequence. The step defaults to one.
///
/// ```
/// use collate_iter::SliceBounds;
///
/// // items 1, 3 and 5 of the sequence
/// let odd = SliceBounds::range(1, 6).step(2);
/// // the whole sequence, back to front
/// let reversed = SliceBounds::default().step(-1);
/// # let _ = (odd, reversed);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceBounds {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl SliceBounds {
    /// Creates bounds covering `start..stop` with the default step of one.
    pub fn range(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// Creates bounds covering everything from `start` onwards.
    pub fn starting_at(start: isize) -> Self {
        Self {
            start: Some(start),
            stop: None,
            step: None,
        }
    }

    /// Creates bounds covering everything before `stop`.
    pub fn up_to(stop: isize) -> Self {
        Self {
            start: None,
            stop: Some(stop),
            step: None,
        }
    }

    /// Updates the step attribute.
    /// Useful for fluent-style api usage.
    pub fn step(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }
}

/// An iterator wrapper allowing lookahead, prepending and random access
/// into the upcoming items without consuming them.
///
/// [`peek`](Lookahead::peek) returns a reference to the item the next call to
/// `next` will yield, pulling at most one item from the source into an
/// internal cache:
///
/// ```
/// use collate_iter::Lookahead;
///
/// let mut items = Lookahead::new([1, 2]);
/// assert_eq!(items.peek(), Some(&1));
/// assert_eq!(items.next(), Some(1));
/// ```
///
/// [`prepend`](Lookahead::prepend) splices items in front of whatever the
/// source still has to offer, and works even on an exhausted wrapper:
///
/// ```
/// use collate_iter::Lookahead;
///
/// let mut items = Lookahead::new([1, 2, 3]);
/// items.prepend([10, 11]);
/// assert_eq!(items.next(), Some(10));
/// assert_eq!(items.peek(), Some(&11));
/// assert_eq!(items.collect::<Vec<_>>(), vec![11, 1, 2, 3]);
/// ```
///
/// The cache is a genuine queue: items pulled from the source are appended at
/// the back, consumption pops the front, prepending pushes the front. Every
/// source item is pulled at most once and handed out exactly once, in order.
///
/// Items are never inspected or transformed on the way through. A fallible
/// source following the `Iterator<Item = Result<T, E>>` convention has its
/// `Err` items handed out like any other item, unchanged.
pub struct Lookahead<I>
where
    I: Iterator,
{
    /// the wrapped source. Fused, so that a source which has reported
    /// exhaustion once stays exhausted even after a prepend resurrection
    /// briefly makes the wrapper yield items again.
    source: Fuse<I>,
    /// already pulled but not yet consumed items, in production order.
    cache: VecDeque<I::Item>,
}

impl<I> Lookahead<I>
where
    I: Iterator,
{
    /// Wraps the provided iterable.
    pub fn new(iterable: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: iterable.into_iter().fuse(),
            cache: VecDeque::new(),
        }
    }

    /// Returns a reference to the item the next call to `next` will yield,
    /// without advancing. `None` means the sequence is exhausted at the
    /// current position.
    ///
    /// Pulls at most one item from the source; repeated peeks are free and
    /// always agree with each other and with the following `next`.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.cache.is_empty() {
            let item = self.source.next()?;
            self.cache.push_back(item);
        }
        self.cache.front()
    }

    /// Like [`peek`](Lookahead::peek), but falls back to `default` when the
    /// sequence is exhausted.
    ///
    /// The default is never cached: a later plain `peek` on an exhausted
    /// wrapper still reports exhaustion rather than echoing a stale default.
    pub fn peek_or<'a>(&'a mut self, default: &'a I::Item) -> &'a I::Item {
        match self.peek() {
            Some(head) => head,
            None => default,
        }
    }

    /// Returns true if another item is available, that is, if a `peek`
    /// would return `Some`.
    pub fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    /// Splices `items` in front of the remaining sequence, preserving their
    /// order: the first item passed is the next one handed out.
    ///
    /// Prepending to an exhausted wrapper resurrects it for exactly the
    /// prepended items, after which it reports exhaustion again.
    pub fn prepend<It>(&mut self, items: It)
    where
        It: IntoIterator<Item = I::Item>,
        It::IntoIter: DoubleEndedIterator,
    {
        for item in items.into_iter().rev() {
            self.cache.push_front(item);
        }
    }

    /// Random access into the upcoming items, without consuming anything.
    /// `get(0)` is the item `next` would yield, `get(1)` the one after, and
    /// so on. Out of range yields `None`.
    ///
    /// A non-negative index pulls and caches just enough of the source to
    /// reach it. A negative index counts from the final item and therefore
    /// drains the entire source into the cache, which is unbounded work and
    /// memory for huge or infinite sources.
    pub fn get(&mut self, index: isize) -> Option<&I::Item> {
        let index = if index < 0 {
            self.cache.extend(&mut self.source);
            let adjusted = self.cache.len() as isize + index;
            usize::try_from(adjusted).ok()?
        } else {
            let index = index as usize;
            while self.cache.len() <= index {
                let item = self.source.next()?;
                self.cache.push_back(item);
            }
            index
        };
        self.cache.get(index)
    }

    /// Copies out the sub-sequence of upcoming items described by `bounds`,
    /// without consuming anything.
    ///
    /// Caches exactly as far as the most extreme requested index demands.
    /// Any negative bound, a missing stop on a forward step, or a backward
    /// step all require knowing where the sequence ends and therefore drain
    /// the entire source into the cache, with the same unbounded-cost caveat
    /// as negative [`get`](Lookahead::get) indices.
    ///
    /// # Errors
    /// Fails with [`SliceError::ZeroStep`] when the step is zero.
    pub fn slice(&mut self, bounds: SliceBounds) -> Result<Vec<I::Item>, SliceError>
    where
        I::Item: Clone,
    {
        let step = bounds.step.unwrap_or(1);
        if step == 0 {
            return Err(SliceError::ZeroStep);
        }

        // defaults that cover the whole sequence in the travel direction
        let (start, stop) = if step > 0 {
            (bounds.start.unwrap_or(0), bounds.stop.unwrap_or(isize::MAX))
        } else {
            (bounds.start.unwrap_or(-1), bounds.stop.unwrap_or(isize::MIN))
        };

        if start < 0 || stop < 0 {
            // counting from the back requires the full sequence
            self.cache.extend(&mut self.source);
        } else {
            let needed = start.max(stop).saturating_add(1) as usize;
            while self.cache.len() < needed {
                match self.source.next() {
                    Some(item) => self.cache.push_back(item),
                    None => break,
                }
            }
        }

        let len = self.cache.len() as isize;
        let clamp = |index: isize| {
            if index < 0 {
                let floor = if step < 0 { -1 } else { 0 };
                index.saturating_add(len).max(floor)
            } else if index >= len {
                if step < 0 {
                    len - 1
                } else {
                    len
                }
            } else {
                index
            }
        };

        let stop = clamp(stop);
        let mut index = clamp(start);
        let mut result = Vec::new();
        while if step > 0 { index < stop } else { index > stop } {
            result.push(self.cache[index as usize].clone());
            index += step;
        }

        Ok(result)
    }

    /// the cached head, if any. Does not pull from the source.
    pub(crate) fn head(&self) -> Option<&I::Item> {
        self.cache.front()
    }
}

impl<I> Iterator for Lookahead<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.cache.pop_front().or_else(|| self.source.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = self.source.size_hint();
        let cached = self.cache.len();
        (
            low.saturating_add(cached),
            high.and_then(|h| h.checked_add(cached)),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drains_in_source_order() {
        let data = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let wrapped = Lookahead::new(data.clone());
        assert_eq!(data, wrapped.collect::<Vec<_>>());
    }

    #[test]
    fn peek_is_idempotent() {
        let mut items = Lookahead::new(vec![7, 8]);
        assert_eq!(items.peek(), Some(&7));
        assert_eq!(items.peek(), Some(&7));
        assert_eq!(items.next(), Some(7));
        assert_eq!(items.peek(), Some(&8));
        assert_eq!(items.next(), Some(8));
        assert_eq!(items.peek(), None);
        assert_eq!(items.next(), None);
    }

    #[test]
    fn peek_pulls_at_most_one() {
        let mut pulled = 0;
        let source = (0..10).inspect(|_| pulled += 1);
        let mut items = Lookahead::new(source);
        items.peek();
        items.peek();
        drop(items);
        assert_eq!(1, pulled);
    }

    #[test]
    fn peek_or_does_not_cache_the_default() {
        let mut items: Lookahead<std::vec::IntoIter<i32>> = Lookahead::new(vec![]);
        assert_eq!(items.peek_or(&42), &42);
        // the default must not linger
        assert_eq!(items.peek(), None);
        assert_eq!(items.next(), None);

        let mut items = Lookahead::new(vec![1]);
        assert_eq!(items.peek_or(&42), &1);
        assert_eq!(items.next(), Some(1));
        assert_eq!(items.peek_or(&42), &42);
    }

    #[test]
    fn prepend_goes_first_in_order() {
        let mut items = Lookahead::new(vec![1, 2, 3]);
        items.prepend([10, 11, 12]);
        assert_eq!(items.next(), Some(10));
        assert_eq!(items.peek(), Some(&11));
        assert_eq!(items.collect::<Vec<_>>(), vec![11, 12, 1, 2, 3]);
    }

    #[test]
    fn prepend_resurrects_an_exhausted_wrapper() {
        let mut items: Lookahead<std::vec::IntoIter<i32>> = Lookahead::new(vec![]);
        assert_eq!(items.next(), None);
        items.prepend([1]);
        assert_eq!(items.next(), Some(1));
        assert_eq!(items.next(), None);
        assert!(!items.has_next());
    }

    #[test]
    fn has_next_tracks_peek() {
        let mut items = Lookahead::new(vec![1]);
        assert!(items.has_next());
        items.next();
        assert!(!items.has_next());
    }

    #[test]
    fn get_caches_without_consuming() {
        let mut items = Lookahead::new(vec!['a', 'b', 'c', 'd']);
        assert_eq!(items.get(0), Some(&'a'));
        assert_eq!(items.get(2), Some(&'c'));
        assert_eq!(items.get(2), Some(&'c'));
        assert_eq!(items.get(4), None);
        // position unchanged by all of the above
        assert_eq!(items.next(), Some('a'));
        assert_eq!(items.get(0), Some(&'b'));
    }

    #[test]
    fn get_from_the_back() {
        let mut items = Lookahead::new(vec![1, 2, 3]);
        assert_eq!(items.get(-1), Some(&3));
        assert_eq!(items.get(-3), Some(&1));
        assert_eq!(items.get(-4), None);
        assert_eq!(items.collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn slice_forward() {
        let mut items = Lookahead::new(0..8);
        assert_eq!(items.slice(SliceBounds::range(1, 4)), Ok(vec![1, 2, 3]));
        assert_eq!(
            items.slice(SliceBounds::range(0, 8).step(3)),
            Ok(vec![0, 3, 6])
        );
        // out of range bounds clamp instead of failing
        assert_eq!(
            items.slice(SliceBounds::range(5, 100)),
            Ok(vec![5, 6, 7])
        );
        assert_eq!(items.next(), Some(0));
    }

    #[test]
    fn slice_unbounded_and_from_the_back() {
        let mut items = Lookahead::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(items.slice(SliceBounds::starting_at(2)), Ok(vec![3, 4, 5]));
        assert_eq!(items.slice(SliceBounds::up_to(-2)), Ok(vec![1, 2, 3]));
        assert_eq!(items.slice(SliceBounds::starting_at(-2)), Ok(vec![4, 5]));
        assert_eq!(items.collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn slice_backward() {
        let mut items = Lookahead::new(vec![1, 2, 3, 4]);
        assert_eq!(
            items.slice(SliceBounds::default().step(-1)),
            Ok(vec![4, 3, 2, 1])
        );
        assert_eq!(
            items.slice(SliceBounds::starting_at(2).step(-1)),
            Ok(vec![3, 2, 1])
        );
        assert_eq!(
            items.slice(SliceBounds::default().step(-2)),
            Ok(vec![4, 2])
        );
    }

    #[test]
    fn slice_of_empty_sequence() {
        let mut items: Lookahead<std::vec::IntoIter<i32>> = Lookahead::new(vec![]);
        assert_eq!(items.slice(SliceBounds::default()), Ok(vec![]));
        assert_eq!(items.slice(SliceBounds::default().step(-1)), Ok(vec![]));
    }

    #[test]
    fn slice_rejects_zero_step() {
        let mut items = Lookahead::new(vec![1, 2, 3]);
        assert_eq!(
            items.slice(SliceBounds::default().step(0)),
            Err(SliceError::ZeroStep)
        );
        // the failed call must not have consumed anything
        assert_eq!(items.next(), Some(1));
    }

    #[test]
    fn source_errors_pass_through_unchanged() {
        let source: Vec<Result<u32, String>> =
            vec![Ok(1), Err("upstream broke".to_string()), Ok(2)];
        let mut items = Lookahead::new(source.clone());
        assert_eq!(items.peek(), Some(&Ok(1)));
        assert_eq!(source, items.collect::<Vec<_>>());
    }

    #[test]
    fn size_hint_accounts_for_the_cache() {
        let mut items = Lookahead::new(vec![1, 2, 3]);
        assert_eq!(items.size_hint(), (3, Some(3)));
        items.peek();
        assert_eq!(items.size_hint(), (3, Some(3)));
        items.prepend([0]);
        assert_eq!(items.size_hint(), (4, Some(4)));
        items.next();
        assert_eq!(items.size_hint(), (3, Some(3)));
    }
}
