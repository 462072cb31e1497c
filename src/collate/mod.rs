use crate::{lookahead::Lookahead, orderer::Orderer};

/// A sorted merge of several individually sorted sources.
///
/// Each source is wrapped in a [`Lookahead`] and only ever inspected at its
/// head, so the merge holds at most one pending item per source no matter how
/// long the sources are. The next item is picked by a linear scan over the
/// cached heads; with the handful of sources a merge typically combines this
/// beats maintaining a heap.
///
/// Sources must already be sorted in the requested direction. This is not
/// validated; with unsorted sources the output order is unspecified.
///
/// When several heads compare equal, the source that was passed in first
/// wins. Equal items therefore come out grouped by source order.
///
/// invariant:
/// every source in the active set has its head cached whenever a winner
/// is picked.
pub struct Collate<I, O>
where
    I: Iterator,
{
    sources: Vec<Lookahead<I>>,
    orderer: O,
    descending: bool,
}

impl<I, O> Collate<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    /// Constructs a merge of the given inputs under the provided ordering
    /// instruction. Inputs that are exhausted from the start are discarded
    /// right away.
    pub fn new<S>(inputs: S, orderer: O) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
    {
        let mut sources: Vec<_> = inputs.into_iter().map(Lookahead::new).collect();
        sources.retain_mut(Lookahead::has_next);

        Self {
            sources,
            orderer,
            descending: false,
        }
    }

    /// Switches the merge to descending order: the largest head wins each
    /// round. The sources must each be sorted in descending order as well.
    /// Useful for fluent-style api usage.
    pub fn descending(self) -> Self {
        Self {
            descending: true,
            ..self
        }
    }

    /// the number of sources that still have items left.
    pub fn active_sources(&self) -> usize {
        self.sources.len()
    }
}

impl<I, O> Iterator for Collate<I, O>
where
    I: Iterator,
    O: Orderer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        // refill every head, dropping sources that report exhaustion.
        // a dropped source is never revisited.
        self.sources.retain_mut(Lookahead::has_next);

        let (first, rest) = self.sources.split_first()?;
        let mut best_index = 0;
        let mut best_head = first.head()?;

        for (offset, source) in rest.iter().enumerate() {
            let head = source.head()?;
            let ordering = self.orderer.compare(head, best_head);
            let wins = if self.descending {
                ordering.is_gt()
            } else {
                ordering.is_lt()
            };
            // strictly better only: on a tie the earlier source keeps the win
            if wins {
                best_index = offset + 1;
                best_head = head;
            }
        }

        self.sources[best_index].next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sources.iter().fold((0, Some(0)), |(low, high), source| {
            let (source_low, source_high) = source.size_hint();
            (
                low.saturating_add(source_low),
                high.zip(source_high).map(|(a, b)| a.saturating_add(b)),
            )
        })
    }
}
