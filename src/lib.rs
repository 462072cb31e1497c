//! Lazy lookahead buffering and sorted merging for all iterators.
//!
//! [`Lookahead`] wraps any iterator to allow peeking at, prepending to and
//! indexing into the upcoming items without consuming them. [`Collate`]
//! merges any number of individually sorted iterators into a single sorted
//! one, touching only the head of each input at a time.
//!
//! ```
//! use collate_iter::{CollateOrdExtension, IteratorLookaheadExt};
//!
//! let mut tokens = "a b c".split(' ').lookahead();
//! assert_eq!(tokens.peek(), Some(&"a"));
//! assert_eq!(tokens.next(), Some("a"));
//!
//! let merged: Vec<_> = vec![vec![1, 4, 7], vec![2, 5], vec![3, 6, 8]]
//!     .collate()
//!     .collect();
//! assert_eq!(merged, vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! ```

pub mod collate;
pub mod extension_trait;
pub mod lookahead;
pub mod orderer;

pub use collate::Collate;
pub use extension_trait::{CollateByExtension, CollateOrdExtension, IteratorLookaheadExt};
pub use lookahead::{Lookahead, SliceBounds, SliceError};
pub use orderer::{FuncOrderer, KeyOrderer, OrdOrderer, Orderer};

#[cfg(test)]
mod tests {
    use crate::{CollateOrdExtension, IteratorLookaheadExt};

    #[test]
    fn integration() {
        let sequence = [
            2, 82, 29, 86, 100, 67, 44, 19, 25, 10, 84, 47, 65, 42, 11, 24, 53, 92, 69, 49, 70, 36,
            8, 48, 16, 91, 62, 58, 55, 18, 27, 79, 76, 40, 22, 95, 99, 28, 17, 7, 59, 30, 97, 80,
            34, 33, 54, 45, 31, 52, 56, 1, 57, 38, 61, 6, 23, 94, 85, 51, 35, 68, 41, 15, 90, 14,
            74, 75, 32, 73, 83, 64, 77, 89, 4, 72, 71, 21, 63, 5, 39, 12, 20, 3, 43, 88, 26, 78,
            93, 60, 50, 13, 37, 87, 46, 96, 66, 98, 81, 9,
        ];

        // split the sequence into sorted runs, then collate them back together
        let mut runs: Vec<Vec<i32>> = Vec::new();
        for chunk in sequence.chunks(7) {
            let mut run = chunk.to_vec();
            run.sort();
            runs.push(run);
        }

        let mut merged = runs.collate().lookahead();

        fn is_sorted(mut source: impl Iterator<Item = impl Ord>) -> Option<bool> {
            let mut prev = source.next()?;
            for next in source {
                if next < prev {
                    return Some(false);
                }
                prev = next;
            }

            Some(true)
        }

        assert_eq!(merged.peek(), Some(&1));
        assert!(is_sorted(merged).unwrap_or(true));
    }
}
