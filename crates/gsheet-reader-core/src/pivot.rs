//! Lazy row/column transposition
//!
//! [`transpose`] turns a sequence of sequences inside out: the `n`th output
//! item collects the `n`th element of every input sequence. Output stops as
//! soon as any input runs out, so ragged input is truncated to its shortest
//! member rather than padded.
//!
//! ```rust
//! use gsheet_reader_core::pivot::transpose;
//!
//! let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
//! let columns: Vec<Vec<i32>> = transpose(rows).collect();
//! assert_eq!(columns, vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
//! ```

use std::iter::FusedIterator;

/// Iterator returned by [`transpose`]
///
/// Holds one iterator per input sequence and pulls a single element from each
/// per step. Every source iterator is dropped as soon as one of them is
/// exhausted.
#[derive(Debug)]
pub struct Transpose<I> {
    sources: Vec<I>,
}

/// Transpose a sequence of sequences, bounded by the shortest one
///
/// An empty outer sequence yields nothing.
pub fn transpose<O>(source: O) -> Transpose<<O::Item as IntoIterator>::IntoIter>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    Transpose {
        sources: source.into_iter().map(IntoIterator::into_iter).collect(),
    }
}

impl<I: Iterator> Iterator for Transpose<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sources.is_empty() {
            return None;
        }

        let mut slice = Vec::with_capacity(self.sources.len());
        for source in &mut self.sources {
            match source.next() {
                Some(item) => slice.push(item),
                None => {
                    self.sources = Vec::new();
                    return None;
                }
            }
        }
        Some(slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.sources.is_empty() {
            return (0, Some(0));
        }
        self.sources
            .iter()
            .map(Iterator::size_hint)
            .fold((usize::MAX, None::<usize>), |(lo, hi), (l, h)| {
                let hi = match (hi, h) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                (lo.min(l), hi)
            })
    }
}

impl<I: Iterator> FusedIterator for Transpose<I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_transpose_rectangular() {
        let rows = vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]];
        let columns: Vec<_> = transpose(rows).collect();
        assert_eq!(columns, vec![vec!["a", "c", "e"], vec!["b", "d", "f"]]);
    }

    #[test]
    fn test_transpose_ragged_truncates_to_shortest() {
        let rows = vec![vec![1, 2, 3], vec![1, 2, 3, 4, 5], vec![1, 2]];
        let columns: Vec<_> = transpose(rows).collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns, vec![vec![1, 1, 1], vec![2, 2, 2]]);
    }

    #[test]
    fn test_transpose_empty_outer() {
        let rows: Vec<Vec<u8>> = Vec::new();
        assert_eq!(transpose(rows).count(), 0);
    }

    #[test]
    fn test_transpose_with_empty_member() {
        let rows = vec![vec![1, 2], vec![]];
        assert_eq!(transpose(rows).count(), 0);
    }

    #[test]
    fn test_transpose_is_fused() {
        let mut iter = transpose(vec![vec![1], vec![2]]);
        assert_eq!(iter.next(), Some(vec![1, 2]));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_size_hint_uses_shortest() {
        let iter = transpose(vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(iter.size_hint(), (1, Some(1)));
    }

    #[test]
    fn test_transpose_pulls_lazily() {
        let pulled = Rc::new(Cell::new(0usize));
        let counting = |n: usize| {
            let pulled = Rc::clone(&pulled);
            (0..n).map(move |x| {
                pulled.set(pulled.get() + 1);
                x
            })
        };

        let mut iter = transpose(vec![counting(10), counting(10)]);
        iter.next();
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_sources_released_on_exhaustion() {
        let witness = Rc::new(());
        let tracked: Vec<_> = vec![vec![1], vec![2, 3]]
            .into_iter()
            .map(|v| {
                let w = Rc::clone(&witness);
                v.into_iter().map(move |x| {
                    let _w = &w;
                    x
                })
            })
            .collect();

        let mut iter = transpose(tracked);
        assert_eq!(Rc::strong_count(&witness), 3);
        assert_eq!(iter.next(), Some(vec![1, 2]));
        assert_eq!(iter.next(), None);
        assert_eq!(Rc::strong_count(&witness), 1);
    }

    proptest! {
        #[test]
        fn prop_double_transpose_is_identity(
            width in 1usize..8,
            cells in proptest::collection::vec(any::<i32>(), 1..64),
        ) {
            let height = cells.len() / width;
            prop_assume!(height > 0);
            let grid: Vec<Vec<i32>> = cells
                .chunks(width)
                .take(height)
                .map(<[i32]>::to_vec)
                .collect();

            let back: Vec<Vec<i32>> = transpose(transpose(grid.clone())).collect();
            prop_assert_eq!(back, grid);
        }

        #[test]
        fn prop_output_len_is_shortest_row(
            rows in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..10),
                1..10,
            ),
        ) {
            let shortest = rows.iter().map(Vec::len).min().unwrap_or(0);
            prop_assert_eq!(transpose(rows).count(), shortest);
        }
    }
}
