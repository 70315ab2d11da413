//! Exact distance tables over products of two coordinates.

use log::{debug, warn};
use std::time::Instant;

use crate::working;

/// Entry of a table under construction that has not been reached yet.
const UNKNOWN: u8 = u8::MAX;

/// For every index of a coordinate product, the exact number of moves needed
/// to bring it to index zero. Looking up a projection of a cube state gives a
/// lower bound on the distance of the full state.
#[derive(Debug, Clone)]
pub struct PruningTable {
    distances: Box<[u8]>,
}

impl PruningTable {
    /// Build the table by breadth first search from index zero. `moves` is
    /// the number of available moves and `transition(index, m)` the index
    /// reached from `index` by move `m`, or `None` if the move is not allowed.
    ///
    /// Every index must be reachable from zero. Indices that are not keep
    /// the distance `u8::MAX`.
    pub fn generate(
        len: usize,
        moves: usize,
        transition: impl Fn(usize, usize) -> Option<usize>,
    ) -> Self {
        let start = Instant::now();
        let mut distances = vec![UNKNOWN; len].into_boxed_slice();
        distances[0] = 0;
        let mut done = 1;
        let mut depth = 0;
        while done < len {
            let mut found = 0;
            for index in 0..len {
                if distances[index] != depth {
                    continue;
                }
                for m in 0..moves {
                    let Some(next) = transition(index, m) else {
                        continue;
                    };
                    if distances[next] == UNKNOWN {
                        distances[next] = depth + 1;
                        found += 1;
                    }
                }
            }
            debug_assert!(found > 0, "indices unreachable past depth {depth}");
            if found == 0 {
                warn!("{} indices are unreachable past depth {depth}", len - done);
                break;
            }
            done += found;
            depth += 1;
            debug!(working!("Depth {} has {} entries"), depth, found);
        }
        debug!(
            working!("Generated {} entries in {:.3}s"),
            len,
            start.elapsed().as_secs_f64()
        );
        Self { distances }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        self.distances[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    #[must_use]
    pub fn max_distance(&self) -> u8 {
        self.distances.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Neighbours on a ring of `n` nodes with jumps of 1, 3 and 7 in both
    /// directions.
    fn ring(n: usize, index: usize, m: usize) -> Option<usize> {
        let jump = [1, 3, 7][m / 2];
        Some(if m % 2 == 0 {
            (index + jump) % n
        } else {
            (index + n - jump) % n
        })
    }

    fn bfs(n: usize) -> Vec<u8> {
        let mut dist = vec![UNKNOWN; n];
        dist[0] = 0;
        let mut queue = VecDeque::from([0]);
        while let Some(i) = queue.pop_front() {
            for m in 0..6 {
                let j = ring(n, i, m).unwrap();
                if dist[j] == UNKNOWN {
                    dist[j] = dist[i] + 1;
                    queue.push_back(j);
                }
            }
        }
        dist
    }

    #[test_log::test]
    fn test_matches_breadth_first_search() {
        let n = 1000;
        let table = PruningTable::generate(n, 6, |i, m| ring(n, i, m));
        let expected = bfs(n);
        for (i, &d) in expected.iter().enumerate() {
            assert_eq!(table.get(i), d);
        }
        assert_eq!(table.len(), n);
    }

    #[test]
    fn test_lower_bound_is_admissible() {
        // Moving along any edge changes the distance by at most one, which is
        // what makes the table usable as an IDA* heuristic.
        let n = 777;
        let table = PruningTable::generate(n, 6, |i, m| ring(n, i, m));
        for i in 0..n {
            for m in 0..6 {
                let j = ring(n, i, m).unwrap();
                assert!(table.get(i).abs_diff(table.get(j)) <= 1);
            }
        }
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "unreachable"))]
    fn test_unreachable_indices_stop_generation() {
        // Two disjoint rings of five
        let table = PruningTable::generate(10, 2, |i, m| {
            let step = if m == 0 { 1 } else { 4 };
            Some(i / 5 * 5 + (i % 5 + step) % 5)
        });
        assert_eq!(table.get(2), 2);
        assert_eq!(table.get(7), UNKNOWN);
    }

    #[test]
    fn test_disallowed_moves_are_skipped() {
        // Only forward steps of one: a path graph
        let table = PruningTable::generate(10, 2, |i, m| (m == 0).then_some((i + 1) % 10));
        assert_eq!(table.get(9), 9);
        assert_eq!(table.max_distance(), 9);
    }
}
