// src/selector.rs

use rand::Rng;

use crate::config::SelectionPolicy;
use crate::error::{ChaosError, Result};

/// The two most recent picks. `None` means nothing has been picked yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub last: Option<usize>,
    pub second_last: Option<usize>,
}

impl SelectionState {
    fn push(&mut self, index: usize) {
        self.second_last = self.last;
        self.last = Some(index);
    }

    /// The index picked twice in a row, if the last two picks matched.
    fn repeated(&self) -> Option<usize> {
        match (self.last, self.second_last) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }
}

/// Chooses the vertex each chaos step jumps toward.
///
/// Indices `0..degree` are the polygon corners in order; index `degree`, when
/// present, is the centroid. Adjacency only ever refers to the corners.
#[derive(Clone, Debug)]
pub struct VertexSelector {
    policy: SelectionPolicy,
    degree: usize,
    vertex_count: usize,
    state: SelectionState,
}

impl VertexSelector {
    /// `vertex_count` is `degree` or `degree + 1` with a centroid.
    pub fn new(policy: SelectionPolicy, degree: usize, vertex_count: usize) -> Result<Self> {
        if degree == 0 || vertex_count < degree || vertex_count > degree + 1 {
            return Err(ChaosError::InvalidConfig(format!(
                "{vertex_count} vertices cannot belong to a polygon of degree {degree}"
            )));
        }
        if policy == SelectionPolicy::NoImmediateRepeat && vertex_count < 2 {
            return Err(ChaosError::InvalidConfig(
                "avoiding immediate repeats needs at least 2 vertices".to_string(),
            ));
        }
        if policy == SelectionPolicy::NoNeighborOnRepeat && degree < 4 {
            return Err(ChaosError::InvalidConfig(format!(
                "neighbor avoidance needs a polygon degree of at least 4, got {degree}"
            )));
        }
        Ok(Self {
            policy,
            degree,
            vertex_count,
            state: SelectionState::default(),
        })
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let index = match self.policy {
            SelectionPolicy::Unconstrained => rng.gen_range(0..self.vertex_count),
            SelectionPolicy::NoImmediateRepeat => self.next_without_repeat(rng),
            SelectionPolicy::NoNeighborOnRepeat => self.next_avoiding_neighbors(rng),
        };
        self.state.push(index);
        index
    }

    fn next_without_repeat<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        loop {
            let candidate = rng.gen_range(0..self.vertex_count);
            if Some(candidate) != self.state.last {
                return candidate;
            }
        }
    }

    fn next_avoiding_neighbors<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.state.repeated() {
            Some(repeated) if repeated < self.degree => {
                // skip the repeated corner and both of its neighbours
                let offset = rng.gen_range(0..=self.degree - 4);
                (offset + repeated + 2) % self.degree
            }
            // the centroid has no neighbours; exclude only itself
            Some(_) => rng.gen_range(0..self.degree),
            None => rng.gen_range(0..self.vertex_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_adjacent_or_equal(a: usize, b: usize, degree: usize) -> bool {
        a == b || (a + 1) % degree == b || (b + 1) % degree == a
    }

    #[test]
    fn unconstrained_stays_in_range_and_repeats() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut selector = VertexSelector::new(SelectionPolicy::Unconstrained, 3, 4).unwrap();
        let picks: Vec<usize> = (0..2000).map(|_| selector.next(&mut rng)).collect();
        assert!(picks.iter().all(|&i| i < 4));
        assert!(picks.windows(2).any(|w| w[0] == w[1]));
        assert!(picks.contains(&3));
    }

    #[test]
    fn no_immediate_repeat_never_picks_twice_in_a_row() {
        for (degree, count) in [(3, 3), (3, 4), (5, 5), (8, 9)] {
            let mut rng = StdRng::seed_from_u64(degree as u64 * 31 + count as u64);
            let mut selector = VertexSelector::new(SelectionPolicy::NoImmediateRepeat, degree, count).unwrap();
            let picks: Vec<usize> = (0..5000).map(|_| selector.next(&mut rng)).collect();
            assert!(picks.windows(2).all(|w| w[0] != w[1]));
            assert!(picks.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn no_neighbor_after_repeat() {
        for degree in 4..10 {
            let mut rng = StdRng::seed_from_u64(degree as u64);
            let mut selector = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, degree, degree).unwrap();
            let picks: Vec<usize> = (0..20_000).map(|_| selector.next(&mut rng)).collect();
            let mut repeats_seen = 0;
            for w in picks.windows(3) {
                if w[0] == w[1] {
                    repeats_seen += 1;
                    assert!(
                        !is_adjacent_or_equal(w[2], w[1], degree),
                        "degree {degree}: {} repeated, then {}",
                        w[1],
                        w[2]
                    );
                }
            }
            assert!(repeats_seen > 0, "degree {degree} never repeated");
        }
    }

    #[test]
    fn square_after_repeat_only_allows_the_opposite_corner() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut selector = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, 4, 4).unwrap();
        let mut checked = 0;
        for _ in 0..10_000 {
            let repeated = selector.state().repeated();
            let pick = selector.next(&mut rng);
            if let Some(r) = repeated {
                assert_eq!(pick, (r + 2) % 4);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn centroid_only_reachable_outside_the_repeat_branch() {
        let degree = 6;
        let mut rng = StdRng::seed_from_u64(7);
        let mut selector = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, degree, degree + 1).unwrap();
        let mut centroid_picks = 0;
        for _ in 0..20_000 {
            let repeated = selector.state().repeated();
            let pick = selector.next(&mut rng);
            assert!(pick <= degree);
            if pick == degree {
                centroid_picks += 1;
            }
            match repeated {
                Some(r) if r < degree => {
                    assert!(pick < degree);
                    assert!(!is_adjacent_or_equal(pick, r, degree));
                }
                Some(_) => assert!(pick < degree),
                None => {}
            }
        }
        assert!(centroid_picks > 0);
    }

    #[test]
    fn state_shifts_and_resets() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut selector = VertexSelector::new(SelectionPolicy::Unconstrained, 5, 5).unwrap();
        assert_eq!(selector.state(), SelectionState::default());
        let first = selector.next(&mut rng);
        let second = selector.next(&mut rng);
        assert_eq!(selector.state(), SelectionState { last: Some(second), second_last: Some(first) });
        selector.reset();
        assert_eq!(selector.state(), SelectionState::default());
    }

    #[test]
    fn rejects_unsatisfiable_preconditions() {
        let triangle = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, 3, 3);
        assert!(matches!(triangle, Err(ChaosError::InvalidConfig(_))));
        let triangle_with_centroid = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, 3, 4);
        assert!(triangle_with_centroid.is_err());
        let single = VertexSelector::new(SelectionPolicy::NoImmediateRepeat, 1, 1);
        assert!(single.is_err());
        let mismatched = VertexSelector::new(SelectionPolicy::Unconstrained, 5, 7);
        assert!(mismatched.is_err());
        assert!(VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, 4, 5).is_ok());
    }

    #[test]
    fn same_seed_same_sequence() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(1234);
            let mut selector = VertexSelector::new(SelectionPolicy::NoNeighborOnRepeat, 7, 7).unwrap();
            (0..500).map(|_| selector.next(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
