//! Pareto front extraction over (speedup, energy) objectives.
//!
//! The front maximizes speedup and minimizes normalized energy. Dominance
//! uses a mixed strict/non-strict comparison: equal speedup with strictly
//! lower energy dominates, strictly higher speedup with equal energy
//! dominates, and a point that ties on both objectives dominates nothing.

/// One (speedup, normalized energy) objective sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectivePoint {
    /// Baseline time divided by this configuration's time.
    pub speedup: f64,

    /// This configuration's energy divided by the baseline energy.
    pub energy: f64,
}

/// A straight segment between two (speedup, energy) coordinates.
pub type Segment = ((f64, f64), (f64, f64));

impl ObjectivePoint {
    /// Creates a new `ObjectivePoint`.
    pub fn new(speedup: f64, energy: f64) -> ObjectivePoint {
        ObjectivePoint {
            speedup: speedup,
            energy: energy,
        }
    }

    /// Whether this point dominates `other`: at least as fast and strictly
    /// cheaper, or strictly faster and at least as cheap. Ties on both
    /// objectives are not domination.
    ///
    /// Non-positive speedup or energy values make this comparison
    /// meaningless; the loader rejects non-finite fields, and measured times
    /// and energies are positive.
    pub fn dominates(&self, other: &ObjectivePoint) -> bool {
        (self.speedup >= other.speedup && self.energy < other.energy)
            || (self.speedup > other.speedup && self.energy <= other.energy)
    }
}

/// Returns the indices of the non-dominated points, sorted ascending by
/// speedup for front drawing. Empty input yields an empty front.
///
/// Every candidate is checked against every other point; inputs are a few
/// dozen configurations per kernel, so the quadratic scan is fine.
pub fn pareto_front(points: &[ObjectivePoint]) -> Vec<usize> {
    let mut front = (0..points.len())
        .filter(|&i| !points.iter().any(|p| p.dominates(&points[i])))
        .collect::<Vec<usize>>();

    front.sort_by(|&a, &b| {
        points[a]
            .speedup
            .partial_cmp(&points[b].speedup)
            .expect("non-finite speedup")
    });
    front
}

/// Axis-aligned segments connecting consecutive points of a speedup-sorted
/// front: from each point, a vertical step at its speedup to the next point's
/// energy, then a horizontal step to the next point's speedup. Fronts over a
/// maximized and a minimized objective are drawn as staircases, never as
/// diagonals.
pub fn staircase(front: &[ObjectivePoint]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for pair in front.windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        segments.push(((cur.speedup, cur.energy), (cur.speedup, next.energy)));
        segments.push(((cur.speedup, next.energy), (next.speedup, next.energy)));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<ObjectivePoint> {
        raw.iter().map(|&(s, e)| ObjectivePoint::new(s, e)).collect()
    }

    #[test]
    fn dominance_boundary_cases() {
        let p = ObjectivePoint::new(2.0, 1.0);

        // equal speedup, strictly lower energy
        assert!(p.dominates(&ObjectivePoint::new(2.0, 1.5)));
        assert!(!ObjectivePoint::new(2.0, 1.5).dominates(&p));

        // strictly higher speedup, equal energy
        assert!(p.dominates(&ObjectivePoint::new(1.5, 1.0)));
        assert!(!ObjectivePoint::new(1.5, 1.0).dominates(&p));

        // ties on both objectives are not domination
        assert!(!p.dominates(&ObjectivePoint::new(2.0, 1.0)));

        // strictly better in both
        assert!(p.dominates(&ObjectivePoint::new(1.5, 1.5)));
    }

    #[test]
    fn front_of_three_points() {
        let input = points(&[(1.0, 1.0), (2.0, 1.5), (1.5, 0.5)]);
        let front = pareto_front(&input);
        // (1.0, 1.0) is dominated by (1.5, 0.5); the survivors come back
        // sorted ascending by speedup
        assert_eq!(front, vec![2, 1]);
    }

    #[test]
    fn front_members_never_dominate_each_other() {
        let input = points(&[
            (1.0, 1.0),
            (1.1, 0.9),
            (1.2, 1.6),
            (0.8, 0.4),
            (1.4, 1.1),
            (1.1, 0.9),
            (2.0, 2.0),
        ]);
        let front = pareto_front(&input);
        for &a in &front {
            for &b in &front {
                assert!(!input[a].dominates(&input[b]), "{} dominates {}", a, b);
            }
        }
    }

    #[test]
    fn front_set_is_independent_of_input_order() {
        let original = points(&[(1.0, 1.0), (2.0, 1.5), (1.5, 0.5), (0.9, 0.45), (1.5, 2.0)]);
        let reversed = original.iter().rev().cloned().collect::<Vec<_>>();

        let front = |ps: &[ObjectivePoint]| {
            let mut set = pareto_front(ps)
                .into_iter()
                .map(|i| (ps[i].speedup, ps[i].energy))
                .collect::<Vec<_>>();
            set.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
            set
        };

        assert_eq!(front(&original), front(&reversed));
    }

    #[test]
    fn empty_input_yields_empty_front() {
        assert!(pareto_front(&[]).is_empty());
        assert!(staircase(&[]).is_empty());
    }

    #[test]
    fn staircase_steps_between_consecutive_points() {
        let front = points(&[(1.5, 0.5), (2.0, 1.5)]);
        let segments = staircase(&front);
        assert_eq!(
            segments,
            vec![
                ((1.5, 0.5), (1.5, 1.5)),
                ((1.5, 1.5), (2.0, 1.5)),
            ]
        );
    }
}
