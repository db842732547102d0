//! Random pick among candidate restaurants.

use chrono::NaiveTime;
use rand::seq::SliceRandom;
use rand::Rng;

use super::geo::Coordinate;

/// Parameters of a nearby pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub origin: Coordinate,
    pub radius_km: f64,
    pub limit: usize,
    pub day_of_week: Option<i32>,
    pub current_time: Option<NaiveTime>,
}

impl NearbyQuery {
    pub fn new(origin: Coordinate, radius_km: f64, limit: usize) -> Self {
        Self {
            origin,
            radius_km,
            limit,
            day_of_week: None,
            current_time: None,
        }
    }

    pub fn open_at(mut self, day_of_week: Option<i32>, current_time: Option<NaiveTime>) -> Self {
        self.day_of_week = day_of_week;
        self.current_time = current_time;
        self
    }

    /// The opening-hours filter applies only when both day and time are given.
    pub fn open_filter(&self) -> Option<(i32, NaiveTime)> {
        self.day_of_week.zip(self.current_time)
    }
}

/// Pick `min(limit, candidates.len())` items uniformly at random without
/// replacement. The returned order is random as well.
pub fn sample<T, R>(mut candidates: Vec<T>, limit: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    candidates.shuffle(rng);
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_open_filter_needs_both_parts() {
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let query = NearbyQuery::new(Coordinate::new(24.9, 121.2), 1.0, 1);

        assert_eq!(query.open_filter(), None);
        assert_eq!(query.open_at(Some(3), None).open_filter(), None);
        assert_eq!(query.open_at(None, Some(time)).open_filter(), None);
        assert_eq!(query.open_at(Some(3), Some(time)).open_filter(), Some((3, time)));
    }

    #[test]
    fn test_caps_at_candidate_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = sample(vec![1, 2, 3], 10, &mut rng);

        assert_eq!(picked.len(), 3);
        let unique: HashSet<_> = picked.into_iter().collect();
        assert_eq!(unique, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked: Vec<i32> = sample(Vec::new(), 5, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sample(vec![1, 2, 3], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_picks_without_replacement() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates: Vec<i32> = (0..50).collect();

        let picked = sample(candidates, 10, &mut rng);

        assert_eq!(picked.len(), 10);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(picked.iter().all(|n| (0..50).contains(n)));
    }

    #[test]
    fn test_every_candidate_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            seen.extend(sample(vec!['a', 'b', 'c', 'd'], 1, &mut rng));
        }

        assert_eq!(seen.len(), 4);
    }
}
