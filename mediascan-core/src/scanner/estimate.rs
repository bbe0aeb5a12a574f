//! Progress estimation without knowing the size of the tree up front.
//!
//! The walk never learns how many files remain, so interim progress is a
//! heuristic: files seen so far against three times the length of the listing
//! currently being walked, with a floor of 100. Interim values are capped at
//! [`INTERIM_CAP`] and held at their high-water mark so they never go back.

/// Highest percentage reported before the traversal has finished
pub(crate) const INTERIM_CAP: u8 = 95;

const MIN_DENOMINATOR: u64 = 100;

#[derive(Debug, Default)]
pub(crate) struct ProgressEstimator {
    last: u8,
}

impl ProgressEstimator {
    /// Raw estimate for `files` counted while walking a listing of
    /// `listing_len` entries.
    pub(crate) fn estimate(files: u64, listing_len: usize) -> u8 {
        let denominator = (listing_len as u64).saturating_mul(3).max(MIN_DENOMINATOR);
        let percent = files.saturating_mul(100) / denominator;
        percent.min(INTERIM_CAP as u64) as u8
    }

    pub(crate) fn interim(&mut self, files: u64, listing_len: usize) -> u8 {
        self.last = self.last.max(Self::estimate(files, listing_len));
        self.last
    }

    pub(crate) fn complete(&mut self) -> u8 {
        self.last = 100;
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_small_listings_use_floor() {
        // listing of 5 entries -> denominator max(15, 100) = 100
        assert_eq!(ProgressEstimator::estimate(10, 5), 10);
        assert_eq!(ProgressEstimator::estimate(50, 5), 50);
        assert_eq!(ProgressEstimator::estimate(0, 0), 0);
    }

    #[test]
    fn test_estimate_large_listing() {
        // 1000 entries -> denominator 3000
        assert_eq!(ProgressEstimator::estimate(30, 1000), 1);
        assert_eq!(ProgressEstimator::estimate(1500, 1000), 50);
        assert_eq!(ProgressEstimator::estimate(2999, 1000), 95);
    }

    #[test]
    fn test_estimate_is_capped() {
        assert_eq!(ProgressEstimator::estimate(100, 10), INTERIM_CAP);
        assert_eq!(ProgressEstimator::estimate(u64::MAX, 0), INTERIM_CAP);
    }

    #[test]
    fn test_interim_never_decreases() {
        let mut estimator = ProgressEstimator::default();
        assert_eq!(estimator.interim(90, 10), 90);
        // Moving into a huge listing would drop the raw estimate to 3
        assert_eq!(estimator.interim(100, 1000), 90);
        assert_eq!(estimator.interim(200, 10), 95);
        assert_eq!(estimator.complete(), 100);
    }
}
