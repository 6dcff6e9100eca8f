use std::collections::BTreeMap;

use serde::Serialize;

/// Leftover lengths available for reuse, keyed by material code.
///
/// Lives for one optimization run. Never holds a remnant of length `<= 0`
/// and never keeps a code with no remnants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemnantPool {
    remnants: BTreeMap<String, Vec<f64>>,
}

/// A remnant consumed by [`RemnantPool::take`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taken {
    pub length: f64,
    pub remaining: f64,
}

impl RemnantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cuts `required` off the largest remnant of `code` that is long enough.
    pub fn take(&mut self, code: &str, required: f64) -> Option<Taken> {
        let lengths = self.remnants.get_mut(code)?;
        // Stable: among equal lengths the earlier one wins.
        lengths.sort_by(|a, b| b.total_cmp(a));

        let idx = lengths.iter().position(|&len| len >= required)?;
        let length = lengths[idx];
        let remaining = length - required;
        if remaining > 0.0 {
            lengths[idx] = remaining;
        } else {
            lengths.remove(idx);
            if lengths.is_empty() {
                self.remnants.remove(code);
            }
        }

        Some(Taken { length, remaining })
    }

    pub fn deposit(&mut self, code: &str, leftover: f64) {
        if leftover > 0.0 {
            self.remnants
                .entry(code.to_string())
                .or_default()
                .push(leftover);
        }
    }

    pub fn get(&self, code: &str) -> &[f64] {
        self.remnants.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.remnants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.remnants
            .iter()
            .map(|(code, lengths)| (code.as_str(), lengths.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pool_valid(pool: &RemnantPool) {
        for (code, lengths) in pool.iter() {
            assert!(!lengths.is_empty(), "code {code} maps to an empty collection");
            for &len in lengths {
                assert!(len > 0.0, "code {code} holds non-positive remnant {len}");
            }
        }
    }

    #[test]
    fn test_take_from_empty_pool() {
        let mut pool = RemnantPool::new();
        assert_eq!(pool.take("SP-2001", 1.0), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_deposit_ignores_zero_and_negative() {
        let mut pool = RemnantPool::new();
        pool.deposit("SP-2001", 0.0);
        pool.deposit("SP-2001", -2.0);
        assert!(pool.is_empty());
        pool.deposit("SP-2001", 3.0);
        assert_eq!(pool.get("SP-2001"), &[3.0]);
    }

    #[test]
    fn test_take_picks_largest_sufficient() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 4.0);
        pool.deposit("A", 9.0);
        pool.deposit("A", 6.0);

        let taken = pool.take("A", 5.0).unwrap();
        assert_eq!(taken, Taken { length: 9.0, remaining: 4.0 });

        let mut left = pool.get("A").to_vec();
        left.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(left, vec![4.0, 4.0, 6.0]);
        assert_pool_valid(&pool);
    }

    #[test]
    fn test_take_resorts_before_each_scan() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 9.0);
        pool.deposit("A", 7.0);

        // 9 shrinks to 3, so the next take must come from 7
        assert_eq!(pool.take("A", 6.0).unwrap().length, 9.0);
        assert_eq!(pool.take("A", 2.0).unwrap().length, 7.0);
    }

    #[test]
    fn test_exact_take_removes_remnant_and_code() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 5.0);
        pool.deposit("B", 2.0);

        let taken = pool.take("A", 5.0).unwrap();
        assert_eq!(taken.remaining, 0.0);
        assert!(pool.get("A").is_empty());
        assert_eq!(pool.iter().count(), 1);
        assert_pool_valid(&pool);
    }

    #[test]
    fn test_take_too_long_leaves_pool_untouched() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 3.0);
        pool.deposit("A", 2.0);
        assert_eq!(pool.take("A", 3.5), None);
        let mut left = pool.get("A").to_vec();
        left.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(left, vec![2.0, 3.0]);
    }

    #[test]
    fn test_codes_are_isolated() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 9.0);
        assert_eq!(pool.take("B", 1.0), None);
        assert_eq!(pool.get("A"), &[9.0]);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut pool = RemnantPool::new();
        pool.deposit("A", 9.0);
        pool.deposit("A", 1.5);
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json, serde_json::json!({ "A": [9.0, 1.5] }));
    }
}
