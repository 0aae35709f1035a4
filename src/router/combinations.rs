// Combination generator for bounded offer subsets
// Yields every k-subset of 0..n in lexicographic order, which is the same
// sequence a recursive include-then-advance generator produces
//
// Numan Thabit 2025 Nov

/// Lexicographic iterator over k-combinations of `0..n`
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            // k == 0 yields nothing; a route needs at least one offer
            done: k == 0 || k > n,
        }
    }

    /// Advance to the next combination in place and expose it as a slice.
    /// Avoids allocating one `Vec` per subset in the hot loop.
    pub fn next_slice(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        // rightmost position that can still move forward
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(&self.indices);
            }
        }
        self.done = true;
        None
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_slice().map(<[usize]>::to_vec)
    }
}

/// C(n, k), saturating at `u64::MAX`
pub fn combination_count(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // exact at every step: acc * (n - i) is divisible by (i + 1)
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    acc as u64
}

/// Total subsets evaluated for sizes 1..=max_k over n offers
pub fn search_space(n: usize, max_k: usize) -> u64 {
    (1..=max_k.min(n)).fold(0u64, |acc, k| acc.saturating_add(combination_count(n, k)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_lexicographically() {
        let all: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn full_and_empty_sizes() {
        assert_eq!(Combinations::new(3, 3).collect::<Vec<_>>(), vec![vec![0, 1, 2]]);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!(Combinations::new(3, 0).count(), 0);
        assert_eq!(Combinations::new(0, 1).count(), 0);
    }

    #[test]
    fn iterator_length_matches_count() {
        for n in 1..=8 {
            for k in 1..=n {
                assert_eq!(Combinations::new(n, k).count() as u64, combination_count(n, k));
            }
        }
    }

    #[test]
    fn binomials() {
        assert_eq!(combination_count(20, 5), 15_504);
        assert_eq!(combination_count(5, 0), 1);
        assert_eq!(combination_count(3, 5), 0);
        assert_eq!(search_space(20, 5), 20 + 190 + 1_140 + 4_845 + 15_504);
        assert_eq!(search_space(2, 5), 3);
        assert_eq!(combination_count(200, 100), u64::MAX);
    }
}
