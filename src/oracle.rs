use std::cmp::Ordering;
use std::ops::Range;

use super::lcp;
use super::rmq::{NaturalOrder, RmqLayout, DEFAULT_BLOCK_SIZE};
use super::sais;
use super::types::*;

/// A build-once oracle answering lexicographic queries about the suffixes
/// and substrings of a borrowed sequence in constant time.
///
/// Construction is `O(n + alpha_size)`; afterwards the structure is
/// immutable and every query runs without touching mutable state.
pub struct SubstringOracle<'a, C> {
    text: &'a [C],
    sa: Vec<u32>,
    isa: Vec<u32>,
    lcp: Vec<u32>,
    /// RMQ tables over `lcp`.
    layout: RmqLayout,
}

impl<'a, C: Symbol> SubstringOracle<'a, C> {
    /// Build with the alphabet bound inferred as `max(text) + 1`.
    pub fn new(text: &'a [C]) -> Self {
        let alpha_size = text.iter().map(|&c| c.as_index() + 1).max().unwrap_or(1);
        SubstringOracle::build_all(text, alpha_size)
    }

    /// Build every structure in dependency order: the suffix array, its
    /// inverse, the lcp array, then the rmq tables over the lcp array.
    pub fn build_all(text: &'a [C], alpha_size: usize) -> Self {
        SubstringOracle::with_block_size(text, alpha_size, DEFAULT_BLOCK_SIZE)
    }

    /// Same as [`build_all`](Self::build_all), with the rmq block size
    /// exposed as a tuning knob.
    pub fn with_block_size(text: &'a [C], alpha_size: usize, block_size: usize) -> Self {
        let sa = sais::suffix_array(text, alpha_size);
        let isa = lcp::inverse_suffix_array(&sa);
        let lcp = lcp::lcp_array(text, &sa, &isa);
        let layout = RmqLayout::build(&lcp, &NaturalOrder, block_size);
        SubstringOracle {
            text,
            sa,
            isa,
            lcp,
            layout,
        }
    }

    /// Number of symbols in the underlying sequence.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Suffix start positions in lexicographic order, the empty suffix
    /// first.
    pub fn suffix_array(&self) -> &[u32] {
        &self.sa
    }

    /// Lexicographic rank of every suffix start position.
    pub fn inverse_suffix_array(&self) -> &[u32] {
        &self.isa
    }

    /// Common prefix length of every pair of rank-adjacent suffixes.
    pub fn lcp_array(&self) -> &[u32] {
        &self.lcp
    }

    /// Start position of the `k`-th lexicographically smallest suffix.
    pub fn kth_suffix(&self, k: usize) -> usize {
        self.sa[k].as_index()
    }

    /// Length of the common prefix of the suffixes starting at `i` and `j`.
    pub fn lcp(&self, i: usize, j: usize) -> usize {
        let n = self.text.len();
        assert!(i <= n && j <= n);
        if i == j {
            return n - i;
        }

        // the minimum lcp over a rank interval is the lcp of its endpoints.
        let ri = self.isa[i].as_index();
        let rj = self.isa[j].as_index();
        let (lo, hi) = if ri < rj { (ri, rj) } else { (rj, ri) };
        let k = self.layout.argmin(&self.lcp, &NaturalOrder, lo + 1, hi + 1);
        self.lcp[k].as_index()
    }

    /// Three-way lexicographic comparison of the substrings `a` and `b`.
    pub fn compare_substrings(&self, a: Range<usize>, b: Range<usize>) -> Ordering {
        let n = self.text.len();
        assert!(a.start <= a.end && a.end <= n);
        assert!(b.start <= b.end && b.end <= n);

        let m = a.end - a.start;
        let k = b.end - b.start;
        if a.start == b.start {
            return m.cmp(&k);
        }

        let l = self.lcp(a.start, b.start);
        if l < m && l < k {
            self.text[a.start + l].cmp(&self.text[b.start + l])
        } else {
            // one substring ran out: the shorter is a prefix of the other.
            m.cmp(&k)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::SubstringOracle;

    #[test]
    fn tablecheck_banana() {
        // "banana" with b=1, a=0, n=2.
        let text: &[u32] = &[1, 0, 2, 0, 2, 0];
        let oracle = SubstringOracle::build_all(text, 3);

        assert_eq!(oracle.suffix_array(), [6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(oracle.lcp_array(), [0, 0, 1, 3, 0, 0, 2]);
        assert_eq!(oracle.kth_suffix(0), 6);
        assert_eq!(oracle.kth_suffix(4), 0);

        // "anana" against "ana".
        assert_eq!(oracle.lcp(1, 3), 3);
        // "ana" against "a".
        assert_eq!(oracle.lcp(3, 5), 1);
        assert_eq!(oracle.compare_substrings(1..4, 3..6), Ordering::Equal);
        assert_eq!(oracle.compare_substrings(1..4, 3..5), Ordering::Greater);
        assert_eq!(oracle.compare_substrings(0..3, 2..5), Ordering::Less);
    }

    #[test]
    fn tablecheck_empty() {
        let text: &[u32] = &[];
        let oracle = SubstringOracle::new(text);
        assert_eq!(oracle.suffix_array(), [0]);
        assert_eq!(oracle.lcp_array(), [0]);
        assert_eq!(oracle.kth_suffix(0), 0);
        assert_eq!(oracle.lcp(0, 0), 0);
        assert_eq!(oracle.compare_substrings(0..0, 0..0), Ordering::Equal);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let text: Vec<u8> = b"mississippi".to_vec();
        let first = SubstringOracle::new(&text);
        let second = SubstringOracle::new(&text);
        assert_eq!(first.suffix_array(), second.suffix_array());
        assert_eq!(first.inverse_suffix_array(), second.inverse_suffix_array());
        assert_eq!(first.lcp_array(), second.lcp_array());
    }

    #[quickcheck]
    fn quickcheck_lcp_of_suffix_with_itself(text: Vec<u8>) -> bool {
        let oracle = SubstringOracle::new(&text);
        (0..=text.len()).all(|i| oracle.lcp(i, i) == text.len() - i)
    }

    #[quickcheck]
    fn quickcheck_lcp_matches_brute_force(text: Vec<u8>) -> bool {
        let text: Vec<u8> = text.iter().take(40).map(|&c| c % 4).collect();
        let oracle = SubstringOracle::new(&text);
        (0..=text.len()).all(|i| {
            (0..=text.len()).all(|j| {
                let expected = common_prefix(&text[i..], &text[j..]);
                oracle.lcp(i, j) == expected && oracle.lcp(j, i) == expected
            })
        })
    }

    #[quickcheck]
    fn quickcheck_compare_matches_brute_force(text: Vec<u8>) -> bool {
        let text: Vec<u8> = text.iter().take(12).map(|&c| c % 3).collect();
        let oracle = SubstringOracle::new(&text);
        for b1 in 0..=text.len() {
            for e1 in b1..=text.len() {
                for b2 in 0..=text.len() {
                    for e2 in b2..=text.len() {
                        let expected = text[b1..e1].cmp(&text[b2..e2]);
                        if oracle.compare_substrings(b1..e1, b2..e2) != expected {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    fn common_prefix(a: &[u8], b: &[u8]) -> usize {
        a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
    }
}
