use super::types::*;

/// Invert a suffix array into rank-of-position form: `isa[sa[i]] == i`.
///
/// A non-permutation input is a precondition violation.
pub fn inverse_suffix_array(sa: &[u32]) -> Vec<u32> {
    let mut isa = vec![0u32; sa.len()];
    for (i, &p) in sa.iter().enumerate() {
        isa[p.as_index()] = i as u32;
    }
    isa
}

/// Build the longest-common-prefix array in the Kasai manner.
///
/// `lcp[r]` is the common prefix length of the suffixes ranked `r - 1`
/// and `r`; `lcp[0]` is zero. The running match length `h` drops by at
/// most one between consecutive text positions, which bounds the total
/// number of symbol comparisons by `2n`.
pub fn lcp_array<C: Symbol>(text: &[C], sa: &[u32], isa: &[u32]) -> Vec<u32> {
    let n = text.len();
    debug_assert_eq!(sa.len(), n + 1);
    debug_assert_eq!(isa.len(), n + 1);

    let mut lcp = vec![0u32; n + 1];
    let mut h = 0usize;
    for i in 0..n {
        let r = isa[i].as_index();
        let j = sa[r - 1].as_index();
        if j == n {
            // ranked right after the empty sentinel suffix.
            h = 0;
            continue;
        }

        while i + h < n && j + h < n && text[i + h] == text[j + h] {
            h += 1;
        }
        lcp[r] = h as u32;
        h = h.saturating_sub(1);
    }
    lcp
}
