use std::cmp::max;

use super::common::*;
use super::types::*;

/// Empty mark in the workspace.
const EMPTY: u32 = u32::MAX;

/// Sort the suffixes of `text` over the alphabet `0..alpha_size`.
///
/// The returned array has length `n + 1`; the conceptually empty suffix
/// sorts below every symbol and is pinned at rank 0.
pub fn suffix_array<C: Symbol>(text: &[C], alpha_size: usize) -> Vec<u32> {
    assert!(text.len() < EMPTY as usize);

    let n = text.len();
    let mut suf = vec![0u32; n + 1];
    suf[0] = n as u32;
    if n > 0 {
        // bucket scratch shared by every recursion level.
        let mut bkt = Vec::with_capacity(max(alpha_size, (n + 1) / 2) + 1);
        sais(text, &mut suf[1..], alpha_size, &mut bkt);
    }
    suf
}

/// Sort suffixes by induced sorting, recursing on the reduced problem.
fn sais<C: Symbol>(text: &[C], suf: &mut [u32], alpha_size: usize, bkt: &mut Vec<u32>) {
    debug_assert_eq!(text.len(), suf.len());

    if text.len() <= 3 {
        saca_tiny(text, suf);
        return;
    }

    let stype = suffix_types(text);

    // induce sort lms-substrings from approximately seeded buckets.
    put_lms_chars(text, &stype, suf, bkt, alpha_size);
    induce_ltype(text, &stype, suf, bkt, alpha_size);
    induce_stype(text, &stype, suf, bkt, alpha_size);

    // collect lms-positions, now in lms-substring order, into the head.
    let mut n1 = 0;
    for i in 0..suf.len() {
        let x = suf[i];
        if x != EMPTY && is_lms(&stype, x.as_index()) {
            suf[n1] = x;
            n1 += 1;
        }
    }

    // name lms-substrings; the reduced rank string lands in the tail.
    let k1 = name_lms_substrings(text, &stype, suf, n1);
    if k1 < n1 {
        // names collide: sort the reduced problem to make the order exact.
        {
            let (subsuf, subtext) = suf.split_at_mut(suf.len() - n1);
            sais(&subtext[..], &mut subsuf[..n1], k1, bkt);
        }

        // rewrite the reduced suffix array in terms of text positions.
        let mut p = suf.len();
        foreach_lms(&stype, |i| {
            p -= 1;
            suf[p] = i as u32;
        });
        for i in 0..n1 {
            let j = suf[i].as_index();
            suf[i] = suf[suf.len() - n1 + j];
        }
    }

    // induce sort the suffix array from exactly sorted lms-suffixes.
    put_lms_suffixes(text, suf, bkt, alpha_size, n1);
    induce_ltype(text, &stype, suf, bkt, alpha_size);
    induce_stype(text, &stype, suf, bkt, alpha_size);
}

/// Prefix-sum symbol frequencies: `bkt[c]` is the head of bucket `c`,
/// `bkt[c + 1]` one past its tail.
fn fill_buckets<C: Symbol>(text: &[C], bkt: &mut Vec<u32>, k: usize) {
    bkt.clear();
    bkt.resize(k + 1, 0);
    text.iter().for_each(|&c| bkt[c.as_index() + 1] += 1);
    for c in 1..=k {
        bkt[c] += bkt[c - 1];
    }
}

/// Seed lms-characters at the tails of their buckets, in arbitrary
/// relative order.
fn put_lms_chars<C: Symbol>(
    text: &[C],
    stype: &[bool],
    suf: &mut [u32],
    bkt: &mut Vec<u32>,
    k: usize,
) {
    suf.iter_mut().for_each(|p| *p = EMPTY);
    fill_buckets(text, bkt, k);

    foreach_lms(stype, |i| {
        let c = text[i].as_index();
        bkt[c + 1] -= 1;
        suf[bkt[c + 1].as_index()] = i as u32;
    });
}

/// Move the exactly sorted lms-suffixes from the head of the workspace to
/// the tails of their buckets.
fn put_lms_suffixes<C: Symbol>(
    text: &[C],
    suf: &mut [u32],
    bkt: &mut Vec<u32>,
    k: usize,
    n1: usize,
) {
    suf[n1..].iter_mut().for_each(|p| *p = EMPTY);
    fill_buckets(text, bkt, k);

    for i in (0..n1).rev() {
        let x = suf[i];
        suf[i] = EMPTY;

        let c = text[x.as_index()].as_index();
        bkt[c + 1] -= 1;
        suf[bkt[c + 1].as_index()] = x;
    }
}

/// Induce l-typed positions from the sorted entries, scanning buckets from
/// their heads.
fn induce_ltype<C: Symbol>(
    text: &[C],
    stype: &[bool],
    suf: &mut [u32],
    bkt: &mut Vec<u32>,
    k: usize,
) {
    let n = text.len();
    fill_buckets(text, bkt, k);

    // the suffix preceding the sentinel is l-type and is induced first.
    let c = text[n - 1].as_index();
    suf[bkt[c].as_index()] = (n - 1) as u32;
    bkt[c] += 1;

    for i in 0..n {
        let x = suf[i];
        if x != EMPTY && x > 0 {
            let j = x.as_index() - 1;
            if !stype[j] {
                let c = text[j].as_index();
                suf[bkt[c].as_index()] = j as u32;
                bkt[c] += 1;
            }
        }
    }
}

/// Induce s-typed positions from the sorted entries, scanning buckets from
/// their tails.
fn induce_stype<C: Symbol>(
    text: &[C],
    stype: &[bool],
    suf: &mut [u32],
    bkt: &mut Vec<u32>,
    k: usize,
) {
    fill_buckets(text, bkt, k);

    for i in (0..text.len()).rev() {
        let x = suf[i];
        if x != EMPTY && x > 0 {
            let j = x.as_index() - 1;
            if stype[j] {
                let c = text[j].as_index();
                bkt[c + 1] -= 1;
                suf[bkt[c + 1].as_index()] = j as u32;
            }
        }
    }
}

/// Assign each lms-substring a rank by comparing adjacent entries of the
/// approximately sorted head for exact equality, then gather the rank
/// string (keyed by position) into the tail of the workspace.
///
/// Returns the size of the reduced alphabet.
fn name_lms_substrings<C: Symbol>(
    text: &[C],
    stype: &[bool],
    suf: &mut [u32],
    n1: usize,
) -> usize {
    let n = suf.len();
    let (head, work) = suf.split_at_mut(n1);
    work.iter_mut().for_each(|p| *p = EMPTY);

    let mut k1 = 0;
    let mut prev = n; // never an lms-position.
    for &p in head.iter() {
        let p = p.as_index();
        if prev == n || !lms_eq(text, stype, p, prev) {
            k1 += 1;
        }
        work[p / 2] = (k1 - 1) as u32;
        prev = p;
    }

    // no need to gather the rank string if every name is distinct.
    if k1 < n1 {
        let mut q = work.len();
        for i in (0..work.len()).rev() {
            if work[i] != EMPTY {
                q -= 1;
                work[q] = work[i];
            }
        }
    }

    k1
}

#[cfg(test)]
mod tests {
    use super::super::common::saca_tiny;
    use super::suffix_array;

    #[test]
    fn tablecheck_sais() {
        let texts: &[&[u32]] = &[
            &[],
            &[0],
            &[0, 0, 0, 0, 0, 0],
            &[2, 0, 2, 0, 2, 1, 4, 3],
            &[3, 2, 1, 3, 2, 3, 2, 1, 0, 1],
            &[2, 1, 4, 1, 1, 4, 1, 3, 1],
            &[2, 1, 1, 3, 3, 1, 1, 3, 3, 1, 2, 1],
            &[2, 2, 1, 4, 4, 1, 4, 4, 1, 3, 3, 1, 1],
            &[
                1, 2, 2, 1, 1, 0, 0, 1, 1, 2, 2, 0, 0, 2, 2, 0, 1, 0, 2, 0, 1, 1, 1, 1, 2, 2, 0, 0,
                2, 1, 2, 1, 1, 0, 2, 1, 2, 2, 0, 2, 1, 1, 2, 2, 2, 1, 2, 0, 0, 1, 2, 0, 0, 0, 1, 2,
                2, 2, 1, 1, 1, 1, 2, 0, 2, 1, 1, 1, 2, 1, 0, 1,
            ],
        ];

        for &text in texts.iter() {
            assert_eq!(sais(text), naive(text));
        }
    }

    #[test]
    fn tablecheck_banana() {
        // "banana" with b=1, a=0, n=2.
        let text: &[u32] = &[1, 0, 2, 0, 2, 0];
        assert_eq!(suffix_array(text, 3), [6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn exhaustive_binary() {
        for len in 0..=12 {
            for bits in 0..1u32 << len {
                let text: Vec<u32> = (0..len).map(|i| (bits >> i) & 1).collect();
                assert_eq!(suffix_array(&text, 2), naive(&text), "text = {:?}", text);
            }
        }
    }

    #[test]
    fn exhaustive_ternary() {
        for len in 0..=8 {
            for mut code in 0..3u32.pow(len) {
                let text: Vec<u32> = (0..len)
                    .map(|_| {
                        let c = code % 3;
                        code /= 3;
                        c
                    })
                    .collect();
                assert_eq!(suffix_array(&text, 3), naive(&text), "text = {:?}", text);
            }
        }
    }

    #[quickcheck]
    fn quickcheck_sais_bytes(text: Vec<u8>) -> bool {
        suffix_array(&text[..], 256) == naive(&text[..])
    }

    #[quickcheck]
    fn quickcheck_sais_repetitive(text: Vec<u8>) -> bool {
        // narrow alphabets provoke deep recursion.
        let text: Vec<u8> = text.iter().map(|&c| c % 3).collect();
        suffix_array(&text[..], 3) == naive(&text[..])
    }

    // helper functions.

    fn sais(text: &[u32]) -> Vec<u32> {
        let k = text.iter().map(|&c| c as usize + 1).max().unwrap_or(1);
        suffix_array(text, k)
    }

    fn naive<C: super::Symbol>(text: &[C]) -> Vec<u32> {
        let mut suf = vec![0u32; text.len() + 1];
        suf[0] = text.len() as u32;
        saca_tiny(text, &mut suf[1..]);
        suf
    }
}
