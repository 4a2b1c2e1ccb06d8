use super::types::*;

/// Default number of values per block.
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Largest supported block size (the shape space grows as a Catalan number).
const MAX_BLOCK_SIZE: usize = 12;

/// Ordering capability injected into the RMQ engine.
///
/// Ties always resolve to the leftmost index, so `less` must be strict.
pub trait MinOrder<T> {
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The natural `Ord`-based ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord> MinOrder<T> for NaturalOrder {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Range minimum queries in constant time after linear preprocessing.
///
/// Blocks of `block_size` values are ranked by the shape of their Cartesian
/// tree; blocks of identical shape share one precomputed argmin table, and a
/// sparse table over whole-block minima covers the interior of long queries.
pub struct RmqEngine<'a, T, O: MinOrder<T> = NaturalOrder> {
    values: &'a [T],
    order: O,
    layout: RmqLayout,
}

impl<'a, T: Ord> RmqEngine<'a, T, NaturalOrder> {
    /// Preprocess `values` under the natural order.
    pub fn build(values: &'a [T]) -> Self {
        RmqEngine::build_with(values, NaturalOrder, DEFAULT_BLOCK_SIZE)
    }
}

impl<'a, T, O: MinOrder<T>> RmqEngine<'a, T, O> {
    /// Preprocess `values` under a custom order and block size.
    pub fn build_with(values: &'a [T], order: O, block_size: usize) -> Self {
        let layout = RmqLayout::build(values, &order, block_size);
        RmqEngine {
            values,
            order,
            layout,
        }
    }

    /// Index of the leftmost minimum in `[l, r)`.
    pub fn query(&self, l: usize, r: usize) -> usize {
        self.layout.argmin(self.values, &self.order, l, r)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The owned preprocessing tables, detached from the value slice so that a
/// structure owning both can pass its values back in at query time.
pub(crate) struct RmqLayout {
    len: usize,
    block_size: usize,
    /// Per block, an index into `tables`.
    block_tab: Vec<u32>,
    /// One shared argmin table per distinct block shape, row-major `[lo][hi]`.
    tables: Vec<Box<[u8]>>,
    /// Row offsets into `sparse`; row `k` spans `1 << k` blocks per entry.
    sparse_offsets: Vec<usize>,
    sparse: Vec<u32>,
}

impl RmqLayout {
    pub(crate) fn build<T, O: MinOrder<T>>(values: &[T], order: &O, block_size: usize) -> Self {
        assert!(block_size >= 1 && block_size <= MAX_BLOCK_SIZE);
        assert!(values.len() < u32::MAX as usize);

        let n = values.len();
        let b = block_size;
        let mut layout = RmqLayout {
            len: n,
            block_size: b,
            block_tab: Vec::new(),
            tables: Vec::new(),
            sparse_offsets: Vec::new(),
            sparse: Vec::new(),
        };
        if n == 0 {
            return layout;
        }

        let ballot = ballot_numbers(b);
        let num_shapes = ballot[b * (b + 1) + b].as_index();

        // rank each block's shape; identical shapes share one argmin table,
        // built the first time the shape occurs.
        let nb = (n + b - 1) / b;
        let mut slot_of_shape = vec![u32::MAX; num_shapes];
        let mut block_mins = Vec::with_capacity(nb);
        let mut stack = Vec::with_capacity(b);
        layout.block_tab.reserve(nb);
        for (blk, chunk) in values.chunks(b).enumerate() {
            let shape = block_shape(chunk, order, &ballot, b, &mut stack);
            let slot = &mut slot_of_shape[shape];
            if *slot == u32::MAX {
                *slot = layout.tables.len() as u32;
                layout.tables.push(block_table(chunk, order, b));
            }
            layout.block_tab.push(*slot);

            let tab = &layout.tables[slot.as_index()];
            block_mins.push((blk * b + tab[chunk.len() - 1].as_index()) as u32);
        }

        // sparse table of whole-block minima, doubling the span per row.
        let levels = floor_log2(nb) + 1;
        layout.sparse_offsets.reserve(levels);
        layout.sparse_offsets.push(0);
        layout.sparse.extend_from_slice(&block_mins);
        for k in 1..levels {
            let span = 1usize << k;
            let half = span >> 1;
            let prev = layout.sparse_offsets[k - 1];
            layout.sparse_offsets.push(layout.sparse.len());
            for i in 0..=nb - span {
                let a = layout.sparse[prev + i];
                let c = layout.sparse[prev + i + half];
                layout.sparse.push(pick_left(values, order, a, c));
            }
        }

        layout
    }

    /// Index of the leftmost minimum of `values[l..r]`.
    pub(crate) fn argmin<T, O: MinOrder<T>>(
        &self,
        values: &[T],
        order: &O,
        l: usize,
        r: usize,
    ) -> usize {
        assert!(l < r && r <= self.len);

        let b = self.block_size;
        let r1 = r - 1;
        let bl = l / b;
        let br = r1 / b;
        if bl == br {
            return self.block_argmin(bl, l - bl * b, r1 - bl * b);
        }

        // boundary blocks from their shape tables, interior from the
        // sparse table; candidates merge in position order so that ties
        // keep the leftmost index.
        let mut best = self.block_argmin(bl, l - bl * b, b - 1);
        if bl + 1 < br {
            let k = floor_log2(br - bl - 1);
            let row = self.sparse_offsets[k];
            let a = self.sparse[row + bl + 1];
            let c = self.sparse[row + br - (1 << k)];
            let mid = pick_left(values, order, a, c).as_index();
            if order.less(&values[mid], &values[best]) {
                best = mid;
            }
        }
        let right = self.block_argmin(br, 0, r1 - br * b);
        if order.less(&values[right], &values[best]) {
            best = right;
        }
        best
    }

    #[inline(always)]
    fn block_argmin(&self, blk: usize, lo: usize, hi: usize) -> usize {
        let b = self.block_size;
        let tab = &self.tables[self.block_tab[blk].as_index()];
        blk * b + tab[lo * b + hi].as_index()
    }
}

/// Ballot numbers `c[p][q]` in a flat `(b + 1) x (b + 1)` table;
/// `c[b][b]` counts the distinct Cartesian-tree shapes of a block.
fn ballot_numbers(b: usize) -> Vec<u32> {
    let w = b + 1;
    let mut c = vec![0u32; w * w];
    for q in 0..w {
        c[q] = 1;
    }
    for p in 1..w {
        for q in p..w {
            c[p * w + q] = c[(p - 1) * w + q] + if q > p { c[p * w + q - 1] } else { 0 };
        }
    }
    c
}

/// Rank the Cartesian-tree shape of a block by simulating the tree's
/// rightmost spine as a stack, charging one ballot number per pop.
fn block_shape<T, O: MinOrder<T>>(
    chunk: &[T],
    order: &O,
    ballot: &[u32],
    b: usize,
    stack: &mut Vec<usize>,
) -> usize {
    let w = b + 1;
    let mut q = b;
    let mut shape = 0usize;
    stack.clear();
    for (i, v) in chunk.iter().enumerate() {
        while stack.last().map_or(false, |&top| order.less(v, &chunk[top])) {
            shape += ballot[(b - 1 - i) * w + q].as_index();
            q -= 1;
            stack.pop();
        }
        stack.push(i);
    }
    shape
}

/// Precompute every in-block argmin for one shape, row-major `[lo][hi]`.
///
/// A trailing short block only ever fills (and is only ever asked for)
/// the entries below its own length.
fn block_table<T, O: MinOrder<T>>(chunk: &[T], order: &O, b: usize) -> Box<[u8]> {
    let mut tab = vec![0u8; b * b].into_boxed_slice();
    for lo in 0..chunk.len() {
        let mut best = lo;
        tab[lo * b + lo] = lo as u8;
        for hi in lo + 1..chunk.len() {
            if order.less(&chunk[hi], &chunk[best]) {
                best = hi;
            }
            tab[lo * b + hi] = best as u8;
        }
    }
    tab
}

/// Keep the earlier of two argmin indices unless the later is strictly
/// smaller.
#[inline(always)]
fn pick_left<T, O: MinOrder<T>>(values: &[T], order: &O, a: u32, c: u32) -> u32 {
    debug_assert!(a <= c);
    if order.less(&values[c.as_index()], &values[a.as_index()]) {
        c
    } else {
        a
    }
}

const DEBRUIJN_MUL: u64 = 0x07ed_d5e5_9a4e_28c2;
const DEBRUIJN_TAB: [u8; 64] = [
    63, 0, 58, 1, 59, 47, 53, 2, 60, 39, 48, 27, 54, 33, 42, 3, 61, 51, 37, 40, 49, 18, 28, 20,
    55, 30, 34, 11, 43, 14, 22, 4, 62, 57, 46, 52, 38, 26, 32, 41, 50, 36, 17, 19, 29, 10, 13, 21,
    56, 45, 25, 31, 35, 16, 9, 12, 44, 24, 15, 8, 23, 7, 6, 5,
];

/// Floor of log2 of a nonzero integer, by de Bruijn multiplication.
#[inline(always)]
fn floor_log2(x: usize) -> usize {
    debug_assert!(x > 0);
    let mut v = x as u64;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v |= v >> 32;
    DEBRUIJN_TAB[((v - (v >> 1)).wrapping_mul(DEBRUIJN_MUL) >> 58) as usize] as usize
}
