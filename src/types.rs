use std::fmt::Debug;

/// Types that could be casted into usize.
pub trait AsIndex: Copy {
    fn as_index(self) -> usize;
}

macro_rules! impl_as_index {
    ($($uint:ty),*) => {
        $(
            impl AsIndex for $uint {
                #[inline(always)]
                fn as_index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

/// Sequence symbol type: an unsigned ordinal in a fixed alphabet.
pub trait Symbol: Copy + Ord + Debug + AsIndex {}

macro_rules! impl_symbol {
    ($($uint:ty),*) => {
        $(
            impl Symbol for $uint {}
        )*
    };
}

cfg_if! {
    if #[cfg(target_pointer_width="64")] {
        impl_as_index!(u8, u16, u32, u64, usize);
        impl_symbol!(u8, u16, u32, u64);
    } else if #[cfg(target_pointer_width="32")] {
        impl_as_index!(u8, u16, u32, usize);
        impl_symbol!(u8, u16, u32);
    }
}
