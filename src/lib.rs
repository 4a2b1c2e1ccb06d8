//! Constant-time lexicographic comparison of arbitrary substrings, after
//! linear-time preprocessing of the underlying sequence.
//!
//! The oracle combines SA-IS suffix sorting, a Kasai-built lcp array and a
//! four-Russians range-minimum structure:
//!
//! ```
//! use suflex::SubstringOracle;
//!
//! let text: &[u8] = b"banana";
//! let oracle = SubstringOracle::new(text);
//!
//! // common prefix of "anana" and "ana".
//! assert_eq!(oracle.lcp(1, 3), 3);
//! // "ban" against "nan".
//! assert!(oracle.compare_substrings(0..3, 2..5).is_lt());
//! ```

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

#[macro_use]
extern crate cfg_if;

mod common;
mod lcp;
mod oracle;
mod rmq;
mod sais;
mod types;

pub use crate::lcp::{inverse_suffix_array, lcp_array};
pub use crate::oracle::SubstringOracle;
pub use crate::rmq::{MinOrder, NaturalOrder, RmqEngine, DEFAULT_BLOCK_SIZE};
pub use crate::sais::suffix_array;
pub use crate::types::{AsIndex, Symbol};
