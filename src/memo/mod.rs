//! Function memoization on top of [`MemoCache`](crate::traits::MemoCache).
//!
//! | Type            | Delegate            | Cache key             |
//! |-----------------|---------------------|-----------------------|
//! | `MemoizedFn`    | `Fn(&A) -> R`       | `A`                   |
//! | `MemoizedBiFn`  | `Fn(&A, &B) -> R`   | `CompositeKey<A, B>`  |

pub mod binary;
pub mod key;
pub mod unary;

pub use binary::{MemoizedBiFn, memoize_bi};
pub use key::CompositeKey;
pub use unary::{MemoizedFn, memoize};
