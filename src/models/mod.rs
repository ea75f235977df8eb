//! Value types returned by the repository facade.
//!
//! - `refs`: RefEntry for branch and tag listings
//! - `commit`: YearRange, the active years of the primary branch
//! - `tree`: ListingEntry and ObjectKind parsed from object listings

pub mod commit;
pub mod refs;
pub mod tree;

pub use commit::*;
pub use refs::*;
pub use tree::*;
