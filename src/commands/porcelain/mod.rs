//! Porcelain commands (user-facing operations)
//!
//! - `init`: lay out a new repository
//! - `add`: stage files
//! - `commit`: snapshot the index on top of HEAD
//! - `checkout`: restore the working directory from a commit
//! - `log`: walk the history from HEAD

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
