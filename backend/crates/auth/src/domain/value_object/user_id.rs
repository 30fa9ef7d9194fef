//! User identifier, shared with the catalog domain through the kernel.

pub use kernel::id::UserId;
