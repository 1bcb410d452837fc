//! Alternate engine surfaces built on the same table core.

pub mod quick;
