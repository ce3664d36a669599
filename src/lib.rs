//! NeonLink (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches share a single import path.

pub use neonlink_core as core;
pub use neonlink_input as input;
pub use neonlink_link as link;
pub use neonlink_session as session;
pub use neonlink_term as term;
pub use neonlink_types as types;
