// The core module contains all business logic.
// Each upstream service gets its own submodule; `query` and `relay` are shared.

#[path = "codeforces/mod.rs"]
pub mod codeforces;

#[path = "kaggle/mod.rs"]
pub mod kaggle;

#[path = "query/mod.rs"]
pub mod query;

#[path = "relay/mod.rs"]
pub mod relay;
