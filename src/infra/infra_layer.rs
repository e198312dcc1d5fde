// The infra module contains implementations of core traits.
// Each upstream client goes in its own submodule, next to the env config loader.

#[path = "codeforces/mod.rs"]
pub mod codeforces;

#[path = "kaggle/mod.rs"]
pub mod kaggle;

#[path = "config/mod.rs"]
pub mod config;
