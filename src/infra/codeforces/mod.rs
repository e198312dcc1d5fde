#[path = "codeforces_client.rs"]
pub mod codeforces_client;

pub use codeforces_client::CodeforcesApiClient;
