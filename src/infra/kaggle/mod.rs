#[path = "kaggle_client.rs"]
pub mod kaggle_client;

pub use kaggle_client::KaggleApiClient;
