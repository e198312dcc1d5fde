pub mod kaggle_models;
pub mod kaggle_service;

pub use kaggle_models::{Competition, CompetitionSort, Dataset};
pub use kaggle_service::{KaggleClient, KaggleError, KaggleService};
