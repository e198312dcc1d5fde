pub mod codeforces_models;
pub mod codeforces_service;

pub use codeforces_models::{Contest, ContestPhase, Problem, PROBLEM_TAGS, RATING_LADDER};
pub use codeforces_service::{CodeforcesClient, CodeforcesError, CodeforcesService, ProblemQuery};
