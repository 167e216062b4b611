// src/lib.rs

pub mod db;
pub mod error;
pub mod features;
pub mod models;
pub mod recommend;
pub mod sentiment;
pub mod similarity;
pub mod utils;

pub use error::{RecommendError, Result};
pub use models::*;
pub use recommend::{Recommendation, RecommendationConfig, RecommendationEngine};
