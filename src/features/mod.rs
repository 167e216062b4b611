// src/features/mod.rs

pub mod customer_profile;
pub mod product_features;

pub use customer_profile::build_customer_profiles;
pub use product_features::build_product_features;

use ndarray::Array2;

/// A standardized feature space: one numeric row per entity, with the
/// entity ids kept alongside as row labels.
#[derive(Debug, Clone)]
pub struct FeatureSpace<K> {
    pub labels: Vec<K>,
    pub matrix: Array2<f64>,
}
