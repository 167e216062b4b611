// src/error.rs

use thiserror::Error;

use crate::models::{BusinessId, CustomerId, ProductId};

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Failures surfaced by the recommendation core. Data-access failures from
/// the collaborator propagate unchanged through the `Store` variant; the
/// core performs no retries.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("customer {cid} does not exist")]
    CustomerNotFound { cid: CustomerId },

    #[error("product catalog is empty")]
    EmptyCatalog,

    #[error("customer base is empty")]
    EmptyCustomerBase,

    #[error("product {pid} references unknown business {bid}")]
    UnknownBusiness { pid: ProductId, bid: BusinessId },

    #[error("transaction references unknown product {pid}")]
    UnknownProduct { pid: ProductId },

    /// Invariant violation: the builders were handed a different snapshot
    /// than the fusion pass. Never silently defaulted.
    #[error("{axis} similarity matrix has no entry for id {id}")]
    MissingSimilarityEntry { axis: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
