// src/db.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::models::{Business, Customer, CustomerId, Product, SocialPost, Transaction};

/// Data-access collaborator for the recommendation core.
///
/// Implementations own query execution, connection handling, and retries;
/// the core consumes snapshots through this interface only and never
/// touches ambient global state. Failures propagate unchanged.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;

    async fn fetch_businesses(&self) -> Result<Vec<Business>>;

    async fn fetch_customers(&self) -> Result<Vec<Customer>>;

    /// The `limit` most recent transactions for one customer, most recent
    /// first.
    async fn fetch_recent_transactions(
        &self,
        cid: CustomerId,
        limit: usize,
    ) -> Result<Vec<Transaction>>;

    /// One shared window: the `limit` most recent transactions across ALL
    /// customers, grouped by customer, each group most recent first. The
    /// truncation happens before grouping, so the groups together hold at
    /// most `limit` rows.
    async fn fetch_recent_transactions_global(
        &self,
        limit: usize,
    ) -> Result<HashMap<CustomerId, Vec<Transaction>>>;

    /// The `limit` most recent social posts, most recent first.
    async fn fetch_recent_social_posts(&self, limit: usize) -> Result<Vec<SocialPost>>;
}

/// A full snapshot of the store, as serialized to disk for the CLI and
/// built by hand in tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub businesses: Vec<Business>,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub social_posts: Vec<SocialPost>,
}

/// In-memory `DataStore` over an immutable snapshot.
pub struct SnapshotStore {
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot file {}", path.display()))?;
        info!(
            "Loaded snapshot: {} products, {} businesses, {} customers, {} transactions, {} social posts",
            snapshot.products.len(),
            snapshot.businesses.len(),
            snapshot.customers.len(),
            snapshot.transactions.len(),
            snapshot.social_posts.len()
        );
        Ok(Self::new(snapshot))
    }

    fn transactions_by_date_desc(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.snapshot.transactions.iter().collect();
        transactions.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        transactions
    }
}

#[async_trait]
impl DataStore for SnapshotStore {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(self.snapshot.products.clone())
    }

    async fn fetch_businesses(&self) -> Result<Vec<Business>> {
        Ok(self.snapshot.businesses.clone())
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.snapshot.customers.clone())
    }

    async fn fetch_recent_transactions(
        &self,
        cid: CustomerId,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions_by_date_desc()
            .into_iter()
            .filter(|tx| tx.cid == cid)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_recent_transactions_global(
        &self,
        limit: usize,
    ) -> Result<HashMap<CustomerId, Vec<Transaction>>> {
        let mut grouped: HashMap<CustomerId, Vec<Transaction>> = HashMap::new();
        for tx in self.transactions_by_date_desc().into_iter().take(limit) {
            grouped.entry(tx.cid).or_default().push(tx.clone());
        }
        Ok(grouped)
    }

    async fn fetch_recent_social_posts(&self, limit: usize) -> Result<Vec<SocialPost>> {
        let mut posts = self.snapshot.social_posts.clone();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts.truncate(limit);
        Ok(posts)
    }
}
