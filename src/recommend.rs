// src/recommend.rs

use log::{debug, info};
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::db::DataStore;
use crate::error::{RecommendError, Result};
use crate::features::{build_customer_profiles, build_product_features};
use crate::models::{Business, BusinessId, CustomerId, Product, ProductId, Transaction};
use crate::sentiment::average_sentiment_by_category;
use crate::similarity::SimilarityMatrix;

/// Window sizes and weights for one recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Per-customer recent-purchase window.
    pub n_transactions: usize,
    /// Shared global transaction window used for customer profiles and the
    /// similar-customer purchase lookup.
    pub n_transactions_customer: usize,
    /// How many similar customers to consult.
    pub n_customers: usize,
    /// How many similar products to consult per recent purchase.
    pub n_similar_products: usize,
    /// Social post window for the sentiment signal.
    pub n_posts: usize,
    pub n_recommendations: usize,
    pub product_weight: f64,
    pub customer_weight: f64,
    pub sentiment_weight: f64,
    /// Probability of NOT penalizing a repeat purchase.
    pub repeat_prob: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            n_transactions: 10,
            n_transactions_customer: 10_000,
            n_customers: 5,
            n_similar_products: 5,
            n_posts: 1000,
            n_recommendations: 5,
            product_weight: 0.5,
            customer_weight: 0.5,
            sentiment_weight: 0.3,
            repeat_prob: 0.3,
        }
    }
}

/// One ranked entry of a recommendation result.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub pid: ProductId,
    pub score: f64,
    pub product_name: String,
    pub bid: BusinessId,
    pub business_name: String,
    pub category: String,
    pub popularity: f64,
    pub price: f64,
    pub geo_demand: String,
}

/// Fuses product similarity, customer similarity, and category sentiment
/// into one ranked score per product for a single customer.
///
/// Everything is recomputed from a fresh snapshot on each call; if the
/// host wants to cache the similarity matrices across requests it owns
/// that cache and its invalidation.
pub struct RecommendationEngine<S> {
    store: S,
}

impl<S: DataStore> RecommendationEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Computes the top `n_recommendations` products for `cid`.
    ///
    /// The random source drives only the repeat-purchase dampening step;
    /// passing a seeded rng makes the whole call reproducible.
    pub async fn recommend<R: Rng>(
        &self,
        cid: CustomerId,
        config: &RecommendationConfig,
        rng: &mut R,
    ) -> Result<Vec<Recommendation>> {
        let request_id = Uuid::new_v4();
        info!("[{}] Computing recommendations for customer {}", request_id, cid);

        let (products, businesses, customers, window, posts) = tokio::try_join!(
            self.store.fetch_products(),
            self.store.fetch_businesses(),
            self.store.fetch_customers(),
            self.store
                .fetch_recent_transactions_global(config.n_transactions_customer),
            self.store.fetch_recent_social_posts(config.n_posts),
        )?;

        if customers.is_empty() {
            return Err(RecommendError::EmptyCustomerBase);
        }
        if !customers.iter().any(|c| c.cid == cid) {
            return Err(RecommendError::CustomerNotFound { cid });
        }

        let business_by_id: HashMap<BusinessId, &Business> =
            businesses.iter().map(|b| (b.bid, b)).collect();
        let mut category_by_pid: HashMap<ProductId, String> =
            HashMap::with_capacity(products.len());
        for product in &products {
            let business =
                business_by_id
                    .get(&product.bid)
                    .ok_or(RecommendError::UnknownBusiness {
                        pid: product.pid,
                        bid: product.bid,
                    })?;
            category_by_pid.insert(product.pid, business.category.clone());
        }

        let product_space = build_product_features(&products, &businesses)?;
        let product_similarity =
            SimilarityMatrix::from_features("product", product_space.labels.clone(), &product_space.matrix);

        let customer_space = build_customer_profiles(&customers, &window, &category_by_pid)?;
        let customer_similarity = SimilarityMatrix::from_features(
            "customer",
            customer_space.labels.clone(),
            &customer_space.matrix,
        );

        let sentiment = average_sentiment_by_category(&posts);

        let recent = self
            .store
            .fetch_recent_transactions(cid, config.n_transactions)
            .await?;
        let mut recent_pids: Vec<ProductId> = Vec::new();
        let mut seen = HashSet::new();
        for tx in &recent {
            if seen.insert(tx.pid) {
                recent_pids.push(tx.pid);
            }
        }
        debug!(
            "[{}] Customer {} has {} distinct recent purchases",
            request_id,
            cid,
            recent_pids.len()
        );

        let scores = score_products(
            &products,
            &category_by_pid,
            &product_similarity,
            &customer_similarity,
            &sentiment,
            cid,
            &recent_pids,
            &window,
            config,
            rng,
        )?;

        // Stable sort on score descending, so tied products keep original
        // catalog order.
        let mut ranked: Vec<(f64, &Product)> = products
            .iter()
            .map(|p| (scores.get(&p.pid).copied().unwrap_or(0.0), p))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.truncate(config.n_recommendations);

        let mut recommendations = Vec::with_capacity(ranked.len());
        for (score, product) in ranked {
            let business =
                business_by_id
                    .get(&product.bid)
                    .ok_or(RecommendError::UnknownBusiness {
                        pid: product.pid,
                        bid: product.bid,
                    })?;
            recommendations.push(Recommendation {
                pid: product.pid,
                score,
                product_name: product.product_name.clone(),
                bid: product.bid,
                business_name: business.business_name.clone(),
                category: business.category.clone(),
                popularity: product.popularity,
                price: product.price,
                geo_demand: product.geo_demand.clone(),
            });
        }

        info!(
            "[{}] Returning {} recommendations for customer {}",
            request_id,
            recommendations.len(),
            cid
        );
        Ok(recommendations)
    }
}

/// The fusion pass: three additive signal passes over a zero-initialized
/// score map covering every catalog product, then the stochastic
/// repeat-purchase dampening.
#[allow(clippy::too_many_arguments)]
fn score_products<R: Rng>(
    products: &[Product],
    category_by_pid: &HashMap<ProductId, String>,
    product_similarity: &SimilarityMatrix<ProductId>,
    customer_similarity: &SimilarityMatrix<CustomerId>,
    sentiment: &HashMap<String, f64>,
    target: CustomerId,
    recent_pids: &[ProductId],
    window: &HashMap<CustomerId, Vec<Transaction>>,
    config: &RecommendationConfig,
    rng: &mut R,
) -> Result<HashMap<ProductId, f64>> {
    let mut scores: HashMap<ProductId, f64> = products.iter().map(|p| (p.pid, 0.0)).collect();

    // Pass 1: products similar to the customer's own recent purchases.
    // The purchased product itself is excluded as the self-match.
    for &pid in recent_pids {
        for (similar_pid, similarity) in
            product_similarity.top_neighbors(pid, config.n_similar_products)?
        {
            if let Some(score) = scores.get_mut(&similar_pid) {
                *score += similarity * config.product_weight;
            }
        }
    }

    // Pass 2: products bought by similar customers inside the shared
    // window, each distinct product weighted by that customer's
    // similarity to the target.
    for (similar_cid, customer_sim) in
        customer_similarity.top_neighbors(target, config.n_customers)?
    {
        let purchases = match window.get(&similar_cid) {
            Some(purchases) => purchases,
            // no purchases inside the shared window, nothing to add
            None => continue,
        };
        let mut contributed = HashSet::new();
        for tx in purchases {
            if contributed.insert(tx.pid) {
                if let Some(score) = scores.get_mut(&tx.pid) {
                    *score += customer_sim * config.customer_weight;
                }
            }
        }
    }

    // Pass 3: category sentiment. Categories absent from the aggregate
    // contribute nothing.
    for product in products {
        if let Some(category) = category_by_pid.get(&product.pid) {
            if let Some(avg_sentiment) = sentiment.get(category) {
                if let Some(score) = scores.get_mut(&product.pid) {
                    *score += avg_sentiment * config.sentiment_weight;
                }
            }
        }
    }

    // Dampening: shrink repeat purchases most of the time. One fresh draw
    // per recent product, in first-seen purchase order, so a fixed rng
    // seed pins the outcome.
    for &pid in recent_pids {
        if rng.gen::<f64>() > config.repeat_prob {
            if let Some(score) = scores.get_mut(&pid) {
                *score *= 0.2;
            }
        }
    }

    Ok(scores)
}
