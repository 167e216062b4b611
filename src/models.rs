// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusinessId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog product. Its category lives on the owning business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub pid: ProductId,
    pub bid: BusinessId,
    pub product_name: String,
    /// Conventionally 0-10.
    pub popularity: f64,
    pub price: f64,
    /// Free-text region label; not part of the feature space.
    pub geo_demand: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub bid: BusinessId,
    pub category: String,
    pub business_name: String,
    pub revenue: f64,
    pub num_employees: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub cid: CustomerId,
    pub name: String,
    pub age: i64,
    pub gender: String,
    /// Not part of the profile vector.
    pub location: String,
    pub annual_income: f64,
    pub education: String,
    /// Not part of the profile vector.
    pub occupation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub tid: TransactionId,
    pub cid: CustomerId,
    pub pid: ProductId,
    pub amount: f64,
    pub purchase_date: DateTime<Utc>,
    pub payment_mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: String,
    pub content: String,
    pub category: String,
    /// In [-1, 1].
    pub sentiment_score: f64,
    pub timestamp: DateTime<Utc>,
}
