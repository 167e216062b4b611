// src/features/customer_profile.rs

use log::debug;
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};

use super::FeatureSpace;
use crate::error::{RecommendError, Result};
use crate::models::{Customer, CustomerId, ProductId, Transaction};
use crate::utils::matrix::standardize_columns;

/// Builds one numeric profile row per customer: one-hot gender and
/// education, per-category spend inside the shared global transaction
/// window, then age and annual income. Spend, age, and income are
/// standardized as one numeric block; the dummy columns stay 0/1.
///
/// Every customer in the full list gets a row, including customers with no
/// transactions inside the window — their spend columns are 0, so only
/// demographics carry their signal. Free-text fields (`name`, `location`,
/// `occupation`) are dropped.
pub fn build_customer_profiles(
    customers: &[Customer],
    window: &HashMap<CustomerId, Vec<Transaction>>,
    category_by_pid: &HashMap<ProductId, String>,
) -> Result<FeatureSpace<CustomerId>> {
    if customers.is_empty() {
        return Err(RecommendError::EmptyCustomerBase);
    }

    let genders: Vec<&str> = customers
        .iter()
        .map(|c| c.gender.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let educations: Vec<&str> = customers
        .iter()
        .map(|c| c.education.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let categories: Vec<&str> = category_by_pid
        .values()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let gender_index: HashMap<&str, usize> =
        genders.iter().enumerate().map(|(i, g)| (*g, i)).collect();
    let education_index: HashMap<&str, usize> =
        educations.iter().enumerate().map(|(i, e)| (*e, i)).collect();
    let category_index: HashMap<&str, usize> =
        categories.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    // Total spend per (customer, category) inside the window. Every row is
    // checked against the catalog: a transaction pointing at a product the
    // snapshot does not know is an inconsistency, not a zero.
    let mut spend: HashMap<(CustomerId, usize), f64> = HashMap::new();
    for (cid, transactions) in window {
        for tx in transactions {
            let category = category_by_pid
                .get(&tx.pid)
                .ok_or(RecommendError::UnknownProduct { pid: tx.pid })?;
            *spend
                .entry((*cid, category_index[category.as_str()]))
                .or_insert(0.0) += tx.amount;
        }
    }

    let spend_base = genders.len() + educations.len();
    let numeric_base = spend_base + categories.len();
    let width = numeric_base + 2;
    let mut matrix = Array2::zeros((customers.len(), width));
    for (row, customer) in customers.iter().enumerate() {
        matrix[[row, gender_index[customer.gender.as_str()]]] = 1.0;
        matrix[[row, genders.len() + education_index[customer.education.as_str()]]] = 1.0;
        for col in 0..categories.len() {
            if let Some(amount) = spend.get(&(customer.cid, col)) {
                matrix[[row, spend_base + col]] = *amount;
            }
        }
        matrix[[row, numeric_base]] = customer.age as f64;
        matrix[[row, numeric_base + 1]] = customer.annual_income;
    }

    let numeric_columns: Vec<usize> = (spend_base..width).collect();
    standardize_columns(&mut matrix, &numeric_columns);

    debug!(
        "Built customer profile space: {} customers, {} spend categories, {} columns",
        customers.len(),
        categories.len(),
        width
    );

    Ok(FeatureSpace {
        labels: customers.iter().map(|c| c.cid).collect(),
        matrix,
    })
}
