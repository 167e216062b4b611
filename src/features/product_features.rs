// src/features/product_features.rs

use log::debug;
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};

use super::FeatureSpace;
use crate::error::{RecommendError, Result};
use crate::models::{Business, BusinessId, Product, ProductId};
use crate::utils::matrix::standardize_columns;

/// Builds one numeric row per product: one-hot business category followed
/// by standardized popularity, price, revenue, and employee count.
///
/// Identity and free-text fields (`pid`, `bid`, names, `geo_demand`) stay
/// out of the vector and live on as row labels. The category axis is the
/// sorted set of distinct categories in the current snapshot, so the
/// encoding is deterministic for a fixed catalog.
pub fn build_product_features(
    products: &[Product],
    businesses: &[Business],
) -> Result<FeatureSpace<ProductId>> {
    if products.is_empty() {
        return Err(RecommendError::EmptyCatalog);
    }

    let business_by_id: HashMap<BusinessId, &Business> =
        businesses.iter().map(|b| (b.bid, b)).collect();

    // Join each product to its owning business; a dangling bid is a
    // snapshot inconsistency, not a joinable row.
    let mut joined = Vec::with_capacity(products.len());
    for product in products {
        let business = business_by_id
            .get(&product.bid)
            .ok_or(RecommendError::UnknownBusiness {
                pid: product.pid,
                bid: product.bid,
            })?;
        joined.push((product, *business));
    }

    let categories: Vec<&str> = joined
        .iter()
        .map(|(_, business)| business.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| (*category, i))
        .collect();

    let numeric_base = categories.len();
    let width = numeric_base + 4;
    let mut matrix = Array2::zeros((products.len(), width));
    for (row, (product, business)) in joined.iter().enumerate() {
        matrix[[row, category_index[business.category.as_str()]]] = 1.0;
        matrix[[row, numeric_base]] = product.popularity;
        matrix[[row, numeric_base + 1]] = product.price;
        matrix[[row, numeric_base + 2]] = business.revenue;
        matrix[[row, numeric_base + 3]] = business.num_employees as f64;
    }

    let numeric_columns: Vec<usize> = (numeric_base..width).collect();
    standardize_columns(&mut matrix, &numeric_columns);

    debug!(
        "Built product feature space: {} products, {} categories, {} columns",
        products.len(),
        categories.len(),
        width
    );

    Ok(FeatureSpace {
        labels: products.iter().map(|p| p.pid).collect(),
        matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(bid: i64, category: &str, revenue: f64, num_employees: i64) -> Business {
        Business {
            bid: BusinessId(bid),
            category: category.to_string(),
            business_name: format!("Business {}", bid),
            revenue,
            num_employees,
        }
    }

    fn product(pid: i64, bid: i64, popularity: f64, price: f64) -> Product {
        Product {
            pid: ProductId(pid),
            bid: BusinessId(bid),
            product_name: format!("Product {}", pid),
            popularity,
            price,
            geo_demand: "USA".to_string(),
        }
    }

    #[test]
    fn test_empty_catalog_errors() {
        let err = build_product_features(&[], &[]).unwrap_err();
        assert!(matches!(err, RecommendError::EmptyCatalog));
    }

    #[test]
    fn test_unknown_business_errors() {
        let products = vec![product(101, 9, 5.0, 10.0)];
        let businesses = vec![business(1, "Tech", 1000.0, 10)];
        let err = build_product_features(&products, &businesses).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::UnknownBusiness {
                pid: ProductId(101),
                bid: BusinessId(9)
            }
        ));
    }

    #[test]
    fn test_one_hot_and_dimensions() {
        let products = vec![product(101, 1, 10.0, 100.0), product(102, 2, 20.0, 200.0)];
        let businesses = vec![
            business(1, "Tech", 1000.0, 10),
            business(2, "Retail", 2000.0, 20),
        ];
        let space = build_product_features(&products, &businesses).unwrap();

        assert_eq!(space.labels, vec![ProductId(101), ProductId(102)]);
        // 2 category columns + 4 numeric columns
        assert_eq!(space.matrix.dim(), (2, 6));

        // sorted category axis: Retail=0, Tech=1
        assert_eq!(space.matrix[[0, 0]], 0.0);
        assert_eq!(space.matrix[[0, 1]], 1.0);
        assert_eq!(space.matrix[[1, 0]], 1.0);
        assert_eq!(space.matrix[[1, 1]], 0.0);
    }

    #[test]
    fn test_numeric_columns_are_standardized() {
        let products = vec![
            product(101, 1, 10.0, 100.0),
            product(102, 1, 20.0, 200.0),
            product(103, 1, 30.0, 300.0),
        ];
        let businesses = vec![business(1, "Tech", 1000.0, 10)];
        let space = build_product_features(&products, &businesses).unwrap();

        // popularity column lives right after the single category column
        let popularity: Vec<f64> = space.matrix.column(1).to_vec();
        let mean: f64 = popularity.iter().sum::<f64>() / popularity.len() as f64;
        assert!(mean.abs() < 1e-12);

        // shared-business columns have zero variance and stay centered at 0
        assert!(space.matrix.column(3).iter().all(|v| v.abs() < 1e-12));
        assert!(space.matrix.column(4).iter().all(|v| v.abs() < 1e-12));
    }
}
