// src/utils/matrix.rs

use ndarray::{Array2, ArrayView1};

/// Cosine similarity between two feature rows.
///
/// A zero-magnitude row compares as 0.0 against everything, and any
/// NaN/infinite result collapses to 0.0 rather than poisoning the matrix.
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let dot = a.dot(&b);
    let mag_a = a.dot(&a).sqrt();
    let mag_b = b.dot(&b).sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (mag_a * mag_b);
    if similarity.is_nan() || similarity.is_infinite() {
        return 0.0;
    }

    // Accumulated rounding can push a near-identical pair past 1.0.
    similarity.clamp(-1.0, 1.0)
}

/// Rescales each listed column to zero mean and unit variance over the
/// rows currently in the matrix. A zero-variance column is centered only.
///
/// Scaling parameters are recomputed from scratch on every call; nothing
/// is carried over between snapshots.
pub fn standardize_columns(matrix: &mut Array2<f64>, columns: &[usize]) {
    let rows = matrix.nrows();
    if rows == 0 {
        return;
    }

    for &col in columns {
        let mut column = matrix.column_mut(col);
        let mean = column.sum() / rows as f64;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / rows as f64;
        let std_dev = variance.sqrt();
        let scale = if std_dev > 0.0 { std_dev } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }
}
