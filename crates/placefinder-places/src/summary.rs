use serde::Serialize;

use crate::assemble::DisplayTable;

/// Headline numbers shown above the result table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResultSummary {
    pub count: usize,
    pub nearest_km: Option<f64>,
    pub median_km: Option<f64>,
}

impl ResultSummary {
    #[must_use]
    pub fn from_table(table: &DisplayTable) -> Self {
        let mut distances: Vec<f64> = table.rows.iter().map(|row| row.distance_km).collect();
        distances.sort_by(f64::total_cmp);

        Self {
            count: distances.len(),
            nearest_km: distances.first().copied(),
            median_km: median(&distances),
        }
    }
}

/// Median of an ascending slice; the mean of the middle pair for even lengths.
fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}
