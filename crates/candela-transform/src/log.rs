//! Logarithmic price and log-return columns.

use candela_types::{DerivedColumn, OhlcvTable};

use crate::TransformError;

/// Reads `price_col` and checks every defined value is positive.
fn positive_prices(table: &OhlcvTable, price_col: &str) -> Result<Vec<Option<f64>>, TransformError> {
    let prices = table
        .values(price_col)
        .ok_or_else(|| TransformError::UnknownColumn(price_col.to_string()))?;

    if let Some((row, value)) = prices
        .iter()
        .enumerate()
        .find_map(|(row, p)| p.filter(|v| *v <= 0.0).map(|v| (row, v)))
    {
        return Err(TransformError::NonPositive {
            column: price_col.to_string(),
            row,
            value,
        });
    }
    Ok(prices)
}

/// Returns a copy of `table` with the natural log of `price_col` appended.
///
/// The new column is named `out_col`, or `log_{price_col}` when `None`; an
/// existing derived column of that name is replaced. Undefined input values
/// stay undefined.
///
/// # Errors
///
/// Returns [`TransformError::UnknownColumn`] if `price_col` does not exist and
/// [`TransformError::NonPositive`] if any price is zero or negative.
///
/// # Example
///
/// ```
/// use candela_transform::compute_logarithmic_price;
/// use candela_types::{Ohlcv, OhlcvTable};
/// use chrono::Utc;
///
/// let table = OhlcvTable::new(vec![Ohlcv::new(Utc::now(), 1.0, 1.0, 1.0, 1.0, 0.0)]);
/// let table = compute_logarithmic_price(&table, "close", None).unwrap();
/// assert_eq!(table.values("log_close"), Some(vec![Some(0.0)]));
/// ```
pub fn compute_logarithmic_price(
    table: &OhlcvTable,
    price_col: &str,
    out_col: Option<&str>,
) -> Result<OhlcvTable, TransformError> {
    let prices = positive_prices(table, price_col)?;
    let name = out_col.map_or_else(|| format!("log_{price_col}"), str::to_string);

    let values = prices.into_iter().map(|p| p.map(f64::ln)).collect();
    Ok(table.clone().with_column(DerivedColumn::new(name, values))?)
}

/// Returns a copy of `table` with the log returns of `price_col` appended.
///
/// Row `t` holds `ln(p[t]) - ln(p[t-1])`. The first row, and any row whose
/// own or previous price is undefined, is `None`. The new column is named
/// `out_col`, or `log_return_{price_col}` when `None`.
///
/// # Errors
///
/// Returns [`TransformError::UnknownColumn`] if `price_col` does not exist and
/// [`TransformError::NonPositive`] if any price is zero or negative.
pub fn compute_log_returns(
    table: &OhlcvTable,
    price_col: &str,
    out_col: Option<&str>,
) -> Result<OhlcvTable, TransformError> {
    let prices = positive_prices(table, price_col)?;
    let name = out_col.map_or_else(|| format!("log_return_{price_col}"), str::to_string);

    let logs: Vec<Option<f64>> = prices.into_iter().map(|p| p.map(f64::ln)).collect();
    let values = std::iter::once(None)
        .chain(logs.windows(2).map(|w| match (w[0], w[1]) {
            (Some(prev), Some(curr)) => Some(curr - prev),
            _ => None,
        }))
        .take(logs.len())
        .collect();

    Ok(table.clone().with_column(DerivedColumn::new(name, values))?)
}
