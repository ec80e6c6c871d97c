//! Mutual information between quasi-identifier and sensitive columns.

use crate::data::{Table, Value};
use crate::error::Result;
use std::collections::HashMap;

/// Ordinal codes for a column: each distinct value gets the next
/// integer in first-occurrence order. The code order carries no meaning
/// for mutual information.
fn ordinal_codes(values: &[Value]) -> (Vec<usize>, usize) {
    let mut index: HashMap<&Value, usize> = HashMap::new();
    let mut codes = Vec::with_capacity(values.len());
    for value in values {
        let next = index.len();
        let code = *index.entry(value).or_insert(next);
        codes.push(code);
    }
    (codes, index.len())
}

/// Mutual information in nats between two columns.
pub fn mutual_information_pair(table: &Table, a: &str, b: &str) -> Result<f64> {
    let (x, nx) = ordinal_codes(table.column(a)?);
    let (y, ny) = ordinal_codes(table.column(b)?);
    let n = x.len() as f64;

    let mut joint: HashMap<(usize, usize), usize> = HashMap::new();
    let mut marginal_x = vec![0usize; nx];
    let mut marginal_y = vec![0usize; ny];
    for (&xi, &yi) in x.iter().zip(&y) {
        *joint.entry((xi, yi)).or_insert(0) += 1;
        marginal_x[xi] += 1;
        marginal_y[yi] += 1;
    }

    let mut mi = 0.0;
    for (&(xi, yi), &count) in &joint {
        let pxy = count as f64 / n;
        let px = marginal_x[xi] as f64 / n;
        let py = marginal_y[yi] as f64 / n;
        mi += pxy * (pxy / (px * py)).ln();
    }
    Ok(mi)
}

/// Average mutual information in nats over every (quasi-identifier,
/// sensitive) column pair. Returns 0 when either list is empty.
pub fn mutual_information(table: &Table, qids: &[String], sas: &[String]) -> Result<f64> {
    if qids.is_empty() || sas.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for qid in qids {
        for sa in sas {
            total += mutual_information_pair(table, qid, sa)?;
        }
    }
    Ok(total / (qids.len() * sas.len()) as f64)
}
