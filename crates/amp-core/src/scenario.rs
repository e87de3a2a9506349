//! # Scenario Records
//!
//! One record per simulated step carrying price, return, volatility and the
//! amplification factor together, so no series can drift out of alignment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AmpError, AmpResult};

/// State of the market at one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Position in the simulated horizon
    pub index: usize,
    pub date: NaiveDate,
    pub price: f64,
    /// Fractional price change applied after this step
    #[serde(rename = "return")]
    pub ret: f64,
    /// EWMA standard deviation
    pub volatility: f64,
    pub amp_factor: f64,
}

/// Ordered, immutable sequence of scenario records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario {
    records: Vec<ScenarioRecord>,
}

impl Scenario {
    pub fn new(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    /// Record at `index`, or an out-of-range error
    pub fn get(&self, index: usize) -> AmpResult<&ScenarioRecord> {
        self.records.get(index).ok_or(AmpError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.ret).collect()
    }

    pub fn volatilities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.volatility).collect()
    }

    pub fn amp_factors(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.amp_factor).collect()
    }

    /// Index of the most volatile step (first one on ties)
    pub fn max_volatility_index(&self) -> Option<usize> {
        self.records
            .iter()
            .enumerate()
            .reduce(|best, cur| if cur.1.volatility > best.1.volatility { cur } else { best })
            .map(|(i, _)| i)
    }

    /// Index of the calmest step (first one on ties)
    pub fn min_volatility_index(&self) -> Option<usize> {
        self.records
            .iter()
            .enumerate()
            .reduce(|best, cur| if cur.1.volatility < best.1.volatility { cur } else { best })
            .map(|(i, _)| i)
    }

    /// Records ordered by ascending volatility; equal volatilities keep time order
    pub fn sorted_by_volatility(&self) -> Vec<&ScenarioRecord> {
        let mut sorted: Vec<&ScenarioRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.volatility.total_cmp(&b.volatility));
        sorted
    }
}

impl<'a> IntoIterator for &'a Scenario {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<ScenarioRecord>> for Scenario {
    fn from(records: Vec<ScenarioRecord>) -> Self {
        Self::new(records)
    }
}
