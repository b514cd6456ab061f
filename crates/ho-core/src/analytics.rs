//! Analytics rollup over a slice of entries.
//!
//! Ages derive from date of birth and an injected `today`, so the same
//! entry set and date always produce the same report. Keyed series are
//! emitted in lexicographic key order; nothing here mutates entries.

use crate::models::entry::Entry;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Fixed age buckets used by every chart. Upper bounds are inclusive
/// except the open-ended last band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    A0To18,
    A19To30,
    A31To45,
    A46To60,
    A61Plus,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        Self::A0To18,
        Self::A19To30,
        Self::A31To45,
        Self::A46To60,
        Self::A61Plus,
    ];

    pub fn of(age: u32) -> Self {
        match age {
            0..=18 => Self::A0To18,
            19..=30 => Self::A19To30,
            31..=45 => Self::A31To45,
            46..=60 => Self::A46To60,
            _ => Self::A61Plus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::A0To18 => "0-18",
            Self::A19To30 => "19-30",
            Self::A31To45 => "31-45",
            Self::A46To60 => "46-60",
            Self::A61Plus => "61+",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::A0To18 => 0,
            Self::A19To30 => 1,
            Self::A31To45 => 2,
            Self::A46To60 => 3,
            Self::A61Plus => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BucketCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgeBandCount {
    pub age_band: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BpPoint {
    pub age: u32,
    pub systolic: f64,
    pub bp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeightPoint {
    pub age: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BandAverage {
    pub age_band: &'static str,
    pub count: u64,
    pub average_weight: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrossTabulations {
    pub diagnosis_by_gender: BTreeMap<String, BTreeMap<String, u64>>,
    pub treatment_by_age_band: BTreeMap<String, BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsReport {
    pub age_distribution: Vec<AgeBandCount>,
    pub gender_distribution: Vec<BucketCount>,
    pub marital_status_distribution: Vec<BucketCount>,
    pub religion_distribution: Vec<BucketCount>,
    pub diagnosis_distribution: Vec<BucketCount>,
    pub treatment_distribution: Vec<BucketCount>,
    pub bp_vs_age: Vec<BpPoint>,
    pub weight_vs_age: Vec<WeightPoint>,
    pub weight_by_age_band: Vec<BandAverage>,
    pub cross_tabulations: CrossTabulations,
}

/// Systolic reading: the number before the first `/`. A blood-pressure
/// string with no numeric prefix yields `None` and is dropped from the
/// BP-vs-age series.
pub fn parse_systolic(bp: &str) -> Option<f64> {
    bp.split('/').next()?.trim().parse::<f64>().ok()
}

/// Compute the full dashboard rollup for `entries` as of `today`.
pub fn rollup(entries: &[Entry], today: NaiveDate) -> AnalyticsReport {
    let ages: Vec<u32> = entries.iter().map(|e| e.age_on(today)).collect();

    let mut age_counts = [0u64; 5];
    for &age in &ages {
        age_counts[AgeBand::of(age).index()] += 1;
    }
    let age_distribution = AgeBand::ALL
        .iter()
        .zip(age_counts)
        .map(|(band, count)| AgeBandCount {
            age_band: band.label(),
            count,
        })
        .collect();

    let gender_distribution = distribution(entries.iter().map(|e| e.gender.as_str().to_string()));
    let marital_status_distribution =
        distribution(entries.iter().map(|e| e.marital_status.as_str().to_string()));
    let religion_distribution = distribution(entries.iter().map(|e| e.religion.clone()));
    let diagnosis_distribution = distribution(entries.iter().filter_map(|e| e.diagnosis.clone()));
    let treatment_distribution = distribution(entries.iter().filter_map(|e| e.treatment.clone()));

    let bp_vs_age = entries
        .iter()
        .zip(&ages)
        .filter_map(|(e, &age)| {
            let bp = e.bp.as_deref()?;
            let systolic = parse_systolic(bp)?;
            Some(BpPoint {
                age,
                systolic,
                bp: bp.to_string(),
            })
        })
        .collect();

    let weight_vs_age = entries
        .iter()
        .zip(&ages)
        .filter_map(|(e, &age)| {
            e.weight.map(|weight| WeightPoint { age, weight })
        })
        .collect();

    let mut band_weight_sums = [0.0f64; 5];
    let mut band_weight_counts = [0u64; 5];
    for (e, &age) in entries.iter().zip(&ages) {
        if let Some(weight) = e.weight {
            let idx = AgeBand::of(age).index();
            band_weight_sums[idx] += weight;
            band_weight_counts[idx] += 1;
        }
    }
    let weight_by_age_band = AgeBand::ALL
        .iter()
        .zip(band_weight_sums.iter().zip(band_weight_counts))
        .map(|(band, (&sum, count))| BandAverage {
            age_band: band.label(),
            count,
            // An empty band averages to 0, never NaN.
            average_weight: if count > 0 { sum / count as f64 } else { 0.0 },
        })
        .collect();

    let mut diagnosis_by_gender: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for e in entries {
        if let Some(ref diagnosis) = e.diagnosis {
            *diagnosis_by_gender
                .entry(diagnosis.clone())
                .or_default()
                .entry(e.gender.as_str().to_string())
                .or_default() += 1;
        }
    }

    let mut treatment_by_age_band: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for (e, &age) in entries.iter().zip(&ages) {
        if let Some(ref treatment) = e.treatment {
            *treatment_by_age_band
                .entry(treatment.clone())
                .or_default()
                .entry(AgeBand::of(age).label().to_string())
                .or_default() += 1;
        }
    }

    AnalyticsReport {
        age_distribution,
        gender_distribution,
        marital_status_distribution,
        religion_distribution,
        diagnosis_distribution,
        treatment_distribution,
        bp_vs_age,
        weight_vs_age,
        weight_by_age_band,
        cross_tabulations: CrossTabulations {
            diagnosis_by_gender,
            treatment_by_age_band,
        },
    }
}

fn distribution<I: Iterator<Item = String>>(keys: I) -> Vec<BucketCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| BucketCount { label, count })
        .collect()
}
