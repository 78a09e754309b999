//! Metric model: static field tables and the per-scrape families built from them.
//!
//! A [`MetricTable`] is declared once per upstream record type. On every
//! scrape it produces a fresh [`FamilySet`] holding one empty
//! [`MetricFamily`] per declared field, so the exposed catalogue is the
//! same whether or not the upstream returned any data.

use serde_json::Number;

use crate::error::{Error, Result};

/// A numeric sample value.
///
/// Integral upstream numbers keep their integer representation so they
/// render without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl MetricValue {
    /// Convert a JSON number.
    pub fn from_number(number: &Number) -> Self {
        match number.as_i64() {
            Some(v) => MetricValue::Int(v),
            // u64 above i64::MAX and real numbers
            None => MetricValue::Float(number.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

/// One monitored upstream field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the upstream record (e.g. `CapacityTotal`).
    pub field: &'static str,
    /// Help text of the exported metric.
    pub help: &'static str,
}

impl FieldSpec {
    pub const fn new(field: &'static str, help: &'static str) -> Self {
        Self { field, help }
    }
}

/// Description of one exported metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSpec {
    /// Full exported name (`<namespace><snake_case_field>`).
    pub name: String,
    /// Help text.
    pub help: &'static str,
    /// Declared label names, in order.
    pub labels: &'static [&'static str],
}

/// A fixed table of fields exported under a common namespace and label set.
#[derive(Debug, Clone, Copy)]
pub struct MetricTable {
    namespace: &'static str,
    labels: &'static [&'static str],
    fields: &'static [FieldSpec],
}

impl MetricTable {
    /// Declare a table. `namespace` includes its trailing underscore.
    pub const fn new(
        namespace: &'static str,
        labels: &'static [&'static str],
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            namespace,
            labels,
            fields,
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// The metric spec exported for `field`.
    pub fn spec(&self, field: &FieldSpec) -> MetricSpec {
        MetricSpec {
            name: format!("{}{}", self.namespace, snake_case(field.field)),
            help: field.help,
            labels: self.labels,
        }
    }

    /// One empty family per declared field, in table order.
    pub fn empty_families(&self) -> FamilySet {
        FamilySet {
            families: self
                .fields
                .iter()
                .map(|field| (field.field, MetricFamily::new(self.spec(field))))
                .collect(),
        }
    }
}

/// A single labeled observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Label values, positionally matching the family's label names.
    pub labels: Vec<String>,
    pub value: MetricValue,
}

/// All samples of one metric for one scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub spec: MetricSpec,
    pub samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn new(spec: MetricSpec) -> Self {
        Self {
            spec,
            samples: Vec::new(),
        }
    }

    /// Add a sample. The label values must match the declared label names.
    pub fn add_sample(&mut self, labels: Vec<String>, value: MetricValue) -> Result<()> {
        if labels.len() != self.spec.labels.len() {
            return Err(Error::LabelCardinality {
                metric: self.spec.name.clone(),
                expected: self.spec.labels.len(),
                actual: labels.len(),
            });
        }
        self.samples.push(Sample { labels, value });
        Ok(())
    }

    /// Label name/value pairs of a sample.
    pub fn label_pairs(&self, sample: &Sample) -> Vec<(String, String)> {
        self.spec
            .labels
            .iter()
            .zip(&sample.labels)
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

/// The families of one table for one scrape, addressable by source field.
#[derive(Debug, Clone)]
pub struct FamilySet {
    families: Vec<(&'static str, MetricFamily)>,
}

impl FamilySet {
    /// Record a value for `field`.
    pub fn add(&mut self, field: &str, labels: Vec<String>, value: MetricValue) -> Result<()> {
        self.families
            .iter_mut()
            .find(|(name, _)| *name == field)
            .ok_or_else(|| Error::UnknownMetric(field.to_string()))?
            .1
            .add_sample(labels, value)
    }

    pub fn get(&self, field: &str) -> Option<&MetricFamily> {
        self.families
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, family)| family)
    }

    /// Total number of samples across all families.
    pub fn sample_count(&self) -> usize {
        self.families.iter().map(|(_, f)| f.samples.len()).sum()
    }

    pub fn into_families(self) -> Vec<MetricFamily> {
        self.families.into_iter().map(|(_, family)| family).collect()
    }
}

/// Convert a camel-case upstream field name to snake case.
///
/// An underscore goes between a lowercase letter or digit and a following
/// uppercase letter; runs of capitals stay together (`NonDFS` -> `non_dfs`).
pub fn snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if let Some(p) = prev
            && c.is_ascii_uppercase()
            && (p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    result
}
