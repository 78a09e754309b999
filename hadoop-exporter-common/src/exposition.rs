//! Per-scrape snapshot and its Prometheus exposition.

use prometheus_client::collector::Collector;
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{DescriptorEncoder, EncodeMetric};
use prometheus_client::metrics::MetricType;
use prometheus_client::metrics::gauge::ConstGauge;
use prometheus_client::registry::Registry;

use crate::error::Result;
use crate::metric::{MetricFamily, MetricValue};

/// Content type of the text exposition produced by [`Snapshot::encode_text`].
pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// All metric families produced by one collection pass.
///
/// A snapshot is built fresh for each scrape and dropped once encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    families: Vec<MetricFamily>,
}

impl Snapshot {
    pub fn new(families: Vec<MetricFamily>) -> Self {
        Self { families }
    }

    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    pub fn family(&self, name: &str) -> Option<&MetricFamily> {
        self.families.iter().find(|f| f.spec.name == name)
    }

    pub fn extend(&mut self, families: impl IntoIterator<Item = MetricFamily>) {
        self.families.extend(families);
    }

    pub fn sample_count(&self) -> usize {
        self.families.iter().map(|f| f.samples.len()).sum()
    }

    /// Encode the snapshot in the text exposition format.
    pub fn encode_text(self) -> Result<String> {
        let mut registry = Registry::default();
        registry.register_collector(Box::new(self));

        let mut body = String::new();
        encode(&mut body, &registry)?;
        Ok(body)
    }
}

impl Collector for Snapshot {
    fn encode(&self, mut encoder: DescriptorEncoder) -> std::result::Result<(), std::fmt::Error> {
        for family in &self.families {
            let mut metric_encoder = encoder.encode_descriptor(
                &family.spec.name,
                family.spec.help,
                None,
                MetricType::Gauge,
            )?;

            for sample in &family.samples {
                let labels = family.label_pairs(sample);
                let sample_encoder = metric_encoder.encode_family(&labels)?;
                match sample.value {
                    MetricValue::Int(v) => ConstGauge::new(v).encode(sample_encoder)?,
                    MetricValue::Float(v) => ConstGauge::new(v).encode(sample_encoder)?,
                }
            }
        }
        Ok(())
    }
}
