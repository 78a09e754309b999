//! The seam between the HTTP layer and the per-daemon collectors.

use std::future::Future;

use hadoop_exporter_common::{Result, Snapshot};

/// A source of metric snapshots.
///
/// `collect` runs one complete, independent collection pass: it fetches
/// from the upstream daemon and maps the response into a fresh
/// [`Snapshot`]. Implementations hold no state between passes.
pub trait Exporter: Send + Sync + 'static {
    /// Short name used in logs (e.g. "namenode").
    fn name(&self) -> &str;

    /// Run one collection pass.
    fn collect(&self) -> impl Future<Output = Result<Snapshot>> + Send;
}
