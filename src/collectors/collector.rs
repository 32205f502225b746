use crate::{
    error::SensorError,
    report::Channel,
};
use std::{
    future::Future,
    pin::Pin,
};

/// Trait for collecting one metric family.
pub trait Collector {
    /// Fetch and reduce this collector's metric family. The summary is
    /// stored internally; read it back with [`Collector::channels`].
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<(), SensorError>> + Send + '_>>;

    /// Channels for the PRTG report, in their documented order. Empty
    /// before a successful [`Collector::collect`].
    fn channels(&self) -> Vec<Channel>;

    /// Get the collected data as JSON, for diagnostics.
    fn summary(&self) -> serde_json::Value;

    /// Get the name of this collector.
    fn name(&self) -> &'static str;
}
