pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod watermark;

#[cfg(test)]
pub(crate) mod memory;
