//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.

pub mod content;
pub mod manifest;
pub mod proxy_group_config;
pub mod zone;

pub use content::{Classification, ClassifiedContent, ContentKind};
pub use manifest::{Manifest, OutputFile, SourceReport, SourceStatus};
pub use proxy_group_config::{GroupMode, ProxyGroupConfig, ProxyGroupType};
pub use zone::{ApiEnvelope, DnsRecord, Zone};
