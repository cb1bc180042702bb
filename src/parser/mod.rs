pub mod classifier;
pub mod sources;
pub mod subdomain;

pub use classifier::{classify, Classifier, ContentDetector, DetectorSlot};
pub use sources::{parse_sources, read_sources, SourceEntry};
pub use subdomain::{extract_subdomains, merge_subdomains};
