pub mod dedup;
pub mod manifest;
pub mod merge;
pub mod subdomains;
pub mod yaml;

pub use dedup::{dedup_lines, render_lines};
pub use manifest::{build_manifest, render_manifest, write_manifest, OutputLocator};
pub use merge::{merge_bundles, NameRegistry};
pub use yaml::ClashYamlOutput;
