pub mod clash;

pub use clash::ClashYamlOutput;
