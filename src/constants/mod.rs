pub mod defaults;
pub mod schemes;

pub use schemes::{contains_proxy_scheme, PROXY_SCHEMES};
