pub mod client;

pub use client::DnsApiClient;
