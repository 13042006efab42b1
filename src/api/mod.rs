pub mod client;
pub mod schemas;

pub use client::ApiClient;
