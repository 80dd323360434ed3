// Subgraph integration module
// Queries the nft-rewarder indexing service over GraphQL

pub mod client;
pub mod types;

pub use client::SubgraphClient;
pub use types::*;
