/// Rewarder Mock Server Library
///
/// This crate provides both a standalone binary and library components
/// for mocking the nft-rewarder subgraph and a JSON-RPC wallet node.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use server::{create_router, run_server};
pub use state::{ClaimBehavior, MockState, SentTransaction};
pub use types::*;
