//! AI adapters - generation providers and the resilient gateway client.
//!
//! ## Available Adapters
//!
//! - `AIGatewayClient` - cache-then-network wrapper implementing `AiGateway`
//! - `RetryPolicy` - shared backoff/attempt policy injected into the gateway
//! - `GeminiProvider` - Google generative-language API
//! - `MockTextGenerator` - scripted mock for testing

mod gateway;
mod gemini_provider;
mod mock_provider;
mod retry;

pub use gateway::AIGatewayClient;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockFailure, MockTextGenerator};
pub use retry::RetryPolicy;
