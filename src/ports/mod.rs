//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - outbound port to the external generation API
//! - `AiGateway` - resilient, cached generation as consumed by the orchestrator
//! - `ResponseCache` - fingerprint-keyed cache of AI responses

mod ai_gateway;
mod response_cache;
mod text_generator;

pub use ai_gateway::{AiGateway, AIRequest, AIResponse, ChatTurn, ChatRole, Fingerprint, GatewayError};
pub use response_cache::{CacheError, ResponseCache};
pub use text_generator::{GenerationOutput, GenerationRequest, ProviderError, TextGenerator, TokenUsage};
