mod assistant_service;

pub use assistant_service::{build_messages, AssistantService, FALLBACK_REPLY};
