mod chat_dto;

pub use chat_dto::{ChatFailureDto, ChatMessageDto, ChatRequestDto, ChatResponseDto, ChatRole};
