pub mod note_repository;
pub mod session_repository;
pub mod tag_repository;
pub mod tagging_repository;
pub mod token_codec;
pub mod user_repository;
