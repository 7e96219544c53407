pub mod note_repository_sqlx;
pub mod session_repository_sqlx;
pub mod tag_repository_sqlx;
pub mod tagging_repository_sqlx;
pub mod user_repository_sqlx;
