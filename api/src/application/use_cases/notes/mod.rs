pub mod create_note;
pub mod get_note;
pub mod tag_note;
