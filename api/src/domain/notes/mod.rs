pub mod note;
pub mod tag;
