pub mod notes;
pub mod viewer;
