pub mod notes;
pub mod tags;
