use crate::domain::notes::tag::Tag;

/// A tag paired with its zero-based position in a note's tag collection.
#[derive(Debug, Clone)]
pub struct TagEdgeDto {
    pub tag: Tag,
    pub position: usize,
}
