use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Not unique per owner.
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A caller-supplied string naming a tag either by id or by name.
///
/// Every token is eligible to match by name. Tokens shaped like a canonical
/// UUID v4 additionally carry the parsed id so they can match by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub raw: String,
    pub id: Option<Uuid>,
}
