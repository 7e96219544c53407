use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notes::tag::Tag;

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag>;

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>>;

    /// Tags owned by `owner_id` whose id is in `ids` or whose name is in
    /// `names`. Each tag appears once even when it matches both ways.
    async fn find_own_tags(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        names: &[String],
    ) -> anyhow::Result<Vec<Tag>>;
}
