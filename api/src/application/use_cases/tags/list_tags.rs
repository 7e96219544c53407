use crate::application::ports::tag_repository::TagRepository;
use crate::domain::notes::tag::Tag;
use crate::domain::viewer::Viewer;

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self, viewer: Option<&Viewer>) -> anyhow::Result<Vec<Tag>> {
        match viewer.and_then(Viewer::id) {
            Some(owner_id) => self.repo.list_for_user(owner_id).await,
            None => Ok(Vec::new()),
        }
    }
}
