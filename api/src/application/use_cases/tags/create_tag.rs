use crate::application::errors::ScopedError;
use crate::application::ports::tag_repository::TagRepository;
use crate::domain::notes::tag::Tag;
use crate::domain::viewer::Viewer;

pub struct CreateTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> CreateTag<'a, R> {
    pub async fn execute(&self, viewer: Option<&Viewer>, name: &str) -> Result<Tag, ScopedError> {
        let owner_id = viewer
            .and_then(Viewer::id)
            .ok_or(ScopedError::Unauthorized)?;
        self.repo
            .create_for_user(owner_id, name)
            .await
            .map_err(ScopedError::Repository)
    }
}
