use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::viewer::Viewer;

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    pub async fn execute(&self, viewer: Option<&Viewer>) -> anyhow::Result<Option<UserRow>> {
        match viewer.and_then(Viewer::id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}
