use crate::application::ports::session_repository::SessionRepository;

pub struct Logout<'a, S: SessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: SessionRepository + ?Sized> Logout<'a, S> {
    pub async fn execute(&self, handle: Option<&str>) -> anyhow::Result<()> {
        match handle.map(str::trim).filter(|h| !h.is_empty()) {
            Some(h) => self.sessions.delete(h).await,
            None => Ok(()),
        }
    }
}
