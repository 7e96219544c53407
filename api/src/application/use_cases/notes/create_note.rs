use crate::application::errors::ScopedError;
use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;
use crate::domain::viewer::Viewer;

pub struct CreateNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> CreateNote<'a, R> {
    pub async fn execute(
        &self,
        viewer: Option<&Viewer>,
        title: &str,
        body: Option<&str>,
    ) -> Result<Note, ScopedError> {
        let owner_id = viewer
            .and_then(Viewer::id)
            .ok_or(ScopedError::Unauthorized)?;
        let title = title.trim();
        let title = if title.is_empty() { "Untitled" } else { title };
        self.repo
            .create_for_user(owner_id, title, body.unwrap_or_default())
            .await
            .map_err(ScopedError::Repository)
    }
}
