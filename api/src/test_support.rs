//! In-memory port implementations for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::ports::user_repository::{NewUser, UserRepository, UserRow};
use crate::domain::notes::note::Note;
use crate::domain::notes::tag::Tag;

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    users: Vec<UserRow>,
    notes: Vec<Note>,
    tags: Vec<Tag>,
    note_tags: Vec<(Uuid, Uuid)>,
    sessions: HashMap<String, (Uuid, chrono::DateTime<Utc>)>,
}

fn sort_tags(tags: &mut [Tag]) {
    tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

impl MemoryStore {
    pub fn add_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().users.push(UserRow {
            id,
            email: format!("{name}@example.test"),
            name: name.to_string(),
            password_hash: None,
        });
        id
    }

    pub fn add_tag(&self, owner_id: Uuid, name: &str) -> Tag {
        self.add_tag_with_id(Uuid::new_v4(), owner_id, name)
    }

    pub fn add_tag_with_id(&self, id: Uuid, owner_id: Uuid, name: &str) -> Tag {
        let tag = Tag {
            id,
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().tags.push(tag.clone());
        tag
    }

    pub fn add_note(&self, owner_id: Uuid, title: &str) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.state.lock().unwrap().notes.push(Note {
            id,
            owner_id,
            title: title.to_string(),
            body: String::new(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn attach(&self, note_id: Uuid, tag_id: Uuid) {
        self.state.lock().unwrap().note_tags.push((note_id, tag_id));
    }

    pub fn note_tag_ids(&self, note_id: Uuid) -> Vec<Uuid> {
        self.state
            .lock()
            .unwrap()
            .current_tags(note_id)
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    pub fn tag_count(&self) -> usize {
        self.state.lock().unwrap().tags.len()
    }
}

impl State {
    fn current_tags(&self, note_id: Uuid) -> Vec<Tag> {
        let mut out: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| self.note_tags.contains(&(note_id, t.id)))
            .cloned()
            .collect();
        sort_tags(&mut out);
        out
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<UserRow> {
        let mut st = self.state.lock().unwrap();
        if st.users.iter().any(|u| u.email == user.email) {
            anyhow::bail!("email taken");
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: user.email.to_string(),
            name: user.name.to_string(),
            password_hash: Some(user.password_hash.to_string()),
        };
        st.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().notes.push(note.clone());
        Ok(note)
    }

    async fn find_owned(&self, owner_id: Uuid, note_id: Uuid) -> anyhow::Result<Option<Note>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .notes
            .iter()
            .find(|n| n.id == note_id && n.owner_id == owner_id)
            .cloned())
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Note>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .notes
            .iter()
            .filter(|n| n.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        Ok(self.add_tag(owner_id, name))
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Tag> = st
            .tags
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        sort_tags(&mut out);
        Ok(out)
    }

    async fn find_own_tags(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        names: &[String],
    ) -> anyhow::Result<Vec<Tag>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Tag> = st
            .tags
            .iter()
            .filter(|t| t.owner_id == owner_id && (ids.contains(&t.id) || names.contains(&t.name)))
            .cloned()
            .collect();
        sort_tags(&mut out);
        Ok(out)
    }
}

#[async_trait]
impl TaggingRepository for MemoryStore {
    async fn replace_note_tags(&self, note_id: Uuid, tag_ids: &[Uuid]) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        st.note_tags.retain(|(n, _)| *n != note_id);
        st.note_tags.extend(tag_ids.iter().map(|t| (note_id, *t)));
        Ok(())
    }

    async fn list_note_tags(&self, note_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        Ok(self.state.lock().unwrap().current_tags(note_id))
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, user_id: Uuid, ttl_secs: i64) -> anyhow::Result<String> {
        let handle = Uuid::new_v4().simple().to_string();
        let expires = Utc::now() + Duration::seconds(ttl_secs);
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(handle.clone(), (user_id, expires));
        Ok(handle)
    }

    async fn find_user(&self, handle: &str) -> anyhow::Result<Option<UserRow>> {
        let st = self.state.lock().unwrap();
        let Some((user_id, expires)) = st.sessions.get(handle) else {
            return Ok(None);
        };
        if *expires <= Utc::now() {
            return Ok(None);
        }
        Ok(st.users.iter().find(|u| u.id == *user_id).cloned())
    }

    async fn delete(&self, handle: &str) -> anyhow::Result<()> {
        self.state.lock().unwrap().sessions.remove(handle);
        Ok(())
    }

    async fn purge_expired(&self) -> anyhow::Result<u64> {
        let mut st = self.state.lock().unwrap();
        let before = st.sessions.len();
        let now = Utc::now();
        st.sessions.retain(|_, (_, expires)| *expires > now);
        Ok((before - st.sessions.len()) as u64)
    }
}
