use std::sync::Arc;

use crate::application::access::{
    CredentialResolver, SessionCredentialResolver, TokenCredentialResolver,
};
use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::ports::token_codec::TokenCodec;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::{AuthMode, Config};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    note_repo: Arc<dyn NoteRepository>,
    tag_repo: Arc<dyn TagRepository>,
    tagging_repo: Arc<dyn TaggingRepository>,
    session_repo: Arc<dyn SessionRepository>,
    token_codec: Arc<dyn TokenCodec>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        note_repo: Arc<dyn NoteRepository>,
        tag_repo: Arc<dyn TagRepository>,
        tagging_repo: Arc<dyn TaggingRepository>,
        session_repo: Arc<dyn SessionRepository>,
        token_codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            user_repo,
            note_repo,
            tag_repo,
            tagging_repo,
            session_repo,
            token_codec,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn note_repo(&self) -> Arc<dyn NoteRepository> {
        self.services.note_repo.clone()
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn tagging_repo(&self) -> Arc<dyn TaggingRepository> {
        self.services.tagging_repo.clone()
    }

    pub fn session_repo(&self) -> Arc<dyn SessionRepository> {
        self.services.session_repo.clone()
    }

    pub fn token_codec(&self) -> Arc<dyn TokenCodec> {
        self.services.token_codec.clone()
    }

    /// Resolver for the configured auth mode.
    pub fn credential_resolver(&self) -> Arc<dyn CredentialResolver> {
        match self.cfg.auth_mode {
            AuthMode::Token => Arc::new(TokenCredentialResolver::new(
                self.token_codec(),
                self.user_repo(),
            )),
            AuthMode::Session => Arc::new(SessionCredentialResolver::new(self.session_repo())),
        }
    }
}
