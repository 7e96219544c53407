use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::use_cases::auth::register::normalize_email;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` for an unknown email or a wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<UserRow>> {
        let Some(row) = self.repo.find_by_email(&normalize_email(&req.email)).await? else {
            return Ok(None);
        };
        let Some(hash) = row.password_hash.as_deref() else {
            return Ok(None);
        };
        let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }
        Ok(Some(UserRow {
            password_hash: None,
            ..row
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::test_support::MemoryStore;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let store = MemoryStore::default();
        let created = Register { repo: &store }
            .execute(&RegisterRequest {
                email: " Ada@Example.com ".into(),
                name: "Ada".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.email, "ada@example.com");

        let login = Login { repo: &store };
        let ok = login
            .execute(&LoginRequest {
                email: "ADA@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ok.id, created.id);
        assert!(ok.password_hash.is_none());

        let wrong = login
            .execute(&LoginRequest {
                email: "ada@example.com".into(),
                password: "battery staple".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
    }
}
