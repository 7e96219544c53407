use uuid::Uuid;

/// Identity a request executes on behalf of.
///
/// Built fresh per request by a credential resolver and never mutated
/// afterwards. An anonymous viewer is a distinct value from "no viewer":
/// session-backed deployments produce it when the session carries no user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    id: Option<Uuid>,
    name: Option<String>,
}

impl Viewer {
    pub fn authenticated(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: None,
            name: None,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}
