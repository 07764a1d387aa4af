//! Session context holding the current checker.

use crate::{Error, Result, SessionId, UserProvider};
use acl::{Ability, Gate, PermissionCatalog, RuleDeriver, Target, UserRecord};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: SessionId,
    pub user: UserRecord,
    pub established_at: DateTime<Utc>,
}

/// Immutable view of the authorization state at one point in time.
///
/// The user and the checker in a snapshot always belong together.
#[derive(Debug)]
pub struct Snapshot {
    session: Option<ActiveSession>,
    ability: Arc<Ability>,
}

impl Snapshot {
    fn signed_out() -> Self {
        Self {
            session: None,
            ability: Arc::new(Ability::empty()),
        }
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn ability(&self) -> &Arc<Ability> {
        &self.ability
    }
}

/// Shared authorization context for one client.
///
/// Every change (login, refresh, logout) swaps in a whole new [`Snapshot`];
/// readers clone the current `Arc` and never see a half-updated state.
pub struct SessionContext {
    deriver: RuleDeriver,
    catalog: Arc<PermissionCatalog>,
    current: RwLock<Arc<Snapshot>>,
}

impl SessionContext {
    /// Create a signed-out context.
    pub fn new(deriver: RuleDeriver, catalog: Arc<PermissionCatalog>) -> Self {
        Self {
            deriver,
            catalog,
            current: RwLock::new(Arc::new(Snapshot::signed_out())),
        }
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Start a new session for `user`.
    pub fn establish(&self, user: UserRecord) -> SessionId {
        let ability = self.build_ability(&user);
        let id = SessionId::new();
        let grants = ability.grants().len();
        let snapshot = Snapshot {
            session: Some(ActiveSession {
                id,
                user,
                established_at: Utc::now(),
            }),
            ability,
        };
        *self.current.write() = Arc::new(snapshot);
        tracing::info!(session = %id, grants, "session established");
        id
    }

    /// Replace the user of the active session, rebuilding the checker.
    pub fn refresh(&self, user: UserRecord) -> Result<()> {
        let ability = self.build_ability(&user);
        let mut current = self.current.write();
        let Some(active) = current.session.as_ref() else {
            return Err(Error::NotEstablished);
        };
        let (id, established_at) = (active.id, active.established_at);
        let grants = ability.grants().len();
        *current = Arc::new(Snapshot {
            session: Some(ActiveSession {
                id,
                user,
                established_at,
            }),
            ability,
        });
        tracing::info!(session = %id, grants, "session refreshed");
        Ok(())
    }

    /// End the session; the checker denies everything afterwards.
    pub fn logout(&self) {
        let signed_out = Arc::new(Snapshot::signed_out());
        let previous = std::mem::replace(&mut *self.current.write(), signed_out);
        if let Some(active) = previous.session() {
            tracing::info!(session = %active.id, "session ended");
        }
    }

    /// Bring the context in line with `provider`.
    ///
    /// A returned user refreshes the active session or starts one. No user
    /// signs out. A provider failure also signs out before the error is
    /// returned.
    pub fn sync(&self, provider: &impl UserProvider) -> Result<Option<SessionId>> {
        match provider.current_user() {
            Ok(Some(user)) => {
                let ability = self.build_ability(&user);
                let mut current = self.current.write();
                let (id, established_at, started) = match current.session() {
                    Some(active) => (active.id, active.established_at, false),
                    None => (SessionId::new(), Utc::now(), true),
                };
                let grants = ability.grants().len();
                *current = Arc::new(Snapshot {
                    session: Some(ActiveSession {
                        id,
                        user,
                        established_at,
                    }),
                    ability,
                });
                if started {
                    tracing::info!(session = %id, grants, "session established");
                } else {
                    tracing::debug!(session = %id, grants, "session synced from provider");
                }
                Ok(Some(id))
            }
            Ok(None) => {
                self.logout();
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "user provider failed, signing out");
                self.logout();
                Err(e.into())
            }
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// The current checker.
    pub fn ability(&self) -> Arc<Ability> {
        Arc::clone(self.snapshot().ability())
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.snapshot().session().map(|s| s.user.clone())
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.snapshot().session().map(|s| s.id)
    }

    pub fn established_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot().session().map(|s| s.established_at)
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().session().is_some()
    }

    pub fn can<'a>(&self, action: &str, subject: impl Into<Target<'a>>) -> bool {
        self.ability().can(action, subject)
    }

    pub fn cannot<'a>(&self, action: &str, subject: impl Into<Target<'a>>) -> bool {
        !self.can(action, subject)
    }

    /// Enforce a gate against the current checker.
    pub fn require(&self, gate: &Gate) -> Result<()> {
        Ok(self.ability().require(gate)?)
    }

    fn build_ability(&self, user: &UserRecord) -> Arc<Ability> {
        Arc::new(Ability::new(self.deriver.derive(user, &self.catalog)))
    }
}
