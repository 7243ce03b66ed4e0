use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};
use uuid::Uuid;

use crate::i18n::Language;
use crate::models::user::{Role, User};
use crate::settings::Preferences;

const DUMMY_PASSWORD: &str = "password";

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: Uuid,
    pub user: User,
    pub language: Language,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Counts a login as in flight until dropped, so a cancelled login does not
/// leave the provider stuck in the loading state.
struct PendingLogin<'a>(&'a AtomicUsize);

impl<'a> PendingLogin<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Hardcoded credential list with an artificial login delay.
pub struct MockAuthProvider {
    users: Vec<User>,
    sessions: DashMap<Uuid, Session>,
    login_delay: Duration,
    default_language: Language,
    pending_logins: AtomicUsize,
}

impl MockAuthProvider {
    pub fn new(login_delay: Duration, default_language: Language) -> Self {
        Self {
            users: dummy_users(),
            sessions: DashMap::new(),
            login_delay,
            default_language,
            pending_logins: AtomicUsize::new(0),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Option<Session> {
        {
            let _pending = PendingLogin::start(&self.pending_logins);
            sleep(self.login_delay).await;
        }

        let email = email.trim();
        let user = self
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .filter(|_| password == DUMMY_PASSWORD)
            .cloned();

        let Some(user) = user else {
            warn!(email = %email, "login rejected");
            return None;
        };

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4(),
            user,
            language: self.default_language,
            preferences: Preferences::default(),
            created_at: now,
            last_seen: now,
        };
        self.sessions.insert(session.token, session.clone());

        info!(user_id = %session.user.id, role = ?session.user.role, "user logged in");
        Some(session)
    }

    pub fn logout(&self, token: &Uuid) -> bool {
        match self.sessions.remove(token) {
            Some((_, session)) => {
                info!(user_id = %session.user.id, "user logged out");
                true
            }
            None => false,
        }
    }

    pub fn user(&self, token: &Uuid) -> Option<User> {
        self.sessions.get(token).map(|session| session.user.clone())
    }

    /// Looks up a session and marks it as seen.
    pub fn session(&self, token: &Uuid) -> Option<Session> {
        let mut session = self.sessions.get_mut(token)?;
        session.last_seen = Utc::now();
        Some(session.clone())
    }

    pub fn set_language(&self, token: &Uuid, language: Language) -> Option<Session> {
        self.update_session(token, |session| session.language = language)
            .map(|((), session)| session)
    }

    /// Runs `change` against the stored session. Returns its result together
    /// with a snapshot of the session afterwards.
    pub fn update_session<T>(
        &self,
        token: &Uuid,
        change: impl FnOnce(&mut Session) -> T,
    ) -> Option<(T, Session)> {
        let mut session = self.sessions.get_mut(token)?;
        let outcome = change(&mut *session);
        Some((outcome, session.clone()))
    }

    /// Drops sessions not seen for longer than `idle`. Returns how many went.
    pub fn evict_idle(&self, now: DateTime<Utc>, idle: TimeDelta) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, session| {
            let keep = now.signed_duration_since(session.last_seen) <= idle;
            if !keep {
                evicted += 1;
            }
            keep
        });

        if evicted > 0 {
            info!(evicted, "idle sessions expired");
        }
        evicted
    }

    pub fn is_loading(&self) -> bool {
        self.pending_logins.load(Ordering::SeqCst) > 0
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

fn dummy_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Ravi Kumar".to_string(),
            email: "customer@tnstc.com".to_string(),
            phone: "+91 9876543210".to_string(),
            role: Role::Customer,
        },
        User {
            id: "2".to_string(),
            name: "Admin TNSTC".to_string(),
            email: "admin@tnstc.com".to_string(),
            phone: "+91 9876543211".to_string(),
            role: Role::Admin,
        },
    ]
}
