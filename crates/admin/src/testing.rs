//! Recording fakes for the admin ports.
//!
//! Used by this crate's tests and by the integration tests; each fake keeps
//! a log of what it was asked to do.

use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use motoshop_core::schemas::UserUpdate;
use motoshop_core::{HasId, Product, User, UserId};
use serde::Serialize;
use serde_json::Value;

use crate::ports::{
    Confirm, EntityStore, Notifier, Outcome, ProductDirectory, StoreError, UserDirectory,
};

// =============================================================================
// Notifier
// =============================================================================

/// A notification as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Notifier that remembers every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications in the order they were raised.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    fn push(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, text: &str) {
        self.push(Notice::Success(text.to_owned()));
    }

    fn error(&self, text: &str) {
        self.push(Notice::Error(text.to_owned()));
    }
}

// =============================================================================
// Confirm
// =============================================================================

/// Prompt that always gives the same answer and records each question.
#[derive(Debug)]
pub struct FixedConfirm {
    answer: bool,
    asked: Mutex<Vec<(String, String)>>,
}

impl FixedConfirm {
    #[must_use]
    pub const fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// `(title, text)` of every prompt shown.
    #[must_use]
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, title: &str, text: &str) -> bool {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((title.to_owned(), text.to_owned()));
        self.answer
    }
}

// =============================================================================
// Store
// =============================================================================

/// A call received by [`ScriptedStore`]; payloads are kept as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create(Value),
    Update(String, Value),
    Delete(String),
}

/// Entity store that answers every call with a scripted response.
///
/// Answers `Accepted` until told otherwise.
pub struct ScriptedStore<R, I> {
    calls: Mutex<Vec<StoreCall>>,
    response: Mutex<Result<Outcome, StoreError>>,
    _types: PhantomData<fn(R, I)>,
}

impl<R, I> std::fmt::Debug for ScriptedStore<R, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedStore")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

impl<R, I> Default for ScriptedStore<R, I> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(Outcome::Accepted(()))),
            _types: PhantomData,
        }
    }
}

impl<R, I> ScriptedStore<R, I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every following call with `response`.
    pub fn respond_with(&self, response: Result<Outcome, StoreError>) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = response;
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer(&self, call: StoreCall) -> Result<Outcome, StoreError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        self.response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<R, I> EntityStore for ScriptedStore<R, I>
where
    R: HasId + Send + Sync,
    I: Serialize + Send + Sync,
{
    type Record = R;
    type Input = I;

    async fn create(&self, input: &I) -> Result<Outcome<Option<R>>, StoreError> {
        let payload = serde_json::to_value(input).unwrap_or(Value::Null);
        self.answer(StoreCall::Create(payload)).map(|outcome| match outcome {
            Outcome::Accepted(()) => Outcome::Accepted(None),
            Outcome::Rejected(message) => Outcome::Rejected(message),
        })
    }

    async fn update(&self, id: &R::Id, input: &I) -> Result<Outcome, StoreError> {
        let payload = serde_json::to_value(input).unwrap_or(Value::Null);
        self.answer(StoreCall::Update(id.to_string(), payload))
    }

    async fn delete(&self, id: &R::Id) -> Result<Outcome, StoreError> {
        self.answer(StoreCall::Delete(id.to_string()))
    }
}

// =============================================================================
// Directories
// =============================================================================

/// In-memory user directory; suspension flips `suspended_at`.
#[derive(Debug, Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
    actions: Mutex<Vec<String>>,
}

impl MemoryUsers {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            actions: Mutex::new(Vec::new()),
        }
    }

    /// `"<action>:<id>"` entries in call order.
    #[must_use]
    pub fn actions(&self) -> Vec<String> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn log(&self, action: &str, id: &UserId) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{action}:{id}"));
    }

    fn flip(&self, action: &str, id: &UserId, suspended: bool) -> Outcome {
        self.log(action, id);
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        match users.iter_mut().find(|u| &u.id == id) {
            Some(user) => {
                user.suspended_at = suspended.then(chrono::Utc::now);
                Outcome::Accepted(())
            }
            None => Outcome::Rejected("Usuario no encontrado".to_string()),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUsers {
    async fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn suspended(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|u| u.is_suspended())
            .cloned()
            .collect())
    }

    async fn suspend(&self, id: &UserId) -> Result<Outcome, StoreError> {
        Ok(self.flip("suspend", id, true))
    }

    async fn reactivate(&self, id: &UserId) -> Result<Outcome, StoreError> {
        Ok(self.flip("reactivate", id, false))
    }
}

#[async_trait]
impl EntityStore for MemoryUsers {
    type Record = User;
    type Input = UserUpdate;

    async fn create(&self, _input: &UserUpdate) -> Result<Outcome<Option<User>>, StoreError> {
        Ok(Outcome::Rejected(
            crate::remote::USER_CREATE_REFUSED.to_string(),
        ))
    }

    async fn update(&self, id: &UserId, input: &UserUpdate) -> Result<Outcome, StoreError> {
        self.log("update", id);
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(Outcome::Rejected("Usuario no encontrado".to_string()));
        };
        user.username.clone_from(&input.username);
        user.email = input.email.to_string();
        user.country.clone_from(&input.country);
        user.birth_date = Some(input.birth_date.format("%Y-%m-%d").to_string());
        Ok(Outcome::Accepted(()))
    }

    async fn delete(&self, id: &UserId) -> Result<Outcome, StoreError> {
        self.log("delete", id);
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() < before {
            Ok(Outcome::Accepted(()))
        } else {
            Ok(Outcome::Rejected("Usuario no encontrado".to_string()))
        }
    }
}

/// Fixed product list.
#[derive(Debug, Default)]
pub struct MemoryProducts {
    products: Vec<Product>,
}

impl MemoryProducts {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductDirectory for MemoryProducts {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }
}
