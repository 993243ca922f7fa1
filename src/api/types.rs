//! Wire types exchanged with the directory API.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConectaError, Result};

/// Query parameters for one page of provider search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    #[serde(rename = "uf")]
    pub state: String,
    #[serde(rename = "cidade")]
    pub city: String,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SearchParams {
    /// Build params, dropping empty optional filters.
    pub fn new(state: &str, city: &str, page: u32, search_term: &str, tag: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            state: state.to_string(),
            city: city.to_string(),
            page,
            search_term: non_empty(search_term),
            tag: non_empty(tag),
        }
    }
}

/// One page of search results plus the total match count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub providers: Vec<ProviderSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// A business listing as returned by the API.
///
/// Fields the client never reads are kept in `extra` so the payload can be
/// re-serialized without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub cnpj_basico: String,
    #[serde(default)]
    pub cnpj_ordem: String,
    #[serde(default)]
    pub cnpj_dv: String,
    #[serde(default)]
    pub razao_social: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correio_eletronico: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub user_liked: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub servicos_prestados: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderSummary {
    /// Full CNPJ as `basico-ordem-dv`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.cnpj_basico, self.cnpj_ordem, self.cnpj_dv)
    }
}

/// Outcome of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Added,
    Removed,
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikeAction::Added => write!(f, "added"),
            LikeAction::Removed => write!(f, "removed"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    pub action: LikeAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddCommentResponse {
    pub comment: Comment,
}

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// The logged-in account as reported by `/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /update-account`.
///
/// The server replaces the whole profile, so every field is sent. Start from
/// [`AccountUpdate::from_user`] and override what changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
    pub email: String,
    pub current_password: String,
    pub new_password: Option<String>,
}

impl AccountUpdate {
    pub fn from_user(user: &User, current_password: impl Into<String>) -> Self {
        let extra = |key: &str| {
            user.extra
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            city: extra("city"),
            state: extra("state"),
            email: user.email.clone(),
            current_password: current_password.into(),
            new_password: None,
        }
    }

    /// Trim every field, upper-case the state and check what the server requires.
    pub fn normalize(mut self) -> Result<Self> {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.city,
            &mut self.email,
            &mut self.current_password,
        ] {
            *field = field.trim().to_string();
        }
        self.state = self.state.trim().to_uppercase();
        self.new_password = self
            .new_password
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let invalid = |msg: &str| Err(ConectaError::Validation(msg.to_string()));
        if self.first_name.is_empty() {
            return invalid("first name is required");
        }
        if self.last_name.is_empty() {
            return invalid("last name is required");
        }
        if self.city.is_empty() {
            return invalid("city is required");
        }
        if self.state.chars().count() != 2 {
            return invalid("state must be a two-letter code (e.g. SP)");
        }
        if !self.email.contains('@') {
            return invalid("a valid e-mail is required");
        }
        if self.current_password.is_empty() {
            return invalid("the current password is required");
        }
        if let Some(password) = &self.new_password
            && !is_strong_password(password)
        {
            return invalid(
                "new password needs at least 6 characters with an uppercase letter, a digit and one of !@#$&*~",
            );
        }
        Ok(self)
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| "!@#$&*~".contains(c))
}
