//! HTTP client for the ConectaServiços API.
//!
//! The bearer token is attached with `RequestBuilder::bearer_auth`, which marks
//! the `Authorization` header as sensitive so reqwest's own debug output never
//! prints it. Request logging in this module only records paths and params.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::config::{Config, Messages};
use crate::error::{ConectaError, Result};

use super::error::ApiError;
use super::token::TokenStore;
use super::types::{
    AccountUpdate, AddCommentResponse, Comment, Credentials, LikeAction, LikeResponse, LoginResponse,
    ProviderSummary, SearchPage, SearchParams, User,
};
use super::SearchApi;

pub struct ConectaClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    connection_failure: String,
}

impl ConectaClient {
    /// Create a client from configuration
    ///
    /// Configures the HTTP client with a 10s connect timeout and the
    /// configured total timeout.
    pub fn from_config(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::new(config.api_base_url()?, tokens, config.timeout(), &config.messages)
    }

    pub fn new(
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
        messages: &Messages,
    ) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ConectaError::Config(format!(
                "API base URL '{base_url}' cannot carry paths"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| ConectaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            tokens,
            connection_failure: messages.connection_failure.clone(),
        })
    }

    /// Resolve path segments against the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments);
        debug!("{method} {}", url.path());

        let builder = self.client.request(method, url).header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Ok(match self.tokens.load()? {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, &self.connection_failure))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response_body(status, &body).into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ConectaError::Other(format!("unexpected response from server: {e}")))
    }

    fn require_token(&self) -> Result<()> {
        match self.tokens.load()? {
            Some(_) => Ok(()),
            None => Err(ConectaError::NotLoggedIn),
        }
    }

    /// One page of providers matching `params`
    pub async fn search(&self, params: &SearchParams) -> Result<SearchPage> {
        debug!(?params, "searching providers");
        let builder = self
            .request(Method::GET, &["search-service-providers"])?
            .query(params);
        self.send(builder).await
    }

    pub async fn provider_details(&self, cnpj_basico: &str) -> Result<ProviderSummary> {
        let builder = self.request(Method::GET, &["provider", cnpj_basico])?;
        self.send(builder).await
    }

    pub async fn claimed_providers(&self) -> Result<Vec<ProviderSummary>> {
        self.require_token()?;
        let builder = self.request(Method::GET, &["my-claimed-providers"])?;
        self.send(builder).await
    }

    pub async fn liked_providers(&self) -> Result<Vec<ProviderSummary>> {
        self.require_token()?;
        let builder = self.request(Method::GET, &["my-liked-providers"])?;
        self.send(builder).await
    }

    /// Toggle the current user's like on a provider
    pub async fn like_provider(&self, cnpj_basico: &str) -> Result<LikeAction> {
        self.require_token()?;
        let builder = self
            .request(Method::POST, &["like-provider"])?
            .json(&json!({ "cnpj_basico": cnpj_basico }));
        let response: LikeResponse = self.send(builder).await?;
        Ok(response.action)
    }

    pub async fn provider_comments(&self, cnpj_basico: &str) -> Result<Vec<Comment>> {
        let builder = self.request(Method::GET, &["provider-comments", cnpj_basico])?;
        self.send(builder).await
    }

    /// Post a comment. Blank comments are rejected without a request.
    pub async fn add_comment(&self, cnpj_basico: &str, comment: &str) -> Result<Comment> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ConectaError::Other("comment cannot be empty".to_string()));
        }
        self.require_token()?;

        let builder = self
            .request(Method::POST, &["add-provider-comment"])?
            .json(&json!({ "cnpj_basico": cnpj_basico, "comment": comment }));
        let response: AddCommentResponse = self.send(builder).await?;
        Ok(response.comment)
    }

    /// Log in, store the returned token and fetch the account.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let builder = self
            .request(Method::POST, &["login"])?
            .json(&Credentials { email, password });
        let response: LoginResponse = self.send(builder).await.map_err(|e| match e {
            ConectaError::Server { message, .. } => ConectaError::Auth(message),
            other => other,
        })?;

        self.tokens.save(&response.token)?;
        self.me().await
    }

    /// Ask the server to e-mail a password reset code. Needs no session.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(ConectaError::Validation(
                "a valid e-mail is required".to_string(),
            ));
        }

        let builder = self
            .request(Method::POST, &["forgot-password"])?
            .json(&json!({ "email": email }));
        let _: Value = self.send(builder).await?;
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()
    }

    pub async fn me(&self) -> Result<User> {
        self.require_token()?;
        let builder = self.request(Method::GET, &["me"])?;
        self.send(builder).await
    }

    /// Resolve the stored session, if any.
    ///
    /// A token the server rejects is cleared. Network failures leave it alone
    /// and propagate.
    pub async fn check_session(&self) -> Result<Option<User>> {
        if self.tokens.load()?.is_none() {
            return Ok(None);
        }

        match self.me().await {
            Ok(user) => Ok(Some(user)),
            Err(ConectaError::Server { status, message }) => {
                tracing::warn!("stored session rejected ({status}): {message}");
                self.tokens.clear()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the account profile. Returns the refreshed account.
    pub async fn update_account(&self, update: AccountUpdate) -> Result<User> {
        self.require_token()?;
        let update = update.normalize()?;
        let builder = self
            .request(Method::PUT, &["update-account"])?
            .json(&update);
        let _: Value = self.send(builder).await?;
        self.me().await
    }

    pub async fn cancel_premium(&self) -> Result<Value> {
        self.require_token()?;
        let builder = self.request(Method::POST, &["cancel-premium"])?;
        self.send(builder).await
    }

    /// Delete the account and drop the stored token.
    pub async fn delete_account(&self) -> Result<Value> {
        self.require_token()?;
        let builder = self.request(Method::DELETE, &["delete-account"])?;
        let response = self.send(builder).await?;
        self.tokens.clear()?;
        Ok(response)
    }
}

impl SearchApi for ConectaClient {
    fn search_providers(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<SearchPage>> + Send {
        self.search(params)
    }
}
