//! REST API helpers for the accounts, blog, trek and booking services.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `ApiError::Unavailable`, since these
//! endpoints are only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; hooks and the auth context turn
//! the error into user-facing text. Fire-and-forget calls log and swallow.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
#[cfg(any(test, feature = "hydrate"))]
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    AccountNotice, BlogCategory, BlogPage, BlogPost, BookingDetail, Credentials, Itinerary, LoginResponse, OtpVerification,
    PasswordReset, Registration, Trek,
};
#[cfg(feature = "hydrate")]
use super::types::{RefreshResponse, TrekList};
use crate::config::ClientConfig;

pub const BLOG_PAGE_SIZE: u32 = 10;
pub const TREK_LIST_LIMIT: u32 = 100;

#[cfg(any(test, feature = "hydrate"))]
const LOGIN_PATH: &str = "/api/accounts/login/";
#[cfg(any(test, feature = "hydrate"))]
const GOOGLE_LOGIN_PATH: &str = "/api/accounts/google-login/";
#[cfg(any(test, feature = "hydrate"))]
const TOKEN_REFRESH_PATH: &str = "/api/accounts/token/refresh/";
#[cfg(any(test, feature = "hydrate"))]
const LOGOUT_PATH: &str = "/accounts/logout/";
#[cfg(any(test, feature = "hydrate"))]
const REGISTER_PATH: &str = "/accounts/register/";
#[cfg(any(test, feature = "hydrate"))]
const VERIFY_OTP_PATH: &str = "/accounts/verify-otp/";
#[cfg(any(test, feature = "hydrate"))]
const RESEND_OTP_PATH: &str = "/accounts/register/resend-otp/";
#[cfg(any(test, feature = "hydrate"))]
const FORGOT_PASSWORD_PATH: &str = "/api/accounts/password/forgot/";
#[cfg(any(test, feature = "hydrate"))]
const RESET_PASSWORD_PATH: &str = "/api/accounts/password/reset/";
#[cfg(any(test, feature = "hydrate"))]
const BLOG_CATEGORIES_PATH: &str = "/api/blog/categories/";

/// Parameters of one blog listing request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlogQuery {
    pub category: String,
    pub page: u32,
}

impl BlogQuery {
    pub fn new(category: impl Into<String>, page: u32) -> Self {
        Self { category: category.into(), page }
    }

    /// `"all"` (or an empty category) means no category filter.
    #[must_use]
    pub fn is_all(&self) -> bool {
        let category = self.category.trim();
        category.is_empty() || category.eq_ignore_ascii_case("all")
    }
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self::new("all", 1)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn blog_posts_path(query: &BlogQuery) -> String {
    let mut path = format!("/api/blog/posts/?page_size={BLOG_PAGE_SIZE}");
    if !query.is_all() {
        path.push_str("&category=");
        path.push_str(&urlencoding::encode(query.category.trim()));
    }
    if query.page > 0 {
        path.push_str(&format!("&page={}", query.page));
    }
    path
}

#[cfg(any(test, feature = "hydrate"))]
fn blog_post_path(slug: &str) -> String {
    format!("/api/blog/posts/{}/", urlencoding::encode(slug))
}

#[cfg(any(test, feature = "hydrate"))]
fn post_view_path(slug: &str) -> String {
    format!("/api/blog/posts/{}/view/", urlencoding::encode(slug))
}

#[cfg(any(test, feature = "hydrate"))]
fn treks_path() -> String {
    format!("/api/treks/?limit={TREK_LIST_LIMIT}")
}

#[cfg(any(test, feature = "hydrate"))]
fn trek_itinerary_path(slug: &str) -> String {
    format!("/api/treks/{}/itinerary/", urlencoding::encode(slug))
}

#[cfg(any(test, feature = "hydrate"))]
fn booking_path(booking_ref: &str) -> String {
    format!("/api/bookings/{}/", urlencoding::encode(booking_ref))
}

/// Decode a response body, mapping non-2xx statuses to `ApiError::Status`.
#[cfg(any(test, feature = "hydrate"))]
fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::{ApiError, parse_response};

    fn with_bearer(req: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer {
            Some(token) => req.header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    async fn read(resp: Response) -> Result<(u16, String), ApiError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body))
    }

    pub(super) async fn get_json<T: DeserializeOwned>(url: &str, bearer: Option<&str>) -> Result<T, ApiError> {
        let resp = with_bearer(Request::get(url), bearer)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let (status, body) = read(resp).await?;
        parse_response(status, &body)
    }

    pub(super) async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, payload: &B) -> Result<T, ApiError> {
        let resp = Request::post(url)
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let (status, body) = read(resp).await?;
        parse_response(status, &body)
    }

    /// POST where only the status matters (body may be empty).
    pub(super) async fn post_status(url: &str, payload: Option<&serde_json::Value>) -> Result<(), ApiError> {
        let req = Request::post(url);
        let resp = match payload {
            Some(payload) => req.json(payload).map_err(|e| ApiError::Decode(e.to_string()))?.send().await,
            None => req.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        let (status, body) = read(resp).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(ApiError::from_status(status, &body))
        }
    }
}

/// Handle on the backend REST API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Fetch one page of blog posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn fetch_blog_posts(&self, query: &BlogQuery) -> Result<BlogPage, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::get_json(&self.url(&blog_posts_path(query)), None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = query;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch a single blog post by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the post does not exist.
    pub async fn fetch_blog_post(&self, slug: &str) -> Result<BlogPost, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::get_json(&self.url(&blog_post_path(slug)), None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = slug;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch the blog category list used by the category filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_blog_categories(&self) -> Result<Vec<BlogCategory>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            #[derive(serde::Deserialize)]
            #[serde(untagged)]
            enum Wire {
                Bare(Vec<BlogCategory>),
                Paged { results: Vec<BlogCategory> },
            }
            let wire: Wire = http::get_json(&self.url(BLOG_CATEGORIES_PATH), None).await?;
            Ok(match wire {
                Wire::Bare(items) | Wire::Paged { results: items } => items,
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    /// Bump a post's view counter. Best-effort: failures are logged and
    /// never reach the caller.
    pub async fn increment_post_views(&self, slug: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Err(e) = http::post_status(&self.url(&post_view_path(slug)), None).await {
                log::warn!("view count increment failed for {slug}: {e}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = slug;
        }
    }

    /// Fetch the full trek listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_treks(&self) -> Result<Vec<Trek>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let TrekList(treks) = http::get_json(&self.url(&treks_path()), None).await?;
            Ok(treks)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch the day-by-day itinerary of one trek.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the trek is unknown.
    pub async fn fetch_trek_itinerary(&self, slug: &str) -> Result<Itinerary, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::get_json(&self.url(&trek_itinerary_path(slug)), None).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = slug;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch a booking owned by the signed-in visitor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with 401 when the access token is stale.
    pub async fn fetch_booking(&self, booking_ref: &str, access_token: &str) -> Result<BookingDetail, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::get_json(&self.url(&booking_path(booking_ref)), Some(access_token)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (booking_ref, access_token);
            Err(ApiError::Unavailable)
        }
    }
}

/// Token-issuing endpoints of the accounts service.
///
/// The auth context is generic over this trait so its lifecycle can be
/// exercised without a network.
#[async_trait(?Send)]
pub trait AccountsApi: Send + Sync + 'static {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
    async fn google_login(&self, token: &str) -> Result<LoginResponse, ApiError>;
    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError>;
    /// Revoke a refresh token server-side.
    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError>;
    /// Create an unverified account; a one-time code is mailed to it.
    async fn register(&self, registration: &Registration) -> Result<AccountNotice, ApiError>;
    /// Confirm a new account with its code. Signs the visitor in.
    async fn verify_otp(&self, verification: &OtpVerification) -> Result<LoginResponse, ApiError>;
    async fn resend_otp(&self, email: &str) -> Result<AccountNotice, ApiError>;
    /// Mail a password reset code.
    async fn forgot_password(&self, email: &str) -> Result<AccountNotice, ApiError>;
    /// Set a new password with a reset code. Signs the visitor in.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<LoginResponse, ApiError>;
}

#[async_trait(?Send)]
impl AccountsApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::post_json(&self.url(LOGIN_PATH), credentials).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(ApiError::Unavailable)
        }
    }

    async fn google_login(&self, token: &str) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "token": token });
            http::post_json(&self.url(GOOGLE_LOGIN_PATH), &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(ApiError::Unavailable)
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "refresh": refresh_token });
            let body: RefreshResponse = http::post_json(&self.url(TOKEN_REFRESH_PATH), &payload).await?;
            Ok(body.access)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "refresh": refresh_token });
            http::post_status(&self.url(LOGOUT_PATH), Some(&payload)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(ApiError::Unavailable)
        }
    }
    async fn register(&self, registration: &Registration) -> Result<AccountNotice, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::post_json(&self.url(REGISTER_PATH), registration).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
            Err(ApiError::Unavailable)
        }
    }

    async fn verify_otp(&self, verification: &OtpVerification) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::post_json(&self.url(VERIFY_OTP_PATH), verification).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = verification;
            Err(ApiError::Unavailable)
        }
    }

    async fn resend_otp(&self, email: &str) -> Result<AccountNotice, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email });
            http::post_json(&self.url(RESEND_OTP_PATH), &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(ApiError::Unavailable)
        }
    }

    async fn forgot_password(&self, email: &str) -> Result<AccountNotice, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email });
            http::post_json(&self.url(FORGOT_PASSWORD_PATH), &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(ApiError::Unavailable)
        }
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            http::post_json(&self.url(RESET_PASSWORD_PATH), reset).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = reset;
            Err(ApiError::Unavailable)
        }
    }
}
