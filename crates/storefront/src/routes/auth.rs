//! Authentication route handlers.
//!
//! Login, registration, and logout against the in-memory
//! [`UserDirectory`](crate::services::auth::UserDirectory). Failures redirect
//! back to the form with an `?error=` code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, CredentialVerifier, MIN_PASSWORD_LENGTH, NewAccount};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/notice display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub min_password_length: usize,
}

/// Map an `?error=` code to a message.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_string(),
        "exists" => "An account with this email already exists.".to_string(),
        "email" => "Please enter a valid email address.".to_string(),
        "name" => "Please enter your name.".to_string(),
        "mismatch" => "Passwords do not match.".to_string(),
        "weak" => format!("Password must be at least {MIN_PASSWORD_LENGTH} characters."),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Map an `?notice=` code to a message.
fn notice_message(code: &str) -> Option<String> {
    match code {
        "logged_out" => Some("You have been logged out.".to_string()),
        _ => None,
    }
}

const fn register_error_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidEmail(_) => "email",
        AuthError::UserAlreadyExists => "exists",
        AuthError::EmptyName => "name",
        AuthError::WeakPassword(_) => "weak",
        AuthError::PasswordMismatch => "mismatch",
        AuthError::InvalidCredentials | AuthError::PasswordHash => "unknown",
    }
}

/// Where to land after signing in.
const fn landing_page(user: &CurrentUser) -> &'static str {
    if user.is_admin() { "/admin" } else { "/account" }
}

async fn sign_in(session: &Session, user: &CurrentUser) -> Result<(), Response> {
    if let Err(e) = set_current_user(session, user).await {
        tracing::error!(error = %e, "Failed to set session");
        return Err(Redirect::to("/auth/login?error=session").into_response());
    }
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        notice: query.notice.as_deref().and_then(notice_message),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let account = match state.users().verify(&form.email, &form.password).await {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            return Redirect::to("/auth/login?error=credentials").into_response();
        }
    };

    let user = CurrentUser::from(&account);
    if let Err(response) = sign_in(&session, &user).await {
        return response;
    }

    tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
    Redirect::to(landing_page(&user)).into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(error_message),
        min_password_length: MIN_PASSWORD_LENGTH,
    }
}

/// Handle registration form submission.
///
/// A new account is signed in immediately.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registered = state
        .users()
        .register(NewAccount {
            name: &form.name,
            email: &form.email,
            password: &form.password,
            password_confirm: &form.password_confirm,
        })
        .await;

    let account = match registered {
        Ok(account) => account,
        Err(e) => {
            tracing::info!(error = %e, "Registration rejected");
            let code = register_error_code(&e);
            return Redirect::to(&format!("/auth/register?error={code}")).into_response();
        }
    };

    let user = CurrentUser::from(&account);
    if let Err(response) = sign_in(&session, &user).await {
        return response;
    }
    Redirect::to("/account").into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Log out and destroy the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session user");
    }
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }
    clear_sentry_user();
    Redirect::to("/auth/login?notice=logged_out").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_error_codes_have_messages() {
        for err in [
            AuthError::UserAlreadyExists,
            AuthError::EmptyName,
            AuthError::PasswordMismatch,
            AuthError::WeakPassword("too short".to_string()),
        ] {
            let message = error_message(register_error_code(&err));
            assert!(!message.starts_with("Something went wrong"), "{err}");
        }
    }

    #[test]
    fn test_unknown_notice_is_ignored() {
        assert!(notice_message("bogus").is_none());
        assert!(notice_message("logged_out").is_some());
    }
}
