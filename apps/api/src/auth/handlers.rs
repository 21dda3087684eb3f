use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{Role, User, UserSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// POST /api/auth/register
///
/// Email uniqueness is checked first for a friendly error; the unique index
/// on `users.email` catches the race where two registrations pass the check.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }
    let role: Role = req.role.parse().map_err(AppError::Validation)?;

    if state.store.find_user_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = User::new(
        email.to_string(),
        req.name.trim().to_string(),
        role,
        hash_password(&req.password)?,
    );
    state.store.insert_user(&user).await?;
    info!(user_id = %user.id, role = %user.role, "Registered new user");

    let token = state.tokens.issue(user.id, &user.email, user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state
        .store
        .find_user_by_email(req.email.trim())
        .await?
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.tokens.issue(user.id, &user.email, user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    let profile = state
        .store
        .find_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::TestApp;

    #[tokio::test]
    async fn test_register_returns_token_and_public_user() {
        let app = TestApp::new();
        let (status, body) = app
            .post(
                "/api/auth/register",
                None,
                json!({"email": "meera@example.com", "name": "Meera", "password": "pw", "role": "student"}),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["email"], "meera@example.com");
        assert_eq!(body["user"]["role"], "student");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = TestApp::new();
        let payload = json!({"email": "dup@example.com", "name": "A", "password": "pw", "role": "student"});
        let (first, _) = app.post("/api/auth/register", None, payload.clone()).await;
        let (second, body) = app.post("/api/auth/register", None, payload).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let app = TestApp::new();
        let (status, _) = app
            .post(
                "/api/auth/register",
                None,
                json!({"email": "x@example.com", "name": "X", "password": "pw", "role": "admin"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_accepts_right_password_only() {
        let app = TestApp::new();
        app.post(
            "/api/auth/register",
            None,
            json!({"email": "kiran@example.com", "name": "Kiran", "password": "s3cret", "role": "teacher"}),
        )
        .await;

        let (ok, body) = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "kiran@example.com", "password": "s3cret"}),
            )
            .await;
        assert_eq!(ok, StatusCode::OK);
        assert_eq!(body["user"]["role"], "teacher");

        let (wrong, _) = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "kiran@example.com", "password": "nope"}),
            )
            .await;
        assert_eq!(wrong, StatusCode::UNAUTHORIZED);

        let (unknown, _) = app
            .post(
                "/api/auth/login",
                None,
                json!({"email": "ghost@example.com", "password": "s3cret"}),
            )
            .await;
        assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let app = TestApp::new();
        let (status, _) = app.get("/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.get("/api/auth/me", Some("not-a-token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_profile_without_hash() {
        let app = TestApp::new();
        let (user, token) = app.register_student("lata@example.com").await;
        let (status, body) = app.get("/api/auth/me", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], user.id.to_string());
        assert_eq!(body["name"], "Test User");
        assert!(body.get("password_hash").is_none());
    }
}
