//! Authentication service for staff login and token issuance
//!
//! Identity is intentionally thin: the core only needs an authenticated
//! actor id and a role. Everything else lives in the profiles table.

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Claims;
use shared::models::Role;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Profile row used for credential checks
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: String,
    role: String,
    password_hash: String,
    is_active: bool,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, full_name, role, password_hash, is_active FROM profiles WHERE email = $1",
        )
        .bind(&input.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !row.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(&input.password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = Role::parse(&row.role);
        let access_token = self.issue_token(row.id, role)?;

        Ok(LoginResponse {
            user_id: row.id,
            full_name: row.full_name,
            role,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Sign a JWT carrying the actor id and role
    fn issue_token(&self, user_id: Uuid, role: Role) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }
}
