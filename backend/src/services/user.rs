//! Staff account management service (admin only at the route layer)

use bcrypt::{hash, DEFAULT_COST};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Profile, Role};
use shared::validation::{validate_email, validate_name, validate_password};

/// Service for managing staff profiles
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Payload for creating a staff account
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Payload for updating a staff account
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub full_name: String,
    pub role: Role,
    pub password: Option<String>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All staff profiles, newest first
    pub async fn list(&self) -> AppResult<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, full_name, role, is_active, created_at
            FROM profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(profiles)
    }

    /// Fetch one profile by id
    pub async fn get(&self, id: Uuid) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, full_name, role, is_active, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Register a new staff account
    pub async fn create(&self, input: CreateUserInput) -> AppResult<Profile> {
        validate_email(&input.email).map_err(|m| AppError::Validation {
            field: "email".to_string(),
            message: m.to_string(),
            message_id: "Format email tidak valid".to_string(),
        })?;
        validate_password(&input.password).map_err(|m| AppError::Validation {
            field: "password".to_string(),
            message: m.to_string(),
            message_id: "Kata sandi minimal 8 karakter".to_string(),
        })?;
        validate_name(&input.full_name).map_err(|m| AppError::Validation {
            field: "full_name".to_string(),
            message: m.to_string(),
            message_id: "Nama tidak boleh kosong".to_string(),
        })?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (email, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, full_name, role, is_active, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.full_name)
        .bind(input.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateEntry("email".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(profile)
    }

    /// Update name, role, and optionally the password
    pub async fn update(&self, id: Uuid, input: UpdateUserInput) -> AppResult<Profile> {
        validate_name(&input.full_name).map_err(|m| AppError::Validation {
            field: "full_name".to_string(),
            message: m.to_string(),
            message_id: "Nama tidak boleh kosong".to_string(),
        })?;

        let password_hash = match &input.password {
            Some(password) => {
                validate_password(password).map_err(|m| AppError::Validation {
                    field: "password".to_string(),
                    message: m.to_string(),
                    message_id: "Kata sandi minimal 8 karakter".to_string(),
                })?;
                Some(
                    hash(password, DEFAULT_COST)
                        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
                )
            }
            None => None,
        };

        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = $2, role = $3,
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            RETURNING id, email, full_name, role, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.full_name)
        .bind(input.role.as_str())
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Deactivate an account. Accounts are never deleted so log rows
    /// keep a valid author reference.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE profiles SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    /// Reactivate a deactivated account
    pub async fn reactivate(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE profiles SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
