use crate::auth::jwt::{create_jwt, create_reset_token, verify_jwt};
use crate::auth::mailer::Mailer;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    mailer: Mailer,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    frontend_url: String,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        mailer: Mailer,
        jwt_secret: String,
        jwt_expiration_hours: i64,
        frontend_url: String,
    ) -> Self {
        Self {
            user_repo,
            mailer,
            jwt_secret,
            jwt_expiration_hours,
            frontend_url,
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(User, String)> {
        let password_hash = hash_password(password)?;

        let user = self
            .user_repo
            .create(name, email, &password_hash)
            .await
            .map_err(|e| {
                if let AppError::Database(ref db_err) = e {
                    if db_err
                        .as_database_error()
                        .map(|d| d.is_unique_violation())
                        .unwrap_or(false)
                    {
                        return AppError::Conflict("This email is already in use".to_string());
                    }
                }
                e
            })?;

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".into()));
        }

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok((user, token))
    }

    /// Issue a reset token and mail it. Silently succeeds for unknown
    /// addresses so the endpoint does not reveal which emails exist.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        if let Some(user) = self.user_repo.find_by_email(email).await? {
            let reset_token = create_reset_token(user.id, &user.email, &self.jwt_secret)?;
            let reset_url = format!("{}/reset-password/{}", self.frontend_url, reset_token);

            self.mailer.send_password_reset(&user.email, &reset_url).await?;
        }

        Ok(())
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<()> {
        let claims = verify_jwt(token, &self.jwt_secret)
            .map_err(|_| AppError::BadRequest("Invalid or expired token".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::BadRequest("Invalid or expired token".to_string()))?;

        let password_hash = hash_password(password)?;
        let updated = self.user_repo.update_password(user_id, &password_hash).await?;

        if updated == 0 {
            return Err(AppError::BadRequest("Invalid or expired token".to_string()));
        }

        Ok(())
    }
}
