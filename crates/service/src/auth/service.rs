use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{AuthSession, LoginInput};
use super::errors::AuthError;
use super::token::TokenService;

/// Auth service configuration: the one accepted credential pair.
#[derive(Clone)]
pub struct AuthConfig {
    pub login_email: String,
    pub login_password: String,
    pub user_id: String,
}

/// Login business service independent of web framework
pub struct AuthService {
    cfg: AuthConfig,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(cfg: AuthConfig, tokens: Arc<TokenService>) -> Self { Self { cfg, tokens } }

    /// Check the credential pair and issue a token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenService};
    /// use service::auth::service::AuthConfig;
    /// use service::auth::token::TokenConfig;
    /// use service::auth::domain::LoginInput;
    /// let tokens = Arc::new(TokenService::new(TokenConfig {
    ///     secret: "doc-secret-doc-secret-doc-secret".into(),
    ///     issuer: "catalog".into(),
    ///     audience: "catalog-clients".into(),
    ///     ttl: chrono::Duration::hours(2),
    /// }));
    /// let svc = AuthService::new(AuthConfig { login_email: "test@test.com".into(), login_password: "123456".into(), user_id: "123".into() }, tokens);
    /// let session = svc.login(LoginInput { email: "test@test.com".into(), password: "123456".into() }).unwrap();
    /// assert_eq!(session.user_id, "123");
    /// assert!(svc.login(LoginInput { email: "test@test.com".into(), password: "nope".into() }).is_err());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.email != self.cfg.login_email || input.password != self.cfg.login_password {
            warn!("login_rejected");
            return Err(AuthError::Unauthorized);
        }
        let token = self.tokens.issue_token(&self.cfg.user_id, &input.email)?;
        info!(user_id = %self.cfg.user_id, expires_at = %token.expires_at, "login_succeeded");
        Ok(AuthSession { user_id: self.cfg.user_id.clone(), email: input.email, token })
    }
}
