use crate::{
    context::AppContext,
    spotify::{self, auth::AuthError},
    types::{AccessToken, Credentials},
    warning,
};

/// Owns the access token lifecycle.
///
/// A cached token is trusted only after the identity probe accepts it. When
/// there is no cached token, or the probe rejects it, a new one is obtained
/// through the client-credentials grant and written back to the credential
/// document before it is handed out.
pub struct TokenAuthority<'a> {
    ctx: &'a AppContext,
}

impl<'a> TokenAuthority<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        TokenAuthority { ctx }
    }

    pub async fn get_valid_token(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        if let Some(cached) = credentials.access_token.as_deref() {
            if self.is_token_valid(cached).await {
                return Ok(AccessToken::new(cached));
            }
            warning!("Cached access token was rejected, requesting a new one");
        }

        self.request_new_token(credentials).await
    }

    pub async fn is_token_valid(&self, token: &str) -> bool {
        let settings = self.ctx.settings();
        spotify::auth::probe_token(self.ctx.client(), &settings.api_url, token).await
    }

    async fn request_new_token(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        let settings = self.ctx.settings();
        let token = spotify::auth::request_client_token(
            self.ctx.client(),
            &settings.token_url,
            &credentials.client_id,
            &credentials.client_secret,
        )
        .await?;

        self.ctx.store().persist_token(token.as_str()).await?;
        Ok(token)
    }
}
