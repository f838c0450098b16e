use anyhow::{anyhow, Context, Result};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge, RedirectUrl,
    Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use shared::settings::LoginSettings;
use shared::user::UserRef;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::time::Duration;
use url::Url;

pub struct OAuthFlow {
    client: BasicClient,
    scopes: Vec<String>,
    port: u16,
}

/// Tokens returned by a completed sign-in.
#[derive(Debug, Clone)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl OAuthFlow {
    pub fn new(
        client_id: String,
        client_secret: Option<String>,
        auth_url: String,
        token_url: String,
        scopes: Vec<String>,
    ) -> Result<Self> {
        // Try a few ports in case 8765 is busy
        let (listener, port) = bind_callback_listener()?;
        // Released here; authenticate() binds the same port again.
        drop(listener);

        let client = BasicClient::new(
            ClientId::new(client_id),
            client_secret.map(ClientSecret::new),
            AuthUrl::new(auth_url)?,
            Some(TokenUrl::new(token_url)?),
        )
        .set_redirect_uri(RedirectUrl::new(format!(
            "http://localhost:{}/callback",
            port
        ))?);

        Ok(Self {
            client,
            scopes,
            port,
        })
    }

    /// Build a flow from the login settings, failing if endpoints are missing.
    pub fn from_settings(settings: &LoginSettings) -> Result<Self> {
        let client_id = settings
            .client_id
            .clone()
            .ok_or_else(|| anyhow!("Sign-in is not configured: missing client id"))?;
        let auth_url = settings
            .auth_url
            .clone()
            .ok_or_else(|| anyhow!("Sign-in is not configured: missing authorization URL"))?;
        let token_url = settings
            .token_url
            .clone()
            .ok_or_else(|| anyhow!("Sign-in is not configured: missing token URL"))?;
        Self::new(
            client_id,
            settings.client_secret.clone(),
            auth_url,
            token_url,
            settings.scopes.clone(),
        )
    }

    pub async fn authenticate(&self) -> Result<OAuthTokens> {
        // Generate PKCE challenge for security
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);

        for scope in &self.scopes {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }

        let (auth_url, csrf_token) = auth_request.url();

        tracing::info!(url = %auth_url, "opening browser for sign-in");
        if let Err(e) = open::that(auth_url.as_str()) {
            tracing::warn!(error = %e, "failed to open browser, visit the URL manually");
        }

        // Re-bind the same port we registered as redirect URI
        let port = self.port;
        let (code, state) = tokio::task::spawn_blocking(move || {
            let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
                .map_err(|e| anyhow!("Could not re-bind OAuth callback port {}: {}", port, e))?;
            // Non-blocking accept with a poll loop so we time out after 5 minutes
            listener.set_nonblocking(true)?;
            receive_callback(&listener)
        })
        .await
        .context("OAuth callback listener stopped")??;

        if state != *csrf_token.secret() {
            return Err(anyhow!("CSRF token mismatch"));
        }

        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(async_http_client)
            .await
            .map_err(|e| anyhow!("token exchange failed: {}", e))?;

        Ok(OAuthTokens {
            access_token: token_result.access_token().secret().clone(),
            refresh_token: token_result.refresh_token().map(|t| t.secret().clone()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(alias = "id")]
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<UserInfo> for UserRef {
    fn from(info: UserInfo) -> Self {
        UserRef {
            id: info.sub,
            email: info.email,
            name: info.name,
        }
    }
}

/// Look up who the access token belongs to.
pub async fn fetch_user(userinfo_url: &str, access_token: &str) -> Result<UserRef> {
    let resp = reqwest::Client::new()
        .get(userinfo_url)
        .bearer_auth(access_token)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .context("user info request failed")?;
    if !resp.status().is_success() {
        return Err(anyhow!("user info error: {}", resp.status()));
    }
    let info: UserInfo = resp.json().await.context("user info was not JSON")?;
    Ok(info.into())
}

/// Try to bind a callback listener on one of several ports.
fn bind_callback_listener() -> Result<(TcpListener, u16)> {
    let ports = [8765, 8766, 8767, 18765, 28765];
    for port in ports {
        if let Ok(listener) = TcpListener::bind(format!("127.0.0.1:{}", port)) {
            return Ok((listener, port));
        }
    }
    Err(anyhow!("Could not bind OAuth callback listener on any port"))
}

/// Pull `code` and `state` out of the callback request target.
fn parse_callback_target(target: &str) -> Result<(String, String)> {
    let url = Url::parse(&format!("http://localhost{}", target))?;

    let code = url
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| anyhow!("No authorization code in callback"))?;

    let state = url
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| anyhow!("No state in callback"))?;

    Ok((code, state))
}

fn receive_callback(listener: &TcpListener) -> Result<(String, String)> {
    let deadline = std::time::Instant::now() + Duration::from_secs(300);

    loop {
        match listener.accept() {
            Ok((mut stream, _)) => {
                stream.set_nonblocking(false)?;
                stream.set_read_timeout(Some(Duration::from_secs(5)))?;

                let mut reader = BufReader::new(&stream);
                let mut request_line = String::new();
                reader.read_line(&mut request_line)?;

                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .ok_or_else(|| anyhow!("Invalid request"))?;
                let parsed = parse_callback_target(target)?;

                let response = "HTTP/1.1 200 OK\r\n\
                               Content-Type: text/html\r\n\r\n\
                               <html><body>\
                               <h1>Signed in!</h1>\
                               <p>You can close this window and return to Mate Engine Analysis.</p>\
                               </body></html>";
                stream.write_all(response.as_bytes())?;
                stream.flush()?;

                return Ok(parsed);
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                if std::time::Instant::now() > deadline {
                    return Err(anyhow!(
                        "Sign-in callback timed out after 5 minutes. Please try again."
                    ));
                }
                std::thread::sleep(Duration::from_millis(200));
            }
            Err(e) => return Err(anyhow!("Failed to accept OAuth callback: {}", e)),
        }
    }
}
