use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use sha2::Sha256;
use tracing::error;

const LOGIN_TOKEN_LEN: usize = 43;

/// Random URL-safe token placed in a login link.
pub fn generate_login_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(LOGIN_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Keyed digest of a login token, hex encoded. Deterministic, so the stored
/// value can be looked up directly.
pub fn hash_token(secret: &str, token: &str) -> anyhow::Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|e| {
        error!(error = %e, "hmac key error");
        anyhow::anyhow!(e.to_string())
    })?;
    mac.update(token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
