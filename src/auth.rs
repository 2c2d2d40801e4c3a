use base64::Engine;

use crate::types::Auth;

/// Value of the `Authorization` header for the given auth mode.
///
/// Credentials are trimmed first. Returns `None` for `Auth::None`, for Basic
/// auth where both username and password are blank, and for a blank Bearer
/// token.
pub fn authorization_header(auth: &Auth) -> Option<String> {
    match auth {
        Auth::None => None,
        Auth::Basic { username, password } => {
            let username = username.trim();
            let password = password.trim();
            if username.is_empty() && password.is_empty() {
                return None;
            }
            let credentials = format!("{}:{}", username, password);
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            Some(format!("Basic {}", encoded))
        }
        Auth::Bearer { token } => {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            Some(format!("Bearer {}", token))
        }
    }
}
