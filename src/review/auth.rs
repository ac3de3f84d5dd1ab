use axum::http::HeaderMap;

/// Caller identity decoded from `Authorization: Bearer <role>:<user_id>`
/// where `<role>` is `admin` or `user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub user_id: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("invalid Authorization header format")]
    InvalidFormat,
}

pub fn parse_auth_header(headers: &HeaderMap) -> Result<AuthInfo, AuthError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidFormat)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidFormat);
    }

    let (role, user_id) = token.split_once(':').ok_or(AuthError::InvalidFormat)?;
    if user_id.is_empty() {
        return Err(AuthError::InvalidFormat);
    }

    let is_admin = match role {
        "admin" => true,
        "user" => false,
        _ => return Err(AuthError::InvalidFormat),
    };

    Ok(AuthInfo {
        user_id: user_id.to_string(),
        is_admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().expect("header value"));
        headers
    }

    #[test]
    fn parses_admin_and_user_tokens() {
        let admin = parse_auth_header(&headers_with("Bearer admin:u1")).expect("admin parses");
        assert!(admin.is_admin);
        assert_eq!(admin.user_id, "u1");

        let user = parse_auth_header(&headers_with("bearer user:u2")).expect("user parses");
        assert!(!user.is_admin);
        assert_eq!(user.user_id, "u2");
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(
            parse_auth_header(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        );
        assert_eq!(
            parse_auth_header(&headers_with("Basic dXNlcg==")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            parse_auth_header(&headers_with("Bearer admin")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            parse_auth_header(&headers_with("Bearer admin:")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            parse_auth_header(&headers_with("Bearer owner:u1")),
            Err(AuthError::InvalidFormat)
        );
    }
}
