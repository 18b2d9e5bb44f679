use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::Role;

/// Caller identity as asserted by the upstream gateway. The identity provider
/// sits in front of this service; the headers are trusted as-is.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

impl Identity {
    pub fn require_moderator(&self) -> Result<(), (StatusCode, String)> {
        if self.role == Role::Moderator {
            Ok(())
        } else {
            Err((StatusCode::FORBIDDEN, "Moderator role required".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing x-user-id header".to_string(),
            ))?
            .to_string();

        let role = match parts.headers.get("x-user-role") {
            None => Role::User,
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or((
                    StatusCode::BAD_REQUEST,
                    "Invalid x-user-role header".to_string(),
                ))?,
        };

        Ok(Identity { user_id, role })
    }
}
