//! Request actor extractor.
//!
//! Authentication happens upstream of this service. The gateway forwards
//! the administrator's id in `x-user-id`; requests without it are
//! attributed to the system user. `x-request-id` becomes the correlation
//! id carried by published events.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{CommandMetadata, UserId};

use super::super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Who is making the request and how to correlate its effects.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub request_id: Option<String>,
}

impl Actor {
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.user_id.clone()).with_source("api");
        match &self.request_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

/// Rejection for a malformed actor header.
#[derive(Debug)]
pub struct ActorRejection(String);

impl IntoResponse for ActorRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(self.0))).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ActorRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Result<Option<String>, ActorRejection> {
            match parts.headers.get(name) {
                None => Ok(None),
                Some(value) => value
                    .to_str()
                    .map(|v| Some(v.trim().to_string()))
                    .map_err(|_| ActorRejection(format!("{} header is not valid text", name))),
            }
        };

        let user_id = match header(USER_ID_HEADER)? {
            Some(id) => UserId::new(id).map_err(|e| ActorRejection(e.to_string()))?,
            None => UserId::system(),
        };
        let request_id = header(REQUEST_ID_HEADER)?.filter(|id| !id.is_empty());

        Ok(Actor {
            user_id,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Actor, ActorRejection> {
        let (mut parts, _) = request.into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_user_and_request_id() {
        let actor = extract(
            Request::builder()
                .header(USER_ID_HEADER, "admin-7")
                .header(REQUEST_ID_HEADER, "req-1")
                .body(())
                .unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(actor.user_id.as_str(), "admin-7");
        assert_eq!(actor.metadata().correlation_id(), "req-1");
    }

    #[tokio::test]
    async fn missing_header_is_the_system_user() {
        let actor = extract(Request::builder().body(()).unwrap()).await.unwrap();
        assert_eq!(actor.user_id, UserId::system());
        assert!(actor.metadata().correlation_id_opt().is_none());
    }

    #[tokio::test]
    async fn blank_user_is_rejected() {
        let result = extract(Request::builder().header(USER_ID_HEADER, "  ").body(()).unwrap()).await;
        assert!(result.is_err());
    }
}
