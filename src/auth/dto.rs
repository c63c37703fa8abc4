use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for asking a login link.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub sent: bool,
}

/// Query of the link sent by email.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub token: String,
    pub email: String,
}

/// Response returned once a login link is consumed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_response_is_camel_case() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(SessionResponse {
            session_token: "jwt".into(),
            user: PublicUser { id, email: "jan@example.nl".into() },
        })
        .unwrap();
        assert_eq!(
            json,
            json!({ "sessionToken": "jwt", "user": { "id": id, "email": "jan@example.nl" } })
        );
    }
}
