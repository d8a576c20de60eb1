//! Register Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use secrecy::SecretString;
use serde::Deserialize;

use stockroom_app::auth::data::NewUser;

use crate::{
    auth::{MessageResponse, into_status_error, middleware::credentials},
    extensions::*,
    state::State,
};

/// Registration Request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            name: request.name,
            email: request.email,
            password: SecretString::from(request.password),
            is_admin: request.is_admin,
        }
    }
}

/// Register Handler
///
/// Creating an admin account needs admin credentials on the request, unless
/// admin signup is open.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let registrar = if request.is_admin {
        state.app.auth.authenticate(&credentials(req)).ok()
    } else {
        None
    };

    state
        .app
        .auth
        .register(request.into(), registrar)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("User registered successfully")))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use secrecy::ExposeSecret;
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::auth::{
        AuthServiceError, Identity, MockAuthService,
        records::{UserRecord, UserUuid},
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_TOKEN, auth_service, bearer_credentials, strict_auth_mock},
    };

    use super::*;

    fn make_user(user: &NewUser) -> UserRecord {
        UserRecord {
            uuid: UserUuid::new(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: "$argon2id$stub".to_string(),
            is_admin: user.is_admin,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("register").post(handler))
    }

    #[tokio::test]
    async fn test_register_returns_201() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|user, registrar| {
                user.email == "ada@example.com"
                    && user.password.expose_secret() == "hunter22"
                    && !user.is_admin
                    && registrar.is_none()
            })
            .return_once(|user, _| Ok(make_user(&user)));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "User registered successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_, _| Err(AuthServiceError::DuplicateEmail));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "Email already registered");

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_signup_without_credentials_returns_403() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_| Err(stockroom_app::auth::GateError::MissingCredential));

        auth.expect_register()
            .once()
            .withf(|user, registrar| user.is_admin && registrar.is_none())
            .return_once(|_, _| Err(AuthServiceError::AdminRequired));

        let res = TestClient::post("http://example.com/register")
            .json(&json!({
                "name": "Mallory",
                "email": "mallory@example.com",
                "password": "hunter22",
                "isAdmin": true
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_signup_by_admin_forwards_registrar() -> TestResult {
        let admin = Identity::user(UserUuid::new(), true);

        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|credentials| *credentials == bearer_credentials())
            .return_once(move |_| Ok(admin));

        auth.expect_register()
            .once()
            .withf(move |user, registrar| user.is_admin && *registrar == Some(admin))
            .return_once(|user, _| Ok(make_user(&user)));

        let res = TestClient::post("http://example.com/register")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"), true)
            .json(&json!({
                "name": "Grace",
                "email": "grace@example.com",
                "password": "hunter22",
                "isAdmin": true
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_weak_password_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_, _| Err(AuthServiceError::WeakPassword));

        let res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "abc" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_return_400() -> TestResult {
        let res = TestClient::post("http://example.com/register")
            .json(&json!({ "email": "ada@example.com" }))
            .send(&make_service(strict_auth_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
