//! Unit tests for auth crate
//! Use cases and routes run against an in-memory credential store.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use crate::domain::entity::{account::Account, user::User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{
        email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    };
    use crate::error::{AuthError, AuthResult};

    /// Credential store backed by a Vec, enforcing the same uniqueness as the
    /// `users` table
    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        rows: Arc<Mutex<Vec<(User, UserPassword)>>>,
    }

    impl InMemoryUserRepository {
        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|(u, _)| u.email == user.email) {
                return Err(AuthError::EmailTaken);
            }
            if rows
                .iter()
                .any(|(u, _)| u.user_name.canonical() == user.user_name.canonical())
            {
                return Err(AuthError::UserNameTaken);
            }
            rows.push((user.clone(), password.clone()));
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|(u, _)| &u.user_id == user_id)
                .map(|(u, _)| u.clone()))
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|(u, _)| &u.email == email)
                .map(|(u, _)| u.clone()))
        }

        async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|(u, _)| u.user_name.canonical() == user_name.canonical())
                .map(|(u, _)| u.clone()))
        }

        async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|(u, _)| &u.email == email)
                .map(|(user, password)| Account {
                    user: user.clone(),
                    password: password.clone(),
                }))
        }
    }

    /// Lookups always miss, as if a concurrent signup committed between the
    /// pre-check and the insert. Only `create` sees the committed rows.
    #[derive(Clone, Default)]
    pub struct RacingUserRepository {
        pub committed: InMemoryUserRepository,
    }

    impl UserRepository for RacingUserRepository {
        async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()> {
            self.committed.create(user, password).await
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            self.committed.find_by_id(user_id).await
        }

        async fn find_by_email(&self, _email: &Email) -> AuthResult<Option<User>> {
            Ok(None)
        }

        async fn find_by_user_name(&self, _user_name: &UserName) -> AuthResult<Option<User>> {
            Ok(None)
        }

        async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
            self.committed.find_account_by_email(email).await
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::{InMemoryUserRepository, RacingUserRepository};
    use crate::application::{
        AuthConfig, FetchUserUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    };
    use crate::error::AuthError;

    fn sign_up_input(user_name: &str, email: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    fn setup() -> (Arc<InMemoryUserRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(AuthConfig::development()),
        )
    }

    #[tokio::test]
    async fn test_sign_up_then_login_returns_same_user() {
        let (repo, config) = setup();

        let signed_up = SignUpUseCase::new(repo.clone(), config.clone())
            .execute(sign_up_input("reader", "Reader@Example.com"))
            .await
            .unwrap();

        let signed_in = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                email: "reader@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(signed_up.user.user_id, signed_in.user.user_id);
        assert!(!signed_in.session_token.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_lost_race_is_rejected_by_store() {
        let repo = Arc::new(RacingUserRepository::default());
        let config = Arc::new(AuthConfig::development());
        let use_case = SignUpUseCase::new(repo.clone(), config);

        use_case
            .execute(sign_up_input("first", "shared@example.com"))
            .await
            .unwrap();

        let err = use_case
            .execute(sign_up_input("second", "shared@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        let err = use_case
            .execute(sign_up_input("FIRST", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        assert_eq!(repo.committed.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_missing_field() {
        let (repo, config) = setup();

        let err = SignUpUseCase::new(repo.clone(), config)
            .execute(SignUpInput {
                user_name: "reader".to_string(),
                email: "  ".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(ref m) if m == "All fields are required"));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_creates_nothing() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo.clone(), config);

        use_case
            .execute(sign_up_input("reader", "reader@example.com"))
            .await
            .unwrap();
        let err = use_case
            .execute(sign_up_input("another", "READER@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_user_name_is_case_insensitive() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo.clone(), config);

        use_case
            .execute(sign_up_input("BookWorm", "one@example.com"))
            .await
            .unwrap();
        let err = use_case
            .execute(sign_up_input("bookworm", "two@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_the_same() {
        let (repo, config) = setup();
        SignUpUseCase::new(repo.clone(), config.clone())
            .execute(sign_up_input("reader", "reader@example.com"))
            .await
            .unwrap();

        let use_case = SignInUseCase::new(repo, config);

        let wrong_password = use_case
            .execute(SignInInput {
                email: "reader@example.com".to_string(),
                password: "not the password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute(SignInInput {
                email: "nobody@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_fetch_user_with_issued_token() {
        let (repo, config) = setup();
        let output = SignUpUseCase::new(repo.clone(), config.clone())
            .execute(sign_up_input("reader", "reader@example.com"))
            .await
            .unwrap();

        let user = FetchUserUseCase::new(repo, config)
            .execute(Some(&output.session_token))
            .await
            .unwrap();

        assert_eq!(user.user_id, output.user.user_id);
    }

    #[tokio::test]
    async fn test_fetch_user_token_errors() {
        let (repo, config) = setup();
        let use_case = FetchUserUseCase::new(repo, config);

        assert!(matches!(
            use_case.execute(None).await,
            Err(AuthError::TokenMissing)
        ));
        assert!(matches!(
            use_case.execute(Some("garbage")).await,
            Err(AuthError::TokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_fetch_user_for_vanished_user() {
        let (repo, config) = setup();
        let token = crate::application::issue_session(
            &config.signer,
            &crate::domain::value_object::user_id::UserId::new(),
        )
        .unwrap();

        let err = FetchUserUseCase::new(repo, config)
            .execute(Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::support::{InMemoryUserRepository, RacingUserRepository};
    use crate::application::AuthConfig;
    use crate::presentation::router::auth_router_generic;

    fn app() -> axum::Router {
        auth_router_generic(InMemoryUserRepository::default(), AuthConfig::development())
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_sets_cookie_and_hides_password() {
        let response = app()
            .oneshot(json_post(
                "/signup",
                r#"{"username":"reader","email":"reader@example.com","password":"correct horse battery"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=604800"));

        let json = body_json(response).await;
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["user"]["username"], "reader");
        assert!(json["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_signup_missing_fields_is_400() {
        let response = app()
            .oneshot(json_post("/signup", r#"{"username":"reader"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "All fields are required");
    }

    #[tokio::test]
    async fn test_fetch_user_without_cookie_is_401() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/fetch-user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "No token provided");
    }

    #[tokio::test]
    async fn test_fetch_user_with_tampered_cookie_is_401() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/fetch-user")
                    .header(header::COOKIE, "token=abc.def")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let response = app()
            .oneshot(json_post("/logout", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
        assert_eq!(body_json(response).await["message"], "Logged out successfully");
    }

    #[tokio::test]
    async fn test_signup_duplicate_caught_by_store_is_400() {
        let repo = RacingUserRepository::default();
        let router = auth_router_generic(repo.clone(), AuthConfig::development());

        let response = router
            .clone()
            .oneshot(json_post(
                "/signup",
                r#"{"username":"first","email":"shared@example.com","password":"correct horse battery"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(json_post(
                "/signup",
                r#"{"username":"second","email":"shared@example.com","password":"correct horse battery"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "User already exists");
        assert_eq!(repo.committed.len(), 1);
    }

    #[tokio::test]
    async fn test_login_unparseable_body_is_400_json() {
        let response = app().oneshot(json_post("/login", "not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Malformed JSON body");
    }

    #[tokio::test]
    async fn test_signup_without_content_type_is_400_json() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .body(Body::from(r#"{"username":"reader"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Expected request with Content-Type: application/json"
        );
    }

    #[tokio::test]
    async fn test_signup_wrongly_typed_field_is_400_json() {
        let response = app()
            .oneshot(json_post("/signup", r#"{"username":42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = body_json(response).await["message"].as_str().unwrap().to_string();
        assert!(message.starts_with("Invalid JSON body"), "{}", message);
    }
}
