use std::sync::Arc;

use auth::AuthConfig;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;
use credential_service::credential::errors::CredentialError;
use credential_service::credential::models::ChangePasswordCommand;
use credential_service::credential::models::Identity;
use credential_service::credential::models::LoginCommand;
use credential_service::credential::models::RegisterCommand;
use credential_service::credential::ports::CredentialServicePort;
use credential_service::credential::ports::CredentialStore;
use credential_service::credential::service::CredentialService;
use credential_service::repositories::InMemoryCredentialStore;

const PASSPHRASE: &str =
    "a-very-long-passphrase-that-exceeds-seventy-two-bytes-when-utf8-encoded-##";

struct TestApp {
    store: Arc<InMemoryCredentialStore>,
    authenticator: Arc<Authenticator>,
    service: CredentialService<InMemoryCredentialStore>,
}

impl TestApp {
    fn spawn() -> Self {
        let mut config = AuthConfig::new("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.password_cost = 4;
        config.default_token_lifetime_minutes = 30;

        let store = Arc::new(InMemoryCredentialStore::new());
        let authenticator =
            Arc::new(Authenticator::from_config(&config).expect("Failed to build authenticator"));
        let service = CredentialService::new(Arc::clone(&store), Arc::clone(&authenticator));

        Self {
            store,
            authenticator,
            service,
        }
    }
}

fn identity(value: &str) -> Identity {
    Identity::new(value).unwrap()
}

#[tokio::test]
async fn test_long_passphrase_register_and_login() {
    let app = TestApp::spawn();
    let alice = identity("alice@example.com");

    let credential = app
        .service
        .register(RegisterCommand::new(alice.clone(), PASSPHRASE))
        .await
        .expect("Registration failed");

    let stored = app.store.find(&alice).await.unwrap().unwrap();
    assert_eq!(stored, credential);
    assert!(!stored.password_hash.as_str().is_empty());
    assert_ne!(stored.password_hash.as_str(), PASSPHRASE);
    assert!(stored.password_hash.as_str().starts_with("$2b$"));

    let outcome = app
        .service
        .login(LoginCommand::new(alice.clone(), PASSPHRASE))
        .await
        .expect("Login failed");
    let claims = app.authenticator.validate_token(&outcome.access_token).unwrap();
    assert_eq!(claims.sub, "alice@example.com");

    let altered = PASSPHRASE.replace("##", "#!");
    let result = app.service.login(LoginCommand::new(alice, altered)).await;
    assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
}

#[tokio::test]
async fn test_default_and_explicit_token_lifetimes() {
    let app = TestApp::spawn();
    let bob = identity("bob");

    app.service
        .register(RegisterCommand::new(bob.clone(), "hunter2"))
        .await
        .unwrap();

    let default_token = app
        .service
        .login(LoginCommand::new(bob.clone(), "hunter2"))
        .await
        .unwrap()
        .access_token;
    let explicit_token = app
        .service
        .login(LoginCommand::new(bob.clone(), "hunter2").with_expires_in(Duration::minutes(5)))
        .await
        .unwrap()
        .access_token;
    let negative_token = app
        .service
        .login(LoginCommand::new(bob, "hunter2").with_expires_in(Duration::minutes(-10)))
        .await
        .unwrap()
        .access_token;

    let now = Utc::now();
    let default_exp = app.authenticator.validate_token(&default_token).unwrap().exp;
    let explicit_exp = app.authenticator.validate_token(&explicit_token).unwrap().exp;
    let negative_exp = app.authenticator.validate_token(&negative_token).unwrap().exp;

    assert!((default_exp - (now + Duration::minutes(30)).timestamp()).abs() <= 5);
    assert!((explicit_exp - (now + Duration::minutes(5)).timestamp()).abs() <= 5);
    assert!((negative_exp - (now + Duration::minutes(30)).timestamp()).abs() <= 5);
}

#[tokio::test]
async fn test_duplicate_registration_keeps_original_credential() {
    let app = TestApp::spawn();
    let carol = identity("carol");

    app.service
        .register(RegisterCommand::new(carol.clone(), "first"))
        .await
        .unwrap();
    let result = app
        .service
        .register(RegisterCommand::new(carol.clone(), "second"))
        .await;

    assert!(matches!(result, Err(CredentialError::AlreadyExists(_))));
    assert!(app
        .service
        .login(LoginCommand::new(carol, "first"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = TestApp::spawn();
    let dave = identity("dave");

    app.service
        .register(RegisterCommand::new(dave.clone(), "old-password"))
        .await
        .unwrap();
    app.service
        .change_password(ChangePasswordCommand::new(
            dave.clone(),
            "old-password",
            "パスワード".repeat(5),
        ))
        .await
        .unwrap();

    let old = app
        .service
        .login(LoginCommand::new(dave.clone(), "old-password"))
        .await;
    assert!(matches!(old, Err(CredentialError::InvalidCredentials)));

    let new = app
        .service
        .login(LoginCommand::new(dave, "パスワード".repeat(5)))
        .await;
    assert!(new.is_ok());
}

#[tokio::test]
async fn test_unknown_identity_and_removed_identity() {
    let app = TestApp::spawn();
    let erin = identity("erin");

    let unknown = app
        .service
        .login(LoginCommand::new(erin.clone(), "password"))
        .await;
    assert!(matches!(unknown, Err(CredentialError::InvalidCredentials)));

    app.service
        .register(RegisterCommand::new(erin.clone(), "password"))
        .await
        .unwrap();
    app.service.remove(&erin).await.unwrap();

    let removed = app
        .service
        .login(LoginCommand::new(erin, "password"))
        .await;
    assert!(matches!(removed, Err(CredentialError::InvalidCredentials)));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_logins() {
    let app = Arc::new(TestApp::spawn());
    let frank = identity("frank");

    app.service
        .register(RegisterCommand::new(frank.clone(), "password"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = Arc::clone(&app);
            let frank = frank.clone();
            tokio::spawn(async move {
                app.service
                    .login(LoginCommand::new(frank, "password"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().expect("Concurrent login failed");
        assert_eq!(outcome.identity.as_str(), "frank");
    }
}
