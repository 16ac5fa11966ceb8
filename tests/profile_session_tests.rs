//! Integration tests for persisted profiles and session activation.

use monday_api::auth::{CredentialStore, MemoryCredentials};
use monday_api::{
    ApiToken, ApiUrl, ApiVersion, ConfigError, MondayClient, MondayError, ProfileName, ProfileStore,
    Session,
};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a store in a fresh temporary directory with in-memory tokens.
fn create_test_store() -> (tempfile::TempDir, ProfileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store =
        ProfileStore::with_credentials(dir.path().join("profiles"), MemoryCredentials::new());
    (dir, store)
}

fn save(store: &ProfileStore, name: &str, token: &str, url: &str) {
    store
        .save(
            &ProfileName::new(name).unwrap(),
            &ApiToken::new(token).unwrap(),
            &ApiUrl::new(url).unwrap(),
        )
        .unwrap();
}

// ============================================================================
// Activation Tests
// ============================================================================

#[test]
fn test_activate_loads_token_and_url() {
    let (_dir, store) = create_test_store();
    save(&store, "work", "work-token", "https://api.monday.com/v2");

    let mut session = Session::new(store);
    let profile = session.activate("work").unwrap();

    assert_eq!(profile.name.as_ref(), "work");
    assert_eq!(profile.api_token.as_ref(), "work-token");
    assert_eq!(profile.api_url.as_ref(), "https://api.monday.com/v2");
}

#[test]
fn test_activating_missing_profile_keeps_current_one() {
    let (_dir, store) = create_test_store();
    save(&store, "work", "work-token", "https://api.monday.com/v2");

    let mut session = Session::new(store);
    session.activate("work").unwrap();

    let error = session.activate("personal").unwrap_err();
    assert!(matches!(error, ConfigError::ProfileNotFound { ref name, .. } if name == "personal"));
    assert_eq!(session.active().unwrap().name.as_ref(), "work");
}

#[test]
fn test_activating_invalid_name_fails() {
    let (_dir, store) = create_test_store();
    let mut session = Session::new(store);

    assert!(matches!(
        session.activate("../escape"),
        Err(ConfigError::InvalidProfileName { .. })
    ));
    assert!(session.active().is_none());
}

#[test]
fn test_switching_profiles_replaces_active() {
    let (_dir, store) = create_test_store();
    save(&store, "a", "token-a", "https://a.example.com/v2");
    save(&store, "b", "token-b", "https://b.example.com/v2");

    let mut session = Session::new(store);
    session.activate("a").unwrap();
    session.activate("b").unwrap();

    let config = session.config().unwrap();
    assert_eq!(config.api_token().as_ref(), "token-b");
    assert_eq!(config.api_url().host_name(), "b.example.com");
}

#[test]
fn test_client_requires_active_profile() {
    let (_dir, store) = create_test_store();
    let session = Session::new(store);

    assert!(matches!(session.client(), Err(ConfigError::NoActiveProfile)));
}

#[test]
fn test_session_api_version_applies_to_config() {
    let (_dir, store) = create_test_store();
    save(&store, "work", "t", "https://api.monday.com/v2");

    let mut session = Session::new(store).with_api_version(ApiVersion::V2024_10);
    session.activate("work").unwrap();

    assert_eq!(session.config().unwrap().api_version(), &ApiVersion::V2024_10);
}

#[test]
fn test_profiles_are_listed_sorted() {
    let (_dir, store) = create_test_store();
    save(&store, "zeta", "t", "https://api.monday.com/v2");
    save(&store, "alpha", "t", "https://api.monday.com/v2");

    let names: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

// ============================================================================
// Credential Storage Tests
// ============================================================================

#[test]
fn test_token_is_kept_out_of_profile_files() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = MemoryCredentials::new();
    let store = ProfileStore::with_credentials(dir.path(), credentials.clone());
    save(&store, "work", "never-on-disk", "https://api.monday.com/v2");

    for entry in std::fs::read_dir(dir.path().join("work")).unwrap() {
        let contents = std::fs::read(entry.unwrap().path()).unwrap();
        let contents = String::from_utf8_lossy(&contents);
        assert!(!contents.contains("never-on-disk"));
    }

    // A second store over the same directory and token backend sees the profile
    let reopened = ProfileStore::with_credentials(dir.path(), credentials);
    let profile = reopened.load(&ProfileName::new("work").unwrap()).unwrap();
    assert_eq!(profile.api_token.as_ref(), "never-on-disk");
}

#[test]
fn test_activating_profile_without_token_keeps_current_one() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = MemoryCredentials::new();
    let store = ProfileStore::with_credentials(dir.path(), credentials.clone());
    save(&store, "work", "work-token", "https://api.monday.com/v2");
    save(&store, "personal", "personal-token", "https://api.monday.com/v2");
    credentials
        .delete(&ProfileName::new("personal").unwrap())
        .unwrap();

    let mut session = Session::new(store);
    session.activate("work").unwrap();

    let error = session.activate("personal").unwrap_err();
    assert!(matches!(error, ConfigError::MissingCredential { ref name } if name == "personal"));
    assert_eq!(session.active().unwrap().name.as_ref(), "work");
}

// ============================================================================
// End-to-End Tests
// ============================================================================

#[tokio::test]
async fn test_session_client_uses_profile_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "profile-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "me": { "id": "3", "name": "Ann" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = create_test_store();
    save(&store, "mock", "profile-token", &format!("{}/v2", server.uri()));

    let mut session = Session::new(store);
    session.activate("mock").unwrap();
    let client: MondayClient = session.client().unwrap();

    let me = client.get_current_user().await.unwrap();
    assert_eq!(me.id, 3);
    assert_eq!(me.name, "Ann");
}

async fn current_user_name(session: &mut Session, profile: &str) -> Result<String, MondayError> {
    session.activate(profile)?;
    let client = session.client()?;
    Ok(client.get_current_user().await?.name)
}

#[tokio::test]
async fn test_activation_failure_converts_to_monday_error() {
    let (_dir, store) = create_test_store();
    let mut session = Session::new(store);

    let error = current_user_name(&mut session, "missing").await.unwrap_err();

    assert!(matches!(
        error,
        MondayError::Configuration(ConfigError::ProfileNotFound { ref name, .. }) if name == "missing"
    ));
    assert!(error.context().is_none());
}
