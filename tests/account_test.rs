mod common;

use common::{session, MockBackend, Reply};
use confizio_submit::clients::{FileSessionStore, SessionStore};
use confizio_submit::error::ValidationError;
use confizio_submit::models::{ApiMessage, LoginResponse, ProfileResponse, Role};
use confizio_submit::workflow::{LoginFlow, PasswordResetFlow, ProfileFlow, SubmitOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn session_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("confizio-{}-{}.json", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn login_flow(mock: &Arc<MockBackend>, path: &Path) -> LoginFlow {
    let mut flow = LoginFlow::new(mock.clone(), Arc::new(FileSessionStore::new(path)));
    let form = flow.form_mut();
    form.email = "ada@uni.edu".into();
    form.password = "secret1".into();
    flow
}

#[tokio::test]
async fn login_saves_the_auth_blob() {
    let mock = MockBackend::shared();
    let path = session_file("login");
    let mut flow = login_flow(&mock, &path);

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Submitted {
            message: "Login successfully".into()
        }
    );
    let session = flow.session().unwrap().clone();
    assert_eq!(session.token, "jwt");
    assert!(session.has_role(Role::Reviewer));
    assert!(flow.form().password.is_empty());

    let stored = FileSessionStore::new(&path).load().await.unwrap();
    assert_eq!(stored.as_ref(), Some(session.as_ref()));

    flow.logout().await.unwrap();
    assert!(flow.session().is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn refused_login_keeps_no_session() {
    let mock = MockBackend::shared();
    mock.set_login(Reply::Ok(LoginResponse {
        success: Some(false),
        message: Some("Invalid Password".into()),
        ..LoginResponse::default()
    }));
    let path = session_file("login-refused");
    let mut flow = login_flow(&mock, &path);

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Failed {
            message: "Invalid Password".into()
        }
    );
    assert!(flow.session().is_none());
    assert!(!path.exists());
    assert_eq!(flow.form().email, "ada@uni.edu");

    mock.set_login(Reply::Rejected("Email is not registered".into()));
    assert_eq!(
        flow.submit().await.unwrap().message().as_deref(),
        Some("Email is not registered")
    );

    mock.set_login(Reply::Down);
    assert_eq!(
        flow.submit().await.unwrap().message().as_deref(),
        Some("Something went wrong")
    );
}

#[tokio::test]
async fn short_login_password_never_reaches_backend() {
    let mock = MockBackend::shared();
    let path = session_file("login-short");
    let mut flow = login_flow(&mock, &path);
    flow.form_mut().password = "123".into();

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Blocked(ValidationError::LoginPasswordTooShort)
    );
    assert!(mock.logins_sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn password_reset_reports_backend_outcome() {
    let mock = MockBackend::shared();
    let mut flow = PasswordResetFlow::new(mock.clone());
    let form = flow.form_mut();
    form.email = "ada@uni.edu".into();
    form.recovery_key = "engine".into();
    form.new_password = "newsecret".into();

    mock.set_reset(Reply::Ok(ApiMessage::refused("Wrong Email Or Answer")));
    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Failed {
            message: "Wrong Email Or Answer".into()
        }
    );

    // 请求失败时不透传后端消息
    mock.set_reset(Reply::Rejected("internal".into()));
    assert_eq!(
        flow.submit().await.unwrap().message().as_deref(),
        Some("Something went wrong")
    );

    mock.set_reset(Reply::Ok(ApiMessage::ok("Password Reset Successfully")));
    assert!(flow.submit().await.unwrap().is_submitted());
    assert_eq!(mock.resets_sent.lock().unwrap()[0].recovery_key, "engine");
    assert!(flow.form().email.is_empty());
}

#[tokio::test]
async fn profile_update_refreshes_and_stores_session() {
    let mock = MockBackend::shared();
    let path = session_file("profile");
    let store = Arc::new(FileSessionStore::new(&path));
    let mut flow = ProfileFlow::new(mock.clone(), store.clone(), session());
    assert_eq!(flow.form().name, "Ada Lovelace");

    let form = flow.form_mut();
    form.name = "Ada King".into();
    form.phone = "555-0199".into();
    form.address = "London".into();

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Submitted {
            message: "Profile Updated Successfully".into()
        }
    );
    assert_eq!(flow.session().user.name, "Ada King");
    assert_eq!(flow.session().token, "tok");

    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.user.address, "London");
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn profile_error_keeps_old_session() {
    let mock = MockBackend::shared();
    mock.set_profile(Reply::Ok(ProfileResponse {
        error: Some("Password is required and 6 character long".into()),
        updated_user: None,
    }));
    let path = session_file("profile-error");
    let store = Arc::new(FileSessionStore::new(&path));
    let mut flow = ProfileFlow::new(mock.clone(), store, session());
    let form = flow.form_mut();
    form.phone = "555-0199".into();
    form.address = "London".into();

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Failed {
            message: "Password is required and 6 character long".into()
        }
    );
    assert_eq!(flow.session().user.name, "Ada Lovelace");
    assert!(!path.exists());
}

#[tokio::test]
async fn profile_requires_phone_and_address() {
    let mock = MockBackend::shared();
    let path = session_file("profile-blank");
    let store = Arc::new(FileSessionStore::new(&path));
    let mut flow = ProfileFlow::new(mock.clone(), store, session());

    assert_eq!(
        flow.submit().await.unwrap(),
        SubmitOutcome::Blocked(ValidationError::FieldRequired { field: "Phone" })
    );
    assert!(mock.profiles_sent.lock().unwrap().is_empty());
}
