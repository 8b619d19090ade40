//! Full flow over a real socket: forms produce requests, the client sends them.

mod common;

use reqwest::StatusCode;
use snaplink::api::dto::links::ShortenRequest;
use snaplink::client::{
    ApiClient, ClientError, Dashboard, DashboardAction, Effect, LoginAction, LoginField,
    LoginForm, RegisterAction, RegisterField, RegisterForm, Session, View, guard,
};
use snaplink::routes::{RouterOptions, build_router};

/// Serves the app on an ephemeral port and returns a client for it.
async fn spawn_app() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = build_router(
        common::create_test_state(),
        RouterOptions {
            behind_proxy: false,
            rate_limit: false,
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn test_register_login_shorten_redirect() {
    let client = spawn_app().await;

    // Register through the form
    let form = RegisterForm::new();
    let (form, _) = form.update(RegisterAction::Edit(RegisterField::Username, "alice".into()));
    let (form, _) = form.update(RegisterAction::Edit(
        RegisterField::Email,
        "alice@example.com".into(),
    ));
    let (form, _) = form.update(RegisterAction::Edit(RegisterField::Password, "secret1".into()));
    let (form, _) = form.update(RegisterAction::Edit(
        RegisterField::ConfirmPassword,
        "secret1".into(),
    ));
    let (form, effects) = form.update(RegisterAction::Submit);

    let Some(Effect::SendRegister(request)) = effects.into_iter().next() else {
        panic!("expected a register request");
    };
    let registered = client.register(&request).await.unwrap();
    assert_eq!(registered.username, "alice");

    let (_, effects) = form.update(RegisterAction::Succeeded);
    assert_eq!(effects, vec![Effect::Navigate(View::Login)]);

    // Login through the form
    let form = LoginForm::new();
    let (form, _) = form.update(LoginAction::Edit(LoginField::Identifier, "alice".into()));
    let (form, _) = form.update(LoginAction::Edit(LoginField::Password, "secret1".into()));
    let (form, effects) = form.update(LoginAction::Submit);

    let Some(Effect::SendLogin(request)) = effects.into_iter().next() else {
        panic!("expected a login request");
    };
    let session = client.login(&request).await.unwrap();
    assert_eq!(session.user_id, registered.id);

    let (_, effects) = form.update(LoginAction::Succeeded(session.clone()));
    assert_eq!(
        effects,
        vec![
            Effect::StoreSession(session.clone()),
            Effect::Navigate(View::Dashboard)
        ]
    );
    assert_eq!(guard(View::Login, Some(&session)), View::Dashboard);

    // Shorten through the dashboard
    let dashboard = Dashboard::new();
    let (dashboard, _) = dashboard.on_enter();
    let links = client.list(&session).await.unwrap();
    assert!(links.is_empty());
    let (dashboard, _) = dashboard.update(DashboardAction::Loaded(links));

    let (dashboard, _) =
        dashboard.update(DashboardAction::EditUrl("https://example.com".into()));
    let (dashboard, effects) = dashboard.update(DashboardAction::Submit);

    let Some(Effect::SendShorten(request)) = effects.into_iter().next() else {
        panic!("expected a shorten request");
    };
    let created = client.shorten(&session, &request).await.unwrap();
    assert_eq!(created.code.len(), 6);
    assert!(created.code.chars().all(|c| c.is_ascii_alphanumeric()));

    let (dashboard, effects) = dashboard.update(DashboardAction::Created(created.clone()));
    assert_eq!(effects, vec![Effect::LoadLinks]);

    // Follow the short link once
    let target = client.resolve(&created.code).await.unwrap();
    assert_eq!(target, "https://example.com");

    let links = client.list(&session).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, created.code);
    assert_eq!(links[0].visit_count, 1);

    let (dashboard, _) = dashboard.update(DashboardAction::Loaded(links));
    assert!(!dashboard.is_loading);
    assert_eq!(dashboard.links.len(), 1);
}

#[tokio::test]
async fn test_me_and_logout() {
    let client = spawn_app().await;

    let mut form = RegisterForm::new();
    for (field, value) in [
        (RegisterField::Username, "bob"),
        (RegisterField::Email, "bob@example.com"),
        (RegisterField::Password, "hunter22"),
        (RegisterField::ConfirmPassword, "hunter22"),
    ] {
        form = form.update(RegisterAction::Edit(field, value.into())).0;
    }
    let (_, effects) = form.update(RegisterAction::Submit);
    let Some(Effect::SendRegister(request)) = effects.into_iter().next() else {
        panic!("expected a register request");
    };
    client.register(&request).await.unwrap();

    let session = client
        .login(&snaplink::api::dto::auth::LoginRequest {
            identifier: "bob@example.com".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    let me = client.me(&session).await.unwrap();
    assert_eq!(me.username, "bob");

    client.logout().await.unwrap();
}

#[tokio::test]
async fn test_client_errors_carry_server_envelope() {
    let client = spawn_app().await;

    let bogus = Session {
        access_token: "not-a-token".into(),
        user_id: 1,
    };
    let err = client
        .shorten(
            &bogus,
            &ShortenRequest {
                original_url: "https://example.com".into(),
                custom_code: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    match err {
        ClientError::Api { code, .. } => assert_eq!(code, "unauthorized"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.resolve("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}
