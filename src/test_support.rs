use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use clap::Parser;
use url::Url;
use warp::Filter;

use crate::util::config::Config;

#[derive(Debug, Clone, Copy)]
pub enum MockToken {
    Ok,
    BadRequest,
}

pub struct MockTokenEndpoint {
    pub uri: Url,
    calls: Arc<AtomicUsize>,
    last_form: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockTokenEndpoint {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_form(&self) -> Option<HashMap<String, String>> {
        self.last_form.lock().unwrap().clone()
    }
}

/// Serves a stand-in token endpoint on an ephemeral local port.
pub async fn mock_token_endpoint(behaviour: MockToken) -> MockTokenEndpoint {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_form = Arc::new(Mutex::new(None));

    let route = {
        let calls = Arc::clone(&calls);
        let last_form = Arc::clone(&last_form);
        warp::path("token")
            .and(warp::post())
            .and(warp::body::form::<HashMap<String, String>>())
            .map(move |form| {
                calls.fetch_add(1, Ordering::SeqCst);
                *last_form.lock().unwrap() = Some(form);
                let (status, body) = match behaviour {
                    MockToken::Ok => (
                        warp::http::StatusCode::OK,
                        serde_json::json!({
                            "access_token": "mock-access-token",
                            "refresh_token": "mock-refresh-token",
                            "expires_in": 3600,
                            "token_type": "Bearer",
                        }),
                    ),
                    MockToken::BadRequest => (
                        warp::http::StatusCode::BAD_REQUEST,
                        serde_json::json!({ "error": "invalid_grant" }),
                    ),
                };
                warp::reply::with_status(warp::reply::json(&body), status)
            })
    };

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    MockTokenEndpoint {
        uri: Url::parse(&format!("http://{}/token", addr)).unwrap(),
        calls,
        last_form,
    }
}

/// Configuration rooted in `root`, independent of the process environment.
pub fn test_config(root: &Path, token_uri: &Url) -> Config {
    let args: Vec<OsString> = vec![
        "tubeauthd".into(),
        "--domain".into(),
        "localhost".into(),
        "--theme-color".into(),
        "#667eea".into(),
        "--secrets-file".into(),
        root.join("secrets").join("client_secret.json").into(),
        "--credentials-dir".into(),
        root.join("secrets").join("credentials").into(),
        "--frontend-dir".into(),
        root.join("frontend").into(),
        "--token-uri".into(),
        token_uri.as_str().into(),
        "--token-timeout-secs".into(),
        "5".into(),
    ];
    Config::parse_from(args)
}

pub fn write_secrets(root: &Path) {
    let dir = root.join("secrets");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("client_secret.json"),
        r#"{"web":{"client_id":"test-client.apps.googleusercontent.com","client_secret":"test-secret"}}"#,
    )
    .unwrap();
}

pub fn write_templates(root: &Path) {
    let dir = root.join("frontend");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("index.html"),
        "<title>{{APP_TITLE}}</title><style>:root{--c:{{THEME_COLOR}};--d:{{THEME_COLOR_DARK}}}</style>",
    )
    .unwrap();
    std::fs::write(
        dir.join("privacy.html"),
        "<p>{{COMPANY_NAME}} - {{PRIVACY_CONTACT_EMAIL}}</p>",
    )
    .unwrap();
}
