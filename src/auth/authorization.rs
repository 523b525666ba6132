use url::Url;

use crate::core::types::{AccessType, ClientId, Prompt, RedirectUri, ResponseType, Scope, UserId};
use crate::provider::error::Error;

/// Query parameters of the provider's consent screen, in the order they are rendered.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct AuthorizationRequest<'r> {
    pub client_id: &'r ClientId,
    pub redirect_uri: &'r RedirectUri,
    pub scope: String,
    pub response_type: ResponseType,
    pub state: &'r UserId,
    pub access_type: AccessType,
    pub prompt: Prompt,
}

impl<'r> AuthorizationRequest<'r> {
    pub fn new(
        client_id: &'r ClientId,
        redirect_uri: &'r RedirectUri,
        scope: &Scope,
        state: &'r UserId,
    ) -> Self {
        Self {
            client_id,
            redirect_uri,
            scope: scope.as_joined(),
            response_type: ResponseType::Code,
            state,
            access_type: AccessType::Offline,
            prompt: Prompt::Consent,
        }
    }

    pub fn to_url(&self, endpoint: &Url) -> Result<Url, Error> {
        append_params(endpoint, self)
    }
}

pub fn build_authorization_url(
    endpoint: &Url,
    client_id: &ClientId,
    redirect_uri: &RedirectUri,
    scope: &Scope,
    state: &UserId,
) -> Result<Url, Error> {
    AuthorizationRequest::new(client_id, redirect_uri, scope, state).to_url(endpoint)
}

pub(crate) fn append_params(base: &Url, params: impl serde::Serialize) -> Result<Url, Error> {
    let mut url = base.clone();
    let new_qs = serde_urlencoded::to_string(params)?;
    let pairs = form_urlencoded::parse(new_qs.as_bytes());
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://accounts.google.com/o/oauth2/auth").unwrap()
    }

    fn build(state: &str) -> Url {
        build_authorization_url(
            &endpoint(),
            &ClientId("client-1.apps.googleusercontent.com".to_string()),
            &RedirectUri("http://localhost:8000/api/oauth/callback".to_string()),
            &Scope::from_parts(vec!["https://example.com/b", "https://example.com/a"]),
            &state.parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn renders_all_parameters_in_order() {
        let url = build("valid123");
        let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(
            keys,
            vec!["client_id", "redirect_uri", "scope", "response_type", "state", "access_type", "prompt"]
        );
        assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/auth?"));
    }

    #[test]
    fn carries_user_id_as_state() {
        let url = build("valid123");
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["state"], "valid123");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["access_type"], "offline");
        assert_eq!(pairs["prompt"], "consent");
        assert_eq!(pairs["redirect_uri"], "http://localhost:8000/api/oauth/callback");
        assert_eq!(pairs["scope"], "https://example.com/a https://example.com/b");
        assert!(url.as_str().contains("state=valid123"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build("user123"), build("user123"));
    }
}
