//! Authentication binder.
//!
//! Builds the default header map for one provider binding, applying exactly
//! one auth variant at construction time. Missing or unusable credential
//! material logs a warning and falls back to unauthenticated transport
//! rather than failing construction.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use log::warn;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};

use crate::models::{AuthMode, ProviderConfig};

/// Build the headers attached to every request of one provider binding.
///
/// `companion` is the fixed secret some provider families pair with the
/// configured credential for basic auth. It is adapter-supplied, never
/// user configuration.
pub fn bind_auth_headers(
    config: &ProviderConfig,
    companion: Option<&str>,
    user_agent: &str,
) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match HeaderValue::from_str(user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(_) => warn!("Unusable user agent '{}', omitting header", user_agent),
    }

    match config.auth_mode {
        AuthMode::None => {}
        AuthMode::HeaderKey => apply_header_key(config, &mut headers),
        AuthMode::BasicCredential => apply_basic_credential(config, companion, &mut headers),
    }

    // Static custom headers merge in last and never replace what the auth
    // mode already set.
    for (name, value) in &config.custom_headers {
        let parsed_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                warn!(
                    "Skipping custom header '{}' for provider '{}': invalid name",
                    name, config.name
                );
                continue;
            }
        };
        if headers.contains_key(&parsed_name) {
            warn!(
                "Custom header '{}' for provider '{}' collides with a bound header, keeping the bound value",
                name, config.name
            );
            continue;
        }
        match HeaderValue::from_str(value) {
            Ok(parsed_value) => {
                headers.insert(parsed_name, parsed_value);
            }
            Err(_) => warn!(
                "Skipping custom header '{}' for provider '{}': invalid value",
                name, config.name
            ),
        }
    }

    headers
}

fn apply_header_key(config: &ProviderConfig, headers: &mut HeaderMap) {
    let (name, credential) = match (&config.header_name, &config.credential) {
        (Some(name), Some(credential)) => (name, credential),
        _ => {
            warn!(
                "Provider '{}' uses header-key auth but header name or credential is missing, continuing without auth",
                config.name
            );
            return;
        }
    };

    let parsed_name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(n) => n,
        Err(_) => {
            warn!(
                "Provider '{}' header-key name '{}' is not a valid header, continuing without auth",
                config.name, name
            );
            return;
        }
    };
    match HeaderValue::from_str(credential) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(parsed_name, value);
        }
        Err(_) => warn!(
            "Provider '{}' header-key credential is not a valid header value, continuing without auth",
            config.name
        ),
    }
}

fn apply_basic_credential(
    config: &ProviderConfig,
    companion: Option<&str>,
    headers: &mut HeaderMap,
) {
    let (credential, companion) = match (&config.credential, companion) {
        (Some(credential), Some(companion)) => (credential, companion),
        _ => {
            warn!(
                "Provider '{}' uses basic-credential auth but credential or companion secret is missing, continuing without auth",
                config.name
            );
            return;
        }
    };

    let encoded = BASE64_STANDARD.encode(format!("{}:{}", credential, companion));
    match HeaderValue::from_str(&format!("Basic {}", encoded)) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => warn!(
            "Provider '{}' basic-credential material is not a valid header value, continuing without auth",
            config.name
        ),
    }
}
