use serde::{Deserialize, Serialize};

/// Query options whose values are never logged.
const SENSITIVE_OPTIONS: &[&str] = &[
    "password",
    "authmechanismproperties",
    "tlscertificatekeyfilepassword",
    "token",
    "apikey",
];

/// Document-store URI split into loggable parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedConnection {
    pub scheme: Option<String>,
    pub user: Option<String>,
    /// Every `host[:port]` of the seed list, in URI order.
    pub hosts: Vec<String>,
    pub database: Option<String>,
    /// The URI with the password and sensitive options masked.
    pub redacted: String,
}

/// Mask credentials in a MongoDB-style URI.
///
/// Accepts `mongodb://` and `mongodb+srv://` URIs with an optional
/// `user[:password]@` prefix, a comma-separated seed list, an optional
/// `/database` and `?options`. Strings without a scheme come back unchanged.
pub fn redact_connection_string(conn: &str) -> RedactedConnection {
    let Some((scheme, rest)) = conn.split_once("://") else {
        return RedactedConnection {
            scheme: None,
            user: None,
            hosts: Vec::new(),
            database: None,
            redacted: conn.to_string(),
        };
    };

    // Userinfo ends at the last `@`; passwords may contain `/` or `?`.
    let (userinfo, location) = match rest.rsplit_once('@') {
        Some((userinfo, location)) => (Some(userinfo), location),
        None => (None, rest),
    };
    let (location, options) = match location.split_once('?') {
        Some((location, options)) => (location, Some(options)),
        None => (location, None),
    };
    let (seed_list, database) = match location.split_once('/') {
        Some((seed_list, database)) => (seed_list, Some(database)),
        None => (location, None),
    };

    let user = userinfo.map(|info| info.split_once(':').map_or(info, |(user, _)| user));
    let mut redacted = format!("{scheme}://");
    if let Some(info) = userinfo {
        match info.split_once(':') {
            Some((user, _)) => redacted.push_str(&format!("{user}:***@")),
            None => redacted.push_str(&format!("{info}@")),
        }
    }
    redacted.push_str(seed_list);
    if let Some(database) = database {
        redacted.push('/');
        redacted.push_str(database);
    }
    if let Some(options) = options {
        redacted.push('?');
        redacted.push_str(&mask_options(options));
    }

    RedactedConnection {
        scheme: Some(scheme.to_string()),
        user: user.map(str::to_string),
        hosts: seed_list
            .split(',')
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect(),
        database: database.filter(|name| !name.is_empty()).map(str::to_string),
        redacted,
    }
}

fn mask_options(options: &str) -> String {
    options
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive(key) => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_OPTIONS.contains(&key.as_str())
}
