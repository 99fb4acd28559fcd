//! Messenger deep links for outreach.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;
use url::form_urlencoded::byte_serialize;

const THREAD_BASE: &str = "https://www.facebook.com/messages/t/";
const SHORTLINK_BASE: &str = "https://m.me/";
const COMPOSE_LINK: &str = "https://www.facebook.com/messages/compose";
const INBOX_LINK: &str = "https://www.facebook.com/messages/";

static PROFILE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"profile\.php\?id=([0-9]+)").expect("Invalid profile id regex")
});

static BARE_HANDLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Invalid handle regex"));

/// Builds a messenger link for a guest.
///
/// The profile may be a thread link, a `profile.php?id=` link, a profile
/// URL or a bare username. When it yields no identifier the guest name is
/// tried as an `m.me` shortlink, then a compose link. Never fails.
pub fn build_messenger_link(
    profile: Option<&str>,
    message: Option<&str>,
    guest_name: Option<&str>,
) -> String {
    let message = message.map(str::trim).filter(|m| !m.is_empty());
    let profile = profile.map(str::trim).filter(|p| !p.is_empty());

    if let Some(profile) = profile {
        if profile.contains("facebook.com/messages/t/") {
            return with_text(profile.to_string(), message);
        }
        if let Some(identifier) = profile_identifier(profile) {
            return with_text(format!("{THREAD_BASE}{identifier}"), message);
        }
    }

    fallback_link(guest_name, message)
}

/// Extracts a numeric id or username from a profile reference.
pub fn profile_identifier(profile: &str) -> Option<String> {
    if profile.contains("profile.php?id=") {
        return PROFILE_ID_REGEX
            .captures(profile)
            .map(|caps| caps[1].to_string());
    }
    if profile.contains("://") || profile.contains("facebook.com/") {
        return last_path_segment(profile);
    }
    BARE_HANDLE_REGEX
        .is_match(profile)
        .then(|| profile.to_string())
}

fn last_path_segment(profile: &str) -> Option<String> {
    let url = if profile.starts_with("http") {
        Url::parse(profile)
    } else {
        Url::parse(&format!("https://{profile}"))
    }
    .ok()?;

    let segment = url
        .path_segments()?
        .rfind(|segment| !segment.is_empty())?;
    if segment.starts_with("profile.php") {
        return None;
    }
    Some(segment.to_string())
}

fn fallback_link(guest_name: Option<&str>, message: Option<&str>) -> String {
    if let Some(name) = guest_name {
        let handle: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if handle.chars().count() > 3 {
            return with_text(format!("{SHORTLINK_BASE}{handle}"), message);
        }
    }
    match message {
        Some(_) => with_text(COMPOSE_LINK.to_string(), message),
        None => INBOX_LINK.to_string(),
    }
}

/// Appends `text=<message>` as a query parameter, percent-encoded with
/// spaces as `%20`.
fn with_text(mut link: String, message: Option<&str>) -> String {
    if let Some(message) = message {
        link.push(if link.contains('?') { '&' } else { '?' });
        link.push_str("text=");
        // A literal '+' is already serialized as %2B, so every '+' left is a space.
        for chunk in byte_serialize(message.as_bytes()) {
            if chunk == "+" {
                link.push_str("%20");
            } else {
                link.push_str(chunk);
            }
        }
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_query_encoded() {
        let link = build_messenger_link(Some("jane.doe"), Some("Hi Jane & co!"), None);
        assert_eq!(
            link,
            "https://www.facebook.com/messages/t/jane.doe?text=Hi%20Jane%20%26%20co%21"
        );
    }

    #[test]
    fn existing_query_gets_ampersand() {
        let link = build_messenger_link(
            Some("https://www.facebook.com/messages/t/42?ref=x"),
            Some("hey"),
            None,
        );
        assert_eq!(link, "https://www.facebook.com/messages/t/42?ref=x&text=hey");
    }

    #[test]
    fn profile_php_without_digits_falls_back() {
        assert_eq!(profile_identifier("facebook.com/profile.php?id=abc"), None);
        let link = build_messenger_link(Some("facebook.com/profile.php?id=abc"), None, None);
        assert_eq!(link, INBOX_LINK);
    }
}
