use outreach_core::build_messenger_link;

#[test]
fn numeric_profile_id_is_extracted() {
    let link = build_messenger_link(
        Some("https://www.facebook.com/profile.php?id=123456789"),
        None,
        None,
    );
    assert_eq!(link, "https://www.facebook.com/messages/t/123456789");
}

#[test]
fn bare_username_is_used_directly() {
    let link = build_messenger_link(Some("john.smith"), None, None);
    assert_eq!(link, "https://www.facebook.com/messages/t/john.smith");
}

#[test]
fn profile_url_uses_last_segment() {
    let link = build_messenger_link(Some("facebook.com/people/jane.doe/"), None, None);
    assert_eq!(link, "https://www.facebook.com/messages/t/jane.doe");

    let link = build_messenger_link(Some("https://m.facebook.com/jdoe99?ref=bookmarks"), None, None);
    assert_eq!(link, "https://www.facebook.com/messages/t/jdoe99");
}

#[test]
fn thread_link_is_kept() {
    let thread = "https://www.facebook.com/messages/t/100001";
    assert_eq!(build_messenger_link(Some(thread), None, None), thread);
    assert_eq!(
        build_messenger_link(Some(thread), Some("hello there"), None),
        "https://www.facebook.com/messages/t/100001?text=hello%20there"
    );
}

#[test]
fn missing_profile_falls_back_to_name_shortlink() {
    let link = build_messenger_link(None, Some("hi"), Some("Mary-Jo O'Neil"));
    assert_eq!(link, "https://m.me/maryjooneil?text=hi");
}

#[test]
fn short_names_fall_back_to_compose_or_inbox() {
    assert_eq!(
        build_messenger_link(Some("  "), Some("hi"), Some("Al")),
        "https://www.facebook.com/messages/compose?text=hi"
    );
    assert_eq!(
        build_messenger_link(None, None, None),
        "https://www.facebook.com/messages/"
    );
}

#[test]
fn invalid_token_uses_fallback() {
    let link = build_messenger_link(Some("not a handle"), None, Some("Jo"));
    assert_eq!(link, "https://www.facebook.com/messages/");
}

#[test]
fn spaces_and_plus_signs_stay_distinct() {
    let link = build_messenger_link(Some("ada.l"), Some("Ada + guest, see you"), None);
    assert_eq!(
        link,
        "https://www.facebook.com/messages/t/ada.l?text=Ada%20%2B%20guest%2C%20see%20you"
    );
}
