use super::*;

#[test]
fn avatar_url_embeds_both_names() {
    assert_eq!(
        avatar_url("Jane", "Smith"),
        "https://ui-avatars.com/api/?name=Jane+Smith&background=3b82f6&color=fff"
    );
}

#[test]
fn avatar_url_is_deterministic() {
    assert_eq!(avatar_url("John", "Doe"), avatar_url("John", "Doe"));
}
