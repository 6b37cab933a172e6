use serenity::all::{ChannelId, UserId};

use crate::config::Config;

/// Channel-safe slug: lower-case, whitespace runs collapsed to single
/// hyphens, anything outside `[a-z0-9-]` stripped, truncated to 40 chars.
pub fn slug(input: &str) -> String {
    input
        .to_lowercase()
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .take(40)
        .collect()
}

/// Firstname resolution chain: registry mapping, then the member's display
/// name, then their username, then "Client". First non-blank wins.
pub fn resolve_firstname(mapped: Option<&str>, display_name: &str, username: &str) -> String {
    for candidate in [mapped.unwrap_or(""), display_name, username] {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    "Client".to_string()
}

pub fn category_name(firstname: &str, business_name: &str) -> String {
    format!("{firstname} - {business_name}")
}

pub fn channel_name(firstname: &str, business_name: &str) -> String {
    format!("🤝│{}-{}", slug(business_name), slug(firstname))
}

pub fn mention_user(id: Option<UserId>, fallback: &str) -> String {
    match id {
        Some(id) => format!("<@{id}>"),
        None => fallback.to_string(),
    }
}

pub fn mention_users(ids: &[UserId], fallback: &str) -> String {
    if ids.is_empty() {
        return fallback.to_string();
    }
    ids.iter()
        .map(|id| format!("<@{id}>"))
        .collect::<Vec<_>>()
        .join(" & ")
}

pub fn mention_channel(id: Option<ChannelId>, fallback: &str) -> String {
    match id {
        Some(id) => format!("<#{id}>"),
        None => fallback.to_string(),
    }
}

pub fn welcome_message(config: &Config, member_id: UserId) -> String {
    let founder = mention_user(config.founder_user_id, "Founder");
    let csms = mention_users(&config.csm_user_ids, "CSM");
    let ops = mention_user(config.operations_user_id, "Operations");
    let start_here = mention_channel(config.start_here_channel_id, "#start-here");

    format!(
        "✨ **Welcome to {business}!**\n\n\
         Hey <@{member_id}>, welcome aboard.\n\n\
         👥 **Your Team**\n\
         {founder} – **Founder**\n\
         {csms} – **Client Success**\n\
         {ops} – **Operations**\n\n\
         **Next step:** Head over to {start_here} to complete your intake form.",
        business = config.business_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(slug("Jane  O'Brien!!"), "jane-obrien");
    }

    #[test]
    fn slug_output_is_lowercase_charset_limited_and_bounded() {
        let long = "x".repeat(120);
        let inputs = [
            "  Mixed CASE with   spaces  ",
            "émile-zola",
            "🤝 emoji and symbols #!?",
            long.as_str(),
        ];
        for input in inputs {
            let out = slug(input);
            assert!(out.len() <= 40, "{out:?} too long");
            assert!(
                out.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{out:?} has chars outside [a-z0-9-]"
            );
        }
    }

    #[test]
    fn category_and_channel_names_match_the_welcome_format() {
        assert_eq!(category_name("Maria", "Nomads"), "Maria - Nomads");
        assert_eq!(channel_name("Maria", "Nomads"), "🤝│nomads-maria");
    }

    #[test]
    fn firstname_falls_back_through_the_chain() {
        assert_eq!(resolve_firstname(None, "", "jdoe"), "jdoe");
        assert_eq!(resolve_firstname(Some("Maria"), "Display", "jdoe"), "Maria");
        assert_eq!(resolve_firstname(None, "Display", "jdoe"), "Display");
        assert_eq!(resolve_firstname(None, "  ", "  "), "Client");
        assert_eq!(resolve_firstname(Some("  Bob  "), "", ""), "Bob");
    }

    #[test]
    fn mentions_use_literal_fallbacks_when_unconfigured() {
        assert_eq!(mention_user(None, "Founder"), "Founder");
        assert_eq!(mention_user(Some(UserId::new(7)), "Founder"), "<@7>");
        assert_eq!(mention_users(&[], "CSM"), "CSM");
        assert_eq!(
            mention_users(&[UserId::new(1), UserId::new(2)], "CSM"),
            "<@1> & <@2>"
        );
        assert_eq!(mention_channel(None, "#start-here"), "#start-here");
        assert_eq!(mention_channel(Some(ChannelId::new(9)), "#start-here"), "<#9>");
    }

    #[test]
    fn welcome_message_mentions_member_and_uses_fallback_team() {
        let msg = welcome_message(&Config::for_tests(), UserId::new(42));
        assert!(msg.contains("<@42>"));
        assert!(msg.contains("Welcome to Nomads"));
        assert!(msg.contains("Founder – **Founder**"));
        assert!(msg.contains("#start-here"));
    }
}
