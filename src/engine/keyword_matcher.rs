use crate::models::TokenObservation;

/// Return the vocabulary entries contained in `text`, case-insensitively.
///
/// This is a plain substring test with no word-boundary checking, so "ai"
/// matches "chair" too. That mirrors how metas are tagged upstream.
pub fn match_keywords(text: &str, vocabulary: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
        .cloned()
        .collect()
}

/// The text a token is matched against: name, symbol, and description.
pub fn observation_text(obs: &TokenObservation) -> String {
    format!(
        "{} {} {}",
        obs.name,
        obs.symbol,
        obs.description.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let matched = match_keywords("AI Squid Game", &vocab(&["ai", "squid"]));
        assert_eq!(matched, vec!["ai", "squid"]);
    }

    #[test]
    fn test_substring_not_word_boundary() {
        // "ai" inside "chair" counts as a match
        let matched = match_keywords("comfy chair token", &vocab(&["ai"]));
        assert_eq!(matched, vec!["ai"]);
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        assert!(match_keywords("", &vocab(&["ai", "defi"])).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(match_keywords("plain token", &vocab(&["gamefi"])).is_empty());
    }

    #[test]
    fn test_observation_text_includes_description() {
        let obs = TokenObservation {
            name: "Squid".to_string(),
            symbol: "SQD".to_string(),
            description: Some("a defi experiment".to_string()),
            volume_24h: 0.0,
            price_change_24h: 0.0,
            holders: 0,
            created_at: 0,
        };
        let matched = match_keywords(&observation_text(&obs), &vocab(&["defi", "squid"]));
        assert_eq!(matched, vec!["defi", "squid"]);
    }
}
