//! Ordered rewrite rules for the playlist anchor in a lesson file.
//!
//! Two rules, tried in fixed priority order. Rule 1 matches structurally:
//! an anchor whose class attribute contains the button token. Rule 2
//! matches by content: an anchor labeled with the playlist marker text.
//! Each rule either returns a rewritten document or signals no-match. Only
//! the first matching anchor has its href replaced; every other byte passes
//! through untouched.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Anchor carrying the playlist button class token
fn class_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(<a[^>]+class="[^"]*btn-yt[^"]*"[^>]*href=")[^"]*("[^>]*>)"#).unwrap()
    })
}

/// Anchor identified by its visible playlist label
fn label_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(<a[^>]+href=")https?://[^"]+("[^>]*>\s*🎬\s*YouTube[^<]*</a>)"#)
            .unwrap()
    })
}

/// Which rule produced a rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedRule {
    /// Matched the class-token predicate
    ClassToken,
    /// Matched the label-text predicate
    LabelText,
}

/// Try the rules in priority order against `html`.
///
/// Returns the rewritten content and the rule that matched, or `None` when
/// neither rule finds an anchor. An anchor whose href already equals `url`
/// still counts as a match.
pub fn rewrite_watch_link(html: &str, url: &str) -> Option<(String, MatchedRule)> {
    for (rule, kind) in [
        (class_rule(), MatchedRule::ClassToken),
        (label_rule(), MatchedRule::LabelText),
    ] {
        if let Some(rewritten) = apply_rule(rule, html, url) {
            return Some((rewritten, kind));
        }
    }
    None
}

/// Replace the href captured by `rule`, first match only.
///
/// `Cow::Borrowed` from the replace means the rule did not match.
fn apply_rule(rule: &Regex, html: &str, url: &str) -> Option<String> {
    let rewritten = rule.replace(html, |caps: &Captures| {
        format!("{}{}{}", &caps[1], url, &caps[2])
    });

    match rewritten {
        Cow::Borrowed(_) => None,
        Cow::Owned(rewritten) => Some(rewritten),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.youtube.com/watch?v=abc12345678";

    #[test]
    fn test_class_rule_replaces_href_only() {
        let html = r#"<p>Intro</p>
<a id="play" class="btn btn-yt large" target="_blank" href="https://old">Watch</a>
<p>Outro</p>"#;

        let (rewritten, rule) = rewrite_watch_link(html, URL).unwrap();

        assert_eq!(rule, MatchedRule::ClassToken);
        assert_eq!(
            rewritten,
            format!(
                r#"<p>Intro</p>
<a id="play" class="btn btn-yt large" target="_blank" href="{URL}">Watch</a>
<p>Outro</p>"#
            )
        );
    }

    #[test]
    fn test_label_rule_fallback() {
        let html = r#"<a rel="noopener" href="https://example.com/old"> 🎬 YouTube 播放清單</a>"#;

        let (rewritten, rule) = rewrite_watch_link(html, URL).unwrap();

        assert_eq!(rule, MatchedRule::LabelText);
        assert_eq!(
            rewritten,
            format!(r#"<a rel="noopener" href="{URL}"> 🎬 YouTube 播放清單</a>"#)
        );
    }

    #[test]
    fn test_label_rule_is_case_insensitive() {
        let html = r#"<a class="link" href="http://example.com">🎬 YOUTUBE playlist</a>"#;

        let (_, rule) = rewrite_watch_link(html, URL).unwrap();
        assert_eq!(rule, MatchedRule::LabelText);
    }

    #[test]
    fn test_class_rule_wins_over_label_rule() {
        let html = r#"<a class="btn-yt" href="https://old">🎬 YouTube playlist</a>"#;

        let (_, rule) = rewrite_watch_link(html, URL).unwrap();
        assert_eq!(rule, MatchedRule::ClassToken);
    }

    #[test]
    fn test_only_first_match_is_rewritten() {
        let html = r#"<a class="btn-yt" href="https://first">a</a>
<a class="btn-yt" href="https://second">b</a>"#;

        let (rewritten, _) = rewrite_watch_link(html, URL).unwrap();

        assert!(rewritten.contains(&format!(r#"href="{URL}">a"#)));
        assert!(rewritten.contains(r#"href="https://second">b"#));
    }

    #[test]
    fn test_no_match_signals_none() {
        let html = r#"<a class="btn-other" href="https://old">Elsewhere</a>"#;
        assert!(rewrite_watch_link(html, URL).is_none());
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let html = r#"<a class="btn-yt" href="https://old">Watch</a>"#;

        let (first, _) = rewrite_watch_link(html, URL).unwrap();
        let (second, rule) = rewrite_watch_link(&first, URL).unwrap();

        // The class token still matches after the href was replaced, so a
        // second apply converges on identical content.
        assert_eq!(rule, MatchedRule::ClassToken);
        assert_eq!(first, second);
    }
}
