//! End-to-end matching scenarios across rule shapes, plus the
//! property-test-flavored invariants.

use std::io::Cursor;
use std::thread;

use urlfilter::new_matcher;

#[test]
fn domain_anchor_matches_exact_subdomain() {
    let m = new_matcher();
    m.add_rule("||ads.example.com^");
    assert!(m.matches("https://ads.example.com/banner"));
}

#[test]
fn domain_anchor_rejects_different_subdomain() {
    let m = new_matcher();
    m.add_rule("||ads.example.com^");
    assert!(!m.matches("https://notads.example.com/banner"));
}

#[test]
fn domain_anchor_matches_label_boundary_subdomain() {
    let m = new_matcher();
    m.add_rule("||example.com^");
    assert!(m.matches("https://sub.example.com/x"));
}

#[test]
fn hosts_line_matches() {
    let m = new_matcher();
    m.add_rule("0.0.0.0 tracker.test");
    assert!(m.matches("https://tracker.test/"));
}

#[test]
fn hosts_line_matches_subdomain_at_label_boundary() {
    let m = new_matcher();
    m.add_rule("0.0.0.0 example.com");
    assert!(m.matches("https://sub.example.com/x"));
}

#[test]
fn reserved_hostname_is_ignored() {
    let m = new_matcher();
    m.add_rule("0.0.0.0 localhost");
    assert!(!m.matches("https://localhost/"));
}

#[test]
fn address_anchored_rule_is_fully_anchored() {
    let m = new_matcher();
    m.add_rule("|https://example.com/ads|");
    assert!(m.matches("https://example.com/ads"));
    assert!(!m.matches("https://example.com/ads/more"));
}

#[test]
fn address_parts_rule_with_wildcard() {
    let m = new_matcher();
    m.add_rule("/banner/*/img^$image");
    assert!(m.matches("https://x.test/banner/123/img.png"));
}

#[test]
fn modifiers_are_parsed_but_do_not_gate_match() {
    let m = new_matcher();
    m.add_rule("||doubleclick.net^$document,~script");
    assert!(m.matches("https://ads.doubleclick.net/pixel"));
}

#[test]
fn key_value_modifier_drops_whole_rule() {
    let m = new_matcher();
    m.add_rule("||bad.com^$domain=x.com");
    assert!(!m.matches("https://bad.com/"));
}

#[test]
fn empty_rule_set_never_matches() {
    let m = new_matcher();
    assert!(!m.matches("https://example.com/"));
}

#[test]
fn property_monotone_under_additional_rules() {
    let m = new_matcher();
    m.add_rule("||ads.example.com^");
    assert!(m.matches("https://ads.example.com/x"));
    m.add_rule("||unrelated.test^");
    m.add_rule("0.0.0.0 tracker.test");
    assert!(m.matches("https://ads.example.com/x"));
}

#[test]
fn property_ignored_rules_are_no_ops() {
    let a = new_matcher();
    let b = new_matcher();
    b.add_rule("! just a comment");
    b.add_rule("[Adblock Plus 2.0]");
    b.add_rule("example.com##.ad-banner");
    b.add_rule("@@||allowlisted.example^");
    for url in ["https://example.com/", "https://allowlisted.example/x"] {
        assert_eq!(a.matches(url), b.matches(url));
    }
}

#[test]
fn property_unknown_modifier_rules_are_no_ops() {
    let a = new_matcher();
    let b = new_matcher();
    b.add_rule("||bad.com^$domain=x.com");
    b.add_rule("||also-bad.com^$third-party");
    assert_eq!(a.matches("https://bad.com/"), b.matches("https://bad.com/"));
    assert!(!b.matches("https://bad.com/"));
    assert!(!b.matches("https://also-bad.com/"));
}

#[test]
fn property_reinserting_same_rule_is_idempotent() {
    let once = new_matcher();
    once.add_rule("||ads.example.com^");

    let twice = new_matcher();
    twice.add_rule("||ads.example.com^");
    twice.add_rule("||ads.example.com^");

    for url in ["https://ads.example.com/x", "https://other.example.com/x"] {
        assert_eq!(once.matches(url), twice.matches(url));
    }
}

#[test]
fn property_match_is_a_pure_function() {
    let m = new_matcher();
    m.add_rule("||ads.example.com^");
    let url = "https://ads.example.com/banner";
    let first = m.matches(url);
    for _ in 0..10 {
        assert_eq!(m.matches(url), first);
    }
}

#[test]
fn add_rules_from_reads_a_whole_file_and_skips_blank_lines() {
    let m = new_matcher();
    let source = "||ads.example.com^\n\n0.0.0.0 tracker.test\n! a comment\n";
    m.add_rules_from(Cursor::new(source));
    assert!(m.matches("https://ads.example.com/x"));
    assert!(m.matches("https://tracker.test/"));
}

#[test]
fn concurrent_add_rule_and_match_from_multiple_threads() {
    let m = new_matcher();
    thread::scope(|scope| {
        for i in 0..8 {
            let m = &m;
            scope.spawn(move || {
                m.add_rule(&format!("||host{i}.example^"));
            });
        }
    });

    for i in 0..8 {
        assert!(m.matches(&format!("https://host{i}.example/x")));
    }
    assert!(!m.matches("https://unrelated.example/x"));
}

#[test]
fn frozen_matcher_matches_identically_to_the_live_matcher() {
    let m = new_matcher();
    m.add_rule("||ads.example.com^");
    let frozen = m.freeze();

    for url in [
        "https://ads.example.com/x",
        "https://notads.example.com/x",
    ] {
        assert_eq!(m.matches(url), frozen.matches(url));
    }
}
