// src/domain/guidance.rs

//! Best-effort mapping from free-text guidance ("something small for my
//! apartment", "no big dogs please") to a size filter.

const SMALL: &[&str] = &["Small"];
const SMALL_OR_MEDIUM: &[&str] = &["Small", "Medium"];
const NOT_SMALL: &[&str] = &["Medium", "Large", "Extra Large"];
const LARGE: &[&str] = &["Large", "Extra Large"];

struct GuidanceRule {
    phrases: &'static [&'static str],
    sizes: &'static [&'static str],
}

/// Checked first; a hit here wins outright.
const NEGATED_RULES: &[GuidanceRule] = &[
    GuidanceRule {
        phrases: &[
            "no big", "not big", "nothing big", "no large", "not large", "nothing large",
            "not too big", "no huge",
        ],
        sizes: SMALL_OR_MEDIUM,
    },
    GuidanceRule {
        phrases: &["no small", "not small", "nothing small", "no tiny", "not tiny", "not too small"],
        sizes: NOT_SMALL,
    },
];

/// Checked only when no negated phrase matched. More than one hit is ambiguous.
const SIZE_RULES: &[GuidanceRule] = &[
    GuidanceRule {
        phrases: &[
            "large", "larger", "big", "bigger", "giant", "huge", "xl", "extra large",
        ],
        sizes: LARGE,
    },
    GuidanceRule {
        phrases: &[
            "small", "smaller", "tiny", "little", "toy", "lap dog", "apartment",
        ],
        sizes: SMALL,
    },
];

/// Lowercase, punctuation to spaces, single-spaced, padded so phrase lookups
/// only hit whole words.
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

fn rule_hits(rule: &GuidanceRule, normalized: &str) -> bool {
    rule.phrases
        .iter()
        .any(|phrase| normalized.contains(&format!(" {phrase} ")))
}

/// Sizes implied by the guidance, or `None` if it says nothing (or contradicts itself).
pub fn size_intent(guidance: &str) -> Option<&'static [&'static str]> {
    let text = normalize(guidance);

    if let Some(rule) = NEGATED_RULES.iter().find(|r| rule_hits(r, &text)) {
        return Some(rule.sizes);
    }

    let hits: Vec<&GuidanceRule> = SIZE_RULES.iter().filter(|r| rule_hits(r, &text)).collect();
    match hits.as_slice() {
        [only] => Some(only.sizes),
        _ => None,
    }
}
