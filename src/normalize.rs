//! Canonicalizes a raw user term for the fallback lookup.
//!
//! Lowercases, strips a leading "the " or "a ", and reduces a plural final
//! word to its singular form with a small set of English suffix rules.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

// Words whose singular and plural coincide or that look plural but are not.
const INVARIANT: &[&str] = &[
    "series", "species", "news", "physics", "mathematics", "economics", "politics",
    "ethics", "linguistics", "athletics", "gymnastics", "sheep", "fish", "deer",
    "aircraft", "bus", "gas", "lens", "atlas", "virus", "status", "bonus", "census",
    "chaos", "cosmos", "glass", "class", "grass", "kiss", "boss", "moss", "mass",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("dice", "die"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("data", "datum"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
];

// Singulars ending in "ve", "oe" or "che" whose plural only adds "s".
const KEEP_E: &[&str] = &[
    "glove", "wave", "curve", "olive", "valve", "move", "groove", "sleeve", "nerve",
    "cave", "grave", "slave", "drive", "hive", "dove", "stove", "cove", "archive",
    "reserve", "motive", "native", "narrative", "relative", "adjective", "objective",
    "executive", "detective", "representative", "shoe", "canoe", "toe", "hoe", "foe",
    "oboe", "floe", "doe", "roe", "cache", "niche", "avalanche", "moustache", "psyche",
];

fn suffix_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"(?i)([^aeiou])ies$", "${1}y"),
            (r"(?i)(matr|vert|ind)ices$", "${1}ix"),
            (r"(?i)(x|ch|ss|sh|zz)es$", "${1}"),
            (r"(?i)(l|ar)ves$", "${1}f"),
            (r"(?i)([^f])ves$", "${1}fe"),
            (r"(?i)(o)es$", "${1}"),
            (r"(?i)([^su])s$", "${1}"),
        ]
        .into_iter()
        .filter_map(|(pat, rep)| Regex::new(pat).ok().map(|re| (re, rep)))
        .collect()
    })
}

/// Singular form of a single lowercase word, or `None` if it is not plural.
pub fn singular_noun(word: &str) -> Option<String> {
    if word.chars().count() < 3 || INVARIANT.contains(&word) {
        return None;
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return Some(singular.to_string());
    }
    if let Some(stem) = word.strip_suffix('s').filter(|stem| KEEP_E.contains(stem)) {
        return Some(stem.to_string());
    }
    for (re, rep) in suffix_rules() {
        if re.is_match(word) {
            let out = re.replace(word, *rep).into_owned();
            return (out != word).then_some(out);
        }
    }
    None
}

/// Lowercase, strip a leading article, singularize the last word.
pub fn normalize_term(term: &str) -> String {
    let mut term = term.trim().nfc().collect::<String>().to_lowercase();

    if let Some(rest) = term.strip_prefix("the ") {
        term = rest.trim_start().to_string();
    }
    if let Some(rest) = term.strip_prefix("a ") {
        term = rest.trim_start().to_string();
    }

    match term.rsplit_once(' ') {
        Some((head, last)) => match singular_noun(last) {
            Some(s) => format!("{} {}", head, s),
            None => term,
        },
        None => singular_noun(&term).unwrap_or(term),
    }
}
