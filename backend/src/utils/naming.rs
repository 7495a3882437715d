//! Login and corporate-email derivation from name parts.
//!
//! `login_from_name` is deterministic and idempotent: the same name parts
//! always produce the same login candidate. The corporate email is derived
//! from the login, never the other way around.

/// Fixed Cyrillic-to-Latin transliteration table (GOST-style, lowercase).
const TRANSLIT: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "kh"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

/// Transliterates a name part to lowercase ASCII. Latin letters and digits
/// pass through lowercased; anything unmapped is dropped.
pub fn transliterate(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for ch in part.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if let Some((_, latin)) = TRANSLIT.iter().find(|(cyr, _)| *cyr == ch) {
            out.push_str(latin);
        }
    }
    out
}

/// Transliteration of the first character of a name part.
fn initial(part: &str) -> String {
    match part.chars().next() {
        Some(ch) => transliterate(&ch.to_string()),
        None => String::new(),
    }
}

/// Canonical login candidate: transliterated surname plus the first-name
/// initial, plus the middle-name initial when present.
pub fn login_from_name(surname: &str, first_name: &str, middle_name: Option<&str>) -> String {
    let mut login = transliterate(surname);
    login.push_str(&initial(first_name));
    if let Some(middle) = middle_name {
        login.push_str(&initial(middle));
    }
    login
}

/// Corporate mailbox for a login under the configured domain.
pub fn corporate_email(login: &str, domain: &str) -> String {
    format!("{}@{}", login, domain)
}
