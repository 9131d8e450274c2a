//! Vietnamese collation for sorting titles by name
//!
//! Comparison works on three levels, like a dictionary:
//!
//! 1. **Base letters** in Vietnamese alphabetical order, where `ă`, `â`, `đ`,
//!    `ê`, `ô`, `ơ`, `ư` are letters of their own (`a < ă < â < b`). Other
//!    accented Latin letters sort with their base letter (`ñ` with `n`, `ß`
//!    as `ss`). Whitespace comes first, then punctuation and symbols, then
//!    digits, then letters.
//! 2. **Tone marks**: ngang < huyền < hỏi < ngã < sắc < nặng, then foreign
//!    accents.
//! 3. **Case**: lowercase before uppercase.
//!
//! A lower level is only consulted when every higher level is equal, so
//! `"ba" < "bà" < "bé"` and `"bà" < "Bà"`.

use std::cmp::Ordering;

/// Vietnamese alphabet, each entry is one primary letter
const ALPHABET: &[char] = &[
    'a', 'ă', 'â', 'b', 'c', 'd', 'đ', 'e', 'ê', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'ô', 'ơ', 'p', 'q', 'r', 's', 't', 'u', 'ư', 'v', 'w', 'x', 'y', 'z',
];

/// Toned forms of each vowel, indexed by tone:
/// ngang, huyền, hỏi, ngã, sắc, nặng
const TONED_VOWELS: &[&str] = &[
    "aàảãáạ",
    "ăằẳẵắặ",
    "âầẩẫấậ",
    "eèẻẽéẹ",
    "êềểễếệ",
    "iìỉĩíị",
    "oòỏõóọ",
    "ôồổỗốộ",
    "ơờởỡớợ",
    "uùủũúụ",
    "ưừửữứự",
    "yỳỷỹýỵ",
];

/// Tone weight of accents outside Vietnamese
const FOREIGN_ACCENT: u8 = 6;

/// Accented Latin letters outside the Vietnamese alphabet and what they
/// sort as
const FOLDS: &[(char, &str)] = &[
    ('ä', "a"),
    ('å', "a"),
    ('ā', "a"),
    ('ą', "a"),
    ('æ', "ae"),
    ('ç', "c"),
    ('ć', "c"),
    ('č', "c"),
    ('ď', "d"),
    ('ë', "e"),
    ('ē', "e"),
    ('ę', "e"),
    ('ě', "e"),
    ('ğ', "g"),
    ('î', "i"),
    ('ï', "i"),
    ('ī', "i"),
    ('ı', "i"),
    ('ł', "l"),
    ('ñ', "n"),
    ('ń', "n"),
    ('ň', "n"),
    ('ö', "o"),
    ('ø', "o"),
    ('ō', "o"),
    ('ő', "o"),
    ('œ', "oe"),
    ('ř', "r"),
    ('ś', "s"),
    ('š', "s"),
    ('ş', "s"),
    ('ß', "ss"),
    ('ť', "t"),
    ('û', "u"),
    ('ü', "u"),
    ('ū', "u"),
    ('ů', "u"),
    ('ű', "u"),
    ('ÿ', "y"),
    ('ź', "z"),
    ('ż', "z"),
    ('ž', "z"),
];

/// Punctuation and symbols in sort order; anything else non-alphanumeric
/// follows these by code point
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Space,
    Punctuation,
    Symbol,
    Digit,
    Letter,
    /// Letters of other scripts
    Foreign,
}

/// Collation weights of a single collation element
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Weights {
    primary: (Group, u32),
    tone: u8,
    upper: bool,
}

/// Split a lowercase character into its base letter and tone index
fn strip_tone(c: char) -> (char, u8) {
    for row in TONED_VOWELS {
        if let Some(tone) = row.chars().position(|v| v == c) {
            // First char of each row is the untoned base letter
            let base = row.chars().next().unwrap_or(c);
            return (base, tone as u8);
        }
    }
    (c, 0)
}

fn primary(base: char) -> (Group, u32) {
    if let Some(rank) = ALPHABET.iter().position(|&l| l == base) {
        (Group::Letter, rank as u32)
    } else if let Some(digit) = base.to_digit(10) {
        (Group::Digit, digit)
    } else if base.is_whitespace() {
        (Group::Space, base as u32)
    } else if let Some(rank) = PUNCTUATION.chars().position(|p| p == base) {
        (Group::Punctuation, rank as u32)
    } else if base.is_alphabetic() {
        (Group::Foreign, base as u32)
    } else {
        (Group::Symbol, base as u32)
    }
}

/// Append the collation elements of `c`; folded letters may expand to two
fn push_weights(c: char, out: &mut Vec<Weights>) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let upper = lower != c;

    if let Some(&(_, folded)) = FOLDS.iter().find(|(f, _)| *f == lower) {
        for (i, base) in folded.chars().enumerate() {
            out.push(Weights {
                primary: primary(base),
                // The accent counts once, on the first element
                tone: if i == 0 { FOREIGN_ACCENT } else { 0 },
                upper,
            });
        }
        return;
    }

    let (base, tone) = strip_tone(lower);
    out.push(Weights {
        primary: primary(base),
        tone,
        upper,
    });
}

fn elements(s: &str) -> Vec<Weights> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        push_weights(c, &mut out);
    }
    out
}

/// Compare two strings using Vietnamese dictionary order
pub fn compare(a: &str, b: &str) -> Ordering {
    let wa = elements(a);
    let wb = elements(b);

    let primaries = |w: &[Weights]| w.iter().map(|w| w.primary).collect::<Vec<_>>();
    let tones = |w: &[Weights]| w.iter().map(|w| w.tone).collect::<Vec<_>>();
    let cases = |w: &[Weights]| w.iter().map(|w| w.upper).collect::<Vec<_>>();

    primaries(&wa)
        .cmp(&primaries(&wb))
        .then_with(|| tones(&wa).cmp(&tones(&wb)))
        .then_with(|| cases(&wa).cmp(&cases(&wb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare(a, b));
        v
    }

    #[test]
    fn test_letters_with_marks_follow_base() {
        assert_eq!(sorted(&["ân", "ăn", "an", "ban"]), vec!["an", "ăn", "ân", "ban"]);
        assert_eq!(sorted(&["đi", "dê", "em"]), vec!["dê", "đi", "em"]);
        assert_eq!(sorted(&["ưa", "uống", "vui"]), vec!["uống", "ưa", "vui"]);
    }

    #[test]
    fn test_base_letters_outrank_tones() {
        assert_eq!(compare("bàn", "be"), Ordering::Less);
        assert_eq!(compare("ba", "bà"), Ordering::Less);
    }

    #[test]
    fn test_tone_order() {
        assert_eq!(
            sorted(&["mạ", "má", "mã", "mả", "mà", "ma"]),
            vec!["ma", "mà", "mả", "mã", "má", "mạ"]
        );
    }

    #[test]
    fn test_case_is_tertiary() {
        assert_eq!(compare("bà", "Bà"), Ordering::Less);
        assert_eq!(compare("Bà", "bé"), Ordering::Less);
        assert_eq!(compare("Mua", "mua"), Ordering::Greater);
    }

    #[test]
    fn test_digits_and_spaces_before_letters() {
        assert_eq!(sorted(&["a", "1", " "]), vec![" ", "1", "a"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("Mua", "Mua sắm"), Ordering::Less);
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            sorted(&["Tập thể dục", "Hoàn thành báo cáo tháng", "Mua sắm cuối tuần", "Đi chợ"]),
            vec![
                "Đi chợ",
                "Hoàn thành báo cáo tháng",
                "Mua sắm cuối tuần",
                "Tập thể dục"
            ]
        );
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(compare("Công việc", "Công việc"), Ordering::Equal);
    }

    #[test]
    fn test_foreign_letters_fold_to_base() {
        assert_eq!(sorted(&["oa", "ña", "na"]), vec!["na", "ña", "oa"]);
        assert_eq!(compare("Müller", "Mz"), Ordering::Less);
        assert_eq!(compare("straße", "strasse"), Ordering::Greater);
        assert_eq!(compare("straße", "strast"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_order() {
        assert_eq!(compare("a_b", "a-b"), Ordering::Less);
        assert_eq!(
            sorted(&["a1", "a$", "a.", "a-", "a b"]),
            vec!["a b", "a-", "a.", "a$", "a1"]
        );
        // Unlisted symbols sit between punctuation and digits
        assert_eq!(sorted(&["x0", "x€", "x$"]), vec!["x$", "x€", "x0"]);
    }
}
