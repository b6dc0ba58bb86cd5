use std::cmp::Ordering;

/// Primary-strength sort key in Spanish order: case and accents are ignored,
/// so "álbum" sorts next to "album", but "ñ" is its own letter between "n"
/// and "o".
pub fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            'ñ' => {
                key.push('n');
                key.push(AFTER_N);
            }
            other => key.push(fold_accent(other)),
        }
    }
    key
}

/// Sorts above every letter, so "n" + this lands after all "n…" words.
const AFTER_N: char = char::MAX;

/// Locale-style comparison for product names. Names equal at primary strength
/// fall back to a plain comparison so the order stays total.
pub fn compare(left: &str, right: &str) -> Ordering {
    collation_key(left)
        .cmp(&collation_key(right))
        .then_with(|| left.cmp(right))
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
