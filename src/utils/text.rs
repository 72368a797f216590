//! Text normalization helpers for loose name comparison.

/// Normalize text for comparison: lowercase, fold Spanish accented
/// characters to ASCII, replace every non-alphanumeric run with a single
/// space, and trim.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;

    for c in text.chars() {
        let folded = fold_char(c);
        match folded {
            Some(ch) => {
                out.push(ch);
                last_was_space = false;
            }
            None => {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            }
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Fold a character to its lowercase ASCII alphanumeric form, or None when
/// it should act as a separator.
fn fold_char(c: char) -> Option<char> {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'a'..='z' | '0'..='9' => Some(lower),
        'á' | 'à' | 'ä' | 'â' => Some('a'),
        'é' | 'è' | 'ë' | 'ê' => Some('e'),
        'í' | 'ì' | 'ï' | 'î' => Some('i'),
        'ó' | 'ò' | 'ö' | 'ô' => Some('o'),
        'ú' | 'ù' | 'ü' | 'û' => Some('u'),
        'ñ' => Some('n'),
        'ç' => Some('c'),
        _ => None,
    }
}
