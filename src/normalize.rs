//! Reduction of arbitrary title text to what the segment display can draw.
//!
//! Every input character produces exactly one output span: a table
//! replacement, the character itself (alphanumeric or whitespace), or a
//! single space.

/// Replacement for a symbol the display cannot draw directly.
///
/// Replacements only contain alphanumerics, whitespace, or symbols that map
/// to themselves here, so normalizing twice is the same as normalizing once.
pub fn substitute(c: char) -> Option<&'static str> {
    let replacement = match c {
        '☆' | '★' => "*",
        '♪' => "~",
        '⇒' => "->",
        '∀' => "A",
        '∃' | '∑' => "E",
        '℃' => " deg C",
        '∞' => "Infinity",
        '⊂' => "(sub)",
        '∈' => "(in)",
        '∩' | '&' => "(and)",
        '∪' => "(or)",
        '♥' | '❤' | '❥' | '♡' => "<3",
        'Ʞ' => "K",
        'И' => "N",
        'ᴚ' => "R",
        'Ꞷ' => "W",
        '【' | '『' => "[",
        '】' | '』' => "]",
        '・' => ".",
        '≡' => "=",
        '≠' => "!=",
        '≥' => ">=",
        '≤' => "<=",
        '∂' => "d",
        '∇' => "Delta",
        '±' => "+/-",
        '%' => "pct",
        '⁰' => "0",
        '¹' => "1",
        '²' => "2",
        '³' => "3",
        '⁴' => "4",
        '⁵' => "5",
        '⁶' => "6",
        '⁷' => "7",
        '⁸' => "8",
        '⁹' => "9",
        // Symbols produced by the replacements above are drawn as-is.
        '*' => "*",
        '~' => "~",
        '-' => "-",
        '>' => ">",
        '<' => "<",
        '=' => "=",
        '!' => "!",
        '+' => "+",
        '/' => "/",
        '(' => "(",
        ')' => ")",
        '[' => "[",
        ']' => "]",
        '.' => ".",
        _ => return None,
    };
    Some(replacement)
}

/// Normalize `text` into the drawable character set.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(replacement) = substitute(c) {
            out.push_str(replacement);
        } else if c.is_alphanumeric() || c.is_whitespace() {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    out
}

/// Whether `c` can appear in normalized output.
pub fn is_drawable(c: char) -> bool {
    c.is_alphanumeric()
        || c.is_whitespace()
        || substitute(c).is_some_and(|r| r.chars().eq(std::iter::once(c)))
}
