//! Totality and idempotence of title normalization over a wide sweep of
//! characters, including every symbol the game's song list is known to use.

use seg_marquee::normalize::{is_drawable, normalize};

/// Characters from ASCII, Latin-1, general punctuation, arrows, math
/// operators, miscellaneous symbols, CJK punctuation, kana and a slice of
/// kanji.
fn sweep() -> impl Iterator<Item = char> {
    let ranges = [
        0x20..0x7F,
        0xA0..0x180,
        0x2000..0x2100,
        0x2190..0x2300,
        0x2600..0x2800,
        0x3000..0x3100,
        0x4E00..0x4F00,
        0xFF00..0xFF70,
    ];
    ranges
        .into_iter()
        .flatten()
        .filter_map(char::from_u32)
}

#[test]
fn test_every_character_maps_to_drawable_output() {
    for c in sweep() {
        let out = normalize(&c.to_string());
        assert!(!out.is_empty(), "{c:?} was dropped");
        for o in out.chars() {
            assert!(is_drawable(o), "{c:?} produced undrawable {o:?}");
        }
    }
}

#[test]
fn test_normalize_is_idempotent_per_character() {
    for c in sweep() {
        let once = normalize(&c.to_string());
        assert_eq!(normalize(&once), once, "not idempotent for {c:?}");
    }
}

#[test]
fn test_normalize_is_idempotent_on_whole_strings() {
    let all: String = sweep().collect();
    let once = normalize(&all);
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_unmapped_symbol_is_exactly_one_space() {
    for c in ['@', '#', '$', '^', '{', '}', '|', '§', '¶', '→', '♣', '〜'] {
        if c.is_alphanumeric() {
            continue;
        }
        assert_eq!(normalize(&c.to_string()), " ", "{c:?}");
    }
}

#[test]
fn test_known_titles() {
    assert_eq!(normalize("☆ピアノ"), "*ピアノ");
    assert_eq!(normalize("Ʞ∀И∃"), "KANE");
    assert_eq!(normalize("【MAX 300】"), "[MAX 300]");
    assert_eq!(normalize("Love♥Shine"), "Love<3Shine");
    assert_eq!(normalize("Α∞ΩΑ"), "ΑInfinityΩΑ");
}
