//! Character classes that drive line breaking.

use unicode_script::{Script, UnicodeScript};

use crate::shaping::Glyph;

/// Whether a line may break right after the glyph at `pos`.
///
/// Breaks are allowed after whitespace and control characters, after hyphens
/// and after ideographic, Hangul, halfwidth and compatibility characters. A
/// minus sign that opens the text and precedes a digit is not a hyphen.
pub fn is_split_point(glyphs: &[Glyph], pos: usize) -> bool {
    let Some(glyph) = glyphs.get(pos) else { return false };
    let c = glyph.c;

    if pos == 0
        && c == '-'
        && glyphs.get(1).is_some_and(|next| next.c.is_ascii_digit())
    {
        return false;
    }

    let code = c as u32;
    code <= ' ' as u32
        || c == '-'
        || c == '\u{2010}'
        || (0x2002..=0x200b).contains(&code)
        || (0x2e80..0xd7a0).contains(&code)
        || (0xf900..0xfb00).contains(&code)
        || (0xfe30..0xfe50).contains(&code)
        || (0xff61..0xffa0).contains(&code)
}

/// Whether a character belongs to a script whose words are not separated by
/// spaces, so that break opportunities must come from the shaper.
pub fn is_special_script(c: char) -> bool {
    matches!(c.script(), Script::Thai | Script::Lao | Script::Khmer | Script::Myanmar)
}

/// Whether a character is a combining mark that attaches to the preceding
/// base character.
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        c as u32,
        0x0300..=0x036f
            | 0x0483..=0x0489
            | 0x0591..=0x05bd
            | 0x0610..=0x061a
            | 0x064b..=0x065f
            | 0x0670
            | 0x06d6..=0x06dc
            | 0x0e31
            | 0x0e34..=0x0e3a
            | 0x0e47..=0x0e4e
            | 0x0eb1
            | 0x0eb4..=0x0ebc
            | 0x0ec8..=0x0ecd
            | 0x1ab0..=0x1aff
            | 0x1dc0..=0x1dff
            | 0x20d0..=0x20ff
            | 0xfe20..=0xfe2f
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Abs;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars().map(|c| Glyph { c, advance: Abs::pt(1.0) }).collect()
    }

    #[test]
    fn test_split_points() {
        let text = glyphs("a b-c\u{4e00}d");
        let points: Vec<_> = (0..text.len()).filter(|&i| is_split_point(&text, i)).collect();
        assert_eq!(points, [1, 3, 5]);
    }

    #[test]
    fn test_leading_minus_before_digit() {
        assert!(!is_split_point(&glyphs("-5"), 0));
        assert!(is_split_point(&glyphs("-x"), 0));
        assert!(is_split_point(&glyphs("5-5"), 1));
    }

    #[test]
    fn test_special_script() {
        assert!(is_special_script('\u{0e01}'));
        assert!(!is_special_script('a'));
        assert!(is_combining_mark('\u{0301}'));
        assert!(!is_combining_mark('e'));
    }
}
