//! WinAnsi text encoding for the standard Type1 faces

/// Encode text for a `WinAnsiEncoding` font.
///
/// Latin-1 maps directly; the typographic punctuation WinAnsi places in
/// 0x80..0x9F is translated; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{2030}' => 0x89,
        '\u{2039}' => 0x8B,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        '\u{203a}' => 0x9B,
        '\t' => b' ',
        c if (c as u32) < 0x20 => b'?',
        c if (0x20..0x7F).contains(&(c as u32)) || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(encode_win_ansi("Page 1 of 2"), b"Page 1 of 2".to_vec());
    }

    #[test]
    fn test_bullet_and_dashes() {
        assert_eq!(encode_win_ansi("\u{2022} a \u{2013} b \u{2014}"), vec![0x95, b' ', b'a', b' ', 0x96, b' ', b'b', b' ', 0x97]);
    }

    #[test]
    fn test_latin1_passthrough() {
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_unmappable_replaced() {
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }
}
