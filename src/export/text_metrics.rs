// src/export/text_metrics.rs

//! Helvetica glyph widths (AFM, 1/1000 em) and greedy word wrap.

/// Widths of the printable ASCII range, starting at U+0020.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
    334, 260, 334, 584, // '{' .. '~'
];

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (0x20..0x7F).contains(&code) {
        return ASCII_WIDTHS[(code - 0x20) as usize];
    }

    match c {
        'À'..='Å' | 'È'..='Ë' | 'Ý' => 667,
        'Ç' | 'Ñ' | 'Ù'..='Ü' => 722,
        'Ò'..='Ö' => 778,
        'Ì'..='Ï' | 'ì'..='ï' => 278,
        'à'..='å' | 'è'..='ë' | 'ñ' | 'ò'..='ö' | 'ù'..='ü' => 556,
        'ç' | 'ý' | 'ÿ' => 500,
        'º' => 365,
        'ª' => 370,
        '°' => 400,
        '–' => 556,
        '—' => 1000,
        _ => 556,
    }
}

/// Width of `text` in points when set in Helvetica at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap: words are added to the current line while it still
/// fits in `max_width`; otherwise the line is flushed. A word wider than
/// the budget gets a line of its own. Explicit newlines start a new
/// paragraph. Blank input gives no lines.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if text_width(&candidate, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        lines.push(current);
    }

    lines
}

/// Encode text for a WinAnsi (cp1252) Type1 font. Characters outside the
/// encoding become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => match c {
                '€' => 0x80,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}
