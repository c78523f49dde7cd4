//! Character width conversion for Japanese text

/// Full-width forms of U+FF61..=U+FF9F, in code point order
const HALF_KANA_TABLE: &str = "。「」、・ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

const HALF_KANA_START: u32 = 0xFF61;
const HALF_VOICED_MARK: char = '\u{FF9E}';
const HALF_SEMI_VOICED_MARK: char = '\u{FF9F}';
const WIDE_OFFSET: u32 = 0xFEE0;

fn full_from_half(c: char) -> Option<char> {
    let index = (c as u32).checked_sub(HALF_KANA_START)?;
    HALF_KANA_TABLE.chars().nth(index as usize)
}

fn half_from_full(c: char) -> Option<char> {
    HALF_KANA_TABLE
        .chars()
        .position(|full| full == c)
        .and_then(|index| char::from_u32(HALF_KANA_START + index as u32))
}

/// Voiced form of a katakana, e.g. カ → ガ
fn voiced(c: char) -> Option<char> {
    match c {
        'ウ' => Some('ヴ'),
        'カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'タ' | 'チ' | 'ツ' | 'テ'
        | 'ト' | 'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(c as u32 + 1),
        _ => None,
    }
}

/// Semi-voiced form of a katakana, e.g. ハ → パ
fn semi_voiced(c: char) -> Option<char> {
    match c {
        'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(c as u32 + 2),
        _ => None,
    }
}

/// Base katakana and half-width mark for a voiced or semi-voiced katakana
fn decompose(c: char) -> Option<(char, char)> {
    if c == 'ヴ' {
        return Some(('ウ', HALF_VOICED_MARK));
    }
    let code = c as u32;
    let previous = code
        .checked_sub(1)
        .and_then(char::from_u32)
        .filter(|&base| voiced(base) == Some(c));
    if let Some(base) = previous {
        return Some((base, HALF_VOICED_MARK));
    }
    let before = code
        .checked_sub(2)
        .and_then(char::from_u32)
        .filter(|&base| semi_voiced(base) == Some(c));
    before.map(|base| (base, HALF_SEMI_VOICED_MARK))
}

/// Half-width katakana to full-width, folding a following voiced mark
pub fn to_full_katakana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let Some(full) = full_from_half(c) else {
            out.push(c);
            continue;
        };
        let combined = match chars.peek() {
            Some(&HALF_VOICED_MARK) => voiced(full),
            Some(&HALF_SEMI_VOICED_MARK) => semi_voiced(full),
            _ => None,
        };
        match combined {
            Some(combined) => {
                chars.next();
                out.push(combined);
            }
            None => out.push(full),
        }
    }
    out
}

/// Full-width katakana to half-width, splitting voiced forms into base and mark
pub fn to_half_katakana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some((base, mark)) = decompose(c) {
            if let Some(half) = half_from_full(base) {
                out.push(half);
                out.push(mark);
                continue;
            }
        }
        out.push(half_from_full(c).unwrap_or(c));
    }
    out
}

/// Full-width ASCII variants (U+FF01..=U+FF5E) to ASCII
pub fn to_half_ascii(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - WIDE_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Printable ASCII other than space to its full-width variant
pub fn to_full_ascii(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '!'..='~' => char::from_u32(c as u32 + WIDE_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn to_half_space(s: &str) -> String {
    s.replace('\u{3000}', " ")
}

pub fn to_full_space(s: &str) -> String {
    s.replace(' ', "\u{3000}")
}
