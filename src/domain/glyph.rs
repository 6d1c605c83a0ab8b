/// Letter pattern table: character → one or more styled glyphs.
///
/// Glyphs are drawn as row art inside a box at most 3 wide and 4 tall.
/// `#` marks an obstacle cell, anything else is empty. Lookup is
/// case-insensitive; characters without an entry return `None` and the
/// layout generator skips them.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Style {
    Standard,
    Bold,
}

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::Bold => "bold",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    pub style: Style,
    rows: &'static [&'static str],
}

/// Widest glyph box in the table, in cells.
pub const MAX_GLYPH_WIDTH: i32 = 3;

impl Glyph {
    const fn new(style: Style, rows: &'static [&'static str]) -> Self {
        Glyph { style, rows }
    }

    /// (x, y) offsets of every filled cell, row-major.
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Rightmost filled column + 1.
    pub fn width(&self) -> i32 {
        self.offsets().iter().map(|&(x, _)| x + 1).max().unwrap_or(0)
    }
}

/// All styles defined for `ch`, or `None` if unsupported.
pub fn lookup(ch: char) -> Option<&'static [Glyph]> {
    let set: &'static [Glyph] = match ch.to_ascii_uppercase() {
        'A' => A, 'B' => B, 'C' => C, 'D' => D, 'E' => E, 'F' => F,
        'G' => G, 'H' => H, 'I' => I, 'J' => J, 'K' => K, 'L' => L,
        'M' => M, 'N' => N, 'O' => O, 'P' => P, 'Q' => Q, 'R' => R,
        'S' => S, 'T' => T, 'U' => U, 'V' => V, 'W' => W, 'X' => X,
        'Y' => Y, 'Z' => Z,
        '0' => D0, '1' => D1, '2' => D2, '3' => D3, '4' => D4,
        '5' => D5, '6' => D6, '7' => D7, '8' => D8, '9' => D9,
        _ => return None,
    };
    Some(set)
}

// ── Table ──

use Style::{Bold as BD, Standard as ST};

const A: &[Glyph] = &[
    Glyph::new(ST, &[".#.", "#.#", "###", "#.#"]),
    Glyph::new(BD, &["###", "#.#", "###", "#.#"]),
];
const B: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#.#", "##.", "#.#"]),
    Glyph::new(BD, &["###", "#.#", "###", "#.#"]),
];
const C: &[Glyph] = &[
    Glyph::new(ST, &["###", "#..", "###"]),
    Glyph::new(BD, &["###", "#..", "#..", "###"]),
];
const D: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#.#", "##."]),
    Glyph::new(BD, &["##.", "#.#", "#.#", "##."]),
];
const E: &[Glyph] = &[
    Glyph::new(ST, &["###", "###", "#.."]),
    Glyph::new(BD, &["###", "###", "#..", "###"]),
];
const F: &[Glyph] = &[
    Glyph::new(ST, &["###", "##.", "#.."]),
    Glyph::new(BD, &["###", "#..", "##.", "#.."]),
];
const G: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#..", "###"]),
    Glyph::new(BD, &["###", "#..", "#.#", "###"]),
];
const H: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "###", "#.#", "#.#"]),
    Glyph::new(BD, &["#.#", "###", "#.#", "#.#"]),
];
const I: &[Glyph] = &[
    Glyph::new(ST, &["#", "#", "#"]),
    Glyph::new(BD, &["#", "#", "#", "#"]),
];
const J: &[Glyph] = &[
    Glyph::new(ST, &["###", "..#", "###"]),
    Glyph::new(BD, &["###", "#.#", "###"]),
];
const K: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "##.", "#.#"]),
    Glyph::new(BD, &["#.#", "##.", "##.", "#.#"]),
];
const L: &[Glyph] = &[
    Glyph::new(ST, &["#..", "#..", "###"]),
    Glyph::new(BD, &["#..", "#..", "#..", "###"]),
];
const M: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "###", "#.#"]),
    Glyph::new(BD, &["#.#", "###", "###", "#.#"]),
];
const N: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#.#", "#.#"]),
    Glyph::new(BD, &["###", "#.#", "#.#", "#.#"]),
];
const O: &[Glyph] = &[
    Glyph::new(ST, &["###", "#.#", "###"]),
    Glyph::new(BD, &["###", "#.#", "#.#", "###"]),
];
const P: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#.#", "##.", "#.."]),
    Glyph::new(BD, &["###", "#.#", "###", "#.."]),
];
const Q: &[Glyph] = &[
    Glyph::new(ST, &["##.", "#.#", "###", "..#"]),
    Glyph::new(BD, &["###", "#.#", "###", "..#"]),
];
const R: &[Glyph] = &[
    Glyph::new(ST, &["##.", "##.", "#.#"]),
    Glyph::new(BD, &["###", "#.#", "##.", "#.#"]),
];
const S: &[Glyph] = &[
    Glyph::new(ST, &[".##", "#..", "..#", "##."]),
    Glyph::new(BD, &["###", "#..", "..#", "###"]),
];
const T: &[Glyph] = &[
    Glyph::new(ST, &["###", ".#.", ".#."]),
    Glyph::new(BD, &["###", ".#.", ".#.", ".#."]),
];
const U: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "#.#", "###"]),
    Glyph::new(BD, &["#.#", "#.#", "#.#", "###"]),
];
const V: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "#.#", ".#."]),
    Glyph::new(BD, &["#.#", "#.#", "#.#", ".#."]),
];
const W: &[Glyph] = &[
    Glyph::new(ST, &["#.#", "###", "###"]),
    Glyph::new(BD, &["#.#", "#.#", "###", "#.#"]),
];
const X: &[Glyph] = &[
    Glyph::new(ST, &["#.#", ".#.", "#.#"]),
    Glyph::new(BD, &["#.#", ".#.", ".#.", "#.#"]),
];
const Y: &[Glyph] = &[
    Glyph::new(ST, &["#.#", ".#.", ".#."]),
    Glyph::new(BD, &["#.#", "#.#", ".#.", ".#."]),
];
const Z: &[Glyph] = &[
    Glyph::new(ST, &["###", ".#.", "###"]),
    Glyph::new(BD, &["###", "..#", "#..", "###"]),
];

const D0: &[Glyph] = &[Glyph::new(ST, &["###", "#.#", "#.#", "###"])];
const D1: &[Glyph] = &[Glyph::new(ST, &[".#.", "##.", ".#.", "###"])];
const D2: &[Glyph] = &[Glyph::new(ST, &["##.", "..#", ".#.", "###"])];
const D3: &[Glyph] = &[Glyph::new(ST, &["###", ".##", "..#", "###"])];
const D4: &[Glyph] = &[Glyph::new(ST, &["#.#", "###", "..#", "..#"])];
const D5: &[Glyph] = &[Glyph::new(ST, &["###", "##.", "..#", "##."])];
const D6: &[Glyph] = &[Glyph::new(ST, &["#..", "###", "#.#", "###"])];
const D7: &[Glyph] = &[Glyph::new(ST, &["###", "..#", ".#.", ".#."])];
const D8: &[Glyph] = &[Glyph::new(ST, &["###", "###", "#.#", "###"])];
const D9: &[Glyph] = &[Glyph::new(ST, &["###", "#.#", "###", "..#"])];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup('m').map(|g| g.len()), Some(2));
        assert_eq!(lookup('M').map(|g| g.len()), Some(2));
        assert!(lookup('?').is_none());
        assert!(lookup(' ').is_none());
    }

    #[test]
    fn letter_a_standard_offsets() {
        let a = &lookup('a').unwrap()[0];
        assert_eq!(a.style, Style::Standard);
        assert_eq!(
            a.offsets(),
            vec![(1, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2), (0, 3), (2, 3)]
        );
        assert_eq!(a.width(), 3);
    }

    #[test]
    fn narrow_letter_width() {
        for g in lookup('i').unwrap() {
            assert_eq!(g.width(), 1);
        }
    }

    #[test]
    fn every_glyph_fits_the_box() {
        let chars = ('A'..='Z').chain('0'..='9');
        for ch in chars {
            let set = lookup(ch).unwrap_or_else(|| panic!("missing {ch}"));
            assert!(!set.is_empty());
            for g in set {
                let offs = g.offsets();
                assert!(!offs.is_empty(), "{ch} {} is blank", g.style.name());
                assert!(g.width() <= MAX_GLYPH_WIDTH);
                assert!(offs.iter().all(|&(x, y)| (0..3).contains(&x) && (0..4).contains(&y)));
            }
        }
    }

    #[test]
    fn letters_have_both_styles() {
        for ch in 'A'..='Z' {
            let styles: Vec<Style> = lookup(ch).unwrap().iter().map(|g| g.style).collect();
            assert_eq!(styles, vec![Style::Standard, Style::Bold], "{ch}");
        }
    }

    #[test]
    fn standard_glyphs_are_distinct() {
        let chars: Vec<char> = ('A'..='Z').chain('0'..='9').collect();
        for (i, &a) in chars.iter().enumerate() {
            for &b in &chars[i + 1..] {
                let ga = lookup(a).unwrap()[0].offsets();
                let gb = lookup(b).unwrap()[0].offsets();
                assert_ne!(ga, gb, "{a} and {b} share a standard glyph");
            }
        }
    }
}
