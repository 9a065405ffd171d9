//! Letter-Pair Rotation Scores
//!
//! How well one lowercase letter turns into another when the page is rotated
//! 180 degrees. Scores run 0-10 (10 = the rotated glyph already reads as the
//! partner). The table is symmetric: rotating a pair back gives the same pair,
//! so `(b, q)` also answers `(q, b)`.

use serde::Serialize;

/// Score for an unlisted pair
pub const UNLISTED_SCORE: u8 = 2;

/// Note for an unlisted pair
pub const UNLISTED_NOTE: &str = "no natural rotation, requires heavy stylization";

/// One scored letter pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairScore {
    pub first: char,
    pub second: char,
    pub score: u8,
    pub note: &'static str,
}

const fn pair(first: char, second: char, score: u8, note: &'static str) -> PairScore {
    PairScore { first, second, score, note }
}

pub const PAIR_SCORES: [PairScore; 32] = [
    pair('b', 'q', 10, "q is b rotated"),
    pair('d', 'p', 10, "p is d rotated"),
    pair('n', 'u', 10, "u is n rotated"),
    pair('m', 'w', 10, "w is m rotated"),
    pair('o', 'o', 10, "rotationally symmetric"),
    pair('s', 's', 10, "rotationally symmetric"),
    pair('x', 'x', 10, "rotationally symmetric"),
    pair('z', 'z', 10, "rotationally symmetric"),
    pair('l', 'l', 9, "single stroke reads both ways"),
    pair('i', 'i', 9, "dot moves to a serif"),
    pair('i', 'l', 8, "stroke with or without the dot"),
    pair('a', 'e', 8, "open bowl turns into the e crossbar"),
    pair('h', 'y', 7, "y is h with a curved descender"),
    pair('g', 'b', 6, "g loop becomes the b bowl"),
    pair('f', 'j', 6, "hook flips into the j tail"),
    pair('t', 'f', 6, "crossbar carries over"),
    pair('c', 'e', 6, "close the c to make an e"),
    pair('a', 'v', 5, "pointed a reads as v"),
    pair('r', 'j', 5, "r arm becomes the j hook"),
    pair('t', 'l', 5, "drop the crossbar"),
    pair('e', 'o', 5, "e loses its bar"),
    pair('c', 'o', 5, "close the gap"),
    pair('s', 'z', 5, "angular s reads as z"),
    pair('e', 'e', 5, "bar must sit at mid-height"),
    pair('y', 'y', 5, "needs a symmetric fork"),
    pair('a', 'a', 4, "double-story a needs stylizing"),
    pair('t', 't', 4, "crossbar must be centered"),
    pair('h', 'h', 4, "reads as y unless squared"),
    pair('m', 'm', 4, "rotates into w"),
    pair('n', 'n', 4, "rotates into u"),
    pair('k', 'y', 4, "diagonal strokes carry over"),
    pair('u', 'u', 3, "rotates into n"),
];

/// Linear scan of the pair table, in either order
pub fn find_pair(a: char, b: char) -> Option<&'static PairScore> {
    let (a, b) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
    PAIR_SCORES
        .iter()
        .find(|row| (row.first == a && row.second == b) || (row.first == b && row.second == a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric() {
        assert_eq!(find_pair('q', 'b').unwrap().score, 10);
        assert_eq!(find_pair('b', 'q'), find_pair('q', 'b'));
        assert_eq!(find_pair('E', 'a').unwrap().score, 8);
    }

    #[test]
    fn test_unlisted_pair() {
        assert!(find_pair('k', 'r').is_none());
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let mut seen = std::collections::HashSet::new();
        for row in PAIR_SCORES.iter() {
            let key = if row.first <= row.second { (row.first, row.second) } else { (row.second, row.first) };
            assert!(seen.insert(key), "{}{}", row.first, row.second);
            assert!(row.score <= 10);
        }
    }
}
