// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The chord interval tables the instrument quantizes against. Each set is an
//! ordered sequence of MIDI values (or pairs, for the two-note sets) indexed
//! by a continuous [0, 1] pitch parameter. New sets can be added here and
//! show up in `handwave chords`; all values must stay within [0, 127].

/// The names of the available chord sets.
pub const NAMES: [&str; 6] = ["major", "major0", "major1", "minor", "minor0", "minor1"];

/// A single resolved chord table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordEntry {
    /// One MIDI note.
    Single(u8),
    /// Two MIDI notes sounded together.
    Pair(u8, u8),
}

impl ChordEntry {
    /// The MIDI keys this entry sounds.
    pub fn keys(&self) -> Vec<u8> {
        match *self {
            ChordEntry::Single(key) => vec![key],
            ChordEntry::Pair(low, high) => vec![low, high],
        }
    }
}

/// A named chord set.
#[derive(Debug, Clone, Copy)]
pub enum ChordSet {
    Single(&'static [u8]),
    Pair(&'static [(u8, u8)]),
}

impl ChordSet {
    /// The number of entries in the set.
    pub fn len(&self) -> usize {
        match self {
            ChordSet::Single(values) => values.len(),
            ChordSet::Pair(values) => values.len(),
        }
    }

    /// Returns the entry at the given index.
    pub fn entry(&self, index: usize) -> ChordEntry {
        match self {
            ChordSet::Single(values) => ChordEntry::Single(values[index]),
            ChordSet::Pair(values) => {
                let (low, high) = values[index];
                ChordEntry::Pair(low, high)
            }
        }
    }

    /// Quantizes a continuous [0, 1] pitch parameter onto the set's index
    /// range and returns the selected entry.
    pub fn quantize(&self, pct: f32) -> ChordEntry {
        let last = self.len() - 1;
        let index = (pct.clamp(0.0, 1.0) * last as f32).round() as usize;
        self.entry(index.min(last))
    }
}

/// Looks up a chord set by name.
pub fn get(name: &str) -> Option<ChordSet> {
    match name {
        "major" => Some(ChordSet::Pair(MAJOR)),
        "major0" => Some(ChordSet::Single(MAJOR0)),
        "major1" => Some(ChordSet::Single(MAJOR1)),
        "minor" => Some(ChordSet::Pair(MINOR)),
        "minor0" => Some(ChordSet::Single(MINOR0)),
        "minor1" => Some(ChordSet::Single(MINOR1)),
        _ => None,
    }
}

const MAJOR: &[(u8, u8)] = &[
    (0, 4), (2, 5), (4, 7), (5, 9), (7, 11), (9, 12), (11, 14), (12, 16), (14, 17), (16, 19),
    (17, 21), (19, 23), (21, 24), (23, 26), (24, 28), (26, 29), (28, 31), (29, 33), (31, 35), (33, 36),
    (35, 38), (36, 40), (38, 41), (40, 43), (41, 45), (43, 47), (45, 48), (47, 50), (48, 52), (50, 53),
    (52, 55), (53, 57), (55, 59), (57, 60), (59, 62), (60, 64), (62, 65), (64, 67), (65, 69), (67, 71),
    (69, 72), (71, 74), (72, 76), (74, 77), (76, 79), (77, 81), (79, 81), (81, 84), (83, 86), (84, 88),
    (86, 89), (88, 91), (89, 93), (91, 95), (93, 96), (95, 98), (96, 100), (98, 101), (100, 103), (101, 105),
    (103, 107), (105, 108), (107, 110), (108, 112), (110, 113), (112, 115), (113, 117), (115, 119), (117, 120), (119, 122),
    (120, 124), (122, 125), (124, 127),
];

const MAJOR0: &[u8] = &[
    0, 2, 4, 5, 7, 9, 11, 12, 14, 16,
    17, 19, 21, 23, 24, 26, 28, 29, 31, 33,
    35, 36, 38, 40, 41, 43, 45, 47, 48, 50,
    52, 53, 55, 57, 59, 60, 62, 64, 65, 67,
    69, 71, 72, 74, 76, 77, 79, 81, 83, 84,
    86, 88, 89, 91, 93, 95, 96, 98, 100, 101,
    103, 105, 107, 108, 110, 112, 113, 115, 117, 119,
    120, 122, 124,
];

const MAJOR1: &[u8] = &[
    4, 5, 7, 9, 11, 12, 14, 16, 17, 19,
    21, 23, 24, 26, 28, 29, 31, 33, 35, 36,
    38, 40, 41, 43, 45, 47, 48, 50, 52, 53,
    55, 57, 59, 60, 62, 64, 65, 67, 69, 71,
    72, 74, 76, 77, 79, 81, 81, 84, 86, 88,
    89, 91, 93, 95, 96, 98, 100, 101, 103, 105,
    107, 108, 110, 112, 113, 115, 117, 119, 120, 122,
    124, 125, 127,
];

const MINOR: &[(u8, u8)] = &[
    (4, 11), (7, 14), (9, 16), (10, 17), (11, 18), (14, 21), (16, 23), (19, 26), (21, 28), (22, 29),
    (23, 30), (26, 33), (28, 35), (31, 38), (33, 40), (34, 41), (35, 42), (38, 45), (40, 47), (43, 50),
    (45, 52), (46, 53), (47, 54), (50, 57), (52, 59), (55, 62), (57, 64), (58, 65), (59, 66), (62, 69),
    (64, 71), (67, 74), (69, 76), (70, 77), (71, 78), (74, 81), (76, 83), (79, 86), (81, 88), (82, 89),
    (83, 90), (86, 93), (88, 95), (91, 98), (93, 100), (94, 101), (95, 102), (98, 105), (100, 107), (103, 110),
    (105, 112), (106, 113), (107, 114), (110, 117), (112, 119), (115, 122), (117, 124), (118, 125), (119, 126),
];

const MINOR0: &[u8] = &[
    4, 7, 9, 10, 11, 14, 16, 19, 21, 22,
    23, 26, 28, 31, 33, 34, 35, 38, 40, 43,
    45, 46, 47, 50, 52, 55, 57, 58, 59, 62,
    64, 67, 69, 70, 71, 74, 76, 79, 81, 82,
    83, 86, 88, 91, 93, 94, 95, 98, 100, 103,
    105, 106, 107, 110, 112, 115, 117, 118, 119,
];

const MINOR1: &[u8] = &[
    11, 14, 16, 17, 18, 21, 23, 26, 28, 29,
    30, 33, 35, 38, 40, 41, 42, 45, 47, 50,
    52, 53, 54, 57, 59, 62, 64, 65, 66, 69,
    71, 74, 76, 77, 78, 81, 83, 86, 88, 89,
    90, 93, 95, 98, 100, 101, 102, 105, 107, 110,
    112, 113, 114, 117, 119, 122, 124, 125, 126,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_all_sets_resolve() {
        for name in NAMES {
            assert!(get(name).is_some(), "chord set {} should resolve", name);
        }
        assert!(get("default").is_none());
        assert!(get("dorian").is_none());
    }

    #[test]
    fn test_expected_set_sizes() {
        assert_eq!(get("major").unwrap().len(), 73);
        assert_eq!(get("major0").unwrap().len(), 73);
        assert_eq!(get("major1").unwrap().len(), 73);
        assert_eq!(get("minor").unwrap().len(), 59);
        assert_eq!(get("minor0").unwrap().len(), 59);
        assert_eq!(get("minor1").unwrap().len(), 59);
    }

    #[test]
    fn test_all_values_are_valid_midi() {
        for name in NAMES {
            let set = get(name).unwrap();
            for index in 0..set.len() {
                for key in set.entry(index).keys() {
                    assert!(key <= 127, "{}[{}] contains {}", name, index, key);
                }
            }
        }
    }

    #[test]
    fn test_quantize_endpoints() {
        let set = get("minor0").unwrap();
        assert_eq!(set.quantize(0.0), ChordEntry::Single(4));
        assert_eq!(set.quantize(1.0), ChordEntry::Single(119));

        let set = get("major").unwrap();
        assert_eq!(set.quantize(0.0), ChordEntry::Pair(0, 4));
        assert_eq!(set.quantize(1.0), ChordEntry::Pair(124, 127));
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let set = get("minor1").unwrap();
        assert_eq!(set.quantize(-0.5), set.quantize(0.0));
        assert_eq!(set.quantize(1.5), set.quantize(1.0));
    }

    #[test]
    fn test_quantize_is_monotonic() {
        let set = get("major0").unwrap();
        let mut last = 0u8;
        for step in 0..=100 {
            let pct = step as f32 / 100.0;
            if let ChordEntry::Single(key) = set.quantize(pct) {
                assert!(key >= last);
                last = key;
            }
        }
    }
}
