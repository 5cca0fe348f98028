use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SkinKind, UnknownLevelError};

use super::{Boundary, ClearRule, SkinWeight};

/// Identifier of a playable level.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum LevelId {
    /// Walled 10×20 field; every completed row clears.
    #[default]
    #[display("classic")]
    Classic,
    /// 12×20 field wrapping left to right; rows clear in adjacent pairs.
    #[display("wraparound")]
    Wraparound,
}

impl LevelId {
    pub const ALL: [Self; 2] = [Self::Classic, Self::Wraparound];

    /// Looks up a level by its position in the level list.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn entry(self) -> &'static LevelEntry {
        &LEVELS[self.index()]
    }
}

impl FromStr for LevelId {
    type Err = UnknownLevelError;

    /// Parses a level by name (`classic`, `wraparound`) or by index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = Self::ALL.into_iter().find(|id| id.to_string() == s) {
            return Ok(id);
        }
        s.parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| UnknownLevelError::new(s))
    }
}

/// Gameplay rules that distinguish one level from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelRules {
    pub boundary: Boundary,
    pub clear_rule: ClearRule,
    pub skins: &'static [SkinWeight],
}

/// A row of the level table: field size plus a rules factory.
#[derive(Debug, Clone, Copy)]
pub struct LevelEntry {
    pub id: LevelId,
    pub width: usize,
    pub height: usize,
    pub rules: fn() -> LevelRules,
}

static LEVELS: [LevelEntry; 2] = [
    LevelEntry {
        id: LevelId::Classic,
        width: 10,
        height: 20,
        rules: classic_rules,
    },
    LevelEntry {
        id: LevelId::Wraparound,
        width: 12,
        height: 20,
        rules: wraparound_rules,
    },
];

const CLASSIC_SKINS: [SkinWeight; 7] = [
    SkinWeight::new(SkinKind::O, 10),
    SkinWeight::new(SkinKind::Z, 15),
    SkinWeight::new(SkinKind::S, 15),
    SkinWeight::new(SkinKind::L, 15),
    SkinWeight::new(SkinKind::J, 15),
    SkinWeight::new(SkinKind::I, 10),
    SkinWeight::new(SkinKind::T, 20),
];

const WRAPAROUND_SKINS: [SkinWeight; 10] = [
    SkinWeight::new(SkinKind::O, 10),
    SkinWeight::new(SkinKind::Z, 15),
    SkinWeight::new(SkinKind::S, 15),
    SkinWeight::new(SkinKind::L, 15),
    SkinWeight::new(SkinKind::J, 15),
    SkinWeight::new(SkinKind::I, 10),
    SkinWeight::new(SkinKind::T, 5),
    SkinWeight::new(SkinKind::X, 5),
    SkinWeight::new(SkinKind::N, 5),
    SkinWeight::new(SkinKind::W, 5),
];

fn classic_rules() -> LevelRules {
    LevelRules {
        boundary: Boundary::Walled,
        clear_rule: ClearRule::Quadratic { scan_rows: 4 },
        skins: &CLASSIC_SKINS,
    }
}

fn wraparound_rules() -> LevelRules {
    LevelRules {
        boundary: Boundary::Wraparound,
        clear_rule: ClearRule::AdjacentPairs {
            scan_rows: 5,
            pair_score: 16,
        },
        skins: &WRAPAROUND_SKINS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_id() {
        for (index, id) in LevelId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), index);
            assert_eq!(id.entry().id, id);
            assert_eq!(LevelId::from_index(index), Some(id));
        }
        assert_eq!(LevelId::from_index(LevelId::ALL.len()), None);
    }

    #[test]
    fn test_parse_by_name_and_index() {
        assert_eq!("classic".parse::<LevelId>(), Ok(LevelId::Classic));
        assert_eq!("wraparound".parse::<LevelId>(), Ok(LevelId::Wraparound));
        assert_eq!("1".parse::<LevelId>(), Ok(LevelId::Wraparound));

        let err = "level3".parse::<LevelId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown level: level3");
        assert!("7".parse::<LevelId>().is_err());
    }

    #[test]
    fn test_level_dimensions() {
        assert_eq!(
            (LevelId::Classic.entry().width, LevelId::Classic.entry().height),
            (10, 20)
        );
        assert_eq!(
            (
                LevelId::Wraparound.entry().width,
                LevelId::Wraparound.entry().height
            ),
            (12, 20)
        );
    }

    #[test]
    fn test_wraparound_adds_extended_skins() {
        let classic = (LevelId::Classic.entry().rules)();
        let wrap = (LevelId::Wraparound.entry().rules)();
        assert_eq!(classic.boundary, Boundary::Walled);
        assert_eq!(wrap.boundary, Boundary::Wraparound);

        let has = |rules: &LevelRules, kind| rules.skins.iter().any(|w| w.kind == kind);
        for kind in [SkinKind::X, SkinKind::N, SkinKind::W] {
            assert!(!has(&classic, kind));
            assert!(has(&wrap, kind));
        }
        let total = |rules: &LevelRules| rules.skins.iter().map(|w| w.weight).sum::<u32>();
        assert_eq!(total(&classic), 100);
        assert_eq!(total(&wrap), 100);
    }

    #[test]
    fn test_level_id_serde() {
        assert_eq!(
            serde_json::to_string(&LevelId::Wraparound).unwrap(),
            "\"wraparound\""
        );
    }
}
