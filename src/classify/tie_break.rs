//! NPC-vs-Monster tie-break strategies.
//!
//! Several systems use a single actor type (usually `npc`) for both roleplay
//! characters and combat adversaries. Their configuration names one of these
//! strategies, which inspects the system-specific attributes of the entity.
//!
//! Every strategy is total and returns [`NpcOrMonster`]; a missing or
//! malformed attribute falls back to the attribute's default.

use serde::{Deserialize, Serialize};

use super::{Entity, NpcOrMonster};

/// dnd5e creature types that always denote a monster.
const MONSTER_CREATURE_TYPES: &[&str] = &[
    "beast",
    "dragon",
    "elemental",
    "fey",
    "fiend",
    "giant",
    "monstrosity",
    "ooze",
    "plant",
    "undead",
    "aberration",
    "celestial",
    "construct",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// `details.cr >= 1` is a monster (sfrpg, a5e).
    ChallengeRating,
    /// Monstrous creature type, else challenge rating (dnd5e).
    CreatureTypeOrChallengeRating,
    /// Unique rarity or negative level is an NPC (pf2e).
    RarityAndLevel,
    /// Wild cards are NPCs, extras are monsters (swade, swpf).
    WildCard,
    /// NPCs with a role are characters, the rest are goons (cyberpunk-red-core).
    Role,
    /// Minions are monsters, rivals and nemeses are NPCs (starwarsffg).
    NpcType,
    /// `tier >= 2` is a monster (lancer).
    Tier,
}

impl TieBreak {
    pub fn resolve(self, entity: &Entity) -> NpcOrMonster {
        match self {
            TieBreak::ChallengeRating => monster_if(challenge_rating(entity) >= 1.0),
            TieBreak::CreatureTypeOrChallengeRating => {
                let monstrous = entity
                    .text("details.type.value")
                    .map(|kind| kind.to_lowercase())
                    .is_some_and(|kind| MONSTER_CREATURE_TYPES.contains(&kind.as_str()));
                monster_if(monstrous || challenge_rating(entity) >= 1.0)
            }
            TieBreak::RarityAndLevel => {
                let unique = entity.text("traits.rarity") == Some("unique");
                let level = entity.number("details.level.value").unwrap_or(0.0);
                monster_if(!unique && level >= 0.0)
            }
            TieBreak::WildCard => monster_if(!entity.truthy("wildcard")),
            TieBreak::Role => monster_if(!(entity.truthy("role.value") || entity.truthy("role"))),
            TieBreak::NpcType => monster_if(entity.text("characteristics.npctype") == Some("minion")),
            TieBreak::Tier => monster_if(entity.number("tier").unwrap_or(0.0) >= 2.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TieBreak::ChallengeRating => "challenge_rating",
            TieBreak::CreatureTypeOrChallengeRating => "creature_type_or_challenge_rating",
            TieBreak::RarityAndLevel => "rarity_and_level",
            TieBreak::WildCard => "wild_card",
            TieBreak::Role => "role",
            TieBreak::NpcType => "npc_type",
            TieBreak::Tier => "tier",
        }
    }
}

fn challenge_rating(entity: &Entity) -> f64 {
    entity.number("details.cr").unwrap_or(0.0)
}

fn monster_if(condition: bool) -> NpcOrMonster {
    if condition { NpcOrMonster::Monster } else { NpcOrMonster::Npc }
}
