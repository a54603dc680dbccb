/// Maps a source tag spelling (`HediffDef`) to its lowercase type key (`hediff`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefTypeMapping {
    pub tag: &'static str,
    pub key: &'static str,
}

/// Recognized definition tags, in tie-break priority order.
///
/// When a `<defName>` occurrence has more than one unclosed candidate tag before it,
/// the first entry of this table wins.
pub const DEF_TYPES: [DefTypeMapping; 19] = [
    DefTypeMapping { tag: "HediffDef", key: "hediff" },
    DefTypeMapping { tag: "ThingDef", key: "thing" },
    DefTypeMapping { tag: "ResearchProjectDef", key: "research" },
    DefTypeMapping { tag: "TraitDef", key: "trait" },
    DefTypeMapping { tag: "RecipeDef", key: "recipe" },
    DefTypeMapping { tag: "JobDef", key: "job" },
    DefTypeMapping { tag: "WorkGiverDef", key: "workgiver" },
    DefTypeMapping { tag: "ThoughtDef", key: "thought" },
    DefTypeMapping { tag: "BodyPartDef", key: "bodypart" },
    DefTypeMapping { tag: "BiomeDef", key: "biome" },
    DefTypeMapping { tag: "FactionDef", key: "faction" },
    DefTypeMapping { tag: "PawnKindDef", key: "pawnkind" },
    DefTypeMapping { tag: "WorldObjectDef", key: "worldobject" },
    DefTypeMapping { tag: "AbilityDef", key: "ability" },
    DefTypeMapping { tag: "GeneDef", key: "gene" },
    DefTypeMapping { tag: "MentalStateDef", key: "mental" },
    DefTypeMapping { tag: "StatDef", key: "stat" },
    DefTypeMapping { tag: "DamageDef", key: "damage" },
    DefTypeMapping { tag: "EffecterDef", key: "effecter" },
];

/// Look up the type key for an exact source tag name
pub fn def_type_for_tag(tag: &str) -> Option<&'static str> {
    DEF_TYPES.iter().find(|mapping| mapping.tag == tag).map(|mapping| mapping.key)
}

/// A definition name tagged with the type key it was found under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub def_type: String,
    pub name: String,
}

impl Identifier {
    pub fn new(def_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self { def_type: def_type.into(), name: name.into() }
    }
}
