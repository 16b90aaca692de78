//! Preset management: built-in preset tokens and the persisted user-defined
//! presets.
//!
//! A built-in preset is a pure function from its token to a query
//! configuration: it always starts from the default configuration and then
//! applies its overrides, so applying one never inherits leftover filters.

use super::error::PresetError;
use super::query::{QueryConfig, SortKey, StatusFilter};
use super::types::{Classroom, UserConfig, UserPreset};
use tracing::warn;

/// Room-name markers for the tiered lecture halls. The institution's naming
/// convention puts "15"/"05" in the display names of stair classrooms.
const TIERED_HALL_MARKERS: [&str; 2] = ["15", "05"];

/// The built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPreset {
    /// Vacant rooms, least crowded first.
    VacantLeastCrowded,
    /// Only the tiered lecture halls, by name marker.
    TieredHalls,
    /// Rooms whose bookings finish earliest first.
    EarliestEnd,
    /// Back to the default configuration.
    Reset,
}

impl BuiltinPreset {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "empty_least_people" => Some(BuiltinPreset::VacantLeastCrowded),
            "stair_classroom" => Some(BuiltinPreset::TieredHalls),
            "earliest_end" => Some(BuiltinPreset::EarliestEnd),
            "reset" => Some(BuiltinPreset::Reset),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            BuiltinPreset::VacantLeastCrowded => "empty_least_people",
            BuiltinPreset::TieredHalls => "stair_classroom",
            BuiltinPreset::EarliestEnd => "earliest_end",
            BuiltinPreset::Reset => "reset",
        }
    }

    /// Produces the query configuration for this preset.
    ///
    /// `classrooms` is consulted only by [`BuiltinPreset::TieredHalls`],
    /// which resolves the name markers against the current room set.
    pub fn to_config(&self, classrooms: &[Classroom]) -> QueryConfig {
        let mut config = QueryConfig::default();
        match self {
            BuiltinPreset::VacantLeastCrowded => {
                config.status = StatusFilter::Vacant;
                config.sort_options = vec![SortKey::AscStudents];
            }
            BuiltinPreset::TieredHalls => {
                config.classroom_ids = classrooms
                    .iter()
                    .filter(|c| TIERED_HALL_MARKERS.iter().any(|m| c.name.contains(m)))
                    .map(|c| c.id.clone())
                    .collect();
            }
            BuiltinPreset::EarliestEnd => {
                config.sort_options = vec![SortKey::AscEnd];
            }
            BuiltinPreset::Reset => {}
        }
        config
    }
}

/// Captures the current query configuration as a named preset.
///
/// Rejects the save with [`PresetError::NameCollision`] when the name is
/// taken; `config` is left untouched in that case.
pub fn save_preset(
    config: &mut UserConfig,
    name: &str,
    query: &QueryConfig,
) -> Result<(), PresetError> {
    if config.presets.iter().any(|p| p.name == name) {
        return Err(PresetError::NameCollision {
            name: name.to_string(),
        });
    }
    config.presets.push(preset_from_query(name, query));
    Ok(())
}

/// Loads a named preset into a query configuration and records it as the
/// last used preset.
pub fn load_preset(config: &mut UserConfig, name: &str) -> Result<QueryConfig, PresetError> {
    let preset = config
        .presets
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PresetError::NotFound {
            name: name.to_string(),
        })?;
    let query = query_from_preset(preset);
    config.last_used_preset = name.to_string();
    Ok(query)
}

/// Removes a single named preset.
pub fn delete_preset(config: &mut UserConfig, name: &str) -> Result<(), PresetError> {
    let before = config.presets.len();
    config.presets.retain(|p| p.name != name);
    if config.presets.len() == before {
        return Err(PresetError::NotFound {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Empties the preset list unconditionally.
pub fn clear_presets(config: &mut UserConfig) {
    config.presets.clear();
}

/// Converts a query configuration to the persisted preset shape.
fn preset_from_query(name: &str, query: &QueryConfig) -> UserPreset {
    UserPreset {
        name: name.to_string(),
        status: query.status.token().to_string(),
        building_ids: query.building_ids.clone(),
        classroom_ids: query.classroom_ids.clone(),
        sort_options: query.sort_options.iter().map(|k| k.token().to_string()).collect(),
    }
}

/// Rebuilds a query configuration from a persisted preset.
///
/// Persisted tokens may predate the current build (or have been edited by
/// hand); unknown ones are skipped rather than failing the whole load.
fn query_from_preset(preset: &UserPreset) -> QueryConfig {
    let status = StatusFilter::parse(&preset.status).unwrap_or_else(|| {
        warn!(preset = %preset.name, status = %preset.status, "Unknown status token, using 'all'");
        StatusFilter::All
    });
    let sort_options = preset
        .sort_options
        .iter()
        .filter_map(|token| {
            let key = SortKey::parse(token);
            if key.is_none() {
                warn!(preset = %preset.name, token = %token, "Skipping unknown sort token");
            }
            key
        })
        .collect();
    QueryConfig {
        status,
        building_ids: preset.building_ids.clone(),
        classroom_ids: preset.classroom_ids.clone(),
        sort_options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_room(id: &str, name: &str) -> Classroom {
        Classroom::new(
            id.to_string(),
            name.to_string(),
            "1".to_string(),
            0,
            vec![],
        )
    }

    fn query_with_sort() -> QueryConfig {
        QueryConfig {
            status: StatusFilter::Vacant,
            building_ids: vec!["5".to_string()],
            classroom_ids: vec![],
            sort_options: vec![SortKey::DescNext],
        }
    }

    #[test]
    fn test_builtin_tokens_round_trip() {
        for preset in [
            BuiltinPreset::VacantLeastCrowded,
            BuiltinPreset::TieredHalls,
            BuiltinPreset::EarliestEnd,
            BuiltinPreset::Reset,
        ] {
            assert_eq!(BuiltinPreset::parse(preset.token()), Some(preset));
        }
        assert_eq!(BuiltinPreset::parse("nope"), None);
    }

    #[test]
    fn test_builtin_always_resets_first() {
        let rooms = vec![named_room("1", "East 105"), named_room("2", "East 201")];
        // Every builtin starts from the default config, regardless of what
        // was active before it.
        let config = BuiltinPreset::EarliestEnd.to_config(&rooms);
        assert_eq!(config.status, StatusFilter::All);
        assert!(config.building_ids.is_empty());
        assert!(config.classroom_ids.is_empty());
        assert_eq!(config.sort_options, vec![SortKey::AscEnd]);

        assert_eq!(BuiltinPreset::Reset.to_config(&rooms), QueryConfig::default());
    }

    #[test]
    fn test_vacant_least_crowded_config() {
        let config = BuiltinPreset::VacantLeastCrowded.to_config(&[]);
        assert_eq!(config.status, StatusFilter::Vacant);
        assert_eq!(config.sort_options, vec![SortKey::AscStudents]);
    }

    #[test]
    fn test_tiered_halls_selects_by_name_marker() {
        let rooms = vec![
            named_room("1", "East 105"),
            named_room("2", "East 201"),
            named_room("3", "West 315"),
        ];
        let config = BuiltinPreset::TieredHalls.to_config(&rooms);
        assert_eq!(config.classroom_ids, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(config.status, StatusFilter::All);
    }

    #[test]
    fn test_save_rejects_duplicate_name() {
        let mut config = UserConfig::default();
        save_preset(&mut config, "P1", &query_with_sort()).unwrap();
        assert_eq!(config.presets.len(), 1);

        let err = save_preset(&mut config, "P1", &QueryConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PresetError::NameCollision {
                name: "P1".to_string()
            }
        );
        assert_eq!(config.presets.len(), 1);
    }

    #[test]
    fn test_load_round_trips_and_records_last_used() {
        let mut config = UserConfig::default();
        let query = query_with_sort();
        save_preset(&mut config, "P1", &query).unwrap();

        let loaded = load_preset(&mut config, "P1").unwrap();
        assert_eq!(loaded, query);
        assert_eq!(config.last_used_preset, "P1");
    }

    #[test]
    fn test_load_missing_preset() {
        let mut config = UserConfig::default();
        let err = load_preset(&mut config, "missing").unwrap_err();
        assert_eq!(
            err,
            PresetError::NotFound {
                name: "missing".to_string()
            }
        );
        assert_eq!(config.last_used_preset, "");
    }

    #[test]
    fn test_delete_preset() {
        let mut config = UserConfig::default();
        save_preset(&mut config, "P1", &QueryConfig::default()).unwrap();
        save_preset(&mut config, "P2", &QueryConfig::default()).unwrap();

        delete_preset(&mut config, "P1").unwrap();
        assert_eq!(config.presets.len(), 1);
        assert_eq!(config.presets[0].name, "P2");

        assert!(delete_preset(&mut config, "P1").is_err());
    }

    #[test]
    fn test_clear_presets() {
        let mut config = UserConfig::default();
        save_preset(&mut config, "P1", &QueryConfig::default()).unwrap();
        save_preset(&mut config, "P2", &QueryConfig::default()).unwrap();
        clear_presets(&mut config);
        assert!(config.presets.is_empty());

        // Clearing an already-empty list is fine.
        clear_presets(&mut config);
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_unknown_persisted_tokens_are_skipped() {
        let preset = UserPreset {
            name: "old".to_string(),
            status: "free".to_string(),
            building_ids: vec![],
            classroom_ids: vec![],
            sort_options: vec!["asc_students".to_string(), "by_moon_phase".to_string()],
        };
        let query = query_from_preset(&preset);
        assert_eq!(query.status, StatusFilter::All);
        assert_eq!(query.sort_options, vec![SortKey::AscStudents]);
    }
}
