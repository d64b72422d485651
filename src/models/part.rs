use once_cell::sync::Lazy;
use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Catalog category. Determines which detail variant a part carries and
/// which detail fields vendor tables display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "part_category")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PartCategory {
    #[sea_orm(string_value = "ENGINE_AND_FLUIDS")]
    EngineAndFluids,
    #[sea_orm(string_value = "BRAKES")]
    Brakes,
    #[sea_orm(string_value = "PAINT_AND_BODY")]
    PaintAndBody,
    #[sea_orm(string_value = "ELECTRICAL")]
    Electrical,
    #[sea_orm(string_value = "ACCESSORIES")]
    Accessories,
}

impl PartCategory {
    /// Display name as shown in category pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            PartCategory::EngineAndFluids => "Engine & Fluids",
            PartCategory::Brakes => "Brakes",
            PartCategory::PaintAndBody => "Paint & Body",
            PartCategory::Electrical => "Electrical",
            PartCategory::Accessories => "Accessories",
        }
    }

    /// Parse a user-supplied category, trimming whitespace and ignoring
    /// case. Accepts both the display name ("Engine & Fluids") and the wire
    /// name ("ENGINE_AND_FLUIDS").
    pub fn parse_loose(input: &str) -> Option<Self> {
        let needle = input.trim();
        if needle.is_empty() {
            return None;
        }
        Self::iter().find(|cat| {
            needle.eq_ignore_ascii_case(cat.display_name())
                || needle.eq_ignore_ascii_case(&cat.to_string())
        })
    }
}

/// Category-specific part attributes. Replaces the legacy one-wide-record
/// shape (thirty mostly-empty optional columns) with a tagged union stored
/// in the part row's JSON `details` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartDetails {
    EngineAndFluids {
        #[serde(default)]
        viscosity: Option<String>,
        #[serde(default)]
        volume_liters: Option<f64>,
        #[serde(default)]
        fluid_type: Option<String>,
        #[serde(default)]
        oem_approval: Option<String>,
    },
    Brakes {
        #[serde(default)]
        position: Option<String>,
        #[serde(default)]
        material: Option<String>,
        #[serde(default)]
        includes_hardware: Option<bool>,
    },
    PaintAndBody {
        #[serde(default)]
        color_code: Option<String>,
        #[serde(default)]
        finish: Option<String>,
        #[serde(default)]
        volume_liters: Option<f64>,
    },
    Electrical {
        #[serde(default)]
        voltage: Option<String>,
        #[serde(default)]
        amperage: Option<String>,
        #[serde(default)]
        connector_type: Option<String>,
    },
    Accessories {
        #[serde(default)]
        placement: Option<String>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        universal_fit: Option<bool>,
    },
}

impl PartDetails {
    pub fn category(&self) -> PartCategory {
        match self {
            PartDetails::EngineAndFluids { .. } => PartCategory::EngineAndFluids,
            PartDetails::Brakes { .. } => PartCategory::Brakes,
            PartDetails::PaintAndBody { .. } => PartCategory::PaintAndBody,
            PartDetails::Electrical { .. } => PartCategory::Electrical,
            PartDetails::Accessories { .. } => PartCategory::Accessories,
        }
    }

    /// Empty details record for a category (all fields unset).
    pub fn empty(category: PartCategory) -> Self {
        match category {
            PartCategory::EngineAndFluids => PartDetails::EngineAndFluids {
                viscosity: None,
                volume_liters: None,
                fluid_type: None,
                oem_approval: None,
            },
            PartCategory::Brakes => PartDetails::Brakes {
                position: None,
                material: None,
                includes_hardware: None,
            },
            PartCategory::PaintAndBody => PartDetails::PaintAndBody {
                color_code: None,
                finish: None,
                volume_liters: None,
            },
            PartCategory::Electrical => PartDetails::Electrical {
                voltage: None,
                amperage: None,
                connector_type: None,
            },
            PartCategory::Accessories => PartDetails::Accessories {
                placement: None,
                color: None,
                universal_fit: None,
            },
        }
    }

    /// Textual detail values that participate in free-text search (e.g. a
    /// brake pad's position).
    pub fn searchable_text(&self) -> Vec<&str> {
        fn push<'a>(out: &mut Vec<&'a str>, field: &'a Option<String>) {
            if let Some(value) = field {
                out.push(value.as_str());
            }
        }
        let mut out = Vec::new();
        match self {
            PartDetails::EngineAndFluids {
                viscosity,
                fluid_type,
                oem_approval,
                ..
            } => {
                push(&mut out, viscosity);
                push(&mut out, fluid_type);
                push(&mut out, oem_approval);
            }
            PartDetails::Brakes {
                position, material, ..
            } => {
                push(&mut out, position);
                push(&mut out, material);
            }
            PartDetails::PaintAndBody {
                color_code, finish, ..
            } => {
                push(&mut out, color_code);
                push(&mut out, finish);
            }
            PartDetails::Electrical {
                voltage,
                amperage,
                connector_type,
            } => {
                push(&mut out, voltage);
                push(&mut out, amperage);
                push(&mut out, connector_type);
            }
            PartDetails::Accessories {
                placement, color, ..
            } => {
                push(&mut out, placement);
                push(&mut out, color);
            }
        }
        out
    }
}

/// Detail fields shown (and searched) per category. Stand-in for the SPA's
/// per-category table column configuration.
pub static CATEGORY_FIELDS: Lazy<HashMap<PartCategory, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut map: HashMap<PartCategory, &'static [&'static str]> = HashMap::new();
        map.insert(
            PartCategory::EngineAndFluids,
            &["viscosity", "volume_liters", "fluid_type", "oem_approval"],
        );
        map.insert(
            PartCategory::Brakes,
            &["position", "material", "includes_hardware"],
        );
        map.insert(
            PartCategory::PaintAndBody,
            &["color_code", "finish", "volume_liters"],
        );
        map.insert(
            PartCategory::Electrical,
            &["voltage", "amperage", "connector_type"],
        );
        map.insert(
            PartCategory::Accessories,
            &["placement", "color", "universal_fit"],
        );
        map
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parse_trims_and_ignores_case() {
        assert_eq!(
            PartCategory::parse_loose("  engine & fluids "),
            Some(PartCategory::EngineAndFluids)
        );
        assert_eq!(
            PartCategory::parse_loose("BRAKES"),
            Some(PartCategory::Brakes)
        );
        assert_eq!(
            PartCategory::parse_loose("paint_and_body"),
            Some(PartCategory::PaintAndBody)
        );
        assert_eq!(PartCategory::parse_loose("tyres"), None);
        assert_eq!(PartCategory::parse_loose("   "), None);
    }

    #[test]
    fn details_round_trip_keeps_category_tag() {
        let details = PartDetails::Brakes {
            position: Some("FRONT".into()),
            material: Some("ceramic".into()),
            includes_hardware: Some(true),
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["category"], "BRAKES");
        let back: PartDetails = serde_json::from_value(value).unwrap();
        assert_eq!(back.category(), PartCategory::Brakes);
    }

    #[test]
    fn unset_fields_deserialize_as_none() {
        let details: PartDetails =
            serde_json::from_value(serde_json::json!({"category": "ELECTRICAL"})).unwrap();
        assert_eq!(details, PartDetails::empty(PartCategory::Electrical));
    }

    #[test]
    fn every_category_has_a_field_config() {
        for cat in PartCategory::iter() {
            assert!(CATEGORY_FIELDS.contains_key(&cat), "{cat} missing");
        }
    }

    #[test]
    fn search_text_includes_brake_position() {
        let details = PartDetails::Brakes {
            position: Some("REAR".into()),
            material: None,
            includes_hardware: None,
        };
        assert!(details.searchable_text().contains(&"REAR"));
    }
}
