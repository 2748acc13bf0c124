//! The zoning-compliance record and its typed field identifiers
//!
//! Every field is declared exactly once in the `form_record!` invocation
//! below. The macro expands that list into:
//!
//! - [`FormRecord`], the fixed-shape record (serialized with the camelCase
//!   wire names),
//! - [`FieldId`], one variant per field carrying name, label, kind and step,
//! - [`FieldUpdate`], one variant per field carrying a value of that field's
//!   type, so a mismatched value kind cannot be expressed.

use super::field::{Answer, FieldKind, FieldParseError, FieldValue, NumericText, RecordValue};
use crate::state::WizardStep;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! form_record {
    ($(
        $step:ident {
            $( $field:ident: $ty:ty => $variant:ident($name:literal, $label:literal), )*
        }
    )*) => {
        /// Field values of one questionnaire, grouped by step
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(default)]
        pub struct FormRecord {
            $($(
                #[serde(rename = $name)]
                pub $field: $ty,
            )*)*
        }

        /// Identifier of a declared record field
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FieldId {
            $($($variant,)*)*
        }

        impl FieldId {
            /// All fields in declaration order
            pub const ALL: &'static [FieldId] = &[$($(FieldId::$variant,)*)*];

            /// Wire name used in snapshots and drafts
            pub fn name(self) -> &'static str {
                match self {
                    $($(FieldId::$variant => $name,)*)*
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($(FieldId::$variant => $label,)*)*
                }
            }

            pub fn kind(self) -> FieldKind {
                match self {
                    $($(FieldId::$variant => <$ty as RecordValue>::KIND,)*)*
                }
            }

            /// The step whose section owns this field
            pub fn step(self) -> WizardStep {
                match self {
                    $($(FieldId::$variant => WizardStep::$step,)*)*
                }
            }
        }

        /// A new value for exactly one field
        #[derive(Debug, Clone, PartialEq)]
        pub enum FieldUpdate {
            $($($variant($ty),)*)*
        }

        impl FieldUpdate {
            pub fn field_id(&self) -> FieldId {
                match self {
                    $($(FieldUpdate::$variant(_) => FieldId::$variant,)*)*
                }
            }

            /// Build an update from raw host input for the given field
            pub fn parse(id: FieldId, input: &str) -> Result<Self, FieldParseError> {
                match id {
                    $($(FieldId::$variant => Ok(FieldUpdate::$variant(
                        <$ty as RecordValue>::parse_input(input)?,
                    )),)*)*
                }
            }
        }

        impl FormRecord {
            /// Overwrite the single field named by `update`
            pub fn apply(&mut self, update: FieldUpdate) {
                match update {
                    $($(FieldUpdate::$variant(value) => self.$field = value,)*)*
                }
            }

            pub fn value(&self, id: FieldId) -> FieldValue {
                match id {
                    $($(FieldId::$variant => self.$field.to_field_value(),)*)*
                }
            }
        }
    };
}

form_record! {
    SubjectProperty {
        property_address: String => PropertyAddress("propertyAddress", "Property address"),
        municipality: String => Municipality("municipality", "Municipality"),
        county: String => County("county", "County"),
        state: String => State("state", "State"),
        assessor_parcel_number: String => AssessorParcelNumber("assessorParcelNumber", "Assessor parcel number"),
        year_built: NumericText => YearBuilt("yearBuilt", "Year built"),
        existing_land_use: String => ExistingLandUse("existingLandUse", "Existing land use"),
    }
    ZoningDistrict {
        zoning_jurisdiction: String => ZoningJurisdiction("zoningJurisdiction", "Zoning jurisdiction"),
        zoning_district: String => ZoningDistrict("zoningDistrict", "Zoning district"),
        overlay_district: String => OverlayDistrict("overlayDistrict", "Overlay district"),
        overlay_zone: String => OverlayZone("overlayZone", "Overlay zone"),
        adopted_date: String => AdoptedDate("adoptedDate", "Adopted date"),
        amended_date: String => AmendedDate("amendedDate", "Amended date"),
        is_permitted_use: Answer => IsPermittedUse("isPermittedUse", "Permitted use"),
        why_permitted: String => WhyPermitted("whyPermitted", "Why permitted"),
        is_conforming_use: Answer => IsConformingUse("isConformingUse", "Conforming use"),
    }
    AdjacentZoning {
        north_zoning: String => NorthZoning("northZoning", "North zoning"),
        north_zoning_district: String => NorthZoningDistrict("northZoningDistrict", "North zoning district"),
        south_zoning: String => SouthZoning("southZoning", "South zoning"),
        south_zoning_district: String => SouthZoningDistrict("southZoningDistrict", "South zoning district"),
        east_zoning: String => EastZoning("eastZoning", "East zoning"),
        east_zoning_district: String => EastZoningDistrict("eastZoningDistrict", "East zoning district"),
        west_zoning: String => WestZoning("westZoning", "West zoning"),
        west_zoning_district: String => WestZoningDistrict("westZoningDistrict", "West zoning district"),
        square_feet: NumericText => SquareFeet("squareFeet", "Lot area (square feet)"),
        acres: NumericText => Acres("acres", "Lot area (acres)"),
    }
    BuildingSetback {
        building_setback_per: String => BuildingSetbackPer("buildingSetbackPer", "Setbacks per"),
        required_front_feet: String => RequiredFrontFeet("requiredFrontFeet", "Front, required (ft)"),
        required_front_or: String => RequiredFrontOr("requiredFrontOr", "Front, required (or)"),
        existing_front_feet: String => ExistingFrontFeet("existingFrontFeet", "Front, existing (ft)"),
        existing_front_or: String => ExistingFrontOr("existingFrontOr", "Front, existing (or)"),
        required_corner_side_feet: String => RequiredCornerSideFeet("requiredCornerSideFeet", "Corner side, required (ft)"),
        required_corner_side_or: String => RequiredCornerSideOr("requiredCornerSideOr", "Corner side, required (or)"),
        existing_corner_side_feet: String => ExistingCornerSideFeet("existingCornerSideFeet", "Corner side, existing (ft)"),
        existing_corner_side_or: String => ExistingCornerSideOr("existingCornerSideOr", "Corner side, existing (or)"),
        required_interior_side_feet: String => RequiredInteriorSideFeet("requiredInteriorSideFeet", "Interior side, required (ft)"),
        required_interior_side_or: String => RequiredInteriorSideOr("requiredInteriorSideOr", "Interior side, required (or)"),
        existing_interior_side_feet: String => ExistingInteriorSideFeet("existingInteriorSideFeet", "Interior side, existing (ft)"),
        existing_interior_side_or: String => ExistingInteriorSideOr("existingInteriorSideOr", "Interior side, existing (or)"),
        required_rear_feet: String => RequiredRearFeet("requiredRearFeet", "Rear, required (ft)"),
        required_rear_or: String => RequiredRearOr("requiredRearOr", "Rear, required (or)"),
        existing_rear_feet: String => ExistingRearFeet("existingRearFeet", "Rear, existing (ft)"),
        existing_rear_or: String => ExistingRearOr("existingRearOr", "Rear, existing (or)"),
        building_setback_compliant: Answer => BuildingSetbackCompliant("buildingSetbackCompliant", "Setbacks compliant"),
        building_setback_why: String => BuildingSetbackWhy("buildingSetbackWhy", "Setback rationale"),
    }
    HeightRestrictions {
        required_max_feet: String => RequiredMaxFeet("requiredMaxFeet", "Max height, required (ft)"),
        required_max_feet_or: String => RequiredMaxFeetOr("requiredMaxFeetOr", "Max height, required (or)"),
        existing_max_feet: String => ExistingMaxFeet("existingMaxFeet", "Max height, existing (ft)"),
        existing_max_feet_or: String => ExistingMaxFeetOr("existingMaxFeetOr", "Max height, existing (or)"),
        required_max_stories: String => RequiredMaxStories("requiredMaxStories", "Max stories, required"),
        required_max_stories_or: String => RequiredMaxStoriesOr("requiredMaxStoriesOr", "Max stories, required (or)"),
        existing_max_stories: String => ExistingMaxStories("existingMaxStories", "Max stories, existing"),
        existing_max_stories_or: String => ExistingMaxStoriesOr("existingMaxStoriesOr", "Max stories, existing (or)"),
        height_restriction_compliant: Answer => HeightRestrictionCompliant("heightRestrictionCompliant", "Height compliant"),
        height_restriction_why: String => HeightRestrictionWhy("heightRestrictionWhy", "Height rationale"),
    }
}

impl FieldId {
    /// Fields belonging to one step, in declaration order
    pub fn in_step(step: WizardStep) -> impl Iterator<Item = FieldId> {
        Self::ALL.iter().copied().filter(move |id| id.step() == step)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the wire name (`requiredFrontFeet`) as well as snake_case and
/// kebab-case spellings (`required_front_feet`, `required-front-feet`).
impl FromStr for FieldId {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| FieldParseError::UnknownField(s.to_string()))
    }
}

impl FormRecord {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields in `step` that hold something other than their
    /// initial value
    pub fn filled_count(&self, step: WizardStep) -> usize {
        FieldId::in_step(step)
            .filter(|id| !self.value(*id).is_blank())
            .count()
    }
}
