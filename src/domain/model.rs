use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

pub const PARCEL_NUMBER: &str = "Parcel Number";
pub const ACCOUNT_NUMBER: &str = "Account Number";
pub const OWNER: &str = "Owner";
pub const AMOUNT: &str = "Amount";
pub const GIS_MAP_HYPERLINK: &str = "GIS Map Hyperlink";

/// Columns carried over from the input file, in output order.
pub const INPUT_FIELDS: &[&str] = &[
    PARCEL_NUMBER,
    ACCOUNT_NUMBER,
    OWNER,
    AMOUNT,
    GIS_MAP_HYPERLINK,
];

/// Assessor attributes appended to each row, in output order. Downstream
/// consumers match on these names exactly.
pub const ASSESSOR_FIELDS: &[&str] = &[
    "PARCEL",
    "PARCEL_SIZE",
    "UNIT_TYPE",
    "SITE_ADDRESS",
    "LANDVALUE",
    "OWNER",
    "MAILING_ADDRESS",
    "CITY",
    "STATE",
    "ZIP",
    "ASSESSED_FULL_CASH_VALUE",
    "TOTAL_FCV_VALUE",
    "ASSESSED_LIMITED",
    "TOTAL_LPV_NAV",
    "EXEMPTION_TYPE",
    "EXEMPTION_AMOUNT",
    "USE_CODE",
    "LEGAL_DESCRIPTION",
    "SALEP",
    "SALEDT",
    "REC_BOOK",
    "REC_PAGE",
    "DEEDTYPE",
    "LAND_LEGAL_CLASS",
    "PROTOTYPE",
    "IMPR_LEGAL_CLASS",
    "ASSESSMENT_RATIO",
    "PARCEL_KEY",
    "CLASS_CODE",
    "RESPONSIBLE_FOR_VALUATION",
    "LIMITED_VALUE",
    "VALUE_METHOD",
    "TAX_AREA_CODE_FMT",
    "PROPCODE",
    "PROPUSE",
    "ABSTDESCR",
    "IMPVALUE",
    "TAX_YEAR",
    "TWN_RNG_SEC",
    "BOS_DISTRICT",
];

/// One row of the source table. Columns not listed here are ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "Parcel Number")]
    pub parcel_number: String,
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "GIS Map Hyperlink")]
    pub gis_map_hyperlink: String,
}

impl InputRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            PARCEL_NUMBER => Some(&self.parcel_number),
            ACCOUNT_NUMBER => Some(&self.account_number),
            OWNER => Some(&self.owner),
            AMOUNT => Some(&self.amount),
            GIS_MAP_HYPERLINK => Some(&self.gis_map_hyperlink),
            _ => None,
        }
    }
}

/// Assessor key taken from a map viewer link. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParcelId(String);

impl ParcelId {
    pub(crate) fn new_unchecked(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes of the first feature matching a parcel, restricted to
/// [`ASSESSOR_FIELDS`]. Null and unknown keys are not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessorAttributes {
    values: HashMap<&'static str, Value>,
}

impl AssessorAttributes {
    /// Projects a feature's `attributes` object onto the assessor field list.
    /// Returns `None` when none of the listed fields carry a value.
    pub fn project(attributes: &Map<String, Value>) -> Option<Self> {
        let values: HashMap<&'static str, Value> = ASSESSOR_FIELDS
            .iter()
            .filter_map(|key| match attributes.get(*key) {
                None | Some(Value::Null) => None,
                Some(value) => Some((*key, value.clone())),
            })
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of assessor fields that carried a value.
    pub fn populated(&self) -> usize {
        self.values.len()
    }
}

/// A flat output line, one value per [`OutputSchema`] column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub values: Vec<String>,
}

impl OutputRecord {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column layout shared by the header writer and the row merger so both walk
/// the same sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSchema {
    input: &'static [&'static str],
    assessor: &'static [&'static str],
}

impl OutputSchema {
    pub const fn standard() -> Self {
        Self {
            input: INPUT_FIELDS,
            assessor: ASSESSOR_FIELDS,
        }
    }

    pub fn input_fields(&self) -> &'static [&'static str] {
        self.input
    }

    pub fn assessor_fields(&self) -> &'static [&'static str] {
        self.assessor
    }

    pub fn header(&self) -> impl Iterator<Item = &'static str> {
        self.input.iter().chain(self.assessor.iter()).copied()
    }

    pub fn width(&self) -> usize {
        self.input.len() + self.assessor.len()
    }
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::standard()
    }
}
