//! Feature vector assembly
//!
//! Holds the single validation ruleset for wine samples ([`FIELDS`]) and turns
//! a sample into the 12-element vector the model was trained on:
//!
//! | Index | Feature |
//! |:------|:--------|
//! | 0 | wine_type (red = 0, white = 1) |
//! | 1-11 | the chemical fields, in [`FIELDS`] order |
//!
//! Validation walks the fields in declaration order and stops at the first
//! failure.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Length of the model input
pub const FEATURE_COUNT: usize = 12;

/// Number of chemical measurements in a sample
pub const CHEMICAL_COUNT: usize = FEATURE_COUNT - 1;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "wine_type",
    "fixed_acidity",
    "volatile_acidity",
    "citric_acid",
    "residual_sugar",
    "chlorides",
    "free_sulfur_dioxide",
    "total_sulfur_dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
];

// ═══════════════════════════════════════════════════════════════════════════════
// WINE TYPE
// ═══════════════════════════════════════════════════════════════════════════════

/// Categorical wine type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
}

impl WineType {
    /// Numeric code used in the feature vector
    pub fn code(self) -> f64 {
        match self {
            WineType::Red => 0.0,
            WineType::White => 1.0,
        }
    }

    /// Inverse of [`WineType::code`]
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(WineType::Red)
        } else if code == 1.0 {
            Some(WineType::White)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WineType::Red => "red",
            WineType::White => "white",
        }
    }
}

impl FromStr for WineType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "red" | "0" => Ok(WineType::Red),
            "white" | "1" => Ok(WineType::White),
            _ => Err(ValidationError::UnknownWineType(trimmed.to_string())),
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD RULESET
// ═══════════════════════════════════════════════════════════════════════════════

/// Acceptance rule for one chemical field.
///
/// Front ends render these bounds; [`build`] enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Key used in JSON input and feature names
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Measurement unit (empty when dimensionless)
    pub unit: &'static str,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    pub description: &'static str,
}

impl FieldSpec {
    /// Check a value against the closed interval `[min, max]`
    pub fn check(&self, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotNumeric {
                field: self.name,
                value: value.to_string(),
            });
        }
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// The chemical fields in declaration (and model input) order
pub static FIELDS: [FieldSpec; CHEMICAL_COUNT] = [
    FieldSpec {
        name: "fixed_acidity",
        label: "Fixed acidity",
        unit: "g/dm³",
        min: 3.0,
        max: 16.0,
        description: "Tartaric acid content, contributing to the total acidity of wine.",
    },
    FieldSpec {
        name: "volatile_acidity",
        label: "Volatile acidity",
        unit: "g/dm³",
        min: 0.0,
        max: 2.0,
        description: "Acetic acid content; too much gives an unpleasant vinegar taste.",
    },
    FieldSpec {
        name: "citric_acid",
        label: "Citric acid",
        unit: "g/dm³",
        min: 0.0,
        max: 2.0,
        description: "Citric acid content, adding freshness and flavor.",
    },
    FieldSpec {
        name: "residual_sugar",
        label: "Residual sugar",
        unit: "g/dm³",
        min: 0.0,
        max: 68.0,
        description: "Sugar remaining after fermentation.",
    },
    FieldSpec {
        name: "chlorides",
        label: "Chlorides",
        unit: "g/dm³",
        min: 0.0,
        max: 1.0,
        description: "Sodium chloride content, affecting taste and preservation.",
    },
    FieldSpec {
        name: "free_sulfur_dioxide",
        label: "Free sulfur dioxide",
        unit: "mg/dm³",
        min: 1.0,
        max: 295.0,
        description: "Free SO₂, a preservative against spoilage and oxidation.",
    },
    FieldSpec {
        name: "total_sulfur_dioxide",
        label: "Total sulfur dioxide",
        unit: "mg/dm³",
        min: 6.0,
        max: 450.0,
        description: "Free plus bound SO₂.",
    },
    FieldSpec {
        name: "density",
        label: "Density",
        unit: "g/cm³",
        min: 0.5,
        max: 2.0,
        description: "Density of the wine, related to alcohol and sugar content.",
    },
    FieldSpec {
        name: "pH",
        label: "pH",
        unit: "",
        min: 2.0,
        max: 5.0,
        description: "Acidity or basicity of the wine.",
    },
    FieldSpec {
        name: "sulphates",
        label: "Sulphates",
        unit: "g/dm³",
        min: 0.0,
        max: 2.0,
        description: "Potassium sulphate content, with antimicrobial and antioxidant effects.",
    },
    FieldSpec {
        name: "alcohol",
        label: "Alcohol content",
        unit: "% vol",
        min: 8.0,
        max: 16.0,
        description: "Alcohol content by volume.",
    },
];

// ═══════════════════════════════════════════════════════════════════════════════
// SAMPLE
// ═══════════════════════════════════════════════════════════════════════════════

/// One wine to score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WineSample {
    pub wine_type: WineType,
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    #[serde(rename = "pH", alias = "ph")]
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

/// Raw value as handed over by a front end
enum RawValue<'a> {
    Number(f64),
    Text(&'a str),
    Other(String),
}

impl WineSample {
    /// Assemble a sample from chemical values in [`FIELDS`] order
    pub fn from_values(wine_type: WineType, values: [f64; CHEMICAL_COUNT]) -> Self {
        let [
            fixed_acidity,
            volatile_acidity,
            citric_acid,
            residual_sugar,
            chlorides,
            free_sulfur_dioxide,
            total_sulfur_dioxide,
            density,
            ph,
            sulphates,
            alcohol,
        ] = values;

        Self {
            wine_type,
            fixed_acidity,
            volatile_acidity,
            citric_acid,
            residual_sugar,
            chlorides,
            free_sulfur_dioxide,
            total_sulfur_dioxide,
            density,
            ph,
            sulphates,
            alcohol,
        }
    }

    /// Chemical values in [`FIELDS`] order
    pub fn values(&self) -> [f64; CHEMICAL_COUNT] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }

    /// Parse a JSON object keyed by field name.
    ///
    /// `wine_type` (or `type`) takes "red"/"white" or the codes 0/1. Numeric
    /// fields take numbers or numeric strings. A `null` counts as missing.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object();
        Self::parse_with(|name| {
            let raw = object?.get(name)?;
            Some(match raw {
                Value::Null => return None,
                Value::Number(n) => match n.as_f64() {
                    Some(v) => RawValue::Number(v),
                    None => RawValue::Other(n.to_string()),
                },
                Value::String(s) => RawValue::Text(s.as_str()),
                other => RawValue::Other(other.to_string()),
            })
        })
    }

    /// Parse `(name, text)` pairs, e.g. collected from command-line flags
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self::parse_with(|name| map.get(name).map(|text| RawValue::Text(text.as_str())))
    }

    fn parse_with<'a, F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<RawValue<'a>>,
    {
        let find = |name: &str| {
            lookup(name).or_else(|| {
                let lower = name.to_ascii_lowercase();
                if lower != name { lookup(&lower) } else { None }
            })
        };

        let wine_type = match find("wine_type").or_else(|| find("type")) {
            None => return Err(ValidationError::Missing { field: "wine_type" }),
            Some(RawValue::Text(text)) => text.parse()?,
            Some(RawValue::Number(code)) => WineType::from_code(code)
                .ok_or_else(|| ValidationError::UnknownWineType(code.to_string()))?,
            Some(RawValue::Other(text)) => return Err(ValidationError::UnknownWineType(text)),
        };

        let mut values = [0.0; CHEMICAL_COUNT];
        for (slot, spec) in values.iter_mut().zip(FIELDS.iter()) {
            let value = match find(spec.name) {
                None => return Err(ValidationError::Missing { field: spec.name }),
                Some(RawValue::Number(v)) => v,
                Some(RawValue::Text(text)) => {
                    text.trim()
                        .parse::<f64>()
                        .map_err(|_| ValidationError::NotNumeric {
                            field: spec.name,
                            value: text.to_string(),
                        })?
                }
                Some(RawValue::Other(text)) => {
                    return Err(ValidationError::NotNumeric {
                        field: spec.name,
                        value: text,
                    });
                }
            };
            *slot = spec.check(value)?;
        }

        Ok(Self::from_values(wine_type, values))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEATURE VECTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered model input: wine type code followed by the chemical fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn wine_type_code(&self) -> f64 {
        self.0[0]
    }

    /// Pair each value with its feature name
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Validate a sample and order it into the model's input shape.
///
/// Fails with the first violation in field-declaration order.
pub fn build(sample: &WineSample) -> Result<FeatureVector, ValidationError> {
    let mut vector = [0.0; FEATURE_COUNT];
    vector[0] = sample.wine_type.code();

    for ((slot, spec), value) in vector[1..]
        .iter_mut()
        .zip(FIELDS.iter())
        .zip(sample.values())
    {
        *slot = spec.check(value)?;
    }

    Ok(FeatureVector(vector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn red_sample() -> WineSample {
        WineSample::from_values(
            WineType::Red,
            [7.4, 0.7, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4],
        )
    }

    #[test]
    fn test_build_orders_features() {
        let vector = build(&red_sample()).unwrap();
        assert_eq!(
            vector.as_slice(),
            &[0.0, 7.4, 0.7, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4]
        );
        assert_eq!(vector.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_build_white_code() {
        let mut sample = red_sample();
        sample.wine_type = WineType::White;
        let vector = build(&sample).unwrap();
        assert_eq!(vector.wine_type_code(), 1.0);
        assert_eq!(&vector.as_slice()[1..], &sample.values());
    }

    #[test]
    fn test_build_rejects_out_of_range() {
        let mut sample = red_sample();
        sample.alcohol = 20.0;

        let err = build(&sample).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "alcohol",
                value: 20.0,
                min: 8.0,
                max: 16.0,
            }
        );
    }

    #[test]
    fn test_build_accepts_bounds() {
        let lower = WineSample::from_values(WineType::Red, FIELDS.map(|spec| spec.min));
        let upper = WineSample::from_values(WineType::White, FIELDS.map(|spec| spec.max));
        assert!(build(&lower).is_ok());
        assert!(build(&upper).is_ok());
    }

    #[test]
    fn test_build_reports_first_failure() {
        let mut sample = red_sample();
        sample.citric_acid = -1.0;
        sample.alcohol = 20.0;
        sample.fixed_acidity = 17.0;

        let err = build(&sample).unwrap_err();
        assert_eq!(err.field(), "fixed_acidity");
    }

    #[test]
    fn test_build_rejects_nan() {
        let mut sample = red_sample();
        sample.density = f64::NAN;

        let err = build(&sample).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "density", .. }));
    }

    #[test]
    fn test_named_features() {
        let vector = build(&red_sample()).unwrap();
        let named: Vec<_> = vector.named().collect();
        assert_eq!(named[0], ("wine_type", 0.0));
        assert_eq!(named[9], ("pH", 3.51));
        assert_eq!(named[11], ("alcohol", 9.4));
    }

    #[test]
    fn test_fields_match_feature_names() {
        let names: Vec<&str> = FIELDS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.as_slice(), &FEATURE_NAMES[1..]);
    }

    #[test]
    fn test_field_check_bounds() {
        let ph = &FIELDS[8];
        assert_eq!((ph.name, ph.min, ph.max), ("pH", 2.0, 5.0));

        let free_so2 = &FIELDS[5];
        assert_eq!(free_so2.check(295.0), Ok(295.0));
        assert!(matches!(
            free_so2.check(0.5),
            Err(ValidationError::OutOfRange { field: "free_sulfur_dioxide", .. })
        ));
        assert!(matches!(
            free_so2.check(f64::NAN),
            Err(ValidationError::NotNumeric { field: "free_sulfur_dioxide", .. })
        ));
    }

    #[test]
    fn test_wine_type_parse() {
        assert_eq!("Red".parse::<WineType>().unwrap(), WineType::Red);
        assert_eq!(" white ".parse::<WineType>().unwrap(), WineType::White);
        assert_eq!("1".parse::<WineType>().unwrap(), WineType::White);
        assert!(matches!(
            "rose".parse::<WineType>(),
            Err(ValidationError::UnknownWineType(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let value = json!({
            "wine_type": "red",
            "fixed_acidity": 7.4,
            "volatile_acidity": 0.7,
            "citric_acid": 0,
            "residual_sugar": "1.9",
            "chlorides": 0.076,
            "free_sulfur_dioxide": 11,
            "total_sulfur_dioxide": 34,
            "density": 0.9978,
            "pH": 3.51,
            "sulphates": 0.56,
            "alcohol": 9.4
        });

        let sample = WineSample::from_json(&value).unwrap();
        assert_eq!(sample, red_sample());
    }

    #[test]
    fn test_from_json_accepts_type_code_and_lowercase_ph() {
        let mut value = serde_json::to_value(red_sample()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("wine_type");
        object.insert("type".into(), json!(1));
        let ph = object.remove("pH").unwrap();
        object.insert("ph".into(), ph);

        let sample = WineSample::from_json(&value).unwrap();
        assert_eq!(sample.wine_type, WineType::White);
        assert_eq!(sample.ph, 3.51);
    }

    #[test]
    fn test_from_json_missing_field() {
        let mut value = serde_json::to_value(red_sample()).unwrap();
        value.as_object_mut().unwrap().remove("chlorides");
        value["sulphates"] = Value::Null;

        let err = WineSample::from_json(&value).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "chlorides" });
    }

    #[test]
    fn test_from_json_not_numeric() {
        let mut value = serde_json::to_value(red_sample()).unwrap();
        value["volatile_acidity"] = json!("lots");

        let err = WineSample::from_json(&value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotNumeric {
                field: "volatile_acidity",
                value: "lots".into(),
            }
        );

        value["volatile_acidity"] = json!([0.7]);
        let err = WineSample::from_json(&value).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "volatile_acidity", .. }));
    }

    #[test]
    fn test_from_json_checks_in_declaration_order() {
        let mut value = serde_json::to_value(red_sample()).unwrap();
        value["alcohol"] = json!("n/a");
        value["citric_acid"] = json!(5.0);

        let err = WineSample::from_json(&value).unwrap_err();
        assert_eq!(err.field(), "citric_acid");
    }

    #[test]
    fn test_from_json_not_an_object() {
        let err = WineSample::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "wine_type" });
    }

    #[test]
    fn test_from_json_bad_wine_type() {
        let mut value = serde_json::to_value(red_sample()).unwrap();
        value["wine_type"] = json!(2);
        assert!(matches!(
            WineSample::from_json(&value),
            Err(ValidationError::UnknownWineType(_))
        ));
    }

    #[test]
    fn test_from_pairs() {
        let pairs = [
            ("wine_type", "white"),
            ("fixed_acidity", "7.0"),
            ("volatile_acidity", "0.27"),
            ("citric_acid", "0.36"),
            ("residual_sugar", "20.7"),
            ("chlorides", "0.045"),
            ("free_sulfur_dioxide", "45"),
            ("total_sulfur_dioxide", "170"),
            ("density", "1.001"),
            ("pH", "3.0"),
            ("sulphates", "0.45"),
            ("alcohol", "8.8"),
        ];

        let sample = WineSample::from_pairs(pairs).unwrap();
        assert_eq!(sample.wine_type, WineType::White);
        assert_eq!(sample.residual_sugar, 20.7);
        assert_eq!(build(&sample).unwrap().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_from_pairs_rejects_nan_text() {
        let mut pairs: Vec<(String, String)> = FIELDS
            .iter()
            .map(|spec| (spec.name.to_string(), spec.min.to_string()))
            .collect();
        pairs.push(("wine_type".into(), "red".into()));
        pairs[4].1 = "NaN".into();

        let err = WineSample::from_pairs(pairs).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "chlorides", .. }));
    }
}
