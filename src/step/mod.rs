//! Step model: the typed representation of one pipeline stage.
//!
//! A [`Step`] pairs a stable [`StepId`] with a [`StepKind`], a closed sum type
//! over the nine supported tools. Each variant carries its own options record,
//! so the interpreter, serializer and parser all dispatch with exhaustive
//! matches.

pub mod options;
pub mod pipeline;

use options::KeyError;
pub use options::{
    AwkOptions, CountOptions, CutOptions, GrepOptions, OptionError, OptionValue, PatternSource,
    SortOptions, TrOptions, WcOptions,
};
pub use pipeline::Pipeline;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque step identifier. Random, so an id is never handed out twice.
///
/// Serialized as a UUID string. Loading also accepts the numeric ids older
/// editors produce (`Date.now() + Math.random()`); each number maps to one
/// fixed id, which is written back in UUID form. Other strings are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StepId(Uuid);

impl StepId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id standing for a numeric editor id. Version bits are zero, so it
    /// never equals a generated one.
    fn from_number(n: f64) -> Self {
        Self(Uuid::from_u64_pair(0, n.to_bits()))
    }
}

impl<'de> Deserialize<'de> for StepId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Uuid(Uuid),
            Number(f64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Uuid(u) => StepId(u),
            Wire::Number(n) => StepId::from_number(n),
        })
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The tool a step runs, without its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Cut,
    Grep,
    Sort,
    Uniq,
    Head,
    Tail,
    Tr,
    Wc,
    Awk,
}

impl StepType {
    /// Every step type, in the order the editor lists them.
    pub const ALL: [StepType; 9] = [
        StepType::Cut,
        StepType::Grep,
        StepType::Sort,
        StepType::Uniq,
        StepType::Head,
        StepType::Tail,
        StepType::Tr,
        StepType::Wc,
        StepType::Awk,
    ];

    /// The tool's command name.
    pub fn as_str(self) -> &'static str {
        match self {
            StepType::Cut => "cut",
            StepType::Grep => "grep",
            StepType::Sort => "sort",
            StepType::Uniq => "uniq",
            StepType::Head => "head",
            StepType::Tail => "tail",
            StepType::Tr => "tr",
            StepType::Wc => "wc",
            StepType::Awk => "awk",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A step's tool together with its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Cut(CutOptions),
    Grep(GrepOptions),
    Sort(SortOptions),
    Uniq,
    Head(CountOptions),
    Tail(CountOptions),
    Tr(TrOptions),
    Wc(WcOptions),
    Awk(AwkOptions),
}

impl StepKind {
    /// A step of the given type with every option at its default.
    pub fn with_defaults(step_type: StepType) -> Self {
        match step_type {
            StepType::Cut => StepKind::Cut(CutOptions::default()),
            StepType::Grep => StepKind::Grep(GrepOptions::default()),
            StepType::Sort => StepKind::Sort(SortOptions::default()),
            StepType::Uniq => StepKind::Uniq,
            StepType::Head => StepKind::Head(CountOptions::default()),
            StepType::Tail => StepKind::Tail(CountOptions::default()),
            StepType::Tr => StepKind::Tr(TrOptions::default()),
            StepType::Wc => StepKind::Wc(WcOptions::default()),
            StepType::Awk => StepKind::Awk(AwkOptions::default()),
        }
    }

    pub fn step_type(&self) -> StepType {
        match self {
            StepKind::Cut(_) => StepType::Cut,
            StepKind::Grep(_) => StepType::Grep,
            StepKind::Sort(_) => StepType::Sort,
            StepKind::Uniq => StepType::Uniq,
            StepKind::Head(_) => StepType::Head,
            StepKind::Tail(_) => StepType::Tail,
            StepKind::Tr(_) => StepType::Tr,
            StepKind::Wc(_) => StepType::Wc,
            StepKind::Awk(_) => StepType::Awk,
        }
    }

    /// Set one option by its short key (`d`, `pattern`, `n`, ...).
    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<(), OptionError> {
        let step_type = self.step_type();
        match self {
            StepKind::Cut(o) => o.set(key, value),
            StepKind::Grep(o) => o.set(key, value),
            StepKind::Sort(o) => o.set(key, value),
            StepKind::Uniq => Err(KeyError::Unknown),
            StepKind::Head(o) | StepKind::Tail(o) => o.set(key, value),
            StepKind::Tr(o) => o.set(key, value),
            StepKind::Wc(o) => o.set(key, value),
            StepKind::Awk(o) => o.set(key, value),
        }
        .map_err(|e| e.into_option_error(step_type, key))
    }
}

/// One configured pipeline stage.
///
/// JSON form: `{"id": "...", "type": "head", "options": {"n": "5"}}`. A
/// missing `id` gets a fresh one; missing or `null` options mean defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStep")]
pub struct Step {
    pub id: StepId,
    pub kind: StepKind,
}

#[derive(Deserialize)]
struct RawStep {
    #[serde(default = "StepId::generate")]
    id: StepId,
    #[serde(rename = "type")]
    step_type: StepType,
    #[serde(default)]
    options: serde_json::Value,
}

impl TryFrom<RawStep> for Step {
    type Error = serde_json::Error;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        fn load<T: serde::de::DeserializeOwned + Default>(
            value: serde_json::Value,
        ) -> Result<T, serde_json::Error> {
            if value.is_null() {
                Ok(T::default())
            } else {
                serde_json::from_value(value)
            }
        }

        let kind = match raw.step_type {
            StepType::Cut => StepKind::Cut(load(raw.options)?),
            StepType::Grep => StepKind::Grep(load(raw.options)?),
            StepType::Sort => StepKind::Sort(load(raw.options)?),
            StepType::Uniq => StepKind::Uniq,
            StepType::Head => StepKind::Head(load(raw.options)?),
            StepType::Tail => StepKind::Tail(load(raw.options)?),
            StepType::Tr => StepKind::Tr(load(raw.options)?),
            StepType::Wc => StepKind::Wc(load(raw.options)?),
            StepType::Awk => StepKind::Awk(load(raw.options)?),
        };
        Ok(Step { id: raw.id, kind })
    }
}

impl Serialize for Step {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        #[derive(Serialize)]
        struct NoOptions {}

        let mut s = serializer.serialize_struct("Step", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", &self.step_type())?;
        match &self.kind {
            StepKind::Cut(o) => s.serialize_field("options", o)?,
            StepKind::Grep(o) => s.serialize_field("options", o)?,
            StepKind::Sort(o) => s.serialize_field("options", o)?,
            StepKind::Uniq => s.serialize_field("options", &NoOptions {})?,
            StepKind::Head(o) | StepKind::Tail(o) => s.serialize_field("options", o)?,
            StepKind::Tr(o) => s.serialize_field("options", o)?,
            StepKind::Wc(o) => s.serialize_field("options", o)?,
            StepKind::Awk(o) => s.serialize_field("options", o)?,
        }
        s.end()
    }
}

impl Step {
    /// Wrap `kind` in a step with a fresh id.
    pub fn new(kind: StepKind) -> Self {
        Self {
            id: StepId::generate(),
            kind,
        }
    }

    pub fn step_type(&self) -> StepType {
        self.kind.step_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_type_round_trips_through_name() {
        for t in StepType::ALL {
            assert_eq!(t.as_str().parse::<StepType>(), Ok(t));
        }
        assert!("sed".parse::<StepType>().is_err());
    }

    #[test]
    fn defaults_match_type() {
        for t in StepType::ALL {
            assert_eq!(StepKind::with_defaults(t).step_type(), t);
        }
    }

    #[test]
    fn ids_are_distinct() {
        let a = Step::new(StepKind::Uniq);
        let b = Step::new(StepKind::Uniq);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn json_shape_uses_type_and_options() {
        let step = Step::new(StepKind::Head(CountOptions { n: "5".into() }));
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["type"], "head");
        assert_eq!(value["options"]["n"], "5");
        assert!(value["id"].is_string());
    }

    #[test]
    fn json_without_id_or_options() {
        let step: Step = serde_json::from_str(r#"{"type": "uniq"}"#).unwrap();
        assert_eq!(step.kind, StepKind::Uniq);

        let step: Step = serde_json::from_str(r#"{"type": "uniq", "options": {}}"#).unwrap();
        assert_eq!(step.kind, StepKind::Uniq);

        let step: Step = serde_json::from_str(r#"{"type": "sort", "options": {}}"#).unwrap();
        assert_eq!(step.kind, StepKind::Sort(SortOptions { reverse: false }));
    }

    #[test]
    fn json_keeps_given_id() {
        let step = Step::new(StepKind::Wc(WcOptions::default()));
        let text = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&text).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn json_numeric_ids() {
        let a: Step = serde_json::from_str(r#"{"id": 1718000000123.4567, "type": "uniq"}"#).unwrap();
        let b: Step = serde_json::from_str(r#"{"id": 1718000000123.4567, "type": "uniq"}"#).unwrap();
        let c: Step = serde_json::from_str(r#"{"id": 42, "type": "uniq"}"#).unwrap();
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_ne!(a.id, StepId::generate());

        let text = serde_json::to_string(&a).unwrap();
        let back: Step = serde_json::from_str(&text).unwrap();
        assert_eq!(back.id, a.id);
    }

    #[test]
    fn json_rejects_non_uuid_string_id() {
        assert!(serde_json::from_str::<Step>(r#"{"id": "step-1", "type": "uniq"}"#).is_err());
    }

    #[test]
    fn json_rejects_unknown_type() {
        assert!(serde_json::from_str::<Step>(r#"{"type": "sed"}"#).is_err());
    }

    #[test]
    fn json_tolerates_extra_keys() {
        let step: Step =
            serde_json::from_str(r#"{"type": "cut", "options": {"f": "2", "zzz": true}}"#)
                .unwrap();
        let StepKind::Cut(o) = step.kind else {
            panic!("expected cut");
        };
        assert_eq!(o.fields, "2");
        assert_eq!(o.delimiter, ",");
    }

    #[test]
    fn set_option_on_uniq_is_rejected() {
        let mut kind = StepKind::Uniq;
        let err = kind.set_option("n", OptionValue::Text("3".into())).unwrap_err();
        assert!(matches!(err, OptionError::UnknownKey { step: StepType::Uniq, .. }));
    }
}
