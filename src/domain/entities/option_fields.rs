use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidateLength;

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
///
/// Pair with `#[serde(default)]` so that absent keys deserialize to `Unchanged`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => OptionField::SetToValue(v),
            None => OptionField::SetToNull,
        })
    }
}

/// Mirrors the wire form: a value serializes as itself, anything else as `null`.
impl<T> Serialize for OptionField<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionField::SetToValue(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

// ---------------------- Core helpers ----------------------

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Overlays this patch onto `target`, leaving it untouched when `Unchanged`.
    pub fn apply_to(self, target: &mut Option<T>) {
        if let Some(value) = self.into_option() {
            *target = value;
        }
    }
}

impl OptionField<String> {
    /// Trims a present value; a value that trims to nothing becomes `SetToNull`.
    pub fn trimmed(self) -> Self {
        match self {
            OptionField::SetToValue(value) => {
                let value = value.trim();
                if value.is_empty() {
                    OptionField::SetToNull
                } else {
                    OptionField::SetToValue(value.to_string())
                }
            }
            other => other,
        }
    }
}

pub type PatchString = OptionField<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Patch {
        phone: PatchString,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"phone": "+1 555 0100"}"#).unwrap();

        assert_eq!(absent.phone, OptionField::Unchanged);
        assert_eq!(null.phone, OptionField::SetToNull);
        assert_eq!(value.phone, OptionField::SetToValue("+1 555 0100".to_string()));
    }

    #[test]
    fn apply_to_respects_tri_state() {
        let mut target = Some("old".to_string());

        OptionField::Unchanged.apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("old"));

        OptionField::SetToValue("new".to_string()).apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("new"));

        OptionField::SetToNull.apply_to(&mut target);
        assert_eq!(target, None);
    }

    #[test]
    fn trimmed_collapses_blank_values_to_null() {
        assert_eq!(
            PatchString::SetToValue("  Lagos ".into()).trimmed(),
            PatchString::SetToValue("Lagos".into())
        );
        assert_eq!(PatchString::SetToValue(" \t ".into()).trimmed(), PatchString::SetToNull);
        assert_eq!(PatchString::Unchanged.trimmed(), PatchString::Unchanged);
    }

    #[test]
    fn serializes_like_the_wire_form() {
        assert_eq!(serde_json::to_value(PatchString::SetToValue("x".into())).unwrap(), "x");
        assert!(serde_json::to_value(PatchString::SetToNull).unwrap().is_null());
    }
}
