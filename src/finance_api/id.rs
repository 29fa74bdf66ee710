use serde::{Deserialize, Deserializer};

/// The finance API sends ids sometimes as strings and sometimes as numbers. Anything else is
/// kept in its JSON form so one odd record doesn't fail the whole response.
#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Other(serde_json::Value),
}

/// Deserializes an id field into its string form. Missing, null and empty ids become `None`.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<Id>::deserialize(deserializer)?;
    Ok(id
        .map(|id| match id {
            Id::Text(text) => text,
            Id::Unsigned(number) => number.to_string(),
            Id::Signed(number) => number.to_string(),
            Id::Other(value) => value.to_string(),
        })
        .filter(|id| !id.is_empty()))
}
