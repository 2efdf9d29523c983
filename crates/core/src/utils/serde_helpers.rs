//! Serde utility helpers for lenient config values

use serde::{Deserialize, Deserializer};

/// Split a warning list such as `"302, 401 451"` into its identifiers.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deserialize either a JSON array of strings or a single comma/space separated string.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        Text(String),
        List(Vec<String>),
    }

    Ok(
        Option::<StringOrList>::deserialize(deserializer)?.map(|value| match value {
            StringOrList::Text(text) => split_list(&text),
            StringOrList::List(items) => items
                .iter()
                .flat_map(|item| split_list(item))
                .collect(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string_or_list")]
        no_warn: Option<Vec<String>>,
    }

    #[test]
    fn test_split_list_handles_commas_and_spaces() {
        assert_eq!(split_list("302, 401 451,,"), vec!["302", "401", "451"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn test_string_or_list_accepts_both_shapes() {
        let text: Holder = serde_json::from_str(r#"{"no_warn": "302,401"}"#).unwrap();
        assert_eq!(text.no_warn.unwrap(), vec!["302", "401"]);

        let list: Holder = serde_json::from_str(r#"{"no_warn": ["302", "401"]}"#).unwrap();
        assert_eq!(list.no_warn.unwrap(), vec!["302", "401"]);

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.no_warn.is_none());
    }
}
