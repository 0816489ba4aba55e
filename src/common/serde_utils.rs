// src/common/serde_utils.rs

// O backend guarda alguns campos estruturados (budget, preferences, tags)
// como texto JSON. Na ida serializamos para string; na volta aceitamos
// tanto a string quanto o objeto já estruturado.
pub mod json_string {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let text = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: DeserializeOwned + Default,
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        match raw {
            Value::Null => Ok(T::default()),
            Value::String(text) if text.trim().is_empty() || text.trim() == "null" => Ok(T::default()),
            Value::String(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
            other => serde_json::from_value(other).map_err(serde::de::Error::custom),
        }
    }
}

// Valor desconhecido vira None em vez de derrubar a lista inteira.
pub mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::debug!("valor ignorado: {}", value);
                None
            }
        }))
    }
}

// `null` explícito tratado como ausente.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(
            default,
            serialize_with = "super::json_string::serialize",
            deserialize_with = "super::json_string::deserialize"
        )]
        tags: Vec<String>,
    }

    #[test]
    fn writes_structured_fields_as_json_text() {
        let w = Wrapper { tags: vec!["vip".into(), "2024".into()] };
        let out = serde_json::to_value(&w).unwrap();
        assert_eq!(out["tags"], r#"["vip","2024"]"#);
    }

    #[test]
    fn reads_both_text_and_structured_forms() {
        let from_text: Wrapper = serde_json::from_str(r#"{"tags":"[\"a\",\"b\"]"}"#).unwrap();
        let from_array: Wrapper = serde_json::from_str(r#"{"tags":["a","b"]}"#).unwrap();
        assert_eq!(from_text, from_array);

        let empty: Wrapper = serde_json::from_str(r#"{"tags":""}"#).unwrap();
        assert!(empty.tags.is_empty());
        let missing: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(missing.tags.is_empty());
    }
}
