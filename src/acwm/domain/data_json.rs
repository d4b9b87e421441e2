use crate::acwm::domain::uid_value::UidValue;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

// Served by the unit at /js/data/data.json
#[derive(Debug, Deserialize)]
pub struct DataJson {
    pub signals: Signals,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct Signals {
    #[serde(deserialize_with = "deserialize_uid")]
    pub uid: HashMap<String, Vec<UidValue>>,
    #[serde(rename = "uidTextvalues")]
    pub uid_textvalues: HashMap<String, HashMap<String, String>>,
}

fn deserialize_uid<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<UidValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Vec<serde_json::Value>> = Deserialize::deserialize(deserializer)?;

    raw.into_iter()
        .map(|(key, values)| {
            let values = values
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    UidValue::try_from(value).map_err(|e| Error::custom(format!("signals.uid.{}[{}]: {}", key, index, e)))
                })
                .collect::<Result<Vec<_>, D::Error>>()?;
            Ok((key, values))
        })
        .collect()
}
