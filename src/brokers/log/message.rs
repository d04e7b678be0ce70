use serde::{Serialize, Deserialize};

/// A record appended to a topic log. Never mutated after append;
/// readers always get a clone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub offset: u64,
    pub value: String,
    #[serde(default)]
    pub key: Option<String>,
}
