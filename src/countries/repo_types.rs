use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A UN country record, keyed by its two-letter code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub a2code: String,
    pub common_name: String,
    pub official_name: String,
    pub capital: Option<String>,
    pub population: Option<i64>,
    pub un_member: bool,
}
