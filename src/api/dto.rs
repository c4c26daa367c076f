use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListDogsQuery {
    #[serde(rename = "nameHas")]
    pub name_has: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_uses_camel_case_name() {
        let query: ListDogsQuery = serde_json::from_str(r#"{"nameHas":"Re"}"#).unwrap();
        assert_eq!(query.name_has.as_deref(), Some("Re"));
    }

    #[test]
    fn test_list_query_filter_is_optional() {
        let query: ListDogsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.name_has, None);
    }
}
