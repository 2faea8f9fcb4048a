//! Service information.

use serde::{Deserialize, Serialize};

/// Query API release, from `/info/release`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_info() {
        let info: ReleaseInfo =
            serde_json::from_str(r#"{"releaseVersion": "1.8.2-3", "releaseDate": "2023-06-20"}"#)
                .unwrap();
        assert_eq!(info.release_version.as_deref(), Some("1.8.2-3"));
        assert_eq!(info.release_date.as_deref(), Some("2023-06-20"));
    }

    #[test]
    fn test_empty_release_info() {
        let info: ReleaseInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(
            info,
            ReleaseInfo {
                release_version: None,
                release_date: None,
            }
        );
    }
}
