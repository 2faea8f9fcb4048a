use tracing::instrument;

use solarweb_client::Result;

use crate::service::ReleaseInfo;

impl super::SolarWebClient {
    /// Get the Query API release.
    #[instrument(skip(self))]
    pub async fn release_info(&self) -> Result<ReleaseInfo> {
        self.send(self.get("/info/release")).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::key_client;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_release_info() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/info/release"))
            .and(header("AccessKeyId", "FKIA0001"))
            .and(header("AccessKeyValue", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "releaseVersion": "1.8.2-3",
                "releaseDate": "2023-06-20"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let info = key_client(&server).release_info().await.unwrap();
        assert_eq!(info.release_version.as_deref(), Some("1.8.2-3"));
    }

    #[tokio::test]
    async fn test_no_content_fails_validation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/info/release"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let err = key_client(&server).release_info().await.unwrap_err();
        assert!(err.is_validation());
    }
}
