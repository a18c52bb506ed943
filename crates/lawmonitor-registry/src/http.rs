//! HTTP client for the registry's DRF endpoints.

use std::time::Duration;

use async_trait::async_trait;
use lawmonitor_core::{LawDetail, LawSummary};
use tracing::{debug, info};

use crate::{LawRegistry, RegistryError, xml};

/// Client for `lawSearch.do` and `lawService.do`.
///
/// Every request carries the access key as `OC` plus `target=law&type=XML`.
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl RegistryClient {
    /// Create a client for the given base URL.
    ///
    /// `base_url` should be like `https://www.law.go.kr/DRF` (a trailing
    /// slash is tolerated). `timeout` bounds each request end to end.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Raw XML from `lawSearch.do` for a name query.
    pub async fn search_raw(&self, query: &str) -> Result<String, RegistryError> {
        self.get_xml("lawSearch.do", ("query", query)).await
    }

    /// Raw XML from `lawService.do` for one serial number.
    pub async fn detail_raw(&self, law_id: &str) -> Result<String, RegistryError> {
        self.get_xml("lawService.do", ("MST", law_id)).await
    }

    async fn get_xml(
        &self,
        endpoint: &str,
        (key, value): (&str, &str),
    ) -> Result<String, RegistryError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(url = %url, %key, %value, "registry request");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("OC", self.api_key.as_str()),
                ("target", "law"),
                ("type", "XML"),
                (key, value),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Server {
                status: status.as_u16(),
                body,
            });
        }

        resp.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout(self.timeout)
        } else {
            RegistryError::Http(e)
        }
    }
}

#[async_trait]
impl LawRegistry for RegistryClient {
    async fn search_laws(&self, query: &str) -> Result<Vec<LawSummary>, RegistryError> {
        let body = self.search_raw(query).await?;
        let laws = xml::parse_search(&body)?;
        info!(query, count = laws.len(), "registry search");
        Ok(laws)
    }

    async fn law_detail(&self, law_id: &str) -> Result<Option<LawDetail>, RegistryError> {
        let body = self.detail_raw(law_id).await?;
        xml::parse_detail(&body, law_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_XML: &str = "<LawSearch><totalCnt>1</totalCnt><law id=\"1\">\
        <법령일련번호>248613</법령일련번호><법령명한글>개인정보 보호법</법령명한글>\
        <공포일자>20230314</공포일자></law></LawSearch>";

    const DETAIL_XML: &str = "<법령><기본정보><법령명_한글>개인정보 보호법</법령명_한글>\
        <공포일자>20230314</공포일자></기본정보><조문><조문단위>\
        <조문내용>제1조(목적) 이 법은</조문내용></조문단위></조문></법령>";

    fn client(server: &MockServer, timeout: Duration) -> RegistryClient {
        RegistryClient::new(server.uri(), "testkey", timeout).unwrap()
    }

    #[test]
    fn trims_trailing_slash() {
        let client =
            RegistryClient::new("https://www.law.go.kr/DRF/", "k", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url, "https://www.law.go.kr/DRF");
    }

    #[tokio::test]
    async fn search_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lawSearch.do"))
            .and(query_param("OC", "testkey"))
            .and(query_param("target", "law"))
            .and(query_param("type", "XML"))
            .and(query_param("query", "개인정보"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_XML))
            .expect(1)
            .mount(&server)
            .await;

        let laws = client(&server, Duration::from_secs(5))
            .search_laws("개인정보")
            .await
            .unwrap();
        assert_eq!(laws.len(), 1);
        assert_eq!(laws[0].law_id, "248613");
    }

    #[tokio::test]
    async fn detail_uses_mst() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lawService.do"))
            .and(query_param("MST", "248613"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_XML))
            .mount(&server)
            .await;

        let detail = client(&server, Duration::from_secs(5))
            .law_detail("248613")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.law_id, "248613");
        assert_eq!(detail.content, "제1조(목적) 이 법은");
    }

    #[tokio::test]
    async fn detail_for_unknown_law_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lawService.do"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<Law>일치하는 법령이 없습니다.</Law>"),
            )
            .mount(&server)
            .await;

        let detail = client(&server, Duration::from_secs(5))
            .law_detail("1")
            .await
            .unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn rejected_key_is_an_error_not_a_missing_law() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lawService.do"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<Law>사용자 정보 검증에 실패하였습니다.</Law>"),
            )
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .law_detail("248613")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Xml(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .search_raw("x")
            .await
            .unwrap_err();
        match err {
            RegistryError::Server { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_registry_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SEARCH_XML)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_millis(100))
            .search_raw("x")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Timeout(_)));
    }
}
