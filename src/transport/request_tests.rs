//! Tests for request/response values.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

fn url(s: &str) -> url::Url {
    url::Url::parse(s).unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_starts_without_headers_or_body() {
        let req = HttpRequest::new(http::Method::PUT, url("https://top.gg/api/bots"));

        assert_eq!(req.method, http::Method::PUT);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_and_post_set_method() {
        assert_eq!(
            HttpRequest::get(url("https://top.gg/")).method,
            http::Method::GET
        );
        assert_eq!(
            HttpRequest::post(url("https://top.gg/")).method,
            http::Method::POST
        );
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let req = HttpRequest::get(url("https://top.gg/"))
            .with_header(
                http::header::AUTHORIZATION,
                http::HeaderValue::from_static("first"),
            )
            .with_header(
                http::header::AUTHORIZATION,
                http::HeaderValue::from_static("second"),
            );

        let values: Vec<_> = req
            .headers
            .get_all(http::header::AUTHORIZATION)
            .iter()
            .collect();
        assert_eq!(values, vec!["second"]);
    }

    #[test]
    fn path_excludes_query_string() {
        let req = HttpRequest::get(url("https://top.gg/api/bots/votes?page=2"));

        assert_eq!(req.path(), "/api/bots/votes");
    }

    #[test]
    fn with_body_sets_payload() {
        let req = HttpRequest::post(url("https://top.gg/")).with_body(b"{}".to_vec());

        assert_eq!(req.body.as_deref(), Some(b"{}".as_slice()));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn success_covers_2xx_only() {
        let ok = HttpResponse::new(http::StatusCode::NO_CONTENT, http::HeaderMap::new(), vec![]);
        let redirect = HttpResponse::new(http::StatusCode::FOUND, http::HeaderMap::new(), vec![]);
        let limited = HttpResponse::new(
            http::StatusCode::TOO_MANY_REQUESTS,
            http::HeaderMap::new(),
            vec![],
        );

        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!limited.is_success());
    }

    #[test]
    fn body_text_is_lossy_for_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xFF],
        );

        assert_eq!(resp.body_text(), "ok\u{FFFD}");
    }
}

mod arc_client {
    use super::*;
    use std::sync::Arc;

    struct Fixed;

    impl HttpClient for Fixed {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                b"shared".to_vec(),
            ))
        }
    }

    #[tokio::test]
    async fn arc_delegates_to_inner_client() {
        let client = Arc::new(Fixed);

        let resp = client
            .request(HttpRequest::get(url("https://top.gg/")))
            .await
            .unwrap();

        assert_eq!(resp.body, b"shared");
    }
}
