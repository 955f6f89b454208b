//! Tests for the run module.

use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::{HeaderMap, StatusCode};
use topgg::api::ClientOptions;
use topgg::transport::{HttpError, HttpRequest, HttpResponse};

use super::*;

/// Transport replaying one canned body per request and recording URLs.
#[derive(Debug)]
struct MockClient {
    bodies: Mutex<Vec<&'static str>>,
    urls: Mutex<Vec<String>>,
}

impl MockClient {
    fn new(bodies: Vec<&'static str>) -> Self {
        Self {
            bodies: Mutex::new(bodies),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn last_url(&self) -> String {
        self.urls.lock().unwrap().last().cloned().unwrap()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.urls.lock().unwrap().push(req.url.to_string());
        let body = self.bodies.lock().unwrap().remove(0);
        Ok(HttpResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))
    }
}

fn client(bodies: Vec<&'static str>) -> Client<MockClient> {
    let token = format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(br#"{"id":"1","bot":true}"#)
    );
    Client::with_transport(&token, MockClient::new(bodies), ClientOptions::default()).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn api_error_displays_source() {
        let error = RunError::from(ApiError::MissingId);
        assert!(error.to_string().starts_with("Top.gg API error: "));
    }

    #[test]
    fn bind_error_names_address() {
        let error = RunError::Bind {
            addr: "127.0.0.1:5000".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(error.to_string().contains("127.0.0.1:5000"));
    }

    #[test]
    fn debug_format_works() {
        let debug_str = format!("{:?}", RunError::MissingToken);
        assert!(debug_str.contains("MissingToken"));
    }
}

mod stats_payload {
    use super::*;
    use topgg::api::ServerCount;

    #[test]
    fn single_count_is_total() {
        let payload = stats_payload(&[42], None, None);

        assert_eq!(payload.server_count, ServerCount::Total(42));
        assert_eq!(payload.shard_count, None);
    }

    #[test]
    fn several_counts_are_per_shard() {
        let payload = stats_payload(&[10, 20], Some(2), Some(1));

        assert_eq!(payload.server_count, ServerCount::PerShard(vec![10, 20]));
        assert_eq!(payload.shard_count, Some(2));
        assert_eq!(payload.shard_id, Some(1));
    }
}

mod api_commands {
    use super::*;

    #[tokio::test]
    async fn stats_are_rendered() {
        let client = client(vec![r#"{"server_count":12,"shards":[]}"#]);

        let result = run_api_command(&client, &Command::Stats, &BotsQuery::new())
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({"server_count": 12, "shard_count": null, "shards": []})
        );
    }

    #[tokio::test]
    async fn post_stats_echoes_payload() {
        let client = client(vec![""]);
        let command = Command::PostStats {
            server_count: vec![7],
            shard_count: None,
            shard_id: None,
        };

        let result = run_api_command(&client, &command, &BotsQuery::new())
            .await
            .unwrap();

        assert_eq!(result, json!({"server_count": 7}));
        assert!(client.transport().last_url().ends_with("/bots/stats"));
    }

    #[tokio::test]
    async fn bots_uses_query() {
        let client = client(vec![r#"{"results":[]}"#]);
        let command = Command::Bots {
            limit: Some(5),
            offset: None,
            search: None,
            search_fields: vec![],
            sort: None,
            fields: vec![],
        };

        let result = run_api_command(&client, &command, &BotsQuery::new().with_limit(5))
            .await
            .unwrap();

        assert_eq!(result, json!({"results": []}));
        assert!(client.transport().last_url().ends_with("/bots?limit=5"));
    }

    #[tokio::test]
    async fn voted_is_wrapped() {
        let client = client(vec![r#"{"voted":1}"#]);
        let command = Command::Voted {
            user_id: "2".to_string(),
        };

        let result = run_api_command(&client, &command, &BotsQuery::new())
            .await
            .unwrap();

        assert_eq!(result, json!({"voted": true}));
    }

    #[tokio::test]
    async fn weekend_is_wrapped() {
        let client = client(vec![r#"{"is_weekend":false}"#]);

        let result = run_api_command(&client, &Command::Weekend, &BotsQuery::new())
            .await
            .unwrap();

        assert_eq!(result, json!({"is_weekend": false}));
    }

    #[tokio::test]
    async fn api_errors_propagate() {
        let client = client(vec![]);
        let command = Command::Bot { id: String::new() };

        let result = run_api_command(&client, &command, &BotsQuery::new()).await;

        assert!(matches!(result, Err(RunError::Api(ApiError::IdMissing))));
    }
}

mod vote_listener {
    use super::*;
    use axum::body::Body;
    use http::Request;
    use topgg::config::{Cli, ValidatedConfig};
    use tower::ServiceExt;

    fn settings(args: &[&str]) -> WebhookSettings {
        let mut full_args = vec!["topgg", "serve"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None)
            .unwrap()
            .webhook
    }

    fn vote(authorization: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/votes")
            .header("authorization", authorization)
            .body(Body::from(r#"{"bot":"1","user":"2","type":"test"}"#))
            .unwrap()
    }

    #[tokio::test]
    async fn verified_vote_is_acknowledged() {
        let settings = settings(&["--path", "/votes", "--authorization", "secret"]);
        let app = router(&settings.path, vote_listener(&settings));

        let response = app.oneshot(vote("secret")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn wrong_authorization_is_rejected() {
        let settings = settings(&["--path", "/votes", "--authorization", "secret"]);
        let app = router(&settings.path, vote_listener(&settings));

        let response = app.oneshot(vote("wrong")).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
