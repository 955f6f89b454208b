//! Tests for statistics payloads.

use serde_json::json;

use super::{ApiError, ServerCount, Stats, StatsPayload};

mod server_count {
    use super::*;

    #[test]
    fn total_must_be_positive() {
        assert!(ServerCount::Total(1).is_valid());
        assert!(!ServerCount::Total(0).is_valid());
        assert!(!ServerCount::Total(-1).is_valid());
    }

    #[test]
    fn per_shard_must_be_non_empty() {
        assert!(ServerCount::PerShard(vec![0, 12]).is_valid());
        assert!(!ServerCount::PerShard(vec![]).is_valid());
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_value(ServerCount::Total(5)).unwrap(), json!(5));
        assert_eq!(
            serde_json::to_value(ServerCount::PerShard(vec![1, 2])).unwrap(),
            json!([1, 2])
        );
    }
}

mod stats_payload {
    use super::*;

    #[test]
    fn serializes_only_present_fields() {
        let payload = StatsPayload::new(42);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"server_count": 42})
        );
    }

    #[test]
    fn serializes_shard_fields_when_set() {
        let payload = StatsPayload::new(vec![10, 20])
            .with_shard_count(2)
            .with_shards(vec![10, 20])
            .with_shard_id(1);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"server_count": [10, 20], "shard_count": 2, "shards": [10, 20], "shard_id": 1})
        );
    }

    #[test]
    fn try_from_accepts_positive_total() {
        let payload = StatsPayload::try_from(json!({"server_count": 7, "shard_count": 1})).unwrap();

        assert_eq!(payload.server_count, ServerCount::Total(7));
        assert_eq!(payload.shard_count, Some(1));
    }

    #[test]
    fn try_from_rejects_invalid_server_counts() {
        for value in [
            json!({"server_count": 0}),
            json!({"server_count": -1}),
            json!({"server_count": "x"}),
            json!({"server_count": []}),
            json!({"server_count": [1, "2"]}),
            json!({"server_count": 1.5}),
            json!({"shard_count": 2}),
            json!("not an object"),
        ] {
            assert!(
                matches!(
                    StatsPayload::try_from(value.clone()),
                    Err(ApiError::MissingOrInvalidServerCount)
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn try_from_ignores_mistyped_optional_fields() {
        let payload =
            StatsPayload::try_from(json!({"server_count": 3, "shard_id": "zero"})).unwrap();

        assert_eq!(payload.shard_id, None);
    }
}

mod stats_response {
    use super::*;

    #[test]
    fn copies_present_fields() {
        let stats = Stats::from_response(
            &json!({"server_count": 120, "shard_count": 2, "shards": [60, 60]}),
        )
        .unwrap();

        assert_eq!(stats.server_count, Some(ServerCount::Total(120)));
        assert_eq!(stats.shard_count, Some(2));
        assert_eq!(stats.shards, vec![60, 60]);
    }

    #[test]
    fn per_shard_server_count_is_kept() {
        let stats = Stats::from_response(&json!({"server_count": [10, 20], "shards": [10, -1]}))
            .unwrap();

        assert_eq!(stats.server_count, Some(ServerCount::PerShard(vec![10, 20])));
        assert_eq!(stats.shards, vec![10, -1]);
    }

    #[test]
    fn missing_fields_stay_absent_and_shards_default_empty() {
        let stats = Stats::from_response(&json!({"server_count": 5})).unwrap();

        assert_eq!(stats.server_count, Some(ServerCount::Total(5)));
        assert_eq!(stats.shard_count, None);
        assert!(stats.shards.is_empty());
    }

    #[test]
    fn null_fields_stay_absent() {
        let stats =
            Stats::from_response(&json!({"server_count": null, "shard_count": null, "shards": null}))
                .unwrap();

        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn null_body_yields_default() {
        assert_eq!(
            Stats::from_response(&serde_json::Value::Null).unwrap(),
            Stats::default()
        );
    }

    #[test]
    fn mistyped_fields_are_rejected() {
        for body in [
            json!({"server_count": "12"}),
            json!({"shard_count": -1}),
            json!({"shards": [1, "two"]}),
            json!({"shards": 3}),
        ] {
            assert!(
                matches!(Stats::from_response(&body), Err(ApiError::UnexpectedResponse(_))),
                "{body}"
            );
        }
    }
}
