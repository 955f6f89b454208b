//! Tests for bot search parameters.

use std::collections::BTreeMap;

use super::{BotsQuery, Fields, Search};

mod params {
    use super::*;

    #[test]
    fn empty_query_has_no_params() {
        assert!(BotsQuery::new().to_params().is_empty());
    }

    #[test]
    fn field_list_is_comma_space_joined() {
        let query = BotsQuery::new().with_fields(["id", "username"]);

        assert_eq!(
            query.to_params(),
            vec![("fields", "id, username".to_string())]
        );
    }

    #[test]
    fn raw_fields_are_sent_verbatim() {
        let query = BotsQuery {
            fields: Some(Fields::Raw("id,username".to_string())),
            ..BotsQuery::default()
        };

        assert_eq!(query.to_params(), vec![("fields", "id,username".to_string())]);
    }

    #[test]
    fn search_mapping_is_flattened_in_key_order() {
        let mut criteria = BTreeMap::new();
        criteria.insert("username".to_string(), "shiro".to_string());
        criteria.insert("lib".to_string(), "serenity".to_string());
        let query = BotsQuery {
            search: Some(Search::Fields(criteria)),
            ..BotsQuery::default()
        };

        assert_eq!(
            query.to_params(),
            vec![("search", "lib: serenity username: shiro".to_string())]
        );
    }

    #[test]
    fn text_search_is_sent_verbatim() {
        let query = BotsQuery::new().with_search("music bot");

        assert_eq!(query.to_params(), vec![("search", "music bot".to_string())]);
    }

    #[test]
    fn search_field_replaces_text_search() {
        let query = BotsQuery::new()
            .with_search("ignored")
            .with_search_field("username", "shiro");

        assert_eq!(
            query.to_params(),
            vec![("search", "username: shiro".to_string())]
        );
    }

    #[test]
    fn params_are_emitted_in_key_order() {
        let query = BotsQuery::new()
            .with_sort("points")
            .with_offset(20)
            .with_limit(10)
            .with_search("a")
            .with_fields(["id"]);

        let keys: Vec<_> = query.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fields", "limit", "offset", "search", "sort"]);
    }
}
