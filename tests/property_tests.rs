/// Property-based tests using proptest
/// Tests invariants of the field-map contract that should hold for all inputs
use kyc_aml_client::{
    AmlSuspicionType, Company, Endpoint, Fields, Individual, ListCompaniesParams,
    VerificationState, VerificationStatus,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn scalar_json() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _-]{0,16}".prop_map(Value::String),
    ]
}

// Property: open enums never fail on strings and keep the literal
proptest! {
    #[test]
    fn open_enum_preserves_any_string(raw in "\\PC*") {
        let status: VerificationStatus = serde_json::from_value(Value::String(raw.clone())).unwrap();
        prop_assert_eq!(serde_json::to_value(&status).unwrap(), Value::String(raw.clone()));
        prop_assert_eq!(status.as_str(), raw.as_str());
    }

    #[test]
    fn open_enum_unknown_values_are_other(raw in "[a-z_]{1,20}") {
        let known = ["crime", "sanction", "pep", "adverse_news", "other"];
        let suspicion_type = AmlSuspicionType::from(raw.as_str());
        prop_assert_eq!(suspicion_type.is_known(), known.contains(&raw.as_str()));

        let state: VerificationState = raw.parse().unwrap();
        prop_assert_eq!(state.to_string(), raw);
    }
}

// Property: unknown fields survive a decode/encode cycle
proptest! {
    #[test]
    fn unknown_fields_round_trip(
        extras in prop::collection::btree_map("x_[a-z]{1,8}", scalar_json(), 0..6),
        name in "[A-Za-z ]{1,20}",
    ) {
        let mut payload = json!({
            "source_id": "crm-1",
            "company": { "name": name, "country": "FR", "share_capital": "1000" }
        });
        for (key, value) in &extras {
            payload[key.as_str()] = value.clone();
        }

        let company: Company = serde_json::from_value(payload.clone()).unwrap();
        prop_assert_eq!(serde_json::to_value(&company).unwrap(), payload);
        prop_assert_eq!(company.unknown_fields().len(), extras.len());
        prop_assert!(company.validate().is_ok());
    }

    #[test]
    fn setting_known_field_keeps_unknown_ones(
        extras in prop::collection::btree_map("x_[a-z]{1,8}", scalar_json(), 1..6),
        source_id in "[a-z0-9-]{1,12}",
    ) {
        let mut fields = Fields::new();
        for (key, value) in &extras {
            fields.set_raw(key.clone(), value.clone());
        }
        let mut individual = Individual::from_fields(fields);
        individual.set_source_id(source_id.clone());

        let out = serde_json::to_value(&individual).unwrap();
        prop_assert_eq!(&out["source_id"], &json!(source_id));
        for (key, value) in &extras {
            prop_assert_eq!(&out[key.as_str()], value);
        }
    }

    #[test]
    fn absent_fields_never_error(keys in prop::collection::vec("x_[a-z]{1,8}", 0..6)) {
        let mut fields = Fields::new();
        for key in &keys {
            fields.set(key, 1);
        }
        let company = Company::from_fields(fields);
        prop_assert!(company.source_id().unwrap().is_none());
        prop_assert!(company.members().unwrap().is_none());
        prop_assert!(company.risk().unwrap().is_none());
    }
}

// Property: query serialization never panics and only emits populated entries
proptest! {
    #[test]
    fn list_url_query_matches_populated_params(
        workspace in proptest::option::of("[a-z0-9_]{1,12}"),
        limit in proptest::option::of(0u64..500),
        offset in proptest::option::of(0u64..10_000),
    ) {
        let mut params = ListCompaniesParams::new();
        if let Some(ref w) = workspace {
            params = params.with_workspace_id(w.clone());
        }
        if let Some(l) = limit {
            params = params.with_limit(l);
        }
        if let Some(o) = offset {
            params = params.with_offset(o);
        }

        let base = url::Url::parse("https://inference.eu-west-1.dataleon.ai/v1").unwrap();
        let url = params.request_url(&base).unwrap();
        let expected = workspace.iter().count() + limit.iter().count() + offset.iter().count();
        prop_assert_eq!(url.query_pairs().count(), expected);
        prop_assert_eq!(url.path(), "/v1/companies");
    }
}
