//! Property tests for template compilation and rendering.

use proptest::prelude::*;
use serde_json::{json, Value};

use logplate::{Ambient, JsonEncoder, Level, LogEvent};

/// JSON values with no placeholder syntax in any string.
fn literal_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _.\\-]{0,12}".prop_map(|s| json!(s)),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-zA-Z0-9_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strings that may or may not contain placeholder-shaped text.
fn placeholderish() -> impl Strategy<Value = String> {
    "[#{}a-zA-Z0-9:._ \\-]{0,24}"
}

fn any_event() -> LogEvent {
    let mut event = LogEvent::new(Level::Debug, "msg");
    event.timestamp_ms = Some(1_700_000_000_000);
    event
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: compilation never panics on arbitrary input — it either
    /// produces a plan or a syntax error.
    #[test]
    fn property_compile_never_panics(text in "(?s).{0,256}") {
        let _ = logplate::compile(&text);
    }

    /// PROPERTY: a template with no placeholders reproduces its own JSON
    /// structure for any event.
    #[test]
    fn property_literal_template_round_trips(value in literal_json()) {
        let template = value.to_string();
        let encoder = JsonEncoder::new(&template)
            .expect("serialized JSON must compile");
        let line = encoder.encode_to_string(&any_event(), &Ambient::new()).unwrap();

        let rendered: Value = serde_json::from_str(line.trim_end())
            .expect("rendered output must parse");
        prop_assert_eq!(rendered, value);
    }

    /// PROPERTY: whatever a template's strings contain, a successful
    /// render is one well-formed JSON value.
    #[test]
    fn property_rendered_output_always_parses(
        values in proptest::collection::btree_map("[a-zA-Z0-9_]{1,8}", placeholderish(), 0..5)
    ) {
        let template = Value::Object(
            values.into_iter().map(|(k, v)| (k, json!(v))).collect()
        ).to_string();

        let encoder = JsonEncoder::new(&template).expect("object template must compile");
        let line = encoder.encode_to_string(&any_event(), &Ambient::new()).unwrap();

        prop_assert!(line.ends_with('\n'));
        serde_json::from_str::<Value>(line.trim_end()).expect("output must parse");
    }

    /// PROPERTY: two plans compiled from the same text render identical
    /// bytes for the same event and ambient state.
    #[test]
    fn property_compile_is_replay_stable(value in literal_json()) {
        let template = value.to_string();
        let event = any_event();
        let ambient = Ambient::new();

        let a = JsonEncoder::new(&template).unwrap()
            .encode_to_string(&event, &ambient).unwrap();
        let b = JsonEncoder::new(&template).unwrap()
            .encode_to_string(&event, &ambient).unwrap();
        prop_assert_eq!(a, b);
    }
}
