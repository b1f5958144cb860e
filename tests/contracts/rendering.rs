//! Rendering contracts: one well-formed JSON value per record, stable
//! output across replays, and the documented omission rules.

use std::collections::BTreeMap;

use logplate::{Ambient, JsonEncoder, Level, LogEvent};

fn event() -> LogEvent {
    let mut event = LogEvent::new(Level::Info, "hello");
    event.logger = "app.worker".to_string();
    event.thread = "main".to_string();
    event.timestamp_ms = Some(1_700_000_000_000);
    event
}

fn mdc(entries: &[(&str, &str)]) -> Ambient {
    let mut ambient = Ambient::new();
    ambient.mdc = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<BTreeMap<_, _>>();
    ambient
}

/// CONTRACT: every rendered record is exactly one complete JSON value
/// followed by a newline, even when fields are omitted.
#[test]
fn contract_output_is_one_wellformed_json_line() {
    let templates = [
        r##"{"level": "#{EVENT:level}"}"##,
        r##"{"gone": "#{MDC:missing}", "also": "#{EVENT:caller}"}"##,
        r##"{"a": 1, "nested": {"user": "#{MDC:missing}"}, "b": [1, 2]}"##,
        r##"{"event": "#{EVENT}", "mdc": "#{MDC}"}"##,
        r##"[1, {"level": "#{EVENT:level}"}, 2]"##,
    ];

    for template in templates {
        let encoder = JsonEncoder::new(template).unwrap();
        let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();

        assert!(line.ends_with('\n'), "missing newline for {template}");
        let body = &line[..line.len() - 1];
        assert!(!body.contains('\n'), "record spans lines for {template}");
        serde_json::from_str::<serde_json::Value>(body)
            .unwrap_or_else(|e| panic!("unparseable output for {template}: {e}\n{body}"));
    }
}

/// CONTRACT: the composite-string rule — the first recognized placeholder
/// replaces the whole string value; surrounding literal text is discarded.
/// This is preserved source behavior, not interpolation.
#[test]
fn contract_composite_string_resolves_to_single_value() {
    let encoder = JsonEncoder::new(
        r##"{"level":"#{EVENT:level}","msg":"This is my message: #{EVENT:message}"}"##,
    )
    .unwrap();

    let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();
    assert_eq!(line, "{\"level\":\"INFO\",\"msg\":\"hello\"}\n");
}

/// CONTRACT: compiling the same template twice renders byte-identical
/// output for the same event and ambient state.
#[test]
fn contract_compilation_is_idempotent() {
    let template =
        r##"{"level": "#{EVENT:level}", "mdc": "#{MDC}", "v": 1.50, "home": "#{ENVIRONMENT:HOME}"}"##;
    let ambient = mdc(&[("user", "yuri")]);

    let a = JsonEncoder::new(template)
        .unwrap()
        .encode_to_string(&event(), &ambient)
        .unwrap();
    let b = JsonEncoder::new(template)
        .unwrap()
        .encode_to_string(&event(), &ambient)
        .unwrap();

    assert_eq!(a, b);
}

/// CONTRACT: a literal-only template reproduces its structure — the output
/// parses back equal to the template itself.
#[test]
fn contract_literal_template_round_trips() {
    let template = r#"{"service": "api", "port": 8080, "debug": false, "tags": ["a", "b"], "meta": {"retries": null, "ratio": 0.25}}"#;
    let encoder = JsonEncoder::new(template).unwrap();
    let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();

    let rendered: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    let original: serde_json::Value = serde_json::from_str(template).unwrap();
    assert_eq!(rendered, original);
}

/// CONTRACT: a missing MDC key omits the member entirely — no `""`, no
/// dangling comma on either side.
#[test]
fn contract_missing_mdc_key_is_omitted() {
    let encoder = JsonEncoder::new(
        r##"{"before": 1, "user": "#{MDC:missing}", "after": 2}"##,
    )
    .unwrap();
    let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();
    assert_eq!(line, "{\"before\":1,\"after\":2}\n");
}

/// CONTRACT (documented policy): an empty MDC under `#{MDC}` renders `{}`,
/// it does not drop the member.
#[test]
fn contract_empty_mdc_renders_empty_object() {
    let encoder = JsonEncoder::new(r##"{"mdc": "#{MDC}"}"##).unwrap();
    let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();
    assert_eq!(line, "{\"mdc\":{}}\n");
}

/// CONTRACT: empty and blank templates produce no output line at all.
#[test]
fn contract_empty_template_produces_no_line() {
    for template in ["", "   ", "\n\t"] {
        let encoder = JsonEncoder::new(template).unwrap();
        let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();
        assert_eq!(line, "", "expected no output for blank template");
    }
}

/// CONTRACT: timestamp renders as a JSON number, never a string.
#[test]
fn contract_timestamp_is_a_number() {
    let encoder = JsonEncoder::new(r##"{"ts": "#{EVENT:timestamp}"}"##).unwrap();
    let line = encoder.encode_to_string(&event(), &Ambient::new()).unwrap();
    assert_eq!(line, "{\"ts\":1700000000000}\n");
}

/// CONTRACT: values needing escaping never break the output framing.
#[test]
fn contract_escaped_values_stay_wellformed() {
    let mut event = event();
    event.message = "line1\nline2 \"quoted\" \\ tab\t".to_string();
    let encoder = JsonEncoder::new(r##"{"msg": "#{EVENT:message}"}"##).unwrap();
    let line = encoder.encode_to_string(&event, &Ambient::new()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(
        parsed["msg"].as_str().unwrap(),
        "line1\nline2 \"quoted\" \\ tab\t"
    );
}
