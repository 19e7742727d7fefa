use super::*;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn substitutes_bare_and_braced_placeholders() {
    let v = vars(&[("SERVER_HOSTNAME", "node3"), ("PRIMARY_DNS", "10.0.0.53")]);
    let out = substitute("hostname: $SERVER_HOSTNAME\ndns: ${PRIMARY_DNS}\n", &v).unwrap();
    assert_eq!(out, "hostname: node3\ndns: 10.0.0.53\n");
}

#[test]
fn braced_placeholder_can_abut_identifier_text() {
    let v = vars(&[("VLAN", "42")]);
    assert_eq!(substitute("vlan${VLAN}_tag", &v).unwrap(), "vlan42_tag");
}

#[test]
fn double_dollar_is_literal() {
    assert_eq!(substitute("cost: $$5", &HashMap::new()).unwrap(), "cost: $5");
}

#[test]
fn strict_mode_reports_missing_variable() {
    let err = substitute("proxy: ${PROXY_URL}", &HashMap::new()).unwrap_err();
    assert!(matches!(err, TemplateError::MissingVariable(ref name) if name == "PROXY_URL"));
}

#[test]
fn strict_mode_rejects_malformed_placeholder() {
    let err = substitute("password: $6$rounds", &HashMap::new()).unwrap_err();
    assert!(matches!(err, TemplateError::InvalidPlaceholder { offset: 10 }));
}

#[test]
fn safe_mode_keeps_unknown_and_malformed_placeholders() {
    let v = vars(&[("A", "1")]);
    let out = safe_substitute("$A ${B} $C $6$x ${", &v);
    assert_eq!(out, "1 ${B} $C $6$x ${");
}

#[test]
fn preset_uses_defaults_only_when_unset() {
    let env = |name: &str| match name {
        "SERVER_HOSTNAME" => Some("gpu-01".to_string()),
        "PRIMARY_DNS" => Some("1.1.1.1".to_string()),
        _ => None,
    };
    let v = UBUNTU_AUTOINSTALL.collect_vars(env);
    assert_eq!(v["SERVER_HOSTNAME"], "gpu-01");
    assert_eq!(v["SERVER_TIMEZONE"], "Europe/Paris");
    assert_eq!(v["PRIMARY_DNS"], "1.1.1.1");
    assert!(!v.contains_key("PROXY_URL"));
}

#[test]
fn generate_falls_back_to_safe_substitution() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("config.template.json");
    let output = dir.path().join("config.json");
    std::fs::write(&template, r#"{"name":"${SERVER_PROFILE_NAME}","serial":"${SERVER_SERIAL}"}"#)
        .unwrap();

    let generated = generate(&template, &output, &vars(&[("SERVER_PROFILE_NAME", "sp-1")])).unwrap();
    assert!(matches!(generated.fallback, Some(TemplateError::MissingVariable(_))));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        r#"{"name":"sp-1","serial":"${SERVER_SERIAL}"}"#
    );
}

#[test]
fn generate_reports_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate(
        &dir.path().join("nope.template"),
        &dir.path().join("out"),
        &HashMap::new(),
    )
    .unwrap_err();
    assert!(matches!(err, TemplateError::Read { .. }));
}
