use cloud_accounts::filter::{FilterExpression, FilterParseError};

#[test]
fn test_each_flag_selects_its_variant() {
    let cases = [
        ("SOC", FilterExpression::Simple("SOC".into())),
        ("-r ^AWS-SOC.*", FilterExpression::Regex("^AWS-SOC.*".into())),
        (
            "-or SOC, PROD, DEV",
            FilterExpression::Any(vec!["SOC".into(), "PROD".into(), "DEV".into()]),
        ),
        (
            "-and SOC, Production",
            FilterExpression::All(vec!["SOC".into(), "Production".into()]),
        ),
        ("", FilterExpression::None),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            FilterExpression::parse(raw).expect("valid filter"),
            expected,
            "filter {raw:?}"
        );
    }
}

#[test]
fn test_unknown_flags_are_named_in_error() {
    for (raw, flag) in [
        ("-regex ^AWS", "-regex"),
        ("-x foo", "-x"),
        ("-OR a, b", "-OR"),
        ("-r\t^AWS", "-r"),
        ("-", "-"),
    ] {
        let err = FilterExpression::parse(raw).expect_err("flag should be rejected");
        assert!(
            matches!(&err, FilterParseError::UnknownFlag(f) if f == flag),
            "expected unknown flag {flag} for {raw:?}, got {err:?}"
        );
        assert!(err.to_string().contains(flag));
    }
}

#[test]
fn test_regex_flag_does_not_degrade_to_simple_match() {
    let result = FilterExpression::parse("-regex SOC");
    assert!(
        result.is_err(),
        "-regex must be an unknown flag, not a keyword"
    );
}

#[test]
fn test_keyword_lists_must_not_be_empty() {
    for raw in ["-or ,", "-and  , ,  ", "-or", "-and"] {
        assert!(
            matches!(
                FilterExpression::parse(raw),
                Err(FilterParseError::MissingKeywords(_))
            ),
            "{raw:?} should need keywords"
        );
    }
}

#[test]
fn test_parse_is_deterministic() {
    for raw in ["SOC", " -r a|b ", "-or x,y", "-and  p , q ", "   "] {
        let first = FilterExpression::parse(raw).expect("valid filter");
        let second = FilterExpression::parse(raw).expect("valid filter");
        assert_eq!(first, second);
    }
}

#[test]
fn test_keyword_may_contain_inner_dashes_and_spaces() {
    assert_eq!(
        FilterExpression::parse("SOC -r prod").unwrap(),
        FilterExpression::Simple("SOC -r prod".into())
    );
}
