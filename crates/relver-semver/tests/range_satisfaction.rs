//! Integration tests for release gating: discover a version, bump it and
//! check it against a range

use relver_semver::{Bump, Builder, Error, ExpressionError, Semver, Version, VersionParser};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_default_version_against_ranges() {
    init_logger();

    let version = Semver::initial_version(None).unwrap();
    assert!(version.satisfies_str("*").unwrap());
    assert!(version.satisfies_str("^0.0").unwrap());
    assert!(version.satisfies_str("<1").unwrap());
    assert!(!version.satisfies_str(">=0.0.0.1").unwrap());
}

#[test]
fn test_next_release_gate() {
    init_logger();

    let current = Semver::initial_version(Some("1.4.2.0")).unwrap();
    let gate = Semver::parse_range("~1.4 | ^2").unwrap();

    let patch = current.increment(Bump::Build).unwrap();
    let minor = current.increment(Bump::Minor).unwrap();
    let major = current.increment(Bump::Major).unwrap();

    assert_eq!(patch.to_string(), "1.4.3.0");
    assert!(patch.satisfies(&gate));
    assert!(!minor.satisfies(&gate));
    assert!(major.satisfies(&gate));

    assert_eq!(Bump::between(&current, &patch), Some(Bump::Build));
    assert_eq!(Bump::between(&current, &major), Some(Bump::Major));
}

#[test]
fn test_pre_release_lifecycle() {
    init_logger();

    let alpha = Version::parse("2.0.0.0").unwrap().increment_minor_with("alpha.1").unwrap();
    assert_eq!(alpha.to_string(), "2.1.0.0-alpha.1");

    let alpha2 = alpha.increment_pre_release_version().unwrap();
    assert_eq!(alpha2.to_string(), "2.1.0.0-alpha.2");

    let rc = alpha2.set_pre_release_version("rc.1").unwrap().set_build_metadata("ci.77").unwrap();
    assert_eq!(rc.to_string(), "2.1.0.0-rc.1+ci.77");
    assert!(alpha < alpha2 && alpha2 < rc);

    assert!(rc.satisfies_str(">=2.0.0.0 AND <2.1.0.0 |").is_err());
    assert!(rc.satisfies_str(">=2.0.0.0 AND <2.1.0.0").unwrap());
    assert!(!rc.satisfies_str("~2.1").unwrap());
}

#[test]
fn test_builder_matches_parser() {
    let built = Builder::new("3.0.1.2").pre_release_version("beta").build_metadata("exp.sha.5114f85").build().unwrap();
    let parsed = VersionParser::new().parse_valid("3.0.1.2-beta+exp.sha.5114f85").unwrap();
    assert_eq!(built, parsed);
    assert_eq!(built.cmp_with_build(&parsed), std::cmp::Ordering::Equal);
}

#[test]
fn test_errors_surface_through_facade() {
    match Semver::satisfies("1.2.3.4", ">=1.0 &") {
        Err(Error::Expression(ExpressionError::UnexpectedToken(e))) => assert_eq!(e.position(), 7),
        other => panic!("unexpected result {:?}", other),
    }

    let err = Semver::parse_version("1.2.3.4-+").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected character '+' at position 8, expecting [DIGIT, LETTER, HYPHEN]");
}

#[test]
fn test_release_candidates_sorted_for_selection() {
    let tags = ["1.0.0.0", "1.1.0.0-rc.2", "1.1.0.0-rc.10", "1.1.0.0", "0.9.0.0", "not-a-version"];
    let eligible = Semver::satisfied_by(&tags, ">=1.0").unwrap();
    let eligible: Vec<&str> = eligible.iter().map(String::as_str).collect();
    assert_eq!(Semver::rsort(&eligible), vec!["1.1.0.0", "1.1.0.0-rc.10", "1.1.0.0-rc.2", "1.0.0.0"]);
}
