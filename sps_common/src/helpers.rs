use std::env;

/// Reads a boolean flag from the environment.
///
/// The usual spellings are accepted in either case ("1"/"true"/"yes"/"on" and their negations). An unset
/// variable, or an unrecognized value, yields the default.
pub fn env_flag(name: &str, default: bool) -> bool {
    parse_flag(env::var(name).ok().as_deref(), default)
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if ["1", "true", "yes", "on"].contains(&v.as_str()) => true,
        Some(v) if ["0", "false", "no", "off"].contains(&v.as_str()) => false,
        _ => default,
    }
}

#[cfg(test)]
mod test {
    use super::parse_flag;

    #[test]
    fn boolean_flags() {
        assert!(parse_flag(Some("1"), false));
        assert!(parse_flag(Some(" Yes "), false));
        assert!(!parse_flag(Some("off"), true));
        assert!(parse_flag(None, true));
        assert!(!parse_flag(Some("banana"), false));
        assert!(parse_flag(Some("banana"), true));
    }
}
