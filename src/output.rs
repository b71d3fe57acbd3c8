use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

fn parse_flag(raw: &str) -> bool {
    raw == "1" || raw.eq_ignore_ascii_case("true")
}

fn quiet_from_env() -> Option<bool> {
    std::env::var("QUOTEHUB_QUIET").ok().map(|v| parse_flag(&v))
}

/// Fix quiet mode for the process: `QUOTEHUB_QUIET`, then the config's
/// `quiet`, then off. Later calls keep the first resolution.
pub fn init_quiet(configured: Option<bool>) -> bool {
    *QUIET.get_or_init(|| quiet_from_env().or(configured).unwrap_or(false))
}

/// Whether human-oriented stdout banners are suppressed
pub fn is_quiet() -> bool {
    init_quiet(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }
}
