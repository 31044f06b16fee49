/// Parses a provider duration token of the shape `PT<hours>H<minutes>M` into
/// total minutes. Either component may be absent (`PT2H`, `PT45M`). A token
/// that does not match parses to 0; the filter pipeline must never hard-fail
/// a render over a malformed duration.
pub fn parse_duration_minutes(token: &str) -> u32 {
    match try_parse(token) {
        Some(minutes) => minutes,
        None => {
            tracing::debug!(token, "unparseable duration token, treating as 0");
            0
        }
    }
}

fn try_parse(token: &str) -> Option<u32> {
    let rest = token.strip_prefix("PT")?;
    if rest.is_empty() {
        return None;
    }
    let (hours, rest) = match rest.split_once('H') {
        Some((h, r)) => (h.parse::<u32>().ok()?, r),
        None => (0, rest),
    };
    let minutes = match rest {
        "" => 0,
        m => m.strip_suffix('M')?.parse::<u32>().ok()?,
    };
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(parse_duration_minutes("PT2H30M"), 150);
        assert_eq!(parse_duration_minutes("PT0H5M"), 5);
        assert_eq!(parse_duration_minutes("PT14H0M"), 840);
    }

    #[test]
    fn test_single_component() {
        assert_eq!(parse_duration_minutes("PT2H"), 120);
        assert_eq!(parse_duration_minutes("PT45M"), 45);
    }

    #[test]
    fn test_garbage_falls_back_to_zero() {
        assert_eq!(parse_duration_minutes("garbage"), 0);
        assert_eq!(parse_duration_minutes(""), 0);
        assert_eq!(parse_duration_minutes("PT"), 0);
        assert_eq!(parse_duration_minutes("PTxHyM"), 0);
        assert_eq!(parse_duration_minutes("2H30M"), 0);
    }
}
