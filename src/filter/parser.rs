use super::error::FilterParseError;
use std::fmt;
use std::str::FromStr;

const REGEX_FLAG: &str = "-r";
const ANY_FLAG: &str = "-or";
const ALL_FLAG: &str = "-and";

/// A parsed account-name filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterExpression {
    /// No filter, every account passes
    #[default]
    None,
    /// Substring match on the account name
    Simple(String),
    /// Regex search on the account name
    Regex(String),
    /// Account name contains at least one keyword
    Any(Vec<String>),
    /// Account name contains every keyword
    All(Vec<String>),
}

impl FilterExpression {
    /// Parse an optional raw filter argument.
    ///
    /// Absent and blank input both mean "no filter".
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, FilterParseError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Ok(FilterExpression::None),
        }
    }

    /// Parse a filter string.
    ///
    /// Flags are recognized by exact prefix including the trailing space, so
    /// `-regex foo` is an unknown flag rather than a regex.
    pub fn parse(raw: &str) -> Result<Self, FilterParseError> {
        let s = raw.trim();
        if s.is_empty() {
            return Ok(FilterExpression::None);
        }

        if let Some(rest) = strip_flag(s, REGEX_FLAG) {
            let pattern = rest.trim();
            if pattern.is_empty() {
                return Err(FilterParseError::MissingPattern);
            }
            return Ok(FilterExpression::Regex(pattern.to_string()));
        }

        if let Some(rest) = strip_flag(s, ANY_FLAG) {
            return split_keywords(rest, ANY_FLAG).map(FilterExpression::Any);
        }

        if let Some(rest) = strip_flag(s, ALL_FLAG) {
            return split_keywords(rest, ALL_FLAG).map(FilterExpression::All);
        }

        if s.starts_with('-') {
            return Err(match s {
                REGEX_FLAG => FilterParseError::MissingPattern,
                ANY_FLAG => FilterParseError::MissingKeywords(ANY_FLAG),
                ALL_FLAG => FilterParseError::MissingKeywords(ALL_FLAG),
                _ => {
                    let flag = s.split_whitespace().next().unwrap_or(s);
                    FilterParseError::UnknownFlag(flag.to_string())
                }
            });
        }

        Ok(FilterExpression::Simple(s.to_string()))
    }

    /// Short name of the matching strategy, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FilterExpression::None => "none",
            FilterExpression::Simple(_) => "simple",
            FilterExpression::Regex(_) => "regex",
            FilterExpression::Any(_) => "or",
            FilterExpression::All(_) => "and",
        }
    }
}

impl FromStr for FilterExpression {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::None => Ok(()),
            FilterExpression::Simple(keyword) => write!(f, "{keyword}"),
            FilterExpression::Regex(pattern) => write!(f, "{REGEX_FLAG} {pattern}"),
            FilterExpression::Any(keywords) => write!(f, "{ANY_FLAG} {}", keywords.join(", ")),
            FilterExpression::All(keywords) => write!(f, "{ALL_FLAG} {}", keywords.join(", ")),
        }
    }
}

/// Strip `flag` followed by a single space from the front of `s`
fn strip_flag<'a>(s: &'a str, flag: &str) -> Option<&'a str> {
    s.strip_prefix(flag)?.strip_prefix(' ')
}

fn split_keywords(rest: &str, flag: &'static str) -> Result<Vec<String>, FilterParseError> {
    let keywords: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(FilterParseError::MissingKeywords(flag));
    }
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(FilterExpression::parse("").unwrap(), FilterExpression::None);
        assert_eq!(
            FilterExpression::parse("   ").unwrap(),
            FilterExpression::None
        );
        assert_eq!(
            FilterExpression::parse_opt(None).unwrap(),
            FilterExpression::None
        );
    }

    #[test]
    fn test_parse_simple_keyword() {
        let expr = FilterExpression::parse("  SOC prod ").unwrap();
        assert_eq!(expr, FilterExpression::Simple("SOC prod".to_string()));
    }

    #[test]
    fn test_parse_regex() {
        let expr = FilterExpression::parse("-r ^AWS-SOC.*").unwrap();
        assert_eq!(expr, FilterExpression::Regex("^AWS-SOC.*".to_string()));
    }

    #[test]
    fn test_parse_or_and_keywords() {
        let expr = FilterExpression::parse("-or SOC, PROD,, DEV ").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Any(vec!["SOC".into(), "PROD".into(), "DEV".into()])
        );

        let expr = FilterExpression::parse("-and SOC, Production").unwrap();
        assert_eq!(
            expr,
            FilterExpression::All(vec!["SOC".into(), "Production".into()])
        );
    }

    #[test]
    fn test_regex_flag_needs_exact_prefix() {
        let err = FilterExpression::parse("-regex ^AWS").unwrap_err();
        assert!(matches!(err, FilterParseError::UnknownFlag(ref f) if f == "-regex"));
        assert!(err.to_string().contains("-regex"));
    }

    #[test]
    fn test_bare_flags_report_missing_argument() {
        assert!(matches!(
            FilterExpression::parse("-r").unwrap_err(),
            FilterParseError::MissingPattern
        ));
        assert!(matches!(
            FilterExpression::parse("-or").unwrap_err(),
            FilterParseError::MissingKeywords("-or")
        ));
        assert!(matches!(
            FilterExpression::parse("-and , ,").unwrap_err(),
            FilterParseError::MissingKeywords("-and")
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["SOC", "-r ^a.*b$", "-or a, b", "-and x, y, z"] {
            let expr = FilterExpression::parse(raw).unwrap();
            assert_eq!(FilterExpression::parse(&expr.to_string()).unwrap(), expr);
        }
    }
}
