use super::error::FilterParseError;
use super::parser::FilterExpression;
use crate::account::AccountRecord;
use regex::{Regex, RegexBuilder};

/// A filter expression prepared for matching.
///
/// Keywords are case-folded and regexes compiled once, up front, so that an
/// invalid pattern is reported before any account is fetched.
#[derive(Debug, Clone)]
pub struct AccountMatcher {
    rule: MatchRule,
    case_sensitive: bool,
}

#[derive(Debug, Clone)]
enum MatchRule {
    Everything,
    Contains(String),
    Pattern(Regex),
    AnyOf(Vec<String>),
    AllOf(Vec<String>),
}

impl AccountMatcher {
    pub fn new(expr: &FilterExpression, case_sensitive: bool) -> Result<Self, FilterParseError> {
        let fold = |kw: &String| fold_case(kw, case_sensitive);
        let rule = match expr {
            FilterExpression::None => MatchRule::Everything,
            FilterExpression::Simple(keyword) => MatchRule::Contains(fold(keyword)),
            FilterExpression::Regex(pattern) => MatchRule::Pattern(
                RegexBuilder::new(pattern)
                    .case_insensitive(!case_sensitive)
                    .build()?,
            ),
            FilterExpression::Any(keywords) => {
                MatchRule::AnyOf(keywords.iter().map(fold).collect())
            }
            FilterExpression::All(keywords) => {
                MatchRule::AllOf(keywords.iter().map(fold).collect())
            }
        };

        Ok(Self {
            rule,
            case_sensitive,
        })
    }

    /// Check a single account against the filter
    pub fn matches(&self, account: &AccountRecord) -> bool {
        let raw_name = account.account_name();
        let raw_name = raw_name.as_deref().unwrap_or("");

        match &self.rule {
            MatchRule::Everything => true,
            MatchRule::Pattern(re) => re.is_match(raw_name),
            MatchRule::Contains(keyword) => {
                fold_case(raw_name, self.case_sensitive).contains(keyword.as_str())
            }
            MatchRule::AnyOf(keywords) => {
                let name = fold_case(raw_name, self.case_sensitive);
                keywords.iter().any(|kw| name.contains(kw.as_str()))
            }
            MatchRule::AllOf(keywords) => {
                let name = fold_case(raw_name, self.case_sensitive);
                keywords.iter().all(|kw| name.contains(kw.as_str()))
            }
        }
    }

    /// Keep the accounts that pass the filter, in their original order
    pub fn apply<'a>(&self, accounts: &'a [AccountRecord]) -> Vec<&'a AccountRecord> {
        accounts.iter().filter(|acc| self.matches(acc)).collect()
    }
}

/// Filter `accounts` by `expr` in one step
pub fn apply<'a>(
    expr: &FilterExpression,
    accounts: &'a [AccountRecord],
    case_sensitive: bool,
) -> Result<Vec<&'a AccountRecord>, FilterParseError> {
    Ok(AccountMatcher::new(expr, case_sensitive)?.apply(accounts))
}

fn fold_case(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> AccountRecord {
        AccountRecord::from_value(json!({ "account_name": name })).unwrap()
    }

    #[test]
    fn test_none_keeps_everything() {
        let accounts = vec![named("a"), AccountRecord::default()];
        let kept = apply(&FilterExpression::None, &accounts, false).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_missing_name_never_matches_keyword() {
        let matcher =
            AccountMatcher::new(&FilterExpression::Simple("soc".into()), false).unwrap();
        assert!(!matcher.matches(&AccountRecord::default()));
    }

    #[test]
    fn test_regex_uses_search_semantics() {
        let matcher = AccountMatcher::new(&FilterExpression::Regex("soc".into()), false).unwrap();
        assert!(matcher.matches(&named("aws-SOC-prod")));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = AccountMatcher::new(&FilterExpression::Regex("(unclosed".into()), false)
            .unwrap_err();
        assert!(matches!(err, FilterParseError::InvalidRegex(_)));
    }
}
