//! Named format filters over string values

use super::email::is_email;
use super::net;
use super::numeric::{is_float_str, is_int_str};
use super::required_str;
use crate::error::{ValidatorError, ValidatorResult};
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A string format recognised by the `filter_var` built-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Email,
    Float,
    Int,
    Url,
    Ip,
    Ipv4,
    Ipv6,
    Mac,
    Domain,
    /// `1/0`, `true/false`, `on/off`, `yes/no`, any case
    Bool,
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Email => "email",
            Filter::Float => "float",
            Filter::Int => "int",
            Filter::Url => "url",
            Filter::Ip => "ip",
            Filter::Ipv4 => "ipv4",
            Filter::Ipv6 => "ipv6",
            Filter::Mac => "mac",
            Filter::Domain => "domain",
            Filter::Bool => "bool",
        }
    }

    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Filter::Email => is_email(text),
            Filter::Float => is_float_str(text),
            Filter::Int => is_int_str(text),
            Filter::Url => net::is_url(text),
            Filter::Ip => net::is_ip(text),
            Filter::Ipv4 => net::is_ipv4(text),
            Filter::Ipv6 => net::is_ipv6(text),
            Filter::Mac => net::is_mac(text),
            Filter::Domain => net::is_domain(text),
            Filter::Bool => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes" | "0" | "false" | "off" | "no"
            ),
        }
    }
}

impl FromStr for Filter {
    type Err = ValidatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let filter = match name {
            "email" => Filter::Email,
            "float" => Filter::Float,
            "int" => Filter::Int,
            "url" => Filter::Url,
            "ip" => Filter::Ip,
            "ipv4" => Filter::Ipv4,
            "ipv6" => Filter::Ipv6,
            "mac" => Filter::Mac,
            "domain" => Filter::Domain,
            "bool" => Filter::Bool,
            other => {
                return Err(ValidatorError::invalid_argument(
                    "filter_var",
                    format!("unknown filter '{}'", other),
                ))
            }
        };
        Ok(filter)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks that the value is a string accepted by a [`Filter`]
#[derive(Debug, Clone, Copy)]
pub struct FilterValidator {
    pub filter: Filter,
}

impl FilterValidator {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

impl Rule for FilterValidator {
    fn check(&self, value: &Value) -> Verdict {
        value
            .as_str()
            .is_some_and(|text| self.filter.accepts(text))
            .into()
    }
}

impl FromRuleArgs for FilterValidator {
    const ARITY: usize = 1;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self::new(required_str("filter_var", args, 0)?.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_only_accept_strings() {
        let float = FilterValidator::new(Filter::Float);
        assert_eq!(float.check(&json!("1.23")), Verdict::Pass);
        assert_eq!(float.check(&json!(1.23)), Verdict::Fail);
        assert_eq!(float.check(&json!("abc")), Verdict::Fail);

        let email = FilterValidator::new(Filter::Email);
        assert_eq!(email.check(&json!("test@example.com")), Verdict::Pass);
        assert_eq!(email.check(&json!("invalid-email")), Verdict::Fail);
    }

    #[test]
    fn test_bool_filter() {
        assert!(Filter::Bool.accepts("yes"));
        assert!(Filter::Bool.accepts("OFF"));
        assert!(Filter::Bool.accepts("0"));
        assert!(!Filter::Bool.accepts("maybe"));
    }

    #[test]
    fn test_filter_from_args() {
        let validator = FilterValidator::from_args(&[json!("ipv6")]).unwrap();
        assert_eq!(validator.filter, Filter::Ipv6);

        let err = FilterValidator::from_args(&[json!("phone")]).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidArgument { .. }));
    }
}
