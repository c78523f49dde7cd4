//! Network-shaped string rules: IP addresses, MAC, UUID, URL and host names.
//!
//! The `is_*` functions back the `filter_var` built-in; the constructors
//! return named [`Predicate`]s for use with `apply`.
//!
//! ```
//! use lean_validator::validators::net;
//! use lean_validator::Validator;
//! use serde_json::json;
//!
//! let mut v = Validator::make(json!({ "host": "192.168.0.1" }));
//! v.field("host").apply(net::ipv4(), vec![]).unwrap();
//! assert!(v.is_valid());
//! ```

use crate::rules::Predicate;
use regex::Regex;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;
use url::Url;
use uuid::Uuid;

pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// An IP address outside the private and reserved ranges
pub fn is_public_ip(s: &str) -> bool {
    match s.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => {
            !(ip.is_private()
                || ip.is_loopback()
                || ip.is_link_local()
                || ip.is_broadcast()
                || ip.is_documentation()
                || ip.is_unspecified()
                || ip.octets()[0] == 0
                || ip.octets()[0] >= 240)
        }
        Ok(IpAddr::V6(ip)) => {
            let first = ip.segments()[0];
            !(ip.is_loopback()
                || ip.is_unspecified()
                // unique local fc00::/7
                || (first & 0xfe00) == 0xfc00
                // link local fe80::/10
                || (first & 0xffc0) == 0xfe80
                // documentation 2001:db8::/32
                || (first == 0x2001 && ip.segments()[1] == 0x0db8))
        }
        Err(_) => false,
    }
}

/// Six hex pairs separated by `:` or `-`, or three hex quads separated by `.`
pub fn is_mac(s: &str) -> bool {
    static MAC: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = MAC.get_or_init(|| {
        Regex::new(
            r"^(?:[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){2})$",
        )
        .ok()
    });
    regex.as_ref().is_some_and(|regex| regex.is_match(s))
}

/// Hyphenated UUID, any case
pub fn is_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::parse_str(s).is_ok()
}

/// Absolute URL with a scheme and a host
pub fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

/// Host name: dot-separated labels of letters, digits and inner hyphens.
///
/// A single trailing dot is allowed.
pub fn is_domain(s: &str) -> bool {
    let name = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > 253 {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

fn string_rule(name: &str, check: fn(&str) -> bool) -> Predicate {
    Predicate::named(name, move |value: &Value| value.as_str().is_some_and(check))
}

pub fn ip() -> Predicate {
    string_rule("ip", is_ip)
}

pub fn ipv4() -> Predicate {
    string_rule("ipv4", is_ipv4)
}

pub fn ipv6() -> Predicate {
    string_rule("ipv6", is_ipv6)
}

pub fn public_ip() -> Predicate {
    string_rule("public_ip", is_public_ip)
}

pub fn mac() -> Predicate {
    string_rule("mac", is_mac)
}

pub fn uuid() -> Predicate {
    string_rule("uuid", is_uuid)
}

/// Shares its name with the standard `url` alias, so it resolves to it
pub fn url() -> Predicate {
    string_rule("url", is_url)
}

pub fn domain() -> Predicate {
    string_rule("domain", is_domain)
}
