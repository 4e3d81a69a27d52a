//! User-agent parsing seam.
//!
//! browserprint does not parse user-agent strings itself. It asks a
//! [`UserAgentParser`] for five fields and hashes whatever comes back. The
//! default parser, [`Woothee`], wraps the [`woothee`] crate; any
//! `Fn(&str) -> UserAgent` closure works too, which is handy in tests or when
//! an application already carries its own detector.

use woothee::parser::Parser;

/// Marker woothee puts in anything it could not classify, either alone or
/// inside a composite label such as `Windows UNKNOWN Ver`.
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Family reported for unknown browsers, operating systems and devices.
pub const OTHER: &str = "Other";

/// Structured view of a `User-Agent` header.
///
/// The default value is what an empty or unrecognised string parses to:
/// `Other` families and empty versions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAgent {
    pub browser_family: String,
    pub browser_version: String,
    pub os_family: String,
    pub os_version: String,
    pub device_family: String,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            browser_family: OTHER.to_owned(),
            browser_version: String::new(),
            os_family: OTHER.to_owned(),
            os_version: String::new(),
            device_family: OTHER.to_owned(),
        }
    }
}

/// Turns a raw `User-Agent` string into a [`UserAgent`].
///
/// Implementations must be total: empty and malformed strings yield a value
/// (usually [`UserAgent::default`]), never a panic.
pub trait UserAgentParser: Send + Sync + 'static {
    fn parse(&self, user_agent: &str) -> UserAgent;
}

impl<F> UserAgentParser for F
where
    F: Fn(&str) -> UserAgent + Send + Sync + 'static,
{
    fn parse(&self, user_agent: &str) -> UserAgent {
        self(user_agent)
    }
}

/// [`UserAgentParser`] backed by the woothee rule set.
///
/// Woothee has no notion of a device model, so the device family is derived
/// from its category: `Spider` for crawlers, the category name for phones and
/// appliances, `Other` for desktops and anything unknown.
pub struct Woothee {
    parser: Parser,
}

impl Woothee {
    pub fn new() -> Self {
        Self { parser: Parser::new() }
    }
}

impl Default for Woothee {
    fn default() -> Self { Self::new() }
}

impl UserAgentParser for Woothee {
    fn parse(&self, user_agent: &str) -> UserAgent {
        let Some(result) = self.parser.parse(user_agent) else {
            return UserAgent::default();
        };

        UserAgent {
            browser_family: family(result.name),
            browser_version: version(result.version),
            os_family: family(result.os),
            os_version: version(&result.os_version),
            device_family: device(result.category),
        }
    }
}

fn family(value: &str) -> String {
    if value.is_empty() || value.contains(WOOTHEE_UNKNOWN) {
        return OTHER.to_owned();
    }
    value.to_owned()
}

fn version(value: &str) -> String {
    if value.contains(WOOTHEE_UNKNOWN) {
        return String::new();
    }
    value.to_owned()
}

fn device(category: &str) -> String {
    match category {
        "crawler" => "Spider".to_owned(),
        "smartphone" | "mobilephone" | "appliance" => category.to_owned(),
        _ => OTHER.to_owned(),
    }
}
