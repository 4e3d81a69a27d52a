//! Request fingerprints.
//!
//! A fingerprint is the SHA-256 of a canonical field string built from the
//! client address, the raw user agent, five parsed user-agent fields and the
//! `Accept-Language` header:
//!
//! ```text
//! ip:<addr>|ua:<ua>|browser:<b>|version:<bv>|os:<os>|os_version:<osv>|device:<d>|accept_lang:<al>
//! ```
//!
//! Field order is fixed and every key is always emitted, with an empty value
//! when the request does not carry it. The digest is rendered as 64 lowercase
//! hex characters.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::agent::UserAgentParser;
use crate::error::Error;
use crate::meta::{REMOTE_ADDR, RequestMeta};
use crate::request::Request;

/// Length of a hex-encoded SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 64;

/// The fields that feed a fingerprint, in hashing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub ip: String,
    pub ua: String,
    pub browser: String,
    pub version: String,
    pub os: String,
    pub os_version: String,
    pub device: String,
    pub accept_lang: String,
}

impl FieldSet {
    /// Extracts the field set from `req`, running the user agent through
    /// `parser`. Missing metadata becomes an empty string.
    ///
    /// Headers are looked up by their lowercase names.
    pub fn collect<R, P>(req: &R, parser: &P) -> Self
    where
        R: RequestMeta + ?Sized,
        P: UserAgentParser + ?Sized,
    {
        let ua = req.meta_or_default("user-agent");
        let agent = parser.parse(&ua);

        Self {
            ip: req.meta_or_default(REMOTE_ADDR),
            ua,
            browser: agent.browser_family,
            version: agent.browser_version,
            os: agent.os_family,
            os_version: agent.os_version,
            device: agent.device_family,
            accept_lang: req.meta_or_default("accept-language"),
        }
    }

    /// `(key, value)` pairs in hashing order.
    pub fn pairs(&self) -> [(&'static str, &str); 8] {
        [
            ("ip", self.ip.as_str()),
            ("ua", self.ua.as_str()),
            ("browser", self.browser.as_str()),
            ("version", self.version.as_str()),
            ("os", self.os.as_str()),
            ("os_version", self.os_version.as_str()),
            ("device", self.device.as_str()),
            ("accept_lang", self.accept_lang.as_str()),
        ]
    }

    /// The string that gets hashed: `key:value` pairs joined by `|`.
    pub fn canonical(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// A browser fingerprint: 64 lowercase hex characters.
///
/// Attached to every request by
/// [`BrowserFingerprint`](crate::middleware::BrowserFingerprint); read it back
/// with [`Fingerprint::from_request`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Attribute name the fingerprint is published under.
    pub const ATTRIBUTE: &'static str = "browser_fingerprint";

    /// Hashes the canonical form of `fields`.
    pub fn from_fields(fields: &FieldSet) -> Self {
        let digest = Sha256::digest(fields.canonical().as_bytes());
        Self(hex::encode(digest))
    }

    /// The fingerprint attached to `req`, if the middleware has run.
    pub fn from_request(req: &Request) -> Option<&Self> {
        req.extensions().get::<Self>()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accepts only well-formed values: exactly 64 lowercase hex characters.
impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == FINGERPRINT_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(Error::Fingerprint(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::agent::UserAgent;

    fn defaults(_: &str) -> UserAgent {
        UserAgent::default()
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    fn is_lower_hex(s: &str) -> bool {
        s.len() == FINGERPRINT_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    #[test]
    fn canonical_string_keeps_field_order() {
        let req = env(&[(REMOTE_ADDR, "127.0.0.1"), ("user-agent", "TestAgent/1.0")]);
        let fields = FieldSet::collect(&req, &defaults);

        assert_eq!(
            fields.canonical(),
            "ip:127.0.0.1|ua:TestAgent/1.0|browser:Other|version:|os:Other\
             |os_version:|device:Other|accept_lang:",
        );
    }

    #[test]
    fn known_digest() {
        let req = env(&[(REMOTE_ADDR, "127.0.0.1"), ("user-agent", "TestAgent/1.0")]);
        let fp = Fingerprint::from_fields(&FieldSet::collect(&req, &defaults));

        assert_eq!(
            fp.as_str(),
            "e178c0b26fe6e3052fe2379d9c0845c5b8f4d9254ccd78f96a0110e1982b1b16",
        );
    }

    #[test]
    fn empty_request_still_fingerprints() {
        let fields = FieldSet::collect(&env(&[]), &defaults);
        let fp = Fingerprint::from_fields(&fields);

        assert_eq!(fields.ip, "");
        assert_eq!(fields.ua, "");
        assert_eq!(fields.accept_lang, "");
        assert_eq!(
            fp.as_str(),
            "3f0fb5a0f3eb1dd188e1bca2559c665c4492dc57be404bb0616e95790fbae721",
        );
    }

    #[test]
    fn every_field_changes_the_digest() {
        let base = FieldSet::collect(
            &env(&[
                (REMOTE_ADDR, "10.1.2.3"),
                ("user-agent", "AgentA/1.0"),
                ("accept-language", "en-US"),
            ]),
            &defaults,
        );
        let base_fp = Fingerprint::from_fields(&base);

        let tweaks: [fn(&mut FieldSet); 8] = [
            |f| f.ip.push('0'),
            |f| f.ua.push('0'),
            |f| f.browser.push('0'),
            |f| f.version.push('0'),
            |f| f.os.push('0'),
            |f| f.os_version.push('0'),
            |f| f.device.push('0'),
            |f| f.accept_lang.push('0'),
        ];
        for tweak in tweaks {
            let mut changed = base.clone();
            tweak(&mut changed);
            assert_ne!(Fingerprint::from_fields(&changed), base_fp, "{changed:?}");
        }
    }

    #[test]
    fn parser_sees_the_raw_user_agent() {
        let echo = |ua: &str| UserAgent {
            browser_family: format!("seen:{ua}"),
            ..UserAgent::default()
        };
        let fields = FieldSet::collect(&env(&[("user-agent", "X/2")]), &echo);
        assert_eq!(fields.browser, "seen:X/2");
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let fp = Fingerprint::from_fields(&FieldSet::default());
        assert!(is_lower_hex(fp.as_str()));
    }

    #[test]
    fn parse_rejects_malformed_values() {
        let good = "e178c0b26fe6e3052fe2379d9c0845c5b8f4d9254ccd78f96a0110e1982b1b16";
        assert_eq!(good.parse::<Fingerprint>().unwrap().as_str(), good);

        assert!(good.to_uppercase().parse::<Fingerprint>().is_err());
        assert!(good[..63].parse::<Fingerprint>().is_err());
        assert!(format!("{good}0").parse::<Fingerprint>().is_err());
        assert!("z".repeat(64).parse::<Fingerprint>().is_err());
    }
}
