//! Connection URI decomposition
//!
//! [`ParsedUri`] is the narrow model the converter and the splitter work on.
//! The [`authority`] scanner finds the raw host list. Host and port text is
//! taken from the input as written; the `url` crate validates every entry and
//! decodes the path and query.

pub mod authority;

use crate::core::{UrlError, UrlResult};
use percent_encoding::percent_decode_str;
use tracing::trace;
use url::Url;

pub use authority::{HostListScanner, RawUri};

/// One entry of the host list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    /// Hostname or IP address as written, IPv6 without brackets
    pub host: String,
    /// Port digits as written
    pub port: Option<String>,
}

impl HostSpec {
    /// Split a raw `host[:port]` or `[ipv6[%25zone]][:port]` entry and validate it.
    fn from_entry(raw: &RawUri<'_>, entry: &str) -> UrlResult<Self> {
        let (host, port, checked) = match entry.strip_prefix('[') {
            Some(bracketed) => {
                let (inner, after) = bracketed
                    .split_once(']')
                    .ok_or_else(|| UrlError::malformed("missing ']' in host"))?;
                let port = match after {
                    "" => None,
                    _ => Some(after.strip_prefix(':').ok_or_else(|| {
                        UrlError::malformed(format!("unexpected {:?} after ']'", after))
                    })?),
                };

                // The zone identifier is not an address; `url` only sees the address.
                let host = match inner.split_once("%25") {
                    Some((_, "")) => return Err(UrlError::malformed("empty IPv6 zone")),
                    Some((addr, zone)) => format!("{}%{}", addr, decode_component(zone)?),
                    None => inner.to_string(),
                };
                let addr = inner.split_once("%25").map_or(inner, |(addr, _)| addr);
                (host, port, format!("[{}]{}", addr, after))
            }
            None => {
                let (host, port) = match entry.split_once(':') {
                    Some((host, port)) => (host, Some(port)),
                    None => (entry, None),
                };
                (decode_component(host)?, port, entry.to_string())
            }
        };

        Url::parse(&raw.validation_uri(&checked))?;

        Ok(Self {
            host,
            port: port.filter(|p| !p.is_empty()).map(str::to_string),
        })
    }
}

/// Percent-decoded `user[:password]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub password: Option<String>,
}

impl UserInfo {
    fn decode(raw: &str) -> UrlResult<Self> {
        if let Some(bad) = raw.chars().find(|c| !is_userinfo_char(*c)) {
            return Err(UrlError::malformed(format!(
                "invalid character {:?} in userinfo",
                bad
            )));
        }

        let (user, password) = match raw.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (raw, None),
        };

        Ok(Self {
            username: decode_component(user)?,
            password: password.map(decode_component).transpose()?,
        })
    }
}

/// unreserved / sub-delims / ":" / "%" / "@"; the last `@` already ended the userinfo
fn is_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ','
                | ';' | '=' | ':' | '%' | '@'
        )
}

/// A URI broken into the parts a PostgreSQL connection cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUri {
    pub scheme: String,
    pub user_info: Option<UserInfo>,
    pub hosts: Vec<HostSpec>,
    /// Decoded path, leading `/` included; empty for opaque URIs like `postgres:db`
    pub path: String,
    /// Form-decoded query pairs in the order they were written
    pub query: Vec<(String, String)>,
}

impl ParsedUri {
    pub fn parse(input: &str) -> UrlResult<Self> {
        let raw = RawUri::scan(input)?;
        Self::from_raw(&raw)
    }

    /// Decode a scanned URI. The scheme is carried through unchecked.
    pub fn from_raw(raw: &RawUri<'_>) -> UrlResult<Self> {
        let user_info = raw.userinfo.map(UserInfo::decode).transpose()?;

        let hosts = raw
            .host_entries()?
            .into_iter()
            .map(|entry| HostSpec::from_entry(raw, entry))
            .collect::<UrlResult<Vec<_>>>()?;

        let base = Url::parse(&raw.validation_uri(""))?;
        let path = if base.cannot_be_a_base() {
            String::new()
        } else {
            percent_decode_str(base.path()).decode_utf8()?.into_owned()
        };
        let query = base
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        trace!(
            scheme = raw.scheme,
            hosts = hosts.len(),
            has_userinfo = user_info.is_some(),
            "decomposed connection URI"
        );

        Ok(Self {
            scheme: raw.scheme.to_string(),
            user_info,
            hosts,
            path,
            query,
        })
    }

    /// The path without a single leading `/`
    pub fn database(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }

    pub fn username(&self) -> Option<&str> {
        self.user_info.as_ref().map(|info| info.username.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.user_info.as_ref().and_then(|info| info.password.as_deref())
    }
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape.
fn decode_component(raw: &str) -> UrlResult<String> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(UrlError::malformed(format!(
                "invalid percent escape {:?}",
                String::from_utf8_lossy(&bytes[i..bytes.len().min(i + 3)])
            )));
        }
    }

    Ok(percent_decode_str(raw).decode_utf8()?.into_owned())
}
