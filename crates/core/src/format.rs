//! Format grammars for email and HTTP URL fields.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_URL_LEN: usize = 2083;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    ))
    .expect("email pattern is a valid regex")
});

/// Dot-atom local part, `@`, and a dotted LDH domain ending in an alphabetic TLD.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LEN {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => EMAIL.is_match(value),
        _ => false,
    }
}

/// Check an absolute `http`/`https` URL with a host. Returns the failure message on error.
pub fn check_http_url(value: &str) -> Result<(), &'static str> {
    if value.len() > MAX_URL_LEN {
        return Err("URL is too long");
    }

    let parsed = Url::parse(value).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => "invalid or missing URL scheme",
        url::ParseError::EmptyHost => "URL host invalid",
        _ => "invalid or malformed URL",
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("URL scheme not permitted");
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err("URL host invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for ok in ["miguel@hola.com", "first.last+tag@mail.example.org", "a@b.co"] {
            assert!(is_valid_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "miguel",
            "miguel@",
            "@hola.com",
            "miguel@hola",
            "miguel@@hola.com",
            "mi guel@hola.com",
            ".miguel@hola.com",
            "miguel@hola.c",
            "miguel@-hola.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn overlong_local_part_is_rejected() {
        let email = format!("{}@example.com", "a".repeat(65));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn http_urls() {
        assert!(check_http_url("https://www.platzi.com").is_ok());
        assert!(check_http_url("http://localhost:8080/path?q=1").is_ok());
        assert_eq!(check_http_url("www.platzi.com"), Err("invalid or missing URL scheme"));
        assert_eq!(check_http_url("ftp://files.example.com"), Err("URL scheme not permitted"));
        assert!(check_http_url("https://").is_err());
    }
}
