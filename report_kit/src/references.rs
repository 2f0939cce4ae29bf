//! Reference links
//!
//! Rules cite external registries (CVE, CCE, vendor advisories, ...) as
//! `{system, value}` pairs. Known systems resolve to a URL; anything else is
//! shown as plain text. System identifiers match case-insensitively.
//!
//! | system                                                   | link                                        |
//! |----------------------------------------------------------|---------------------------------------------|
//! | `http://cce.mitre.org`                                   | `http://scapsync.com/cce/{value}`           |
//! | `http://cpe.mitre.org`                                   | NVD CPE search for `{value}`                |
//! | `http://cve.mitre.org`                                   | NVD vulnerability detail for `{value}`      |
//! | `http://www.cert.org`                                    | `http://www.cert.org/advisories/{value}.html` |
//! | `http://www.kb.cert.org`                                 | `http://www.kb.cert.org/vuls/id/{value}`    |
//! | `http://www.us-cert.gov/cas/techalerts`                  | `http://www.us-cert.gov/ncas/alerts/{value}` |
//! | `http://rhn.redhat.com/errata`                           | errata page, see [`redhat_errata_slug`]     |
//! | `http://tools.cisco.com/security/center/content/ciscosecurityadvisory` | Cisco advisory page          |
//! | `http://iase.disa.mil/cci`                               | `http://jovalcm.com/references/cci/{value}` |

use serde::{Deserialize, Serialize};

use crate::document::Reference;

/// How a known system turns a value into a URL
#[derive(Debug, Clone, PartialEq, Eq)]
enum LinkRule {
    /// `prefix + value + suffix`
    Template {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// Red Hat errata pages are keyed by a slug of the advisory id
    RedHatErrata,
}

const fn template(prefix: &'static str, suffix: &'static str) -> LinkRule {
    LinkRule::Template { prefix, suffix }
}

const BUILTIN_SYSTEMS: &[(&str, LinkRule)] = &[
    (
        "http://cce.mitre.org",
        template("http://scapsync.com/cce/", ""),
    ),
    (
        "http://cpe.mitre.org",
        template(
            "http://web.nvd.nist.gov/view/cpe/search/results?searchChoice=name&includeDeprecated=on&searchText=",
            "",
        ),
    ),
    (
        "http://cve.mitre.org",
        template("http://web.nvd.nist.gov/view/vuln/detail?vulnId=", ""),
    ),
    (
        "http://www.cert.org",
        template("http://www.cert.org/advisories/", ".html"),
    ),
    (
        "http://www.kb.cert.org",
        template("http://www.kb.cert.org/vuls/id/", ""),
    ),
    (
        "http://www.us-cert.gov/cas/techalerts",
        template("http://www.us-cert.gov/ncas/alerts/", ""),
    ),
    ("http://rhn.redhat.com/errata", LinkRule::RedHatErrata),
    (
        "http://tools.cisco.com/security/center/content/ciscosecurityadvisory",
        template(
            "http://tools.cisco.com/security/center/content/CiscoSecurityAdvisory/",
            "",
        ),
    ),
    (
        "http://iase.disa.mil/cci",
        template("http://jovalcm.com/references/cci/", ""),
    ),
];

/// A reference system supplied through configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomReferenceSystem {
    pub system: String,
    pub url_prefix: String,
    #[serde(default)]
    pub url_suffix: String,
}

/// Displayable form of a reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDisplay {
    /// Text shown to the reader (always the raw reference value)
    pub text: String,
    /// Link target, when the system is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ReferenceDisplay {
    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }

    /// HTML fragment: an anchor opening in a new window for known systems,
    /// escaped text otherwise
    pub fn to_html(&self) -> String {
        match &self.url {
            Some(url) => format!(
                "<a href=\"{}\" target=\"_blank\"><nobr>{}</nobr></a>",
                html_escape(url),
                html_escape(&self.text)
            ),
            None => html_escape(&self.text),
        }
    }
}

/// Resolves references against the built-in table plus configured systems
#[derive(Debug, Clone, Default)]
pub struct ReferenceLinker {
    custom: Vec<CustomReferenceSystem>,
}

impl ReferenceLinker {
    /// Linker with only the built-in systems
    pub fn new() -> Self {
        Self::default()
    }

    /// Linker that also knows `custom` systems. Built-in systems take
    /// precedence over a custom entry with the same key.
    pub fn with_custom(custom: &[CustomReferenceSystem]) -> Self {
        Self {
            custom: custom.to_vec(),
        }
    }

    /// URL for a reference, if its system is known
    pub fn url(&self, reference: &Reference) -> Option<String> {
        let system = reference.system.to_lowercase();

        if let Some((_, rule)) = BUILTIN_SYSTEMS.iter().find(|(key, _)| *key == system) {
            return Some(apply_rule(rule, &reference.value));
        }

        self.custom
            .iter()
            .find(|custom| custom.system.to_lowercase() == system)
            .map(|custom| format!("{}{}{}", custom.url_prefix, reference.value, custom.url_suffix))
    }

    pub fn display(&self, reference: &Reference) -> ReferenceDisplay {
        ReferenceDisplay {
            text: reference.value.clone(),
            url: self.url(reference),
        }
    }
}

/// Resolve a reference against the built-in systems only
pub fn render_reference(reference: &Reference) -> ReferenceDisplay {
    ReferenceLinker::new().display(reference)
}

fn apply_rule(rule: &LinkRule, value: &str) -> String {
    match rule {
        LinkRule::Template { prefix, suffix } => format!("{}{}{}", prefix, value, suffix),
        LinkRule::RedHatErrata => format!(
            "http://rhn.redhat.com/errata/{}.html",
            redhat_errata_slug(value)
        ),
    }
}

/// Errata page slug for a Red Hat advisory id.
///
/// Drops a trailing `-<digits>` revision, then collapses every run of
/// non-alphanumeric characters into a single `-`:
/// `RHSA-2015:1234-01` → `RHSA-2015-1234`.
pub fn redhat_errata_slug(value: &str) -> String {
    let base = match value.rfind('-') {
        Some(pos)
            if pos + 1 < value.len()
                && value[pos + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            &value[..pos]
        }
        _ => value,
    };

    let mut slug = String::with_capacity(base.len());
    let mut in_separator = false;
    for c in base.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }
    slug
}

/// Escape text for inclusion in HTML content or attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cve_links_to_nvd() {
        let display = render_reference(&Reference::new("http://cve.mitre.org", "CVE-2099-0001"));

        assert_eq!(
            display.url.as_deref(),
            Some("http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-2099-0001")
        );
        assert_eq!(
            display.to_html(),
            "<a href=\"http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-2099-0001\" \
             target=\"_blank\"><nobr>CVE-2099-0001</nobr></a>"
        );
    }

    #[test]
    fn test_system_match_is_case_insensitive() {
        let display = render_reference(&Reference::new("HTTP://CCE.MITRE.ORG", "CCE-1234-5"));
        assert_eq!(
            display.url.as_deref(),
            Some("http://scapsync.com/cce/CCE-1234-5")
        );
    }

    #[test]
    fn test_system_match_is_exact_apart_from_case() {
        let display = render_reference(&Reference::new(" http://cve.mitre.org ", "CVE-2099-0001"));
        assert!(!display.is_link());
        assert_eq!(display.to_html(), "CVE-2099-0001");
    }

    #[test]
    fn test_unknown_system_is_plain_text() {
        let display = render_reference(&Reference::new("urn:internal:policy", "POL-7"));
        assert!(!display.is_link());
        assert_eq!(display.to_html(), "POL-7");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let display = render_reference(&Reference::new("other", "<b>&"));
        assert_eq!(display.to_html(), "&lt;b&gt;&amp;");
    }

    #[test]
    fn test_cpe_query_ampersands_escaped_in_html() {
        let display = render_reference(&Reference::new(
            "http://cpe.mitre.org",
            "cpe:/o:redhat:enterprise_linux:7",
        ));
        let url = display.url.clone().unwrap();
        assert!(url.contains("searchChoice=name&includeDeprecated=on"));
        assert!(display
            .to_html()
            .contains("searchChoice=name&amp;includeDeprecated=on"));
    }

    #[test]
    fn test_cert_advisory_suffix() {
        let display = render_reference(&Reference::new("http://www.cert.org", "CA-2001-19"));
        assert_eq!(
            display.url.as_deref(),
            Some("http://www.cert.org/advisories/CA-2001-19.html")
        );
    }

    #[test]
    fn test_redhat_errata_slug() {
        assert_eq!(redhat_errata_slug("RHSA-2015:1234-01"), "RHSA-2015-1234");
        assert_eq!(redhat_errata_slug("RHSA-2015:1234"), "RHSA-2015-1234");
        assert_eq!(redhat_errata_slug("RHBA-2014::0001-"), "RHBA-2014-0001-");

        let display =
            render_reference(&Reference::new("http://rhn.redhat.com/errata", "RHSA-2015:1234-01"));
        assert_eq!(
            display.url.as_deref(),
            Some("http://rhn.redhat.com/errata/RHSA-2015-1234.html")
        );
    }

    #[test]
    fn test_custom_systems() {
        let linker = ReferenceLinker::with_custom(&[
            CustomReferenceSystem {
                system: "https://Example.org/Advisories".to_string(),
                url_prefix: "https://example.org/advisories/".to_string(),
                url_suffix: ".html".to_string(),
            },
            CustomReferenceSystem {
                system: "http://cve.mitre.org".to_string(),
                url_prefix: "https://shadowed.invalid/".to_string(),
                url_suffix: String::new(),
            },
        ]);

        let display = linker.display(&Reference::new("https://example.org/advisories", "EX-1"));
        assert_eq!(
            display.url.as_deref(),
            Some("https://example.org/advisories/EX-1.html")
        );

        // built-in wins
        let cve = linker.url(&Reference::new("http://cve.mitre.org", "CVE-1"));
        assert_eq!(
            cve.as_deref(),
            Some("http://web.nvd.nist.gov/view/vuln/detail?vulnId=CVE-1")
        );
    }
}
