// submarine_core/src/domain.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::{Result, SubError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cycle {
    #[default]
    #[serde(alias = "monthly")]
    Monthly,
    #[serde(alias = "yearly")]
    Yearly,
}

impl Cycle {
    pub fn label(self) -> &'static str {
        match self {
            Cycle::Monthly => "Monthly",
            Cycle::Yearly => "Yearly",
        }
    }

    /// Length of one billing period in calendar months.
    pub fn months(self) -> u32 {
        match self {
            Cycle::Monthly => 1,
            Cycle::Yearly => 12,
        }
    }

    /// Prompt-style parsing: blank or unrecognised input falls back to Monthly.
    pub fn parse_lenient(input: &str) -> Cycle {
        input.parse().unwrap_or_default()
    }
}

impl FromStr for Cycle {
    type Err = SubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "m" => Ok(Cycle::Monthly),
            "yearly" | "y" => Ok(Cycle::Yearly),
            other => Err(SubError::Invalid(format!(
                "unknown billing cycle '{other}' (expected Monthly or Yearly)"
            ))),
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub price: f64,
    pub cycle: Cycle,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub website: Option<String>,
    #[serde(default)]
    pub date_added: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::util::hex::opt_bytes"
    )]
    pub icon: Option<Vec<u8>>,
}

/// User input for a record that has not been validated yet.
#[derive(Clone, Debug, Default)]
pub struct NewSubscription {
    pub name: String,
    pub price: f64,
    pub cycle: Cycle,
    pub website: Option<String>,
}

impl Subscription {
    /// Validate `draft` and stamp it with `date_added`.
    pub fn create(draft: NewSubscription, date_added: Date) -> Result<Self> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(SubError::Invalid("service name cannot be empty".into()));
        }
        validate_price(draft.price)?;
        Ok(Self {
            name,
            price: draft.price,
            cycle: draft.cycle,
            website: draft.website.as_deref().and_then(normalize_website),
            date_added: format_date(date_added),
            icon: None,
        })
    }

    pub fn with_icon(mut self, icon: Option<Vec<u8>>) -> Self {
        self.icon = icon.filter(|b| !b.is_empty());
        self
    }

    pub fn added_on(&self) -> Option<Date> {
        parse_date(&self.date_added)
    }
}

pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SubError::Invalid("price must be a positive number".into()));
    }
    Ok(())
}

pub fn parse_price(input: &str) -> Result<f64> {
    let cleaned = input.trim().trim_start_matches('$');
    let price: f64 = cleaned
        .parse()
        .map_err(|_| SubError::Invalid(format!("'{}' is not a valid price", input.trim())))?;
    validate_price(price)?;
    Ok(price)
}

/// Trim and ensure an explicit scheme; blank input means "no website".
pub fn normalize_website(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).ok()
}

// Older files store "" for a missing website.
fn empty_as_none<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().and_then(normalize_website))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn draft(name: &str, price: f64, website: Option<&str>) -> NewSubscription {
        NewSubscription {
            name: name.into(),
            price,
            cycle: Cycle::Monthly,
            website: website.map(String::from),
        }
    }

    #[test]
    fn website_gets_https_prefix() {
        assert_eq!(
            normalize_website("example.com").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(normalize_website("http://x.com").as_deref(), Some("http://x.com"));
        assert_eq!(normalize_website("   "), None);
    }

    #[test]
    fn create_trims_name_and_stamps_date() {
        let added = date!(2024 - 03 - 05);
        let sub = Subscription::create(draft("  Foo ", 9.99, Some("foo.io")), added).unwrap();
        assert_eq!(sub.name, "Foo");
        assert_eq!(sub.website.as_deref(), Some("https://foo.io"));
        assert_eq!(sub.date_added, "2024-03-05");
        assert_eq!(sub.added_on(), Some(added));
    }

    #[test]
    fn create_rejects_empty_name_and_bad_price() {
        let d = date!(2024 - 01 - 01);
        assert!(matches!(
            Subscription::create(draft("  ", 1.0, None), d),
            Err(SubError::Invalid(_))
        ));
        assert!(Subscription::create(draft("A", 0.0, None), d).is_err());
        assert!(Subscription::create(draft("A", -3.0, None), d).is_err());
        assert!(Subscription::create(draft("A", f64::NAN, None), d).is_err());
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price(" 9.99 ").unwrap(), 9.99);
        assert_eq!(parse_price("$12").unwrap(), 12.0);
        assert!(parse_price("abc").is_err());
        assert!(parse_price("0").is_err());
    }

    #[test]
    fn cycle_parsing_is_lenient_at_prompts() {
        assert_eq!(Cycle::parse_lenient("yearly"), Cycle::Yearly);
        assert_eq!(Cycle::parse_lenient("YEARLY"), Cycle::Yearly);
        assert_eq!(Cycle::parse_lenient(""), Cycle::Monthly);
        assert_eq!(Cycle::parse_lenient("weekly"), Cycle::Monthly);
        assert!("weekly".parse::<Cycle>().is_err());
    }

    #[test]
    fn reads_legacy_record_with_empty_website() {
        let json = r#"{"name":"Box","price":5,"cycle":"Yearly","website":"","date_added":"2023-01-02"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.website, None);
        assert_eq!(sub.cycle, Cycle::Yearly);
        assert_eq!(sub.icon, None);
    }

    #[test]
    fn icon_is_written_as_hex() {
        let sub = Subscription::create(draft("Ico", 1.0, None), date!(2024 - 01 - 01))
            .unwrap()
            .with_icon(Some(vec![0xde, 0xad, 0xbe, 0xef]));
        let json = serde_json::to_string(&sub).unwrap();
        assert!(json.contains(r#""icon":"deadbeef""#), "got {json}");
        assert!(!json.contains("website"));
    }
}
