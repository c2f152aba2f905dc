use crate::prelude::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::utils::CCStr;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Formats a backend date as `YYYY-MM-DD HH:MM`.
///
/// RFC 3339, RFC 2822 (`Wed, 01 May 2024 12:00:00 GMT`), naive ISO date-times
/// and plain dates are understood. Anything else is returned unchanged.
pub fn format_backend_date(raw: &str) -> CCStr {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string().into();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string().into();
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
    {
        return dt.format("%Y-%m-%d %H:%M").to_string().into();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string().into();
    }
    raw.into()
}

/// A date coming from the backend, `None` meaning it never happened.
#[derive(Debug, Clone, PartialEq)]
pub struct UITimestamp(Option<CCStr>);

impl UITimestamp {
    pub fn new(raw: Option<&CCStr>) -> Self {
        Self(raw.filter(|s| !s.trim().is_empty()).cloned())
    }
}

impl LoadedElement for UITimestamp {
    type Loader = SkeletonLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
        match self.0 {
            Some(raw) => rsx! {
                span { title: "{raw}", {format_backend_date(&raw)} }
            },
            None => rsx! {
                span { class: "text-muted", "Never" }
            },
        }
    }

    fn place_holder() -> Self {
        Self(Some(CCStr::from("2024-01-01 00:00")))
    }
}
