//! Display-timezone helpers.
//!
//! Profile timestamps (user creation, last login, registration leads) are
//! stored as IST wall-clock values. Form submissions keep a real instant and
//! are only rendered in IST for display.

use time::macros::{format_description, offset};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Asia/Kolkata, which has no DST.
pub const IST: UtcOffset = offset!(+5:30);

/// Wall-clock reading of `instant` in IST.
pub fn to_display_timezone(instant: OffsetDateTime) -> PrimitiveDateTime {
    let local = instant.to_offset(IST);
    PrimitiveDateTime::new(local.date(), local.time())
}

pub fn ist_now() -> PrimitiveDateTime {
    to_display_timezone(OffsetDateTime::now_utc())
}

/// Renders `instant` the way en-IN locales print it, e.g. `14/10/2026, 3:05:09 pm`.
pub fn format_ist(instant: OffsetDateTime) -> String {
    let format = format_description!(
        "[day padding:none]/[month padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period case:lower]"
    );
    instant
        .to_offset(IST)
        .format(format)
        .unwrap_or_else(|_| instant.to_string())
}

/// Serde helpers for IST wall-clock columns.
pub mod wall_clock {
    use serde::Serializer;
    use time::{macros::format_description, PrimitiveDateTime};

    fn render(value: &PrimitiveDateTime) -> Result<String, time::error::Format> {
        value.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]+05:30"
        ))
    }

    pub fn serialize<S: Serializer>(value: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        let text = render(value).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub mod option {
        use serde::Serializer;
        use time::PrimitiveDateTime;

        pub fn serialize<S: Serializer>(
            value: &Option<PrimitiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, s),
                None => s.serialize_none(),
            }
        }
    }
}
