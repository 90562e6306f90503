use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sqlx::SqliteConnection;

use super::error::{CatalogError, Result};

/// Display format for the catalog freshness stamp.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// SQLite date-time layouts carrying a zone offset, tried in order.
const ZONED_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Zone-less SQLite layouts, read as UTC. `CURRENT_TIMESTAMP`, the column
/// default, is the first.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Number of rows in the whole catalog. Search terms never apply here.
pub async fn total_count(conn: &mut SqliteConnection) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *conn)
        .await
        .map_err(CatalogError::QueryExecution)?;
    u64::try_from(count).map_err(|_| CatalogError::decode("COUNT(*)", format!("negative: {count}")))
}

/// Most recent `timestamp` in the catalog, or `None` when it is empty.
pub async fn latest_timestamp(conn: &mut SqliteConnection) -> Result<Option<NaiveDateTime>> {
    let raw = sqlx::query_scalar::<_, Option<String>>(
        "SELECT CAST(timestamp AS TEXT) FROM products ORDER BY timestamp DESC LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await
    .map_err(CatalogError::QueryExecution)?;

    match raw.flatten() {
        Some(raw) => parse_timestamp(&raw).map(Some),
        None => Ok(None),
    }
}

/// Parses any of SQLite's date-time layouts: RFC 3339, space or `T`
/// separated with optional fractional seconds and zone offset, minute
/// precision, or a bare date (midnight). Zoned values are normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw_trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw_trimmed) {
        return Ok(dt.naive_utc());
    }
    for layout in ZONED_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(raw_trimmed, layout) {
            return Ok(dt.naive_utc());
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw_trimmed, layout) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CatalogError::TimestampParse {
            raw: raw.to_owned(),
        })
}

pub fn format_display(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sqlite_default_timestamps() {
        let ts = parse_timestamp("2025-02-01 17:04:05").unwrap();
        assert_eq!(format_display(&ts), "01/02/2025 17:04:05");
    }

    #[test]
    fn formats_rfc3339_in_utc() {
        let ts = parse_timestamp("2025-02-01T18:04:05+01:00").unwrap();
        assert_eq!(format_display(&ts), "01/02/2025 17:04:05");
        let ts = parse_timestamp("2025-12-31T23:59:59Z").unwrap();
        assert_eq!(format_display(&ts), "31/12/2025 23:59:59");
    }

    #[test]
    fn accepts_every_sqlite_layout() {
        let cases = [
            ("2025-02-01 17:04:05.123", "01/02/2025 17:04:05"),
            ("2025-02-01T17:04:05.123456789", "01/02/2025 17:04:05"),
            ("2025-02-01T17:04:05", "01/02/2025 17:04:05"),
            ("2025-02-01 17:04", "01/02/2025 17:04:00"),
            ("2025-02-01T17:04", "01/02/2025 17:04:00"),
            ("2025-02-01 19:04:05+02:00", "01/02/2025 17:04:05"),
            ("2025-02-01T17:04:05.5-01:00", "01/02/2025 18:04:05"),
            ("2025-02-01T17:04:05.250Z", "01/02/2025 17:04:05"),
            ("2025-02-01", "01/02/2025 00:00:00"),
        ];
        for (raw, shown) in cases {
            let ts = parse_timestamp(raw).unwrap_or_else(|err| panic!("{raw:?}: {err}"));
            assert_eq!(format_display(&ts), shown, "{raw:?}");
        }
    }

    #[test]
    fn keeps_fractional_seconds() {
        let ts = parse_timestamp("2025-02-01 17:04:05.123").unwrap();
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn rejects_loose_formats() {
        for raw in ["", "yesterday", "2025-02-01 25:00:00", "01/02/2025 17:04:05", "2025/02/01"] {
            match parse_timestamp(raw) {
                Err(CatalogError::TimestampParse { raw: got }) => assert_eq!(got, raw),
                other => panic!("{raw:?} parsed as {other:?}"),
            }
        }
    }
}
