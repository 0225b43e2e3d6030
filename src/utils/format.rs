use chrono::{DateTime, Utc};

// ============================================================================
// FORMATEO PARA LA UI
// ============================================================================

/// Edad relativa compacta: "now", "5m", "3h", "2d"
pub fn time_ago(iso: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(iso) else {
        return String::new();
    };
    let minutes = (now - then.with_timezone(&Utc)).num_minutes();
    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / (60 * 24))
    }
}

/// "in_progress" -> "in progress"
pub fn humanize(raw: &str) -> String {
    raw.replace('_', " ")
}

/// Inicial para el avatar ("?" si no hay nombre)
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

pub fn money_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Precio tal como llega del backend ("12.5") con formato "$12.50"
pub fn money_str(raw: &str) -> String {
    money_cents(crate::models::order::parse_cents(raw))
}

pub fn money_whole(amount: f64) -> String {
    format!("${:.0}", amount)
}

/// Fecha corta "Sep 1, 2026"; devuelve el original si no es RFC 3339
pub fn short_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn time_ago_buckets() {
        assert_eq!(time_ago("2026-10-18T11:59:30Z", now()), "now");
        assert_eq!(time_ago("2026-10-18T11:45:00Z", now()), "15m");
        assert_eq!(time_ago("2026-10-18T09:00:00Z", now()), "3h");
        assert_eq!(time_ago("2026-10-16T12:00:00Z", now()), "2d");
        assert_eq!(time_ago("yesterday", now()), "");
    }

    #[test]
    fn small_helpers() {
        assert_eq!(humanize("customer_request"), "customer request");
        assert_eq!(initial("  ann"), "A");
        assert_eq!(initial(""), "?");
        assert_eq!(money_cents(1998), "$19.98");
        assert_eq!(money_cents(-5), "-$0.05");
        assert_eq!(money_str("12.5"), "$12.50");
        assert_eq!(money_whole(1234.4), "$1234");
        assert_eq!(short_date("2026-09-01T10:00:00Z"), "Sep 1, 2026");
    }
}
