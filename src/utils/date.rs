use chrono::NaiveDate;

/// 严格解析 `YYYY-MM-DD`
///
/// `chrono` 的 `%Y-%m-%d` 会接受 `2024-1-5` 这类不补零的写法，这里先校验形状。
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_dates() {
        assert_eq!(
            parse_iso_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            parse_iso_date("1999-12-31"),
            NaiveDate::from_ymd_opt(1999, 12, 31)
        );
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for input in [
            "",
            "2024-1-05",
            "2024/01/05",
            "05-01-2024",
            "2024-01-05T00:00:00",
            " 2024-01-05",
            "20a4-01-05",
        ] {
            assert!(parse_iso_date(input).is_none(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(parse_iso_date("2023-02-29").is_none());
        assert!(parse_iso_date("2024-13-01").is_none());
    }
}
