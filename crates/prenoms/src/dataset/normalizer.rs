const DEPARTMENT_WIDTH: usize = 2;

/// Strips byte-order marks and zero-width spaces that spreadsheet exports
/// leave in front of header names.
pub(crate) fn clean_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Left-pads a department code with `'0'` to two characters. Longer codes
/// (overseas departments such as `971`) are kept untouched.
pub(crate) fn normalize_department(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let code = trimmed.to_ascii_uppercase();
    if code.len() >= DEPARTMENT_WIDTH {
        return Some(code);
    }

    Some(format!("{code:0>width$}", width = DEPARTMENT_WIDTH))
}

pub(crate) fn parse_year(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

pub(crate) fn parse_count(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digit_departments() {
        assert_eq!(normalize_department("5").as_deref(), Some("05"));
        assert_eq!(normalize_department(" 5 ").as_deref(), Some("05"));
        assert_eq!(normalize_department("05").as_deref(), Some("05"));
        assert_eq!(normalize_department(&5.to_string()).as_deref(), Some("05"));
    }

    #[test]
    fn keeps_corsican_and_overseas_codes() {
        assert_eq!(normalize_department("2A").as_deref(), Some("2A"));
        assert_eq!(normalize_department("2b").as_deref(), Some("2B"));
        assert_eq!(normalize_department("971").as_deref(), Some("971"));
    }

    #[test]
    fn rejects_blank_and_punctuated_codes() {
        assert!(normalize_department("").is_none());
        assert!(normalize_department("  ").is_none());
        assert!(normalize_department("7-5").is_none());
    }

    #[test]
    fn header_cleanup_removes_bom() {
        assert_eq!(clean_header("\u{feff}sexe "), "sexe");
    }

    #[test]
    fn year_and_count_coercion() {
        assert_eq!(parse_year(" 1999"), Some(1999));
        assert_eq!(parse_year("XXXX"), None);
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("-1"), None);
    }
}
