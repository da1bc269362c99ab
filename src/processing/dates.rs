use lazy_static::lazy_static;
use regex::Regex;

/// Two-digit years above this resolve to 19xx, the rest to 20xx.
pub const CENTURY_PIVOT: u32 = 50;

lazy_static! {
    static ref SECONDARY_MONTH: Regex = Regex::new(r"(?i)\s*/\s*[A-Z]{3}\s*").unwrap();
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"(?i)([0-9]{1,2})\s+([A-Z]{3})\s+([0-9]{2,4})").unwrap();
    static ref NUMERIC_DATE: Regex = Regex::new(r"^[0-9]{2}[/-][0-9]{2}[/-][0-9]{4}$").unwrap();
}

/// Convert a three letter month abbreviation to its two digit number.
pub fn month_number(abbreviation: &str) -> Option<&'static str> {
    let month = match abbreviation.to_uppercase().as_str() {
        "JAN" => "01",
        "FEB" => "02",
        "MAR" => "03",
        "APR" => "04",
        "MAY" => "05",
        "JUN" => "06",
        "JUL" => "07",
        "AUG" => "08",
        "SEP" => "09",
        "OCT" => "10",
        "NOV" => "11",
        "DEC" => "12",
        _ => return None,
    };
    Some(month)
}

/// Expand a two digit year with the fixed pivot; longer years pass through.
pub fn expand_year(year: &str) -> String {
    if year.len() != 2 {
        return year.to_string();
    }
    match year.parse::<u32>() {
        Ok(yy) if yy > CENTURY_PIVOT => format!("19{}", year),
        Ok(_) => format!("20{}", year),
        Err(_) => year.to_string(),
    }
}

/// Format an MRZ `YYMMDD` date as `DD/MM/YYYY`. Anything that is not
/// exactly six ASCII digits yields `None`.
pub fn format_mrz_date(yymmdd: &str) -> Option<String> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (yy, rest) = yymmdd.split_at(2);
    let (mm, dd) = rest.split_at(2);
    Some(format!("{}/{}/{}", dd, mm, expand_year(yy)))
}

/// Normalize a printed date to `DD/MM/YYYY`.
///
/// Handles `DD MMM YY[YY]` (with an optional bilingual `/XXX` month suffix)
/// and `DD-MM-YYYY` / `DD/MM/YYYY`. Unrecognized input is returned as is.
pub fn standardize_date(date: &str) -> String {
    let date = SECONDARY_MONTH.replace(date, " ");

    if let Some(caps) = DAY_MONTH_YEAR.captures(&date) {
        let day = format!("{:0>2}", &caps[1]);
        let month = month_number(&caps[2]).unwrap_or("01");
        let year = expand_year(&caps[3]);
        return format!("{}/{}/{}", day, month, year);
    }

    if NUMERIC_DATE.is_match(&date) {
        return date.replace('-', "/");
    }

    date.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mrz_date_century_pivot() {
        assert_eq!(format_mrz_date("850312").as_deref(), Some("12/03/1985"));
        assert_eq!(format_mrz_date("500101").as_deref(), Some("01/01/2050"));
        assert_eq!(format_mrz_date("510101").as_deref(), Some("01/01/1951"));
        assert_eq!(format_mrz_date("300715").as_deref(), Some("15/07/2030"));
    }

    #[test]
    fn test_mrz_date_echoes_day_and_month() {
        for yy in 0..100u32 {
            let raw = format!("{:02}1399", yy);
            let decoded = format_mrz_date(&raw).unwrap();
            assert!(decoded.starts_with("99/13/"));
            let century = if yy > 50 { "19" } else { "20" };
            assert!(decoded[6..].starts_with(century), "{} -> {}", raw, decoded);
        }
    }

    #[test]
    fn test_mrz_date_rejects_non_digits() {
        assert_eq!(format_mrz_date("85O312"), None);
        assert_eq!(format_mrz_date("8503"), None);
        assert_eq!(format_mrz_date("8503120"), None);
    }

    #[test]
    fn test_standardize_month_names() {
        assert_eq!(standardize_date("13 FEB 99"), "13/02/1999");
        assert_eq!(standardize_date("1 jan 2021"), "01/01/2021");
        assert_eq!(standardize_date("13 FEB /FEV 99"), "13/02/1999");
        assert_eq!(standardize_date("01 JAN /JAN 21"), "01/01/2021");
    }

    #[test]
    fn test_standardize_unknown_month_defaults_to_january() {
        assert_eq!(standardize_date("05 XYZ 20"), "05/01/2020");
    }

    #[test]
    fn test_standardize_numeric_separators() {
        assert_eq!(standardize_date("15-08-1947"), "15/08/1947");
        assert_eq!(standardize_date("15/08/1947"), "15/08/1947");
        assert_eq!(standardize_date("1947"), "1947");
    }
}
