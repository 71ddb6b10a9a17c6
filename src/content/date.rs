use anyhow::{Result, bail};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// UTC datetime without timezone complexity.
///
/// Field order matters: the derived `Ord` gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl EntryDate {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse from "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SSZ" format
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        // Parse date part
        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Check for time part (RFC3339)
        let (hour, minute, second) = if bytes.len() >= 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    fn is_leap_year(year: u16) -> bool {
        year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
    }

    #[inline]
    fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// "YYYY-MM-DD", used in `<time datetime="...">` attributes.
    pub fn to_ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Short listing preview, e.g. "Jan 15".
    pub fn to_preview(self) -> String {
        format!("{} {:02}", MONTHS_SHORT[(self.month - 1) as usize], self.day)
    }

    /// Full date for entry pages, e.g. "15 January, 2021".
    pub fn to_full(self) -> String {
        format!(
            "{:02} {}, {}",
            self.day,
            MONTHS_LONG[(self.month - 1) as usize],
            self.year
        )
    }

    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

        // Zeller's congruence for weekday calculation
        let weekday = self.weekday_index();

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[weekday],
            self.day,
            MONTHS_SHORT[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    #[inline]
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (self.year as i32 - 1, self.month as i32 + 12)
        } else {
            (self.year as i32, self.month as i32)
        };
        let d = self.day as i32;
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + d as u16;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ymd() {
        let dt = EntryDate::parse("2021-07-01").unwrap();
        assert_eq!(dt, EntryDate::from_ymd(2021, 7, 1));
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = EntryDate::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, EntryDate::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let dt = EntryDate::parse(" 2021-07-01 ").unwrap();
        assert_eq!(dt, EntryDate::from_ymd(2021, 7, 1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(EntryDate::parse("").is_none());
        assert!(EntryDate::parse("not a date").is_none());
        assert!(EntryDate::parse("2021/07/01").is_none());
        assert!(EntryDate::parse("2021-7-1").is_none());
        assert!(EntryDate::parse("2021-07-01T12:00").is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_dates() {
        // Month 13
        assert!(EntryDate::parse("2024-13-01").is_none());

        // Day 32 in a 31-day month
        assert!(EntryDate::parse("2024-01-32").is_none());

        // Day 31 in a 30-day month
        assert!(EntryDate::parse("2024-04-31").is_none());

        // Day 29 in February (non-leap year)
        assert!(EntryDate::parse("2023-02-29").is_none());
    }

    #[test]
    fn test_parse_leap_year() {
        // Leap year - Feb 29 is valid
        assert!(EntryDate::parse("2024-02-29").is_some());
        assert!(EntryDate::parse("2000-02-29").is_some()); // divisible by 400

        // Divisible by 100 but not 400
        assert!(EntryDate::parse("1900-02-29").is_none());
    }

    #[test]
    fn test_validate_invalid_time() {
        assert!(EntryDate::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(EntryDate::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(EntryDate::new(2024, 6, 15, 12, 30, 60).validate().is_err());
    }

    #[test]
    fn test_ordering_chronological() {
        let a = EntryDate::from_ymd(2020, 12, 31);
        let b = EntryDate::from_ymd(2021, 1, 1);
        let c = EntryDate::new(2021, 1, 1, 8, 0, 0);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_to_ymd() {
        assert_eq!(EntryDate::from_ymd(2021, 7, 1).to_ymd(), "2021-07-01");
    }

    #[test]
    fn test_to_preview() {
        assert_eq!(EntryDate::from_ymd(2021, 1, 15).to_preview(), "Jan 15");
        assert_eq!(EntryDate::from_ymd(2020, 12, 5).to_preview(), "Dec 05");
    }

    #[test]
    fn test_to_full() {
        assert_eq!(
            EntryDate::from_ymd(2021, 1, 15).to_full(),
            "15 January, 2021"
        );
    }

    #[test]
    fn test_to_rfc2822() {
        let dt = EntryDate::new(2024, 1, 15, 10, 30, 45);
        let rfc2822 = dt.to_rfc2822();

        assert!(rfc2822.contains("15"));
        assert!(rfc2822.contains("Jan"));
        assert!(rfc2822.contains("2024"));
        assert!(rfc2822.contains("10:30:45"));
        assert!(rfc2822.contains("GMT"));
    }

    #[test]
    fn test_to_rfc2822_format() {
        let dt = EntryDate::new(2024, 6, 15, 14, 30, 45);
        let rfc2822 = dt.to_rfc2822();

        // Check the general format: "Day, DD Mon YYYY HH:MM:SS GMT"
        let parts: Vec<&str> = rfc2822.split(' ').collect();
        assert_eq!(parts.len(), 6);
        assert!(parts[0].ends_with(','));
        assert_eq!(parts[5], "GMT");
    }

    #[test]
    fn test_all_months_render() {
        for month in 1..=12u8 {
            let dt = EntryDate::from_ymd(2024, month, 15);
            assert!(dt.validate().is_ok());
            assert!(dt.to_preview().contains(MONTHS_SHORT[(month - 1) as usize]));
            assert!(dt.to_full().contains(MONTHS_LONG[(month - 1) as usize]));
        }
    }
}
