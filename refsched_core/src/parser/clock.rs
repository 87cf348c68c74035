use regex::Regex;
use serde::{Deserialize, Serialize};

/// How unmarked 12-hour times are resolved.
///
/// Checkbox templates in the wild write evening games without an AM/PM
/// marker. The legacy reading treats `12:xx` and `11:00` as PM and
/// `11:01`-`11:59` as AM; the `11:00` rule is a workaround for one
/// league's late slot and can be switched off here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeridiemRules {
    pub eleven_sharp_is_pm: bool,
}

impl Default for MeridiemRules {
    fn default() -> Self {
        MeridiemRules {
            eleven_sharp_is_pm: true,
        }
    }
}

/// Convert a time-of-day label to minutes from midnight.
///
/// Accepts `"HH:MM"`, `"H:MM"` and `"H:MM AM"`/`"H:MM PM"` (case
/// insensitive, optional space). Hours of 13 and above are taken as
/// 24-hour times. Without a meridiem the rules above decide.
pub fn parse_clock_label(label: &str, rules: &MeridiemRules) -> Result<u32, String> {
    let re = Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])?$").unwrap();
    let caps = re
        .captures(label.trim())
        .ok_or_else(|| format!("Unrecognized time label: {}", label))?;

    let hour: u32 = caps[1].parse().map_err(|_| format!("Bad hour: {}", &caps[1]))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| format!("Bad minute: {}", &caps[2]))?;
    if minute > 59 {
        return Err(format!("Time out of valid range: {}", label));
    }

    let meridiem = caps.get(3).map(|m| m.as_str().to_ascii_lowercase());
    let hour = match meridiem.as_deref() {
        Some("am") | Some("pm") if !(1..=12).contains(&hour) => {
            return Err(format!("Time out of valid range: {}", label));
        }
        Some("am") => hour % 12,
        Some("pm") => hour % 12 + 12,
        _ if hour > 23 => return Err(format!("Time out of valid range: {}", label)),
        // 13:00 and later are unambiguous 24-hour times.
        _ if hour >= 13 => hour,
        // Noon hour without a marker stays the noon hour.
        _ if hour == 12 => 12,
        _ if hour == 11 && minute == 0 && rules.eleven_sharp_is_pm => 23,
        _ => hour,
    };

    Ok(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(label: &str) -> u32 {
        parse_clock_label(label, &MeridiemRules::default()).unwrap()
    }

    #[test]
    fn explicit_meridiem_wins() {
        assert_eq!(parse("6:30 PM"), 18 * 60 + 30);
        assert_eq!(parse("6:30 AM"), 6 * 60 + 30);
        assert_eq!(parse("12:15 AM"), 15);
        assert_eq!(parse("12:15 PM"), 12 * 60 + 15);
        assert_eq!(parse("6:30pm"), 18 * 60 + 30);
    }

    #[test]
    fn twenty_four_hour_labels_pass_through() {
        assert_eq!(parse("18:30"), 18 * 60 + 30);
        assert_eq!(parse("00:05"), 5);
        assert_eq!(parse("23:59"), 23 * 60 + 59);
    }

    #[test]
    fn unmarked_times_follow_the_legacy_reading() {
        assert_eq!(parse("12:30"), 12 * 60 + 30);
        assert_eq!(parse("11:00"), 23 * 60);
        assert_eq!(parse("11:01"), 11 * 60 + 1);
        assert_eq!(parse("11:59"), 11 * 60 + 59);
        assert_eq!(parse("6:30"), 6 * 60 + 30);
    }

    #[test]
    fn eleven_sharp_rule_can_be_disabled() {
        let rules = MeridiemRules {
            eleven_sharp_is_pm: false,
        };
        assert_eq!(parse_clock_label("11:00", &rules).unwrap(), 11 * 60);
    }

    #[test]
    fn garbage_is_rejected() {
        let rules = MeridiemRules::default();
        assert!(parse_clock_label("25:00", &rules).is_err());
        assert!(parse_clock_label("7:61", &rules).is_err());
        assert!(parse_clock_label("18:30 PM", &rules).is_err());
        assert!(parse_clock_label("noonish", &rules).is_err());
    }
}
