use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, IntoEnumIterator};

/// The teaching days a shift can be scheduled on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// Day number used by calendar widgets (Monday = 1)
    pub fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
        }
    }

    /// Portuguese label shown in the timetable
    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Segunda-feira",
            Self::Tuesday => "Terça-feira",
            Self::Wednesday => "Quarta-feira",
            Self::Thursday => "Quinta-feira",
            Self::Friday => "Sexta-feira",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts the English name or the Portuguese label, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s) || day.label().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown weekday: {s}"))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_weekday_numbers_follow_calendar_order() {
        let numbers: Vec<u8> = Weekday::iter().map(Weekday::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_weekday_from_str() {
        assert_eq!(Weekday::from_str("Monday").unwrap(), Weekday::Monday);
        assert_eq!(Weekday::from_str("friday").unwrap(), Weekday::Friday);
        assert_eq!(Weekday::from_str("quarta-feira").unwrap(), Weekday::Wednesday);
        assert!(Weekday::from_str("Saturday").is_err());
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(Weekday::Tuesday.label(), "Terça-feira");
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
    }
}
