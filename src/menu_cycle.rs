//! # Menu Cycle Module
//!
//! A menu cycle assigns a technical sheet and a serving count to each school
//! day of a week, repeated for a number of weeks from a start date.

use crate::technical_sheet::validate_meal_type;
use crate::validation::{validate_name, validate_portion, ValidationError};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest week number of a cycle
pub const MAX_WEEK: u32 = 5;

/// School days
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunes" => Ok(Weekday::Lunes),
            "martes" => Ok(Weekday::Martes),
            "miércoles" | "miercoles" => Ok(Weekday::Miercoles),
            "jueves" => Ok(Weekday::Jueves),
            "viernes" => Ok(Weekday::Viernes),
            _ => Err(ValidationError::UnknownValue {
                kind: "weekday",
                value: s.to_string(),
            }),
        }
    }
}

/// The sheet served on one day of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDay {
    pub day: Weekday,
    pub sheet_id: i64,
    pub portions: u32,
}

/// A weekly menu cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCycle {
    pub name: String,
    pub meal_type: String,
    /// Week number within the school month (1-5)
    pub week: u32,
    pub start_date: NaiveDate,
    pub duration_weeks: u32,
    pub days: Vec<CycleDay>,
}

impl MenuCycle {
    /// Validate the cycle, ordering its days from Monday to Friday
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.name = validate_name("name", &self.name)?;
        self.meal_type = validate_meal_type(&self.meal_type)?;

        if !(1..=MAX_WEEK).contains(&self.week) {
            return Err(ValidationError::InvalidWeek(self.week));
        }
        if self.duration_weeks == 0 {
            return Err(ValidationError::InvalidDuration);
        }

        self.days.sort_by_key(|d| d.day);
        for pair in self.days.windows(2) {
            if pair[0].day == pair[1].day {
                return Err(ValidationError::DuplicateDay(pair[0].day.to_string()));
            }
        }
        for day in &self.days {
            validate_portion(day.portions)?;
        }

        Ok(self)
    }

    /// Start date plus the duration of the cycle
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::weeks(i64::from(self.duration_weeks))
    }

    /// Sheet planned for a day, if any
    pub fn day(&self, day: Weekday) -> Option<&CycleDay> {
        self.days.iter().find(|d| d.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> MenuCycle {
        MenuCycle {
            name: "Ciclo Desayuno Semana 1".to_string(),
            meal_type: "Desayuno".to_string(),
            week: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            duration_weeks: 4,
            days: vec![
                CycleDay {
                    day: Weekday::Viernes,
                    sheet_id: 2,
                    portions: 10,
                },
                CycleDay {
                    day: Weekday::Lunes,
                    sheet_id: 1,
                    portions: 5,
                },
            ],
        }
    }

    #[test]
    fn test_end_date() {
        assert_eq!(cycle().end_date(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    }

    #[test]
    fn test_validated_orders_days() {
        let cycle = cycle().validated().unwrap();
        assert_eq!(cycle.days[0].day, Weekday::Lunes);
        assert_eq!(cycle.day(Weekday::Viernes).unwrap().sheet_id, 2);
        assert!(cycle.day(Weekday::Martes).is_none());
    }

    #[test]
    fn test_rejections() {
        let mut c = cycle();
        c.week = 6;
        assert_eq!(c.validated(), Err(ValidationError::InvalidWeek(6)));

        let mut c = cycle();
        c.days[0].day = Weekday::Lunes;
        assert_eq!(c.validated(), Err(ValidationError::DuplicateDay("Lunes".to_string())));

        let mut c = cycle();
        c.days[1].portions = 7;
        assert_eq!(c.validated(), Err(ValidationError::InvalidPortion(7)));

        let mut c = cycle();
        c.duration_weeks = 0;
        assert_eq!(c.validated(), Err(ValidationError::InvalidDuration));
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("Miércoles".parse::<Weekday>(), Ok(Weekday::Miercoles));
        assert_eq!(" viernes ".parse::<Weekday>(), Ok(Weekday::Viernes));
        assert!("Sábado".parse::<Weekday>().is_err());
        assert_eq!(Weekday::Miercoles.to_string(), "Miércoles");
    }
}
