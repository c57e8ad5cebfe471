//! Aides calendaires pures : aucune dépendance d'état, aucun effet.

use chrono::{Datelike, NaiveDate, Weekday};

/// Nombre de jours du mois (année, mois). `None` si le couple est invalide.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Index du jour de semaine, lundi = 0 .. dimanche = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Abréviation du jour de semaine, format des en-têtes d'export.
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// Tranche de semaine d'un jour du mois : `(day - 1) / 7`, 0-indexée
/// depuis le 1er. Sert au basculement hebdomadaire de préférence et au
/// découpage d'affichage par semaine.
pub fn week_bucket(day: u32) -> u32 {
    (day - 1) / 7
}
