//! Frontière avec les collaborateurs externes : paramètres de requête,
//! validation des entrées avant génération, assemblage de la réponse
//! (planning + descriptif des jours + table de couleurs).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar;
use crate::colors::{self, ShiftColor};
use crate::generator::{self, GenerateOptions};
use crate::model::{Employee, EmployeeId, ExclusionMap, Period, Roster};

/// Sélection d'affichage : mois entier ou tranche de semaine (0-indexée
/// depuis le 1er). N'affecte jamais la génération, seulement le sous-
/// ensemble de `days_info` retourné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week(u32),
}

/// Corps de requête de génération.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    pub year: i32,
    pub month: u32,
    /// Ids à planifier, dans l'ordre voulu (l'ordre conditionne
    /// l'échelonnement des repos et la rotation).
    pub employees: Vec<EmployeeId>,
    #[serde(default)]
    pub vacation_days: ExclusionMap,
    #[serde(default)]
    pub leave_days: ExclusionMap,
    #[serde(default)]
    pub view: ViewMode,
    /// Surcharges de couleurs par code, affichage uniquement.
    #[serde(default)]
    pub colors: BTreeMap<String, ShiftColor>,
}

/// Descriptif d'un jour de la période pour le rendu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInfo {
    pub day: u32,
    pub weekday: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    pub year: i32,
    pub month: u32,
    pub roster: Roster,
    pub days_info: Vec<DayInfo>,
    pub colors: BTreeMap<String, ShiftColor>,
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    #[error("no employees found")]
    NoEmployees,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Valide la requête, résout les ids contre l'annuaire fourni puis
/// génère. Les erreurs d'entrée (période invalide, aucune résolution)
/// sont rejetées avant d'invoquer le générateur ; un id absent de
/// l'annuaire est simplement ignoré.
pub fn build_response(
    request: &RosterRequest,
    directory: &[Employee],
) -> Result<RosterResponse, RosterError> {
    let period =
        Period::new(request.year, request.month).map_err(RosterError::InvalidPeriod)?;

    let employees: Vec<Employee> = request
        .employees
        .iter()
        .filter_map(|id| directory.iter().find(|e| &e.id == id).cloned())
        .collect();
    if employees.is_empty() {
        return Err(RosterError::NoEmployees);
    }

    let roster = generator::generate(
        period,
        &employees,
        &request.vacation_days,
        &request.leave_days,
        GenerateOptions::default(),
    );

    Ok(RosterResponse {
        year: request.year,
        month: request.month,
        roster,
        days_info: days_info_for(period, request.view),
        colors: colors::merged(&request.colors),
    })
}

/// Descriptif des jours de la période, restreint à la tranche de semaine
/// demandée le cas échéant.
pub fn days_info_for(period: Period, view: ViewMode) -> Vec<DayInfo> {
    period
        .dates()
        .enumerate()
        .filter_map(|(idx, date)| {
            let day = idx as u32 + 1;
            let keep = match view {
                ViewMode::Month => true,
                ViewMode::Week(w) => calendar::week_bucket(day) == w,
            };
            keep.then(|| DayInfo {
                day,
                weekday: calendar::weekday_abbrev(date).to_owned(),
                date,
            })
        })
        .collect()
}
