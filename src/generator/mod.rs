//! Générateur de planning : balayage chronologique jour par jour sous
//! contraintes (exclusions, postes fixes, rotation de nuit, repos hebdo
//! échelonnés, alternance matin/après-midi), puis passe de normalisation.
//!
//! Calcul pur : aucune entrée n'est modifiée, tout l'état transitoire est
//! reconstruit à chaque appel et jeté ensuite. Pas de chemin d'erreur :
//! quand les contraintes se contredisent, on retombe sur un choix par
//! défaut déterministe plutôt que d'échouer.

mod normalize;
mod rotation;
mod state;
mod sweep;

use crate::model::{Employee, ExclusionMap, Period, Roster};

use state::Run;

/// Paramètres de génération
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Jours travaillés consécutifs avant repos forcé.
    pub max_consecutive_days: u32,
    /// Jours travaillés par semaine ISO (remise à zéro le lundi).
    pub max_week_workdays: u32,
    /// Longueur d'un bloc de nuits avant passage au suivant.
    pub night_block_len: u32,
    /// Plafond de nuits par employé et par mois.
    pub max_month_nights: u32,
    /// Part maximale de l'effectif en repos planifié le même jour.
    pub max_off_ratio: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_consecutive_days: 5,
            max_week_workdays: 5,
            night_block_len: 5,
            max_month_nights: 5,
            max_off_ratio: 1.0 / 3.0,
        }
    }
}

/// Génère le planning complet du mois pour `employees`.
///
/// Chaque (employé, date) de la période reçoit exactement un code.
/// Les dates présentes dans `vacations`/`leaves` priment sur tout le
/// reste (Vacation avant Leave si une date figure dans les deux).
/// Sortie déterministe : même ordre d'entrée, même planning.
pub fn generate(
    period: Period,
    employees: &[Employee],
    vacations: &ExclusionMap,
    leaves: &ExclusionMap,
    opts: GenerateOptions,
) -> Roster {
    tracing::debug!(
        year = period.year(),
        month = period.month(),
        employees = employees.len(),
        "génération du planning"
    );

    let mut run = Run::new(period, employees, vacations, leaves, opts);
    sweep::run(&mut run);
    let repairs = normalize::repair(&mut run);
    if repairs > 0 {
        tracing::info!(repairs, "normalisation : cellules réparées");
    }
    run.into_roster()
}
