use chrono::NaiveDate;

use super::state::Run;
use crate::model::ShiftCode;

/// Passe corrective après remplissage du mois. Deux réparations :
/// comblement d'une cellule restée vide (défaut du rôle) et appariement
/// des repos isolés en paires consécutives. Les jours en bord de mois et
/// les voisins Vacation/Leave sont exemptés d'appariement ; on ne touche
/// jamais une nuit pour préserver la continuité des blocs.
///
/// Retourne le nombre de réparations appliquées.
pub(super) fn repair(run: &mut Run<'_>) -> u32 {
    let dates: Vec<NaiveDate> = run.period.dates().collect();
    let mut repairs = 0u32;

    for i in 0..run.employees.len() {
        for &date in &dates {
            if run.code(i, date).is_none() {
                let default = if run.employees[i].position.is_fixed_nine_am() {
                    ShiftCode::NineAm
                } else {
                    ShiftCode::Afternoon
                };
                run.overwrite(i, date, default);
                repairs += 1;
            }
        }

        for (k, &date) in dates.iter().enumerate() {
            // Bords de mois exemptés : on ne regarde jamais le mois voisin.
            if k == 0 || k + 1 == dates.len() {
                continue;
            }
            if run.code(i, date) != Some(ShiftCode::DayOff) {
                continue;
            }
            let prev_off = run.code(i, dates[k - 1]).is_some_and(|c| c.is_off());
            let next_off = run.code(i, dates[k + 1]).is_some_and(|c| c.is_off());
            if prev_off || next_off {
                continue;
            }
            // Repos isolé : on convertit de préférence le lendemain.
            if convertible(run.code(i, dates[k + 1])) {
                run.overwrite(i, dates[k + 1], ShiftCode::DayOff);
                repairs += 1;
            } else if convertible(run.code(i, dates[k - 1])) {
                run.overwrite(i, dates[k - 1], ShiftCode::DayOff);
                repairs += 1;
            }
        }
    }

    repairs
}

fn convertible(code: Option<ShiftCode>) -> bool {
    code.is_some_and(|c| c.is_working() && c != ShiftCode::Night)
}
