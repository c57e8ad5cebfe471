use chrono::NaiveDate;

use super::{rotation, state::Run};
use crate::calendar;
use crate::model::ShiftCode;

/// Balayage chronologique : l'état validé au jour J conditionne le jour
/// J+1. L'ordre des passes par jour suit la politique d'affectation :
/// exclusions, postes fixes, nuit, repos, puis matin/après-midi.
pub(super) fn run(run: &mut Run<'_>) {
    let dates: Vec<NaiveDate> = run.period.dates().collect();

    for (idx, &date) in dates.iter().enumerate() {
        let day = idx as u32 + 1;

        // Remise à zéro du quota hebdomadaire le lundi (semaine ISO).
        if calendar::is_monday(date) {
            for st in &mut run.states {
                st.week_workdays = 0;
            }
        }
        // Bascule de préférence à chaque changement de tranche de semaine.
        if day > 1 && calendar::week_bucket(day) != calendar::week_bucket(day - 1) {
            for st in &mut run.states {
                st.flip_preference();
            }
        }

        apply_exclusions(run, date);
        assign_fixed(run, date);
        rotation::advance(run, date);
        assign_days_off(run, date);
        assign_day_shifts(run, date);
    }
}

/// Vacation/Leave priment sur tout ; Vacation gagne si une date figure
/// dans les deux.
fn apply_exclusions(run: &mut Run<'_>, date: NaiveDate) {
    for i in 0..run.employees.len() {
        if run.on_vacation(i, date) {
            run.assign(i, date, ShiftCode::Vacation);
        } else if run.on_leave(i, date) {
            run.assign(i, date, ShiftCode::Leave);
        }
    }
}

/// Postes fixes : 9h tous les jours travaillés, repos sur leur paire de
/// jours échelonnée ou quand un plafond est atteint.
fn assign_fixed(run: &mut Run<'_>, date: NaiveDate) {
    let weekday = calendar::weekday_index(date);
    for k in 0..run.fixed.len() {
        let i = run.fixed[k];
        if run.decided(i, date) {
            continue;
        }
        let rest = run.states[i].must_rest(&run.opts)
            || (run.states[i].pattern_rest_day(weekday) && run.offs_on(date) < run.off_cap());
        if rest {
            run.assign(i, date, ShiftCode::DayOff);
        } else {
            run.assign(i, date, ShiftCode::NineAm);
        }
    }
}

/// Repos des postes tournants : plafonds d'abord (ignorent la borne de
/// repos simultanés), puis la paire hebdomadaire échelonnée, bornée.
fn assign_days_off(run: &mut Run<'_>, date: NaiveDate) {
    let weekday = calendar::weekday_index(date);
    for k in 0..run.flexible.len() {
        let i = run.flexible[k];
        if run.decided(i, date) {
            continue;
        }
        if run.states[i].must_rest(&run.opts) {
            run.assign(i, date, ShiftCode::DayOff);
        } else if run.states[i].pattern_rest_day(weekday) && run.offs_on(date) < run.off_cap() {
            run.assign(i, date, ShiftCode::DayOff);
        }
    }
}

/// Matin/après-midi pour le reste des postes tournants. La règle de
/// repos minimal interdit d'inverser le type de vacation d'un jour sur
/// l'autre : on maintient le type de la veille, la préférence basculée
/// ne prenant effet qu'après un jour non travaillé. Une sortie de bloc
/// de nuit enchaîne uniquement sur l'après-midi.
fn assign_day_shifts(run: &mut Run<'_>, date: NaiveDate) {
    for k in 0..run.flexible.len() {
        let i = run.flexible[k];
        if run.decided(i, date) {
            continue;
        }
        let shift = match run.states[i].last_shift {
            Some(ShiftCode::Morning) => ShiftCode::Morning,
            Some(ShiftCode::Afternoon) => ShiftCode::Afternoon,
            Some(ShiftCode::Night) => ShiftCode::Afternoon,
            _ => run.states[i].preference,
        };
        run.assign(i, date, shift);
    }
}
