use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{rotation::NightRotation, GenerateOptions};
use crate::model::{Employee, ExclusionMap, Period, Roster, ShiftCode};

/// État d'ordonnancement transitoire d'un employé, reconstruit à chaque
/// génération et jeté ensuite.
#[derive(Debug)]
pub(super) struct EmployeeState {
    pub consecutive_days: u32,
    pub week_workdays: u32,
    pub nights_this_month: u32,
    pub last_shift: Option<ShiftCode>,
    /// Type de vacation courant (Morning ou Afternoon), basculé à chaque
    /// changement de tranche de semaine.
    pub preference: ShiftCode,
    /// Paire de jours de repos hebdomadaires, index lundi = 0.
    pub off_pattern: [u32; 2],
}

impl EmployeeState {
    /// Dérive l'état initial de la position dans la liste d'entrée :
    /// repos échelonnés modulo 7, préférence alternée par parité.
    pub fn for_index(index: usize) -> Self {
        let anchor = (2 * index as u32) % 7;
        Self {
            consecutive_days: 0,
            week_workdays: 0,
            nights_this_month: 0,
            last_shift: None,
            preference: if index % 2 == 0 {
                ShiftCode::Morning
            } else {
                ShiftCode::Afternoon
            },
            off_pattern: [anchor, (anchor + 1) % 7],
        }
    }

    /// Repos forcé : plafond de jours consécutifs ou quota hebdomadaire.
    pub fn must_rest(&self, opts: &GenerateOptions) -> bool {
        self.consecutive_days >= opts.max_consecutive_days
            || self.week_workdays >= opts.max_week_workdays
    }

    pub fn pattern_rest_day(&self, weekday: u32) -> bool {
        self.off_pattern.contains(&weekday)
    }

    pub fn flip_preference(&mut self) {
        self.preference = match self.preference {
            ShiftCode::Morning => ShiftCode::Afternoon,
            _ => ShiftCode::Morning,
        };
    }
}

/// Arène d'une génération : entrées empruntées, état par employé,
/// table en construction indexée comme la liste d'entrée.
pub(super) struct Run<'a> {
    pub period: Period,
    pub employees: &'a [Employee],
    pub opts: GenerateOptions,
    pub states: Vec<EmployeeState>,
    /// Indices des postes fixes 9h, dans l'ordre d'entrée.
    pub fixed: Vec<usize>,
    /// Indices des postes tournants, dans l'ordre d'entrée.
    pub flexible: Vec<usize>,
    pub rotation: NightRotation,
    exclusions: Vec<Exclusions<'a>>,
    table: Vec<BTreeMap<NaiveDate, ShiftCode>>,
}

struct Exclusions<'a> {
    vacations: Option<&'a std::collections::BTreeSet<NaiveDate>>,
    leaves: Option<&'a std::collections::BTreeSet<NaiveDate>>,
}

impl<'a> Run<'a> {
    pub fn new(
        period: Period,
        employees: &'a [Employee],
        vacations: &'a ExclusionMap,
        leaves: &'a ExclusionMap,
        opts: GenerateOptions,
    ) -> Self {
        let mut fixed = Vec::new();
        let mut flexible = Vec::new();
        for (i, emp) in employees.iter().enumerate() {
            if emp.position.is_fixed_nine_am() {
                fixed.push(i);
            } else {
                flexible.push(i);
            }
        }
        let exclusions = employees
            .iter()
            .map(|emp| Exclusions {
                vacations: vacations.get(&emp.id),
                leaves: leaves.get(&emp.id),
            })
            .collect();
        Self {
            period,
            employees,
            opts,
            states: (0..employees.len()).map(EmployeeState::for_index).collect(),
            fixed,
            flexible,
            rotation: NightRotation::default(),
            exclusions,
            table: vec![BTreeMap::new(); employees.len()],
        }
    }

    pub fn on_vacation(&self, i: usize, date: NaiveDate) -> bool {
        self.exclusions[i]
            .vacations
            .is_some_and(|set| set.contains(&date))
    }

    pub fn on_leave(&self, i: usize, date: NaiveDate) -> bool {
        self.exclusions[i]
            .leaves
            .is_some_and(|set| set.contains(&date))
    }

    pub fn code(&self, i: usize, date: NaiveDate) -> Option<ShiftCode> {
        self.table[i].get(&date).copied()
    }

    pub fn decided(&self, i: usize, date: NaiveDate) -> bool {
        self.table[i].contains_key(&date)
    }

    /// Affecte un code en tenant les compteurs à jour : un jour travaillé
    /// incrémente les compteurs, un repos/congé remet le consécutif à zéro.
    pub fn assign(&mut self, i: usize, date: NaiveDate, code: ShiftCode) {
        let st = &mut self.states[i];
        if code.is_working() {
            st.consecutive_days += 1;
            st.week_workdays += 1;
        } else {
            st.consecutive_days = 0;
        }
        st.last_shift = Some(code);
        self.table[i].insert(date, code);
    }

    /// Écriture brute pour la passe de normalisation (compteurs figés).
    pub fn overwrite(&mut self, i: usize, date: NaiveDate, code: ShiftCode) {
        self.table[i].insert(date, code);
    }

    /// Nombre de repos planifiés ce jour, tous employés confondus.
    pub fn offs_on(&self, date: NaiveDate) -> usize {
        self.table
            .iter()
            .filter(|days| days.get(&date) == Some(&ShiftCode::DayOff))
            .count()
    }

    /// Plafond de repos simultanés dérivé de `max_off_ratio` (minimum 1).
    pub fn off_cap(&self) -> usize {
        let n = self.employees.len() as f64;
        ((n * self.opts.max_off_ratio).ceil() as usize).max(1)
    }

    pub fn into_roster(self) -> Roster {
        let mut roster = Roster::new();
        for (emp, days) in self.employees.iter().zip(self.table) {
            for (date, code) in days {
                roster.set(&emp.id, date, code);
            }
        }
        roster
    }
}
