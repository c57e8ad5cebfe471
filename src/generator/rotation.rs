use chrono::NaiveDate;

use super::state::Run;
use crate::model::ShiftCode;

/// Désignation tournante du travailleur de nuit courant.
///
/// `active` pointe dans la liste des postes tournants ; le bloc dure
/// `night_block_len` jours calendaires, décomptés même quand la date est
/// déjà décidée (Vacation/Leave), puis la main passe au suivant.
#[derive(Debug, Default)]
pub(super) struct NightRotation {
    active: Option<usize>,
    remaining: u32,
}

/// Avance la rotation d'un jour et affecte la nuit au travailleur actif.
pub(super) fn advance(run: &mut Run<'_>, date: NaiveDate) {
    if run.flexible.is_empty() {
        return;
    }

    if run.rotation.active.is_none() || run.rotation.remaining == 0 {
        run.rotation.active = pick_next(run);
        run.rotation.remaining = run.opts.night_block_len;
    }

    let Some(pos) = run.rotation.active else {
        return;
    };
    run.rotation.remaining = run.rotation.remaining.saturating_sub(1);

    let i = run.flexible[pos];
    if run.decided(i, date) {
        // Vacation/Leave : pas de nuit ce jour, le bloc avance quand même.
        return;
    }
    run.assign(i, date, ShiftCode::Night);
    run.states[i].nights_this_month += 1;
}

/// Candidat suivant : balayage stable gauche-droite à partir du poste qui
/// suit le travailleur actif, premier employé sous le plafond mensuel.
/// Si tous sont plafonnés, repli déterministe sur le moins chargé en
/// nuits pour ne jamais laisser une date sans couverture.
fn pick_next(run: &Run<'_>) -> Option<usize> {
    let n = run.flexible.len();
    let start = run.rotation.active.map_or(0, |p| (p + 1) % n);

    for k in 0..n {
        let pos = (start + k) % n;
        let i = run.flexible[pos];
        if run.states[i].nights_this_month < run.opts.max_month_nights {
            return Some(pos);
        }
    }

    let mut best: Option<usize> = None;
    for pos in 0..n {
        let nights = run.states[run.flexible[pos]].nights_this_month;
        match best {
            Some(b) if run.states[run.flexible[b]].nights_this_month <= nights => {}
            _ => best = Some(pos),
        }
    }
    best
}
