#![forbid(unsafe_code)]
//! StaffFlow — génération de planning mensuel d'équipe hôtelière (sans BD).
//!
//! - Balayage jour par jour sous contraintes : repos minimal, rotation de
//!   nuit par blocs, repos hebdomadaires échelonnés, plafonds de jours
//!   consécutifs et hebdomadaires.
//! - Déterministe : mêmes entrées (même ordre), même planning.
//! - Stockage fichiers (JSON/CSV) ; l'affichage (couleurs, tranches de
//!   semaine) reste entièrement hors du générateur.

pub mod calendar;
pub mod colors;
pub mod generator;
pub mod io;
pub mod model;
pub mod request;
pub mod storage;

pub use colors::{default_colors, ShiftColor};
pub use generator::{generate, GenerateOptions};
pub use model::{Employee, EmployeeId, ExclusionMap, Period, Position, Roster, ShiftCode};
pub use request::{
    build_response, days_info_for, DayInfo, RosterError, RosterRequest, RosterResponse, ViewMode,
};
pub use storage::{Directory, JsonDirectory};
