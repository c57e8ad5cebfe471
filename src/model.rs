use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar;

/// Dates exclues par employé (congés ou absences), fournies par l'appelant.
pub type ExclusionMap =
    std::collections::HashMap<EmployeeId, std::collections::BTreeSet<NaiveDate>>;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Poste occupé. La classification se fait par correspondance exacte
/// sur le libellé : AGSM et Welcome Agent sont des postes fixes (9h),
/// tout le reste tourne (matin/après-midi/nuit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Position {
    Gsc,
    Gsa,
    Agsm,
    WelcomeAgent,
    Other(String),
}

impl Position {
    /// Poste à horaire fixe (prise de service 9h tous les jours travaillés).
    pub fn is_fixed_nine_am(&self) -> bool {
        matches!(self, Position::Agsm | Position::WelcomeAgent)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Position::Gsc => "GSC",
            Position::Gsa => "GSA",
            Position::Agsm => "AGSM",
            Position::WelcomeAgent => "Welcome Agent",
            Position::Other(s) => s,
        }
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        match s.as_str() {
            "GSC" => Position::Gsc,
            "GSA" => Position::Gsa,
            "AGSM" => Position::Agsm,
            "Welcome Agent" => Position::WelcomeAgent,
            _ => Position::Other(s),
        }
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.as_str().to_owned()
    }
}

/// Membre du personnel (immuable pendant une génération)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    pub position: Position,
    /// Groupe d'affichage uniquement (ex. "NAFSIKA", "WELCOME AGENTS").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Employee {
    pub fn new<L: Into<String>, F: Into<String>>(
        last_name: L,
        first_name: F,
        position: Position,
    ) -> Self {
        Self {
            id: EmployeeId::random(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            position,
            group: None,
        }
    }
}

/// Code de vacation d'une cellule (employé, date).
///
/// Sérialisé sous forme de code court : "7", "15", "23", "9", "0", "V",
/// "L". `FixedStart` couvre les heures de prise de service additionnelles
/// ("8", "11", "12", "16") présentes dans la table de couleurs ; le
/// générateur ne les produit jamais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ShiftCode {
    Morning,
    Afternoon,
    Night,
    NineAm,
    DayOff,
    Vacation,
    Leave,
    FixedStart(u8),
}

impl ShiftCode {
    pub fn code(&self) -> String {
        match self {
            ShiftCode::Morning => "7".to_owned(),
            ShiftCode::Afternoon => "15".to_owned(),
            ShiftCode::Night => "23".to_owned(),
            ShiftCode::NineAm => "9".to_owned(),
            ShiftCode::DayOff => "0".to_owned(),
            ShiftCode::Vacation => "V".to_owned(),
            ShiftCode::Leave => "L".to_owned(),
            ShiftCode::FixedStart(h) => h.to_string(),
        }
    }

    /// Jour travaillé (par opposition à repos/congé/absence).
    pub fn is_working(&self) -> bool {
        !self.is_off()
    }

    pub fn is_off(&self) -> bool {
        matches!(
            self,
            ShiftCode::DayOff | ShiftCode::Vacation | ShiftCode::Leave
        )
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl std::str::FromStr for ShiftCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7" => Ok(ShiftCode::Morning),
            "15" => Ok(ShiftCode::Afternoon),
            "23" => Ok(ShiftCode::Night),
            "9" => Ok(ShiftCode::NineAm),
            "0" => Ok(ShiftCode::DayOff),
            "V" => Ok(ShiftCode::Vacation),
            "L" => Ok(ShiftCode::Leave),
            other => match other.parse::<u8>() {
                Ok(h) if h < 24 => Ok(ShiftCode::FixedStart(h)),
                _ => Err(format!("unknown shift code: {other}")),
            },
        }
    }
}

impl From<ShiftCode> for String {
    fn from(c: ShiftCode) -> Self {
        c.code()
    }
}

impl TryFrom<String> for ShiftCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Période de planification : un mois calendaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
    first: NaiveDate,
    num_days: u32,
}

impl Period {
    /// Construit une période en validant (année, mois).
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| format!("invalid period: {year}-{month}"))?;
        let num_days = calendar::days_in_month(year, month)
            .ok_or_else(|| format!("invalid period: {year}-{month}"))?;
        Ok(Self {
            year,
            month,
            first,
            num_days,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }
    pub fn num_days(&self) -> u32 {
        self.num_days
    }
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Date du jour `day` (1-indexé) du mois.
    pub fn date_of(&self, day: u32) -> NaiveDate {
        self.first + Duration::days(i64::from(day) - 1)
    }

    /// Dates du mois, dans l'ordre chronologique.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.num_days).map(|d| self.date_of(d))
    }
}

/// Planning complet : employé -> (date -> code de vacation).
///
/// Invariant en sortie de génération : chaque (employé, date) de la
/// période porte exactement un code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    assignments:
        std::collections::BTreeMap<EmployeeId, std::collections::BTreeMap<NaiveDate, ShiftCode>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: &EmployeeId, date: NaiveDate, code: ShiftCode) {
        self.assignments
            .entry(id.clone())
            .or_default()
            .insert(date, code);
    }

    pub fn shift_for(&self, id: &EmployeeId, date: NaiveDate) -> Option<ShiftCode> {
        self.assignments.get(id).and_then(|m| m.get(&date)).copied()
    }

    pub fn days_of(
        &self,
        id: &EmployeeId,
    ) -> Option<&std::collections::BTreeMap<NaiveDate, ShiftCode>> {
        self.assignments.get(id)
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<
        Item = (
            &EmployeeId,
            &std::collections::BTreeMap<NaiveDate, ShiftCode>,
        ),
    > {
        self.assignments.iter()
    }
}
