use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::model::{Employee, EmployeeId, Position};
use crate::request::RosterResponse;

/// Import d'employés depuis CSV : colonnes `last_name,first_name,
/// position[,group]`, casse et espaces d'en-tête indifférents
/// ("LAST NAME", "Last Name"...). Poste absent : GSC par défaut.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();

    let last_i = find_column(&headers, "last_name").context("missing last_name column")?;
    let first_i = find_column(&headers, "first_name").context("missing first_name column")?;
    let pos_i = find_column(&headers, "position");
    let group_i = find_column(&headers, "group");

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let last = rec.get(last_i).map(str::trim).unwrap_or_default();
        let first = rec.get(first_i).map(str::trim).unwrap_or_default();
        if last.is_empty() || first.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let position = pos_i
            .and_then(|i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("GSC");
        let group = group_i
            .and_then(|i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        out.push(Employee {
            id: EmployeeId::random(),
            last_name: last.to_owned(),
            first_name: first.to_owned(),
            position: Position::from(position.to_owned()),
            group,
        });
    }
    Ok(out)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().replace(' ', "_").eq_ignore_ascii_case(name))
}

/// Export JSON de la réponse (jolie mise en forme)
pub fn export_response_json<P: AsRef<Path>>(
    path: P,
    response: &RosterResponse,
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(response)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV en grille : deux lignes d'en-tête (numéros de jour, jours
/// de semaine), puis une ligne par employé triée par (groupe, nom) avec
/// une ligne de titre à chaque changement de groupe — la disposition de
/// la grille tableur de référence, sans mise en forme.
pub fn export_roster_csv<P: AsRef<Path>>(
    path: P,
    response: &RosterResponse,
    employees: &[Employee],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    let mut days = itoa::Buffer::new();

    let mut header: Vec<String> = vec!["LAST NAME".into(), "FIRST NAME".into(), "POSITION".into()];
    header.extend(response.days_info.iter().map(|d| days.format(d.day).to_owned()));
    w.write_record(&header)?;

    let mut weekdays: Vec<String> = vec![String::new(); 3];
    weekdays.extend(response.days_info.iter().map(|d| d.weekday.clone()));
    w.write_record(&weekdays)?;

    let mut sorted: Vec<&Employee> = employees.iter().collect();
    sorted.sort_by(|a, b| {
        (a.group.as_deref().unwrap_or(""), &a.last_name)
            .cmp(&(b.group.as_deref().unwrap_or(""), &b.last_name))
    });

    let mut current_group: Option<&str> = None;
    for emp in sorted {
        if let Some(group) = emp.group.as_deref() {
            if current_group != Some(group) {
                current_group = Some(group);
                let mut title = vec![group.to_owned()];
                title.resize(header.len(), String::new());
                w.write_record(&title)?;
            }
        }
        let mut row = vec![
            emp.last_name.clone(),
            emp.first_name.clone(),
            emp.position.as_str().to_owned(),
        ];
        let cells = response.roster.days_of(&emp.id);
        row.extend(response.days_info.iter().map(|d| {
            cells
                .and_then(|m| m.get(&d.date))
                .map(|c| c.code())
                .unwrap_or_default()
        }));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
