#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use staffflow::{
    build_response, io,
    model::{Employee, EmployeeId, Position},
    request::{RosterRequest, ViewMode},
    storage::{Directory, JsonDirectory},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning hôtelier (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'annuaire d'employés
    #[arg(long, global = true, default_value = "employees.json")]
    directory: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un employé à l'annuaire
    AddEmployee {
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: String,
        /// GSC, GSA, AGSM, "Welcome Agent"...
        #[arg(long, default_value = "GSC")]
        position: String,
        /// Groupe d'affichage (optionnel)
        #[arg(long)]
        group: Option<String>,
    },

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Lister l'annuaire
    ListEmployees,

    /// Mettre à jour un employé de l'annuaire (champs omis inchangés)
    UpdateEmployee {
        #[arg(long)]
        id: String,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        /// GSC, GSA, AGSM, "Welcome Agent"...
        #[arg(long)]
        position: Option<String>,
        /// Chaîne vide pour sortir l'employé de son groupe
        #[arg(long)]
        group: Option<String>,
    },

    /// Retirer un employé de l'annuaire
    RemoveEmployee {
        #[arg(long)]
        id: String,
    },

    /// Générer le planning d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Liste "id1,id2,..." ; tout l'annuaire si absent
        #[arg(long)]
        employees: Option<String>,
        /// Corps de requête JSON complet (congés, absences, couleurs...) ;
        /// prime sur les autres arguments
        #[arg(long)]
        request: Option<String>,
        /// Restreindre l'affichage à une tranche de semaine (0-indexée)
        #[arg(long)]
        week: Option<u32>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonDirectory::open(&cli.directory)?;
    let mut employees = storage.load_or_default();

    match cli.cmd {
        Commands::AddEmployee {
            last_name,
            first_name,
            position,
            group,
        } => {
            let mut emp = Employee::new(last_name, first_name, Position::from(position));
            emp.group = group;
            println!("{}", emp.id.as_str());
            employees.push(emp);
            storage.save(&employees)?;
        }
        Commands::ImportEmployees { csv } => {
            let imported = io::import_employees_csv(csv)?;
            println!("imported {} employee(s)", imported.len());
            employees.extend(imported);
            storage.save(&employees)?;
        }
        Commands::ListEmployees => {
            for emp in &employees {
                println!(
                    "{} | {} {} | {} | {}",
                    emp.id.as_str(),
                    emp.last_name,
                    emp.first_name,
                    emp.position.as_str(),
                    emp.group.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::UpdateEmployee {
            id,
            last_name,
            first_name,
            position,
            group,
        } => {
            let Some(emp) = employees.iter_mut().find(|e| e.id.as_str() == id) else {
                bail!("unknown employee id: {id}");
            };
            if let Some(v) = last_name {
                emp.last_name = v;
            }
            if let Some(v) = first_name {
                emp.first_name = v;
            }
            if let Some(v) = position {
                emp.position = Position::from(v);
            }
            if let Some(v) = group {
                emp.group = (!v.is_empty()).then_some(v);
            }
            storage.save(&employees)?;
        }
        Commands::RemoveEmployee { id } => {
            let before = employees.len();
            employees.retain(|e| e.id.as_str() != id);
            if employees.len() == before {
                bail!("unknown employee id: {id}");
            }
            storage.save(&employees)?;
        }
        Commands::Generate {
            year,
            month,
            employees: selected,
            request,
            week,
            out_json,
            out_csv,
        } => {
            let request = match request {
                Some(path) => {
                    let data = std::fs::read(&path)?;
                    serde_json::from_slice::<RosterRequest>(&data)?
                }
                None => {
                    let ids: Vec<EmployeeId> = match selected {
                        Some(list) => list
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(EmployeeId::new)
                            .collect(),
                        None => employees.iter().map(|e| e.id.clone()).collect(),
                    };
                    RosterRequest {
                        year,
                        month,
                        employees: ids,
                        vacation_days: Default::default(),
                        leave_days: Default::default(),
                        view: week.map_or(ViewMode::Month, ViewMode::Week),
                        colors: Default::default(),
                    }
                }
            };

            let response = build_response(&request, &employees)?;

            if let Some(path) = out_json {
                io::export_response_json(path, &response)?;
            }
            if let Some(path) = out_csv {
                io::export_roster_csv(path, &response, &employees)?;
            }

            // impression compacte : une ligne par employé planifié
            for (id, days) in response.roster.iter() {
                let name = employees
                    .iter()
                    .find(|e| &e.id == id)
                    .map(|e| e.last_name.as_str())
                    .unwrap_or("-");
                let cells: Vec<String> = response
                    .days_info
                    .iter()
                    .map(|d| {
                        days.get(&d.date)
                            .map(|c| c.code())
                            .unwrap_or_default()
                    })
                    .collect();
                println!("{} | {}", name, cells.join(" "));
            }
        }
    }

    Ok(())
}
