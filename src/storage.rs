use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::model::Employee;

/// Annuaire d'employés : collaborateur externe du générateur, réduit ici
/// à un chargement/sauvegarde de liste.
pub trait Directory {
    fn load(&self) -> anyhow::Result<Vec<Employee>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, employees: &[Employee]) -> anyhow::Result<()>;
}

pub struct JsonDirectory {
    path: PathBuf,
}

impl JsonDirectory {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Annuaire vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> Vec<Employee> {
        self.load().unwrap_or_default()
    }
}

impl Directory for JsonDirectory {
    fn load(&self) -> anyhow::Result<Vec<Employee>> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let employees: Vec<Employee> =
            serde_json::from_slice(&data).with_context(|| "parsing employees.json")?;
        Ok(employees)
    }

    fn save(&self, employees: &[Employee]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(employees)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
