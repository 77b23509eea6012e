use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One configured variable: canonical name plus optional enrichment and
/// alternate spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub name: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Configuration surface for the catalog. Two partitions exist so that a
/// deployment can extend the stock variable set without editing it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub default_variables: Vec<CatalogEntry>,

    #[serde(default)]
    pub additional_variables: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Registry mapping canonical variable names to aliases, accounting codes
/// and descriptions. Read-only after construction; resolution calls take it
/// by reference so tests can supply synthetic catalogs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    alias_map: HashMap<String, String>,
    entries: HashMap<String, VariableInfo>,
    names: Vec<String>,
}

impl Catalog {
    /// A catalog with no aliases and no codes. Resolution still succeeds
    /// against it, just without enrichment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flattens both configuration partitions into one alias map. A name is
    /// always its own alias; comparisons are case-insensitive.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog = Self::default();
        for entry in config
            .default_variables
            .iter()
            .chain(config.additional_variables.iter())
        {
            catalog.add_entry(entry);
        }
        catalog
    }

    /// Loads a catalog from a JSON configuration file. A missing or corrupt
    /// source degrades to the empty catalog, never fails the run.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Could not read variable catalog {}: {}. Continuing without aliases.",
                    path.display(),
                    e
                );
                return Self::empty();
            }
        };

        match serde_json::from_str::<CatalogConfig>(&text) {
            Ok(config) => Self::from_config(&config),
            Err(e) => {
                warn!(
                    "Invalid variable catalog {}: {}. Continuing without aliases.",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// The stock catalog: the six variables every extraction asks for, with
    /// the accent/spacing spellings models have historically produced.
    pub fn builtin() -> Self {
        let config = CatalogConfig {
            default_variables: vec![
                entry(
                    "actif_total",
                    "Total de l'actif du bilan",
                    &["actiftotal", "actif total", "total actif"],
                ),
                entry(
                    "passif_total",
                    "Total du passif du bilan",
                    &["passiftotal", "passif total", "total passif"],
                ),
                entry(
                    "capitaux_propres",
                    "Capitaux propres",
                    &["capitauxpropres", "capitaux propres"],
                ),
                entry(
                    "resultat_net",
                    "Résultat net de l'exercice",
                    &[
                        "résultat_net",
                        "résultatnet",
                        "resultatnet",
                        "résultat net",
                        "resultat net",
                    ],
                ),
                entry(
                    "chiffre_affaires",
                    "Chiffre d'affaires",
                    &[
                        "chiffreaffaires",
                        "chiffre affaires",
                        "chiffre d'affaires",
                        "chiffre_d_affaires",
                    ],
                ),
                entry("dettes", "Dettes totales", &["dette"]),
            ],
            additional_variables: vec![],
        };
        Self::from_config(&config)
    }

    fn add_entry(&mut self, entry: &CatalogEntry) {
        if !self.entries.contains_key(&entry.name) {
            self.names.push(entry.name.clone());
        }
        self.alias_map
            .insert(entry.name.to_lowercase(), entry.name.clone());
        for alias in &entry.aliases {
            self.alias_map
                .insert(alias.to_lowercase(), entry.name.clone());
        }
        self.entries.insert(
            entry.name.clone(),
            VariableInfo {
                code: entry.code.clone(),
                description: entry.description.clone(),
            },
        );
    }

    /// Resolves a raw key to its canonical name, case-insensitively.
    pub fn resolve_name(&self, key: &str) -> Option<&str> {
        self.alias_map.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Code/description enrichment for a canonical name.
    pub fn info(&self, name: &str) -> Option<&VariableInfo> {
        self.entries.get(name)
    }

    /// Canonical names in configuration order, for prompt construction.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(name: &str, description: &str, aliases: &[&str]) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        code: None,
        description: Some(description.to_string()),
        aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
    }
}
