use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ─── Reporting ───────────────────────────────────────────────────────────────

/// One reporting row as stored per robot per agency for the current month,
/// straight out of the document database. All numeric fields are
/// comma-decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportBrut {
    pub agence: String,
    pub nom_programme: String,
    /// Nombre d'unités depuis le début du mois.
    #[serde(default)]
    pub cumul_mois: String,
    #[serde(default)]
    pub cumul_mois_n1: String,
    #[serde(default)]
    pub cumul_mois_n2: String,
    #[serde(default)]
    pub cumul_mois_n3: String,
    /// One entry per calendar day, keyed `"DD/MM/YYYY"`. An absent or empty
    /// entry means no data recorded that day, distinct from `"0"`.
    #[serde(flatten)]
    pub valeurs_jour: HashMap<String, String>,
}

impl RapportBrut {
    /// Identity key matching the robot's external name.
    pub fn nom_robot(&self) -> String {
        format!("{}_{}", self.agence, self.nom_programme)
    }

    /// Decode a raw document handed over by the database layer.
    pub fn depuis_document(doc: serde_json::Value) -> Result<Self, AppError> {
        Ok(serde_json::from_value(doc)?)
    }
}

/// Same shape as [`RapportBrut`], every numeric field already multiplied by
/// the robot's barème. A distinct type so a record cannot be scaled twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportNormalise {
    pub agence: String,
    pub nom_programme: String,
    pub cumul_mois: String,
    pub cumul_mois_n1: String,
    pub cumul_mois_n2: String,
    pub cumul_mois_n3: String,
    #[serde(flatten)]
    pub valeurs_jour: HashMap<String, String>,
}

// ─── Robots ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescripteurRobot {
    pub nom_programme: String,
    pub id_agence: String,
    /// `"temps"` (temps gagné) ou `"autre"` (nombre d'exécutions).
    /// Free string on the wire, validated at bucketing time.
    #[serde(default)]
    pub type_gain: String,
    /// Multiplier converting raw unit counts into the display unit.
    /// `""` or `"0"` disables scaling.
    #[serde(default)]
    pub bareme: String,
}

impl DescripteurRobot {
    /// External robot name, `"{agence}_{programme}"`.
    pub fn nom_complet(&self) -> String {
        format!("{}_{}", self.id_agence, self.nom_programme)
    }
}

// ─── Évolutions ──────────────────────────────────────────────────────────────

/// A user-submitted change request tied to a robot, tracked with a status
/// code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneEvolution {
    pub robot: String,
    pub intitule: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub date_soumission: String,
}

pub fn statut_libelle(code: &str) -> &'static str {
    match code.trim() {
        "1" => "Soumise",
        "2" => "À l'étude",
        "3" => "Validée",
        "4" => "Refusée",
        _ => "Inconnu",
    }
}
