use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Calendar month covered by the day-keyed reporting fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodeRapport {
    pub annee: i32,
    pub mois: u32,
}

impl PeriodeRapport {
    /// Month in progress, in local time.
    pub fn courante() -> Self {
        let aujourd_hui = Local::now().date_naive();
        PeriodeRapport {
            annee: aujourd_hui.year(),
            mois: aujourd_hui.month(),
        }
    }

    /// Day key as stored in the reporting documents: `"01/06/2024"`.
    /// Single construction point for the `DD/MM/YYYY` convention.
    pub fn cle_jour(&self, jour: u32) -> String {
        format!("{:02}/{:02}/{:04}", jour, self.mois, self.annee)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingConfig {
    /// Program name of the pseudo-robot meaning "every robot in scope".
    pub selecteur_global: String,
    pub periode: PeriodeRapport,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        ReportingConfig {
            selecteur_global: "TOUT".to_string(),
            periode: PeriodeRapport::courante(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cle_jour_padding() {
        let periode = PeriodeRapport { annee: 2024, mois: 6 };
        assert_eq!(periode.cle_jour(1), "01/06/2024");
        assert_eq!(periode.cle_jour(31), "31/06/2024");
    }

    #[test]
    fn test_cle_jour_mois_deux_chiffres() {
        let periode = PeriodeRapport { annee: 2025, mois: 11 };
        assert_eq!(periode.cle_jour(9), "09/11/2025");
    }

    #[test]
    fn test_config_par_defaut() {
        let config = ReportingConfig::default();
        assert_eq!(config.selecteur_global, "TOUT");
        assert!(config.periode.mois >= 1 && config.periode.mois <= 12);
    }
}
