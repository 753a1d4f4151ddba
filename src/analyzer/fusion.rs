use serde::Serialize;

use crate::config::PeriodeRapport;
use crate::parser::decimales::parse_decimal_opt;
use crate::parser::types::RapportNormalise;

/// Number of day slots in a merged series; a reporting month is padded to 31.
pub const JOURS_MAX: usize = 31;

/// Merged output for one gain-type bucket. Built fresh per aggregation,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulFusionne {
    /// `serie_jours[0]` is day 1 of the period.
    pub serie_jours: [f64; JOURS_MAX],
    pub cumul_mois: f64,
    pub cumul_mois_n1: f64,
    pub cumul_mois_n2: f64,
    pub cumul_mois_n3: f64,
}

/// Sums same-day values across records into a single 31-slot series, and the
/// four monthly totals the same way. A field that is absent, empty or
/// unreadable contributes zero: once merging begins, "no data" and a zero
/// day are equivalent. An empty input yields the all-zero aggregate.
///
/// Pure sum, so record order never affects the output.
pub fn fusionner(rapports: &[RapportNormalise], periode: &PeriodeRapport) -> CumulFusionne {
    let mut cumul = CumulFusionne::default();

    for jour in 1..=JOURS_MAX {
        let cle = periode.cle_jour(jour as u32);
        cumul.serie_jours[jour - 1] = rapports
            .iter()
            .filter_map(|rapport| rapport.valeurs_jour.get(&cle))
            .filter_map(|valeur| parse_decimal_opt(valeur))
            .sum();
    }

    for rapport in rapports {
        cumul.cumul_mois += parse_decimal_opt(&rapport.cumul_mois).unwrap_or(0.0);
        cumul.cumul_mois_n1 += parse_decimal_opt(&rapport.cumul_mois_n1).unwrap_or(0.0);
        cumul.cumul_mois_n2 += parse_decimal_opt(&rapport.cumul_mois_n2).unwrap_or(0.0);
        cumul.cumul_mois_n3 += parse_decimal_opt(&rapport.cumul_mois_n3).unwrap_or(0.0);
    }

    cumul
}
