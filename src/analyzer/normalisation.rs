use log::warn;

use crate::analyzer::format::formater_quantite;
use crate::error::AppError;
use crate::parser::decimales::{parse_decimal, parse_decimal_opt};
use crate::parser::types::{RapportBrut, RapportNormalise};

// ─── Barème ──────────────────────────────────────────────────────────────────

/// Per-robot conversion factor, parsed once per record batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bareme {
    /// `""` ou `"0"`: raw values pass through verbatim, never multiplied.
    Desactive,
    Actif(f64),
}

impl Bareme {
    /// Strict parse. `""` and `"0"` disable scaling, as does any factor
    /// equal to zero; a malformed factor is a configuration error left to
    /// the caller.
    pub fn parse(brut: &str) -> Result<Bareme, AppError> {
        let trimmed = brut.trim();
        if trimmed.is_empty() || trimmed == "0" {
            return Ok(Bareme::Desactive);
        }
        let facteur =
            parse_decimal(trimmed).map_err(|_| AppError::BaremeInvalide(brut.to_string()))?;
        if facteur == 0.0 {
            Ok(Bareme::Desactive)
        } else {
            Ok(Bareme::Actif(facteur))
        }
    }

    /// Tolerant variant: a malformed barème disables scaling with a warning
    /// instead of failing the batch.
    pub fn parse_ou_desactive(brut: &str, robot: &str) -> Bareme {
        Bareme::parse(brut).unwrap_or_else(|e| {
            warn!("{} pour {}, conversion désactivée", e, robot);
            Bareme::Desactive
        })
    }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Applies the barème to every daily value and every monthly total of one
/// raw record. Pure function; a disabled barème is the identity.
///
/// Daily values that are absent, empty or unreadable come out as the empty
/// string: no data for that day, distinct from an executed day rendered
/// `"0"`. Monthly totals keep their raw text when unreadable.
pub fn normaliser(brut: &RapportBrut, bareme: Bareme) -> RapportNormalise {
    let facteur = match bareme {
        Bareme::Desactive => {
            return RapportNormalise {
                agence: brut.agence.clone(),
                nom_programme: brut.nom_programme.clone(),
                cumul_mois: brut.cumul_mois.clone(),
                cumul_mois_n1: brut.cumul_mois_n1.clone(),
                cumul_mois_n2: brut.cumul_mois_n2.clone(),
                cumul_mois_n3: brut.cumul_mois_n3.clone(),
                valeurs_jour: brut.valeurs_jour.clone(),
            };
        }
        Bareme::Actif(facteur) => facteur,
    };

    let valeurs_jour = brut
        .valeurs_jour
        .iter()
        .map(|(cle, valeur)| {
            let sortie = match parse_decimal_opt(valeur) {
                Some(v) => formater_quantite(v * facteur),
                None => String::new(),
            };
            (cle.clone(), sortie)
        })
        .collect();

    RapportNormalise {
        agence: brut.agence.clone(),
        nom_programme: brut.nom_programme.clone(),
        cumul_mois: normaliser_cumul(&brut.cumul_mois, facteur),
        cumul_mois_n1: normaliser_cumul(&brut.cumul_mois_n1, facteur),
        cumul_mois_n2: normaliser_cumul(&brut.cumul_mois_n2, facteur),
        cumul_mois_n3: normaliser_cumul(&brut.cumul_mois_n3, facteur),
        valeurs_jour,
    }
}

fn normaliser_cumul(brut: &str, facteur: f64) -> String {
    match parse_decimal_opt(brut) {
        Some(v) => formater_quantite(v * facteur),
        None => brut.to_string(),
    }
}
