use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use log::warn;
use serde::Serialize;

use crate::analyzer::fusion::{fusionner, CumulFusionne};
use crate::analyzer::normalisation::{normaliser, Bareme};
use crate::analyzer::ventilation::ventiler;
use crate::config::ReportingConfig;
use crate::error::AppError;
use crate::parser::types::{DescripteurRobot, LigneEvolution, RapportNormalise};
use crate::source::SourceDonnees;

// ─── Résultat d'agrégation ───────────────────────────────────────────────────

/// Result of one aggregation pass, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Agregat {
    /// Single-robot selection with no row available. "No data", distinct
    /// from an all-zero series.
    Aucun,
    /// Single-robot selection: the robot's own normalized record.
    Simple { rapport: RapportNormalise },
    /// Global selection: one merged aggregate per gain-type bucket.
    Global {
        temps: CumulFusionne,
        autre: CumulFusionne,
    },
}

// ─── Orchestrateur ───────────────────────────────────────────────────────────

/// Drives one aggregation per robot selection: single-robot normalization,
/// or bucketed multi-robot merge when the global selector is picked.
/// Holds no fetched data; caching belongs to the source side.
pub struct Orchestrateur {
    config: ReportingConfig,
    generation: AtomicU64,
}

impl Orchestrateur {
    pub fn new(config: ReportingConfig) -> Self {
        Orchestrateur {
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Registers a selection change and returns the token the matching
    /// [`Orchestrateur::agreger`] call must carry. Any in-flight call
    /// holding an older token will see its result discarded.
    pub fn nouvelle_selection(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn jeton_valide(&self, jeton: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == jeton
    }

    /// Aggregate for the given selection. `Ok(None)` means a newer
    /// selection superseded this call while it was in flight; the result
    /// must not be shown.
    pub async fn agreger(
        &self,
        jeton: u64,
        selection: &str,
        robots: &[DescripteurRobot],
        source: &dyn SourceDonnees,
    ) -> Result<Option<Agregat>, AppError> {
        if !self.jeton_valide(jeton) {
            return Ok(None);
        }
        if selection == self.config.selecteur_global {
            self.agreger_global(jeton, robots, source).await
        } else {
            self.agreger_simple(jeton, selection, robots, source).await
        }
    }

    async fn agreger_simple(
        &self,
        jeton: u64,
        selection: &str,
        robots: &[DescripteurRobot],
        source: &dyn SourceDonnees,
    ) -> Result<Option<Agregat>, AppError> {
        let Some(robot) = robots.iter().find(|r| r.nom_programme == selection) else {
            warn!("Robot sélectionné introuvable: {}", selection);
            return Ok(Some(Agregat::Aucun));
        };
        let nom = robot.nom_complet();

        // échec non rattrapé: la couche de présentation affiche l'erreur
        let lignes = source
            .rapports_robot(&nom, &robot.bareme, &robot.type_gain)
            .await?;
        if !self.jeton_valide(jeton) {
            return Ok(None);
        }

        let bareme = Bareme::parse_ou_desactive(&robot.bareme, &nom);
        let rapport = lignes
            .iter()
            .find(|ligne| ligne.nom_robot() == nom)
            .map(|ligne| normaliser(ligne, bareme));

        Ok(Some(match rapport {
            Some(rapport) => Agregat::Simple { rapport },
            None => Agregat::Aucun,
        }))
    }

    async fn agreger_global(
        &self,
        jeton: u64,
        robots: &[DescripteurRobot],
        source: &dyn SourceDonnees,
    ) -> Result<Option<Agregat>, AppError> {
        let ventilation = ventiler(robots, &self.config.selecteur_global);

        let (rapports_temps, rapports_autre) = futures::join!(
            collecter(&ventilation.temps, source),
            collecter(&ventilation.autre, source),
        );
        if !self.jeton_valide(jeton) {
            return Ok(None);
        }

        Ok(Some(Agregat::Global {
            temps: fusionner(&rapports_temps, &self.config.periode),
            autre: fusionner(&rapports_autre, &self.config.periode),
        }))
    }

    /// Evolution history for the selection. Global mode concatenates
    /// per-robot histories in robot order, no dedup; single mode propagates
    /// the fetch failure.
    pub async fn historique(
        &self,
        selection: &str,
        robots: &[DescripteurRobot],
        source: &dyn SourceDonnees,
    ) -> Result<Vec<LigneEvolution>, AppError> {
        if selection != self.config.selecteur_global {
            let Some(robot) = robots.iter().find(|r| r.nom_programme == selection) else {
                warn!("Robot sélectionné introuvable: {}", selection);
                return Ok(Vec::new());
            };
            return source.historique_evolutions(&robot.nom_complet()).await;
        }

        let taches = robots
            .iter()
            .filter(|robot| robot.nom_programme != self.config.selecteur_global)
            .map(|robot| async move {
                let nom = robot.nom_complet();
                match source.historique_evolutions(&nom).await {
                    Ok(lignes) => lignes,
                    Err(e) => {
                        warn!("Historique du robot {} ignoré: {}", nom, e);
                        Vec::new()
                    }
                }
            });
        Ok(join_all(taches).await.into_iter().flatten().collect())
    }
}

/// Fetch and normalize every robot of one bucket, each with its own barème,
/// all dispatched concurrently. The merge runs only once every fetch has
/// completed or been individually caught: a failing or empty robot
/// contributes nothing, and one bad robot never blanks the batch.
async fn collecter(
    robots: &[DescripteurRobot],
    source: &dyn SourceDonnees,
) -> Vec<RapportNormalise> {
    let taches = robots.iter().map(|robot| async move {
        let nom = robot.nom_complet();
        match source
            .rapports_robot(&nom, &robot.bareme, &robot.type_gain)
            .await
        {
            Ok(lignes) => {
                let bareme = Bareme::parse_ou_desactive(&robot.bareme, &nom);
                lignes
                    .into_iter()
                    .filter(|ligne| ligne.nom_robot() == nom)
                    .map(|ligne| normaliser(&ligne, bareme))
                    .collect::<Vec<_>>()
            }
            Err(e) => {
                warn!("Robot {} ignoré dans l'agrégat global: {}", nom, e);
                Vec::new()
            }
        }
    });
    join_all(taches).await.into_iter().flatten().collect()
}
