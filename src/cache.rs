use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::parser::types::{LigneEvolution, RapportBrut};
use crate::source::SourceDonnees;

/// Get-or-fetch cache in front of any [`SourceDonnees`]. Results are kept
/// per robot name until [`SourceAvecCache::invalider`]; failures are never
/// cached.
pub struct SourceAvecCache<S> {
    interne: S,
    rapports: Mutex<HashMap<String, Vec<RapportBrut>>>,
    historiques: Mutex<HashMap<String, Vec<LigneEvolution>>>,
}

impl<S> SourceAvecCache<S> {
    pub fn new(interne: S) -> Self {
        SourceAvecCache {
            interne,
            rapports: Mutex::new(HashMap::new()),
            historiques: Mutex::new(HashMap::new()),
        }
    }

    /// Drops every cached result; the next query goes back to the inner
    /// source.
    pub async fn invalider(&self) {
        self.rapports.lock().await.clear();
        self.historiques.lock().await.clear();
    }
}

#[async_trait]
impl<S: SourceDonnees> SourceDonnees for SourceAvecCache<S> {
    async fn rapports_robot(
        &self,
        nom_robot: &str,
        bareme: &str,
        type_gain: &str,
    ) -> Result<Vec<RapportBrut>, AppError> {
        if let Some(lignes) = self.rapports.lock().await.get(nom_robot) {
            return Ok(lignes.clone());
        }
        let lignes = self
            .interne
            .rapports_robot(nom_robot, bareme, type_gain)
            .await?;
        self.rapports
            .lock()
            .await
            .insert(nom_robot.to_string(), lignes.clone());
        Ok(lignes)
    }

    async fn historique_evolutions(
        &self,
        nom_robot: &str,
    ) -> Result<Vec<LigneEvolution>, AppError> {
        if let Some(lignes) = self.historiques.lock().await.get(nom_robot) {
            return Ok(lignes.clone());
        }
        let lignes = self.interne.historique_evolutions(nom_robot).await?;
        self.historiques
            .lock()
            .await
            .insert(nom_robot.to_string(), lignes.clone());
        Ok(lignes)
    }
}
