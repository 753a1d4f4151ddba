use async_trait::async_trait;

use crate::error::AppError;
use crate::parser::types::{LigneEvolution, RapportBrut};

/// Data-access seam. The document-database layer implements this; tests
/// inject in-memory fakes. The barème and gain type are part of the
/// upstream query signature and travel with the call.
#[async_trait]
pub trait SourceDonnees: Send + Sync {
    /// Reporting rows for one robot (`"{agence}_{programme}"`).
    async fn rapports_robot(
        &self,
        nom_robot: &str,
        bareme: &str,
        type_gain: &str,
    ) -> Result<Vec<RapportBrut>, AppError>;

    /// Evolution history for one robot.
    async fn historique_evolutions(
        &self,
        nom_robot: &str,
    ) -> Result<Vec<LigneEvolution>, AppError>;
}
