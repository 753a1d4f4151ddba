use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Échec de récupération pour le robot {robot}: {message}")]
    Fetch { robot: String, message: String },

    #[error("Valeur numérique illisible: '{0}'")]
    NombreIllisible(String),

    #[error("Barème invalide: '{0}'")]
    BaremeInvalide(String),

    #[error("Erreur de désérialisation: {0}")]
    Serde(#[from] serde_json::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
