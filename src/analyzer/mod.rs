pub mod format;
pub mod fusion;
pub mod normalisation;
pub mod orchestrateur;
pub mod ventilation;

pub use format::formater_quantite;
pub use fusion::{fusionner, CumulFusionne, JOURS_MAX};
pub use normalisation::{normaliser, Bareme};
pub use orchestrateur::{Agregat, Orchestrateur};
pub use ventilation::{ventiler, TypeGain, Ventilation};
