pub mod decimales;
pub mod types;

pub use decimales::{parse_decimal, parse_decimal_opt};
pub use types::{
    statut_libelle, DescripteurRobot, LigneEvolution, RapportBrut, RapportNormalise,
};
