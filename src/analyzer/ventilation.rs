use log::debug;
use serde::Serialize;

use crate::parser::types::DescripteurRobot;

/// Aggregation bucket. Time-based and count-based robots measure different
/// units and are never summed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeGain {
    /// Temps gagné (heures).
    Temps,
    /// Nombre d'exécutions.
    Autre,
}

impl TypeGain {
    /// Trimmed, ASCII-case-insensitive. Anything else is unrecognized.
    pub fn depuis(brut: &str) -> Option<TypeGain> {
        let trimmed = brut.trim();
        if trimmed.eq_ignore_ascii_case("temps") {
            Some(TypeGain::Temps)
        } else if trimmed.eq_ignore_ascii_case("autre") {
            Some(TypeGain::Autre)
        } else {
            None
        }
    }
}

/// Robots under aggregation, one bucket per gain type.
#[derive(Debug, Clone, Default)]
pub struct Ventilation {
    pub temps: Vec<DescripteurRobot>,
    pub autre: Vec<DescripteurRobot>,
}

/// Partition robots by gain type. The pseudo-robot whose program name equals
/// `selecteur_global` is the query selector, not a data source, and is
/// excluded; a robot with an unrecognized gain type is dropped from both
/// buckets rather than defaulted into one.
pub fn ventiler(robots: &[DescripteurRobot], selecteur_global: &str) -> Ventilation {
    let mut ventilation = Ventilation::default();
    for robot in robots {
        if robot.nom_programme == selecteur_global {
            continue;
        }
        match TypeGain::depuis(&robot.type_gain) {
            Some(TypeGain::Temps) => ventilation.temps.push(robot.clone()),
            Some(TypeGain::Autre) => ventilation.autre.push(robot.clone()),
            None => debug!(
                "Robot {} écarté: type de gain non reconnu '{}'",
                robot.nom_complet(),
                robot.type_gain
            ),
        }
    }
    ventilation
}
