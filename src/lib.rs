//! Cœur d'agrégation du reporting RPA: normalisation des lignes de
//! reporting par barème, ventilation par type de gain, fusion des séries
//! quotidiennes et orchestration par sélection de robot. L'accès aux
//! données (base documentaire) et la présentation (graphiques, tableaux)
//! restent à l'extérieur, derrière [`SourceDonnees`].

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;
pub mod parser;
pub mod source;

pub use analyzer::{
    formater_quantite, fusionner, normaliser, ventiler, Agregat, Bareme, CumulFusionne,
    Orchestrateur, TypeGain, Ventilation, JOURS_MAX,
};
pub use cache::SourceAvecCache;
pub use config::{PeriodeRapport, ReportingConfig};
pub use error::AppError;
pub use parser::{
    parse_decimal, parse_decimal_opt, statut_libelle, DescripteurRobot, LigneEvolution,
    RapportBrut, RapportNormalise,
};
pub use source::SourceDonnees;

// ─── E2E Integration Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::{
        parse_decimal, Agregat, AppError, DescripteurRobot, LigneEvolution, Orchestrateur,
        PeriodeRapport, RapportBrut, ReportingConfig, SourceAvecCache, SourceDonnees,
    };

    fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config_juin_2024() -> ReportingConfig {
        ReportingConfig {
            selecteur_global: "TOUT".to_string(),
            periode: PeriodeRapport { annee: 2024, mois: 6 },
        }
    }

    /// Source alimentée par des documents JSON bruts, comme ceux que
    /// renverrait la base documentaire.
    struct SourceDocuments {
        rapports: HashMap<String, Vec<RapportBrut>>,
    }

    impl SourceDocuments {
        fn new(documents: Vec<serde_json::Value>) -> Self {
            let mut rapports: HashMap<String, Vec<RapportBrut>> = HashMap::new();
            for doc in documents {
                let rapport = RapportBrut::depuis_document(doc).unwrap();
                rapports.entry(rapport.nom_robot()).or_default().push(rapport);
            }
            SourceDocuments { rapports }
        }
    }

    #[async_trait]
    impl SourceDonnees for SourceDocuments {
        async fn rapports_robot(
            &self,
            nom_robot: &str,
            _bareme: &str,
            _type_gain: &str,
        ) -> Result<Vec<RapportBrut>, AppError> {
            Ok(self.rapports.get(nom_robot).cloned().unwrap_or_default())
        }

        async fn historique_evolutions(
            &self,
            nom_robot: &str,
        ) -> Result<Vec<LigneEvolution>, AppError> {
            Ok(vec![LigneEvolution {
                robot: nom_robot.to_string(),
                intitule: "Extension du périmètre".to_string(),
                description: "Ajouter les dossiers en attente".to_string(),
                statut: "2".to_string(),
                date_soumission: "12/06/2024".to_string(),
            }])
        }
    }

    fn robot(nom: &str, type_gain: &str, bareme: &str) -> DescripteurRobot {
        DescripteurRobot {
            nom_programme: nom.to_string(),
            id_agence: "LILLE".to_string(),
            type_gain: type_gain.to_string(),
            bareme: bareme.to_string(),
        }
    }

    /// E2E: documents bruts → sélection TOUT → ventilation, normalisation
    /// par barème propre, fusion par seau.
    #[tokio::test]
    async fn test_e2e_tout_depuis_documents() {
        setup();
        let source = SourceDocuments::new(vec![
            json!({
                "agence": "LILLE",
                "nomProgramme": "FACTURATION",
                "cumulMois": "20",
                "01/06/2024": "5",
                "02/06/2024": "1,5",
            }),
            json!({
                "agence": "LILLE",
                "nomProgramme": "PAIE",
                "cumulMois": "6",
                "01/06/2024": "3",
            }),
            json!({
                "agence": "LILLE",
                "nomProgramme": "COURRIER",
                "cumulMois": "7",
                "01/06/2024": "7",
            }),
        ]);
        let robots = vec![
            robot("TOUT", "temps", ""),
            robot("FACTURATION", "temps", "2"),
            robot("PAIE", "temps", "0"),
            robot("COURRIER", "autre", ""),
        ];
        let orchestrateur = Orchestrateur::new(config_juin_2024());

        let jeton = orchestrateur.nouvelle_selection();
        let agregat = orchestrateur
            .agreger(jeton, "TOUT", &robots, &source)
            .await
            .unwrap()
            .expect("jeton encore valide");

        let Agregat::Global { temps, autre } = agregat else {
            panic!("agrégat global attendu");
        };
        // FACTURATION 5×2 + PAIE 3 (barème désactivé)
        assert_eq!(temps.serie_jours[0], 13.0);
        // 1,5 × 2 = 3
        assert_eq!(temps.serie_jours[1], 3.0);
        assert_eq!(temps.cumul_mois, 46.0);
        assert_eq!(autre.serie_jours[0], 7.0);
        assert_eq!(autre.cumul_mois, 7.0);
    }

    /// E2E: sélection simple avec barème vide → le cumul "12,5" reste
    /// numériquement 12,5 après normalisation.
    #[tokio::test]
    async fn test_e2e_simple_bareme_vide() {
        setup();
        let source = SourceDocuments::new(vec![json!({
            "agence": "LILLE",
            "nomProgramme": "FACTURATION",
            "cumulMois": "12,5",
            "01/06/2024": "5",
        })]);
        let robots = vec![robot("FACTURATION", "temps", "")];
        let orchestrateur = Orchestrateur::new(config_juin_2024());

        let jeton = orchestrateur.nouvelle_selection();
        let agregat = orchestrateur
            .agreger(jeton, "FACTURATION", &robots, &source)
            .await
            .unwrap()
            .unwrap();

        let Agregat::Simple { rapport } = agregat else {
            panic!("agrégat simple attendu");
        };
        assert_eq!(parse_decimal(&rapport.cumul_mois).unwrap(), 12.5);
        assert_eq!(
            rapport.valeurs_jour.get("01/06/2024").map(String::as_str),
            Some("5")
        );
    }

    /// E2E: décorateur de cache devant la source, sélection puis
    /// invalidation, historique concaténé.
    #[tokio::test]
    async fn test_e2e_cache_et_historique() {
        setup();
        let source = SourceAvecCache::new(SourceDocuments::new(vec![json!({
            "agence": "LILLE",
            "nomProgramme": "FACTURATION",
            "cumulMois": "4",
            "03/06/2024": "2",
        })]));
        let robots = vec![
            robot("TOUT", "temps", ""),
            robot("FACTURATION", "temps", ""),
            robot("PAIE", "autre", ""),
        ];
        let orchestrateur = Orchestrateur::new(config_juin_2024());

        let jeton = orchestrateur.nouvelle_selection();
        let premier = orchestrateur
            .agreger(jeton, "TOUT", &robots, &source)
            .await
            .unwrap()
            .unwrap();
        source.invalider().await;
        let second = orchestrateur
            .agreger(jeton, "TOUT", &robots, &source)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(premier, second);

        let historique = orchestrateur
            .historique("TOUT", &robots, &source)
            .await
            .unwrap();
        assert_eq!(historique.len(), 2);
        assert_eq!(historique[0].robot, "LILLE_FACTURATION");
        assert_eq!(historique[1].robot, "LILLE_PAIE");
    }
}
