// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Le moteur ne les propage jamais hors d’une ligne : il les replie dans le drapeau d’erreur.

use thiserror::Error;

/// Échec du service de taux de change (détail indicatif seulement).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurTaux {
    #[error("taux indisponible: {0}")]
    Transport(String),

    #[error("réponse illisible")]
    ReponseIllisible,

    #[error("aucun taux dans la réponse")]
    ReponseSansTaux,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurNoyau {
    /// L’opération demande plus d’opérandes que la pile n’en contient.
    #[error("pile insuffisante: {requis} requis, {disponible} disponible(s)")]
    PileInsuffisante { requis: usize, disponible: usize },

    #[error("opération inconnue: {0}")]
    OperationInconnue(String),

    #[error(transparent)]
    ServiceExterne(#[from] ErreurTaux),

    /// `precision` / `#` sur un opérande non fini.
    #[error("précision invalide: {0}")]
    PrecisionInvalide(f64),
}
