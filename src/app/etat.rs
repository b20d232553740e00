//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir ce que l’écran affiche (entrée, pile, mode, précision, erreur)
//! et relayer les actions vers la session d’évaluation.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par la session (écrivain unique du moteur).
//! - Une seule ligne en vol : tant qu’elle n’est pas évaluée, aucune autre n’est acceptée.
//! - `quit` (ligne exacte) ou Échap ferme l’application sans évaluer l’entrée.

use log::warn;

use super::session::{Commande, Reponse, Session};
use crate::noyau::moteur::Instantane;

/// Ligne qui termine la session.
pub const LIGNE_QUITTER: &str = "quit";

pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties (dernier instantané reçu) ---
    pub affichage: Instantane,

    // --- UX ---
    pub en_attente: bool,
    pub quitter: bool,
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,

    session: Session,
}

impl AppCalc {
    pub fn new(session: Session, depart: Instantane) -> Self {
        Self {
            entree: String::new(),
            affichage: depart,
            en_attente: false,
            quitter: false,
            focus_entree: true,
            session,
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// Entrée : soumet la ligne courante. false si refusée (ligne déjà en vol).
    pub fn soumettre(&mut self) -> bool {
        if self.en_attente {
            return false;
        }
        if self.entree == LIGNE_QUITTER {
            self.quitter = true;
            return true;
        }

        let ligne = std::mem::take(&mut self.entree);
        if !self.session.envoyer(Commande::Evaluer(ligne)) {
            warn!("session indisponible, ligne perdue");
            self.affichage.erreur = true;
            return false;
        }
        self.en_attente = true;
        self.focus_entree = true;
        true
    }

    pub fn rappel_precedent(&mut self) {
        self.rappel(Commande::RappelPrecedent);
    }

    pub fn rappel_suivant(&mut self) {
        self.rappel(Commande::RappelSuivant);
    }

    fn rappel(&mut self, c: Commande) {
        if self.en_attente {
            return;
        }
        if self.session.envoyer(c) {
            self.en_attente = true;
        }
    }

    /// Échap : ferme l’application, même avec une ligne en vol.
    pub fn fermer(&mut self) {
        self.quitter = true;
    }

    /// C : efface seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// Ajoute un nom du catalogue à l’entrée (séparé par un espace).
    pub fn inserer(&mut self, nom: &str) {
        if !self.entree.is_empty() && !self.entree.ends_with(' ') {
            self.entree.push(' ');
        }
        self.entree.push_str(nom);
        self.focus_entree = true;
    }

    /* ------------------------ Réponses ------------------------ */

    /// Dépose les réponses arrivées depuis la dernière image.
    pub fn traiter_reponses(&mut self) {
        while let Some(r) = self.session.recevoir() {
            match r {
                Reponse::Evaluee(i) => self.affichage = i,
                Reponse::Rappel(Some(texte)) => self.entree = texte,
                Reponse::Rappel(None) => {}
            }
            self.en_attente = false;
            self.focus_entree = true;
        }
    }
}
