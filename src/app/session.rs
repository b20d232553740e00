//! src/app/session.rs
//!
//! Session d’évaluation : un fil dédié possède le moteur (écrivain unique).
//!
//! Contrats :
//! - l’UI n’accède jamais au moteur, elle envoie des `Commande` et reçoit des `Reponse`
//! - les commandes sont traitées une par une, dans l’ordre d’envoi
//! - une recherche de taux (réseau) bloque le fil de session, jamais le rendu

use std::io;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{debug, error};

use crate::noyau::moteur::{Instantane, Moteur};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commande {
    Evaluer(String),
    RappelPrecedent,
    RappelSuivant,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Reponse {
    /// Ligne évaluée : état à afficher (drapeau d’erreur consommé).
    Evaluee(Instantane),
    /// Rappel d’historique (`None` si historique vide).
    Rappel(Option<String>),
}

/// Une seule ligne en vol côté UI : la file reste courte.
const CAPACITE_FILE: usize = 16;

pub struct Session {
    commandes: Sender<Commande>,
    reponses: Receiver<Reponse>,
}

impl Session {
    /// Démarre le fil de session. `reveil` est appelé après chaque réponse
    /// (typiquement : demander un rafraîchissement de l’UI).
    pub fn demarrer(
        moteur: Moteur,
        reveil: impl Fn() + Send + 'static,
    ) -> io::Result<Session> {
        let (tx_cmd, rx_cmd) = bounded::<Commande>(CAPACITE_FILE);
        let (tx_rep, rx_rep) = bounded::<Reponse>(CAPACITE_FILE);

        thread::Builder::new()
            .name("calculatrice-session".to_string())
            .spawn(move || boucle(moteur, rx_cmd, tx_rep, reveil))?;

        Ok(Session {
            commandes: tx_cmd,
            reponses: rx_rep,
        })
    }

    /// false si le fil de session est arrêté.
    pub fn envoyer(&self, c: Commande) -> bool {
        self.commandes.send(c).is_ok()
    }

    /// Réponse disponible, sans attendre.
    pub fn recevoir(&self) -> Option<Reponse> {
        match self.reponses.try_recv() {
            Ok(r) => Some(r),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                error!("session arrêtée");
                None
            }
        }
    }

    /// Réponse avec attente bornée.
    pub fn attendre(&self, delai: Duration) -> Option<Reponse> {
        match self.reponses.recv_timeout(delai) {
            Ok(r) => Some(r),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn boucle(
    mut moteur: Moteur,
    commandes: Receiver<Commande>,
    reponses: Sender<Reponse>,
    reveil: impl Fn(),
) {
    while let Ok(c) = commandes.recv() {
        debug!("session: {c:?}");
        let r = match c {
            Commande::Evaluer(ligne) => {
                moteur.evaluer_ligne(&ligne);
                Reponse::Evaluee(moteur.instantane())
            }
            Commande::RappelPrecedent => Reponse::Rappel(moteur.rappel_precedent()),
            Commande::RappelSuivant => Reponse::Rappel(moteur.rappel_suivant()),
        };
        if reponses.send(r).is_err() {
            break;
        }
        reveil();
    }
    debug!("session terminée");
}
