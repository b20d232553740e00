// src/noyau/moteur.rs
//
// Moteur RPN : pile + mode d’angle + précision + drapeau d’erreur + historique.
//
// Pipeline d’une ligne :
//   ligne -> jetons -> (nombre => empiler | nom/opérateur => calculer) -> historique
//
// Politique d’erreur :
// - aucune erreur ne sort d’une ligne : elles lèvent toutes le même drapeau (collant)
// - une opération qui échoue laisse la pile intacte, la ligne continue au jeton suivant
// - le drapeau est lu ET effacé par la présentation (instantane / prendre_erreur)

use log::{debug, info, warn};

use super::catalogue::{arrondir, Catalogue, ModeAngle};
use super::change::{PaireDevises, ServiceTaux};
use super::erreur::ErreurNoyau;
use super::jetons::{tokenize, Jeton};
use super::pile::Pile;

/// État passé explicitement aux opérations du catalogue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EtatCalcul {
    pub pile: Pile,
    pub mode: ModeAngle,
    pub precision: Option<u32>,
}

impl EtatCalcul {
    /// Empile en appliquant la précision courante (si elle existe).
    pub fn empiler(&mut self, v: f64) {
        let v = match self.precision {
            Some(p) => arrondir(v, p as f64),
            None => v,
        };
        self.pile.empiler(v);
    }
}

/// Historique des jetons consommés + curseur de rappel.
///
/// Invariant : si non vide, `curseur` ∈ [0, len-1]. La navigation ne fait que borner.
#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: Vec<String>,
    curseur: usize,
}

impl Historique {
    fn ajouter(&mut self, jeton: &str) {
        self.entrees.push(jeton.to_string());
    }

    fn curseur_a_la_fin(&mut self) {
        self.curseur = self.entrees.len().saturating_sub(1);
    }

    /// Rend l’entrée sous le curseur, puis recule (borné à 0).
    pub fn precedent(&mut self) -> Option<&str> {
        if self.entrees.is_empty() {
            return None;
        }
        let i = self.curseur;
        self.curseur = self.curseur.saturating_sub(1);
        Some(&self.entrees[i])
    }

    /// Avance (borné à len-1), puis rend l’entrée sous le curseur.
    pub fn suivant(&mut self) -> Option<&str> {
        if self.entrees.is_empty() {
            return None;
        }
        self.curseur = (self.curseur + 1).min(self.entrees.len() - 1);
        Some(&self.entrees[self.curseur])
    }

    pub fn entrees(&self) -> &[String] {
        &self.entrees
    }

    pub fn curseur(&self) -> usize {
        self.curseur
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}

/// Ce que la présentation lit après chaque ligne.
#[derive(Clone, Debug, PartialEq)]
pub struct Instantane {
    /// Du bas vers le sommet.
    pub pile: Vec<f64>,
    pub mode: ModeAngle,
    pub precision: Option<u32>,
    pub erreur: bool,
}

impl Instantane {
    pub fn libelle_mode(&self) -> &'static str {
        self.mode.libelle()
    }

    /// Vide si aucune précision.
    pub fn libelle_precision(&self) -> String {
        self.precision.map(|p| p.to_string()).unwrap_or_default()
    }
}

pub struct Moteur {
    etat: EtatCalcul,
    catalogue: Catalogue,
    service_taux: Box<dyn ServiceTaux>,
    erreur: bool,
    historique: Historique,
}

impl Moteur {
    pub fn new(service_taux: Box<dyn ServiceTaux>) -> Self {
        Self {
            etat: EtatCalcul::default(),
            catalogue: Catalogue::standard(),
            service_taux,
            erreur: false,
            historique: Historique::default(),
        }
    }

    /// Moteur démarrant dans un mode et une précision donnés.
    pub fn avec_reglages(
        service_taux: Box<dyn ServiceTaux>,
        mode: ModeAngle,
        precision: Option<u32>,
    ) -> Self {
        let mut m = Self::new(service_taux);
        m.etat.mode = mode;
        m.etat.precision = precision;
        m
    }

    /* ------------------------ Pile ------------------------ */

    /// Push : arrondi à la précision courante puis empilement.
    pub fn push(&mut self, v: f64) {
        self.etat.empiler(v);
    }

    /// Pop : sommet retiré, ou drapeau levé si la pile est vide.
    pub fn pop(&mut self) -> Option<f64> {
        match self.etat.pile.depiler() {
            Ok(v) => Some(v),
            Err(e) => {
                self.lever(&e);
                None
            }
        }
    }

    /* ------------------------ Calcul ------------------------ */

    /// Exécute une opération nommée. L’erreur est rendue ET repliée dans le drapeau.
    pub fn compute(&mut self, nom: &str) -> Result<(), ErreurNoyau> {
        let r = self.executer(nom);
        if let Err(e) = &r {
            self.lever(e);
        }
        r
    }

    fn executer(&mut self, nom: &str) -> Result<(), ErreurNoyau> {
        let Some(op) = self.catalogue.get(nom) else {
            let paire = PaireDevises::analyser(nom)
                .ok_or_else(|| ErreurNoyau::OperationInconnue(nom.to_string()))?;
            let taux = self.service_taux.taux(&paire)?;
            self.push(taux);
            return Ok(());
        };

        // garde locale : rien n’est dépilé si l’arité n’est pas satisfaite
        let operandes = self.etat.pile.depiler_n(op.arite())?;
        debug!("{nom} {operandes:?}");

        match op.appliquer(&mut self.etat, &operandes) {
            Ok(Some(v)) => {
                self.push(v);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                // opération atomique : on rend les opérandes
                for v in operandes {
                    self.etat.pile.empiler(v);
                }
                Err(e)
            }
        }
    }

    fn lever(&mut self, e: &ErreurNoyau) {
        warn!("{e}");
        self.erreur = true;
    }

    /// Évalue une ligne complète. Ne rend rien : les échecs lèvent le drapeau.
    pub fn evaluer_ligne(&mut self, ligne: &str) {
        let mut jetons = tokenize(ligne).peekable();

        // aucune entrée => dup implicite
        if jetons.peek().is_none() {
            let _ = self.compute("dup");
            return;
        }

        let mode = self.etat.mode;
        let precision = self.etat.precision;

        for jeton in jetons {
            self.historique.ajouter(jeton.texte());
            match jeton {
                Jeton::Nombre(_) => match jeton.valeur() {
                    Some(v) => self.push(v),
                    None => self.lever(&ErreurNoyau::OperationInconnue(jeton.texte().into())),
                },
                // nan, inf, infinity : lus comme des flottants avant le catalogue
                Jeton::Nom(nom) => match nom.parse::<f64>() {
                    Ok(v) => self.push(v),
                    Err(_) => {
                        let _ = self.compute(nom);
                    }
                },
                Jeton::Operateur(op) => {
                    let _ = self.compute(op);
                }
            }
        }

        self.historique.curseur_a_la_fin();

        if mode != self.etat.mode {
            info!("mode {}", self.etat.mode.libelle());
        }
        if precision != self.etat.precision {
            info!("précision {:?}", self.etat.precision);
        }
    }

    /* ------------------------ Historique ------------------------ */

    pub fn rappel_precedent(&mut self) -> Option<String> {
        self.historique.precedent().map(str::to_string)
    }

    pub fn rappel_suivant(&mut self) -> Option<String> {
        self.historique.suivant().map(str::to_string)
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /* ------------------------ Lecture (présentation) ------------------------ */

    pub fn pile(&self) -> &[f64] {
        self.etat.pile.valeurs()
    }

    pub fn mode(&self) -> ModeAngle {
        self.etat.mode
    }

    pub fn precision(&self) -> Option<u32> {
        self.etat.precision
    }

    /// Lecture du drapeau sans l’effacer.
    pub fn a_erreur(&self) -> bool {
        self.erreur
    }

    /// Lecture-effacement du drapeau.
    pub fn prendre_erreur(&mut self) -> bool {
        std::mem::take(&mut self.erreur)
    }

    /// Instantané pour l’affichage (consomme le drapeau).
    pub fn instantane(&mut self) -> Instantane {
        Instantane {
            pile: self.pile().to_vec(),
            mode: self.etat.mode,
            precision: self.etat.precision,
            erreur: self.prendre_erreur(),
        }
    }
}
