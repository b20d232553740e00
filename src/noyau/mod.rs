//! Noyau RPN (flottants double précision)
//!
//! Organisation interne :
//! - pile.rs      : pile LIFO (erreurs définies sur pile courte)
//! - jetons.rs    : découpage paresseux d’une ligne
//! - catalogue.rs : table figée nom -> opération (arité portée par la variante)
//! - change.rs    : taux de change (contrat + client HTTP + taux fixes)
//! - moteur.rs    : répartition, drapeau d’erreur, historique, instantané
//! - erreur.rs    : types d’erreurs

pub mod catalogue;
pub mod change;
pub mod erreur;
pub mod jetons;
pub mod moteur;
pub mod pile;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;
