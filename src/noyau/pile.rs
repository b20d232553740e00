// src/noyau/pile.rs
//
// Pile de flottants (sommet = dernier élément).
// Aucun accès hors bornes : dépiler une pile trop courte est une erreur définie.

use super::erreur::ErreurNoyau;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pile {
    valeurs: Vec<f64>,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empiler(&mut self, v: f64) {
        self.valeurs.push(v);
    }

    pub fn depiler(&mut self) -> Result<f64, ErreurNoyau> {
        self.valeurs.pop().ok_or(ErreurNoyau::PileInsuffisante {
            requis: 1,
            disponible: 0,
        })
    }

    /// Retire les `n` valeurs du haut, rendues dans l’ordre où elles ont été empilées.
    ///
    /// Exemple: pile [1, 2, 3], n = 2 => [2, 3], pile [1].
    /// Si la pile est trop courte, elle reste intacte.
    pub fn depiler_n(&mut self, n: usize) -> Result<Vec<f64>, ErreurNoyau> {
        let disponible = self.valeurs.len();
        if disponible < n {
            return Err(ErreurNoyau::PileInsuffisante {
                requis: n,
                disponible,
            });
        }
        Ok(self.valeurs.split_off(disponible - n))
    }

    /// Duplique le sommet sans le retirer.
    pub fn dupliquer(&mut self) -> Result<(), ErreurNoyau> {
        let sommet = self.sommet().ok_or(ErreurNoyau::PileInsuffisante {
            requis: 1,
            disponible: 0,
        })?;
        self.valeurs.push(sommet);
        Ok(())
    }

    /// Échange les deux valeurs du haut. Pile intacte si moins de deux valeurs.
    pub fn echanger(&mut self) -> Result<(), ErreurNoyau> {
        let n = self.valeurs.len();
        if n < 2 {
            return Err(ErreurNoyau::PileInsuffisante {
                requis: 2,
                disponible: n,
            });
        }
        self.valeurs.swap(n - 1, n - 2);
        Ok(())
    }

    pub fn vider(&mut self) {
        self.valeurs.clear();
    }

    pub fn sommet(&self) -> Option<f64> {
        self.valeurs.last().copied()
    }

    pub fn len(&self) -> usize {
        self.valeurs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valeurs.is_empty()
    }

    /// Valeurs du bas vers le sommet.
    pub fn valeurs(&self) -> &[f64] {
        &self.valeurs
    }
}
