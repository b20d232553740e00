// src/noyau/jetons.rs
//
// Découpage d’une ligne en jetons, de gauche à droite, par ordre de priorité :
// - nombre    : chiffres avec au plus un point décimal (12, 3.5, .5, 7.)
// - nom       : lettres minuscules, '_' et '#' (sqrt, usd_eur, #)
// - opérateur : un seul caractère parmi + - * / ^ %
//
// Espaces et virgules séparent les jetons et ne sont jamais émis.
// Tout autre caractère est ignoré silencieusement.

use std::fmt;
use std::sync::OnceLock;

use regex::{CaptureMatches, Regex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jeton<'a> {
    Nombre(&'a str),
    Nom(&'a str),
    Operateur(&'a str),
}

impl<'a> Jeton<'a> {
    /// Texte brut du jeton (ce qui est archivé dans l’historique).
    pub fn texte(&self) -> &'a str {
        match *self {
            Jeton::Nombre(s) | Jeton::Nom(s) | Jeton::Operateur(s) => s,
        }
    }

    /// Valeur numérique d’un littéral. `None` pour un nom ou un opérateur.
    pub fn valeur(&self) -> Option<f64> {
        match self {
            Jeton::Nombre(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Jeton<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texte())
    }
}

fn motif() -> &'static Regex {
    static MOTIF: OnceLock<Regex> = OnceLock::new();
    MOTIF.get_or_init(|| {
        Regex::new(r"(?P<nombre>[0-9]+(?:\.[0-9]*)?|\.[0-9]+)|(?P<nom>[a-z_#]+)|(?P<op>[-+*/^%])")
            .expect("motif des jetons")
    })
}

/// Suite paresseuse (non redémarrable) des jetons d’une ligne.
pub struct Jetons<'a> {
    captures: CaptureMatches<'static, 'a>,
}

impl<'a> Iterator for Jetons<'a> {
    type Item = Jeton<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for c in self.captures.by_ref() {
            if let Some(m) = c.name("nombre") {
                return Some(Jeton::Nombre(m.as_str()));
            }
            if let Some(m) = c.name("nom") {
                return Some(Jeton::Nom(m.as_str()));
            }
            if let Some(m) = c.name("op") {
                return Some(Jeton::Operateur(m.as_str()));
            }
        }
        None
    }
}

/// Tokenize une ligne. Une ligne vide (ou seulement des séparateurs) ne donne aucun jeton.
pub fn tokenize(ligne: &str) -> Jetons<'_> {
    Jetons {
        captures: motif().captures_iter(ligne),
    }
}
