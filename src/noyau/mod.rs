//! Noyau de correction Q-pur
//!
//! Organisation interne :
//! - normalise.rs   : saisie brute -> ASCII-math canonique
//! - jetons.rs      : tokenisation
//! - analyse.rs     : descente récursive -> Expr
//! - expr.rs        : arbre d'expression
//! - fraction.rs    : fraction exacte (toujours réduite)
//! - exact.rs       : évaluation rationnelle (+ voie rapide a/b)
//! - numerique.rs   : évaluation flottante restreinte (repli)
//! - comparateur.rs : verdict + diagnostic
//! - erreurs.rs     : erreurs typées de chaque étage
//!
//! Tout est pur et synchrone : un appel = un pipeline, rien ne persiste.

pub mod analyse;
pub mod comparateur;
pub mod erreurs;
pub mod exact;
pub mod expr;
pub mod fraction;
pub mod jetons;
pub mod normalise;
pub mod numerique;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use comparateur::{
    diagnostic, noter, texte_fraction, texte_normalise, texte_valeur, Attendu, Diagnostic,
    Strategie, Verdict, TOLERANCE_DEFAUT,
};
pub use exact::{evaluer_arbre, evaluer_exact};
pub use fraction::Fraction;
pub use normalise::normaliser;
pub use numerique::evaluer_numerique;
