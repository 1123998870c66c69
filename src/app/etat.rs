//! src/app/etat.rs
//!
//! État UI du banc de correction (sans vue).
//!
//! Rôle : contenir la saisie élève, la réponse attendue, le dernier verdict et
//! le diagnostic en direct, et offrir des opérations simples (C/AC).
//!
//! Contrats :
//! - Aucune logique mathématique ici : on délègue au noyau.
//! - Le noyau ne voit que du texte brut.
//! - Défense en profondeur : bornes sur la longueur des saisies.

use correcteur_qpur::noyau::{self, Attendu, Diagnostic, Verdict};

/// Garde-fou : longueur maximale d'une saisie (anti-gel au recalcul par frappe).
pub const SAISIE_MAX: usize = 2000;

#[derive(Clone, Debug)]
pub struct AppCorrecteur {
    // --- entrées ---
    pub reponse: String,  // saisie brute de l'élève
    pub attendu: String,  // {"value": .., "tolerance": ..}, nombre nu, ou texte

    // --- sorties ---
    pub diagnostic: Diagnostic,
    pub verdict: Option<Verdict>,
    pub erreur: String, // réponse attendue illisible

    // --- UX ---
    pub focus_reponse: bool,
}

impl Default for AppCorrecteur {
    fn default() -> Self {
        Self {
            reponse: String::new(),
            attendu: r#"{"value": 0.375, "tolerance": 1e-9}"#.to_string(),
            diagnostic: Diagnostic::default(),
            verdict: None,
            erreur: String::new(),
            focus_reponse: true,
        }
    }
}

impl AppCorrecteur {
    /* ------------------------ Actions ------------------------ */

    /// AC : remise à zéro totale.
    pub fn reset_total(&mut self) {
        *self = Self::default();
    }

    /// C : effacer seulement la réponse (et ce qui en dépend).
    pub fn clear_reponse(&mut self) {
        self.reponse.clear();
        self.rafraichir_diagnostic();
        self.verdict = None;
        self.focus_reponse = true;
    }

    /// Recalcul à chaque frappe : texte normalisé, jetons, fraction, valeur.
    pub fn rafraichir_diagnostic(&mut self) {
        tronquer(&mut self.reponse);
        self.diagnostic = noyau::diagnostic(&self.reponse);
    }

    /// Note la réponse courante contre la réponse attendue.
    pub fn corriger(&mut self) {
        tronquer(&mut self.attendu);
        match lire_attendu(&self.attendu) {
            Ok(a) => {
                self.erreur.clear();
                self.verdict = Some(noyau::noter(&self.reponse, &a));
            }
            Err(msg) => {
                self.erreur = msg;
                self.verdict = None;
            }
        }
        self.focus_reponse = true;
    }
}

/// Lecture souple de la réponse attendue :
/// - JSON (`{"value": 4}` ou `"texte"`) via serde
/// - nombre nu ("0.375") => cible numérique, tolérance par défaut
/// - sinon => cible texte
pub fn lire_attendu(saisie: &str) -> Result<Attendu, String> {
    let s = saisie.trim();
    if s.is_empty() {
        return Err("réponse attendue vide".into());
    }

    if s.starts_with('{') || s.starts_with('"') {
        return serde_json::from_str::<Attendu>(s)
            .map_err(|e| format!("réponse attendue illisible: {e}"));
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Attendu::numerique(v)),
        _ => Ok(Attendu::texte(s)),
    }
}

fn tronquer(s: &mut String) {
    if s.chars().count() > SAISIE_MAX {
        *s = s.chars().take(SAISIE_MAX).collect();
    }
}
