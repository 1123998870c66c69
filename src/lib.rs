//! Correcteur Q-pur — vérification de réponses mathématiques libres.
//!
//! La saisie (LaTeX, ASCII-math, Unicode, virgule décimale) est normalisée,
//! évaluée exactement quand c'est possible, en flottant sinon, puis comparée
//! à la réponse attendue. Voir `noyau::noter`.

pub mod noyau;
