// src/noyau/erreurs.rs
//
// Taxonomie des échecs du noyau.
// - Aucune de ces erreurs ne sort de `noter` : le comparateur les convertit
//   en "stratégie suivante" ou en verdict faux.
// - La normalisation n'échoue jamais (pas de type d'erreur pour elle).

use thiserror::Error;

/// Caractère hors de l'alphabet du lexer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("caractère inattendu: '{0}'")]
pub struct ErreurLexicale(pub char);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurSyntaxe {
    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("expression attendue, trouvé {0}")]
    PrimaireAttendue(String),

    #[error("entrée résiduelle après l'expression: {0}")]
    EntreeResiduelle(String),

    #[error("imbrication trop profonde")]
    ImbricationExcessive,

    #[error("entrée trop longue ({0} jetons)")]
    EntreeTropLongue(usize),
}

/// Échecs de l'évaluateur exact (rationnels).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurEval {
    #[error(transparent)]
    Lexique(#[from] ErreurLexicale),

    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    /// Identifiant ou appel de fonction : pas de représentation rationnelle.
    #[error("symbolique: '{0}' n'a pas de valeur rationnelle")]
    Symbolique(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("exposant non entier")]
    ExposantNonEntier,

    #[error("exposant trop grand: {0}")]
    ExposantTropGrand(String),

    /// Numérateur ou dénominateur au-delà du budget de bits (résultat ou estimation).
    #[error("résultat trop grand ({0} bits)")]
    TailleExcessive(u64),
}

/// Échecs de l'évaluateur flottant. Vus de l'extérieur : NaN.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ErreurNumerique {
    #[error("caractère interdit: '{0}'")]
    CaractereInterdit(char),

    #[error(transparent)]
    Lexique(#[from] ErreurLexicale),

    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error("littéral invalide: '{0}'")]
    LitteralInvalide(String),

    #[error("identifiant inconnu: '{0}'")]
    IdentifiantInconnu(String),

    #[error("fonction inconnue: '{0}'")]
    FonctionInconnue(String),

    #[error("{nom} attend {attendu} argument(s), reçu {recu}")]
    Arite {
        nom: String,
        attendu: usize,
        recu: usize,
    },

    #[error("résultat non fini: {0}")]
    NonFini(f64),
}
