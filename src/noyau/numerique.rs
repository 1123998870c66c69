// src/noyau/numerique.rs
//
// Évaluation flottante (repli quand la voie exacte ne peut pas représenter la valeur).
//
// Règles :
// - liste blanche de caractères sur le texte normalisé (refus global sinon)
// - mêmes jetons / même parseur que la voie exacte : pas d'évaluation dynamique
// - constantes : pi, e ; fonctions : voir FONCTIONS
// - tout résultat intermédiaire non fini => échec
// - vu de l'extérieur : NaN en cas d'échec (jamais de panique)

use std::f64::consts::{E, PI};

use super::analyse::parse;
use super::erreurs::ErreurNumerique;
use super::expr::{Expr, Op};
use super::jetons::tokenize;
use super::normalise::normaliser;

/// (nom, arité) des fonctions autorisées.
const FONCTIONS: &[(&str, usize)] = &[
    ("sqrt", 1),
    ("abs", 1),
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("ln", 1),
    ("log", 1),
    ("exp", 1),
    ("min", 2),
    ("max", 2),
];

/// API publique : texte brut -> valeur, NaN si échec.
pub fn evaluer_numerique(brut: &str) -> f64 {
    essayer_numerique(brut).unwrap_or(f64::NAN)
}

/// Variante typée : donne la raison de l'échec (diagnostic / traces).
pub fn essayer_numerique(brut: &str) -> Result<f64, ErreurNumerique> {
    essayer_numerique_normalise(&normaliser(brut))
}

pub fn essayer_numerique_normalise(texte: &str) -> Result<f64, ErreurNumerique> {
    if let Some(c) = texte.chars().find(|&c| !autorise(c)) {
        return Err(ErreurNumerique::CaractereInterdit(c));
    }

    let jetons = tokenize(texte)?;
    let arbre = parse(&jetons)?;
    evaluer_arbre_f64(&arbre)
}

fn autorise(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || c == ' '
        || matches!(c, '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | ',')
}

pub fn evaluer_arbre_f64(e: &Expr) -> Result<f64, ErreurNumerique> {
    let v = match e {
        // le lexer garantit chiffres + au plus un point : parse::<f64> accepte ".5" et "5."
        Expr::Nombre(n) => n
            .parse::<f64>()
            .map_err(|_| ErreurNumerique::LitteralInvalide(n.clone()))?,

        Expr::Ident(name) => match name.as_str() {
            "pi" => PI,
            "e" => E,
            _ => return Err(ErreurNumerique::IdentifiantInconnu(name.clone())),
        },

        Expr::Neg(x) => -evaluer_arbre_f64(x)?,

        Expr::Binaire(Op::Puissance, a, b) => evaluer_arbre_f64(a)?.powf(evaluer_arbre_f64(b)?),

        // chaîne + - * / repliée en boucle : pas de récursion par opérateur
        Expr::Binaire(..) => {
            let (tete, suite) = e.chaine_gauche();
            let mut acc = evaluer_arbre_f64(tete)?;
            for (op, droite) in suite {
                let y = evaluer_arbre_f64(droite)?;
                acc = appliquer_op(op, acc, y);
                if !acc.is_finite() {
                    return Err(ErreurNumerique::NonFini(acc));
                }
            }
            acc
        }

        Expr::Appel(name, args) => appliquer(name, args)?,
    };

    if !v.is_finite() {
        return Err(ErreurNumerique::NonFini(v));
    }
    Ok(v)
}

fn appliquer_op(op: Op, x: f64, y: f64) -> f64 {
    match op {
        Op::Plus => x + y,
        Op::Moins => x - y,
        Op::Fois => x * y,
        Op::Divise => x / y,
        Op::Puissance => x.powf(y),
    }
}

fn appliquer(name: &str, args: &[Expr]) -> Result<f64, ErreurNumerique> {
    let (_, arite) = FONCTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| ErreurNumerique::FonctionInconnue(name.to_string()))?;

    if args.len() != *arite {
        return Err(ErreurNumerique::Arite {
            nom: name.to_string(),
            attendu: *arite,
            recu: args.len(),
        });
    }

    let v: Vec<f64> = args
        .iter()
        .map(evaluer_arbre_f64)
        .collect::<Result<_, _>>()?;

    let r = match name {
        "sqrt" => v[0].sqrt(),
        "abs" => v[0].abs(),
        "sin" => v[0].sin(),
        "cos" => v[0].cos(),
        "tan" => v[0].tan(),
        "ln" => v[0].ln(),
        "log" => v[0].log10(),
        "exp" => v[0].exp(),
        "min" => v[0].min(v[1]),
        "max" => v[0].max(v[1]),
        _ => return Err(ErreurNumerique::FonctionInconnue(name.to_string())),
    };
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn constantes_et_fonctions() {
        assert!(proche(evaluer_numerique("sqrt(2)"), 2f64.sqrt()));
        assert!(proche(evaluer_numerique("\\sqrt{2}"), 2f64.sqrt()));
        assert!(evaluer_numerique("2π").is_nan());
        assert!(proche(evaluer_numerique("2*\\pi"), 2.0 * PI));
        assert!(proche(evaluer_numerique("abs(-3)"), 3.0));
        assert!(proche(evaluer_numerique("max(1, 2.5)"), 2.5));
        assert!(proche(evaluer_numerique("e^1"), E));
        assert!(proche(evaluer_numerique("2^0.5"), 2f64.sqrt()));
    }

    #[test]
    fn rationnels_aussi() {
        assert!(proche(evaluer_numerique("\\frac{1}{4} + 0,5"), 0.75));
        assert!(proche(evaluer_numerique("-(1/2)"), -0.5));
    }

    #[test]
    fn echecs_en_nan() {
        assert!(evaluer_numerique("5/0").is_nan());
        assert!(evaluer_numerique("sqrt(-1)").is_nan());
        assert!(evaluer_numerique("x + 1").is_nan());
        assert!(evaluer_numerique("2 = 2").is_nan());
        assert!(evaluer_numerique("(1+2").is_nan());
        assert!(evaluer_numerique("").is_nan());
    }

    #[test]
    fn raisons_typees() {
        assert_eq!(
            essayer_numerique("2 = 2"),
            Err(ErreurNumerique::CaractereInterdit('='))
        );
        assert_eq!(
            essayer_numerique("foo(1)"),
            Err(ErreurNumerique::FonctionInconnue("foo".into()))
        );
        assert_eq!(
            essayer_numerique("max(1)"),
            Err(ErreurNumerique::Arite {
                nom: "max".into(),
                attendu: 2,
                recu: 1
            })
        );
        assert!(matches!(
            essayer_numerique("1/0"),
            Err(ErreurNumerique::NonFini(_))
        ));
        assert!(matches!(
            essayer_numerique("((2^4096)^4096)^4096"),
            Err(ErreurNumerique::NonFini(_))
        ));
    }

    #[test]
    fn longue_chaine_sans_recursion() {
        let somme = vec!["0.5"; 2048].join("+");
        let v = std::thread::Builder::new()
            .stack_size(1 << 20)
            .spawn(move || evaluer_numerique(&somme))
            .unwrap()
            .join()
            .unwrap();
        assert!(proche(v, 1024.0));
    }
}
