// src/noyau/jetons.rs

use super::erreurs::ErreurLexicale;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    // Chiffres + au plus un point décimal (ex: "12", "3.5", ".5", "7.")
    Nombre(String),

    // Suite maximale de lettres (pi, sqrt, x, ...), casse conservée.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,

    // Séparateur d'arguments : max(1, 2)
    Virgule,

    Fin,
}

/// Tokenize un texte normalisé.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5) ; un second point ouvre un nouveau nombre
/// - identifiants [a-zA-Z]+
/// - opérateurs + - * / ^
/// - parenthèses ( ) et virgule
///
/// Les blancs sont ignorés ; `Tok::Fin` termine toujours la suite.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLexicale> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point = false;
            while i < chars.len() {
                match chars[i] {
                    d if d.is_ascii_digit() => i += 1,
                    '.' if !point => {
                        point = true;
                        i += 1;
                    }
                    _ => break,
                }
            }

            // "." tout seul n'est pas un nombre
            if i - start == 1 && point {
                return Err(ErreurLexicale('.'));
            }

            out.push(Tok::Nombre(chars[start..i].iter().collect()));
            continue;
        }

        return Err(ErreurLexicale(c));
    }

    out.push(Tok::Fin);
    Ok(out)
}

/// Format utilitaire (diagnostic) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Nombre(n) => n.clone(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::Fin => "⊣".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
