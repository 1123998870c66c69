// src/noyau/normalise.rs
//
// Normalisation : saisie brute (LaTeX, ASCII-math, Unicode, virgule décimale)
//                 -> texte ASCII-math canonique.
//
// Contrats :
// - Ne jamais échouer : ce qui n'est pas reconnu passe tel quel (le lexer tranchera).
// - Déterministe, sans état.
// - Idempotent : normaliser(normaliser(s)) == normaliser(s).
//
// L'ordre des étapes compte (chaque étape consomme la sortie de la précédente).

use unicode_normalization::UnicodeNormalization;

/// Garde-fou : nombre maximal de passes pour les réécritures "jusqu'à stabilité".
const PASSES_MAX: usize = 256;

/// Idem pour le pipeline complet.
const PASSES_COMPLETES_MAX: usize = 16;

/// Caractères invisibles retirés d'office (zéro-largeur, opérateurs invisibles, espaces insécables).
const INVISIBLES: &[char] = &[
    '\u{00A0}', // espace insécable
    '\u{00AD}', // trait d'union conditionnel
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{2060}', // word joiner
    '\u{2061}', // function application
    '\u{2062}', // invisible times
    '\u{2063}', // invisible separator
    '\u{2064}', // invisible plus
    '\u{202F}', // espace fine insécable
    '\u{FEFF}', // BOM
];

const MOINS: &[char] = &[
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}', '\u{FE58}',
    '\u{FE63}', '\u{FF0D}',
];

const DIVISIONS: &[char] = &['\u{2044}', '\u{2215}', '\u{00F7}', '\u{FF0F}', '\u{2797}'];

const MULTIPLICATIONS: &[char] = &[
    '\u{00D7}', '\u{22C5}', '\u{00B7}', '\u{2219}', '\u{2217}', '\u{2715}', '\u{2716}', '\u{FF0A}',
];

/// Fractions précomposées (demis, tiers, quarts, cinquièmes, sixièmes, huitièmes).
const FRACTIONS_VULGAIRES: &[(char, &str)] = &[
    ('½', "(1/2)"),
    ('⅓', "(1/3)"),
    ('⅔', "(2/3)"),
    ('¼', "(1/4)"),
    ('¾', "(3/4)"),
    ('⅕', "(1/5)"),
    ('⅖', "(2/5)"),
    ('⅗', "(3/5)"),
    ('⅘', "(4/5)"),
    ('⅙', "(1/6)"),
    ('⅚', "(5/6)"),
    ('⅛', "(1/8)"),
    ('⅜', "(3/8)"),
    ('⅝', "(5/8)"),
    ('⅞', "(7/8)"),
];

/// Espacements et tailles LaTeX supprimés sans argument.
/// `\qquad` avant `\quad` : pas de collision grâce à la règle "non suivi d'une lettre".
const MACROS_ESPACE: &[&str] = &[
    "\\,",
    "\\;",
    "\\:",
    "\\!",
    "\\ ",
    "\\qquad",
    "\\quad",
    "\\enspace",
    "\\thinspace",
    "\\medspace",
    "\\thickspace",
    "\\negthinspace",
    "\\negmedspace",
    "\\negthickspace",
    "\\nobreakspace",
    "\\space",
    "\\displaystyle",
    "\\textstyle",
    "\\big",
    "\\Big",
    "\\bigg",
    "\\Bigg",
    "\\bigl",
    "\\bigr",
    "\\Bigl",
    "\\Bigr",
    "\\biggl",
    "\\biggr",
    "\\Biggl",
    "\\Biggr",
    "\\left",
    "\\right",
];

/// Macros d'espacement à argument : `\hspace{2em}` disparaît entièrement.
const MACROS_ESPACE_ARG: &[&str] = &["\\hspace*", "\\hspace", "\\vspace*", "\\vspace", "\\phantom"];

/// Normalise une saisie brute en ASCII-math canonique.
///
/// Une passe applique les douze étapes dans l'ordre ; on enchaîne les passes
/// jusqu'à stabilité, car une étape tardive peut exposer un motif d'une étape
/// antérieure (`1,\,2` ne devient `1,2` qu'après le retrait de `\,`).
pub fn normaliser(brut: &str) -> String {
    let mut courant = une_passe(brut);
    for _ in 0..PASSES_COMPLETES_MAX {
        let suivant = une_passe(&courant);
        if suivant == courant {
            break;
        }
        courant = suivant;
    }
    courant
}

fn une_passe(brut: &str) -> String {
    // 1) invisibles
    let s: String = brut.chars().filter(|c| !INVISIBLES.contains(c)).collect();

    // 2) forme composée + tirets / divisions / multiplications
    let s = symboles_canoniques(&s);

    // 3) π
    let s = remplacer_macro(&s, "\\pi", "pi").replace('π', "pi");

    // 4) virgule décimale (uniquement entre deux chiffres)
    let s = virgule_decimale(&s);

    // 5) espacements LaTeX, \left/\right, \operatorname{X}
    let s = jusqu_a_stabilite(s, retirer_espacements);

    // 6) fractions vulgaires
    let s = fractions_vulgaires(&s);

    // 7) enveloppe $...$ ou \(...\)
    let s = retirer_enveloppe(&s);

    // 8) \frac{N}{D} -> (N)/(D), imbrications comprises
    let s = jusqu_a_stabilite(s, |t| {
        let t = reecrire_macro(t, "\\frac", 2, |a| format!("({})/({})", a[0], a[1]));
        let t = reecrire_macro(&t, "\\dfrac", 2, |a| format!("({})/({})", a[0], a[1]));
        reecrire_macro(&t, "\\tfrac", 2, |a| format!("({})/({})", a[0], a[1]))
    });

    // 9) \sqrt{X} -> sqrt(X)
    let s = jusqu_a_stabilite(s, |t| {
        reecrire_macro(t, "\\sqrt", 1, |a| format!("sqrt({})", a[0]))
    });

    // 10) ^{X} -> ^(X)
    let s = jusqu_a_stabilite(s, exposants_accolades);

    // 11) {entier} -> entier
    let s = jusqu_a_stabilite(s, accolades_entier);

    // 12) espaces
    espaces(&s)
}

/// Compacte les suites de blancs en une espace et rogne les extrémités.
pub fn espaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/* ------------------------ Étapes ------------------------ */

fn symboles_canoniques(s: &str) -> String {
    let compose: String = s
        .nfc()
        .map(|c| {
            if MOINS.contains(&c) {
                '-'
            } else if DIVISIONS.contains(&c) {
                '/'
            } else if MULTIPLICATIONS.contains(&c) {
                '*'
            } else {
                c
            }
        })
        .collect();

    let t = remplacer_macro(&compose, "\\cdot", "*");
    let t = remplacer_macro(&t, "\\times", "*");
    remplacer_macro(&t, "\\div", "/")
}

fn virgule_decimale(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        let entre_chiffres = c == ','
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        out.push(if entre_chiffres { '.' } else { c });
    }
    out
}

fn retirer_espacements(s: &str) -> String {
    let mut t = s.to_string();
    for nom in MACROS_ESPACE_ARG {
        t = reecrire_macro(&t, nom, 1, |_| String::new());
    }
    for nom in MACROS_ESPACE {
        t = remplacer_macro(&t, nom, "");
    }
    reecrire_macro(&t, "\\operatorname", 1, |a| a[0].to_string())
}

fn fractions_vulgaires(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match FRACTIONS_VULGAIRES.iter().find(|(g, _)| *g == c) {
            Some((_, f)) => out.push_str(f),
            None => out.push(c),
        }
    }
    out
}

/// Retire les enveloppes externes : `$$...$$`, `$...$` ou `\(...\)`, imbrications comprises.
/// Chaque retrait raccourcit le texte : la boucle termine.
fn retirer_enveloppe(s: &str) -> String {
    let mut t = s.trim();

    'externe: loop {
        for (ouvre, ferme) in [("$$", "$$"), ("$", "$"), ("\\(", "\\)")] {
            if t.len() >= ouvre.len() + ferme.len() && t.starts_with(ouvre) && t.ends_with(ferme) {
                t = t[ouvre.len()..t.len() - ferme.len()].trim();
                continue 'externe;
            }
        }
        return t.to_string();
    }
}

/// `^{X}` -> `^(X)` (accolades équilibrées).
fn exposants_accolades(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut reste = s;

    while let Some(pos) = reste.find("^{") {
        let groupe = &reste[pos + 1..];
        match accolade_fermante(groupe) {
            Some(fin) => {
                out.push_str(&reste[..pos]);
                out.push_str("^(");
                out.push_str(&groupe[1..fin]);
                out.push(')');
                reste = &groupe[fin + 1..];
            }
            None => {
                // accolade jamais fermée : on laisse tel quel
                out.push_str(&reste[..pos + 2]);
                reste = &reste[pos + 2..];
            }
        }
    }
    out.push_str(reste);
    out
}

/// `{-12}` -> `-12`, `{7}` -> `7` (entier signé seul entre accolades).
fn accolades_entier(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '{' {
            let mut j = i + 1;
            if j < chars.len() && (chars[j] == '-' || chars[j] == '+') {
                j += 1;
            }
            let debut_chiffres = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j > debut_chiffres && j < chars.len() && chars[j] == '}' {
                out.extend(&chars[i + 1..j]);
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/* ------------------------ Outils macros ------------------------ */

/// Applique `f` jusqu'à ce que la chaîne ne bouge plus (borné).
fn jusqu_a_stabilite(s: String, f: impl Fn(&str) -> String) -> String {
    let mut courant = s;
    for _ in 0..PASSES_MAX {
        let suivant = f(&courant);
        if suivant == courant {
            break;
        }
        courant = suivant;
    }
    courant
}

/// Position de `nom` dans `s`, en refusant `\left` dans `\leftarrow`
/// (si le nom finit par une lettre, il ne doit pas être suivi d'une lettre).
fn chercher_macro(s: &str, nom: &str) -> Option<usize> {
    let finit_par_lettre = nom.chars().last().is_some_and(|c| c.is_ascii_alphabetic());

    s.match_indices(nom).map(|(pos, _)| pos).find(|&pos| {
        !finit_par_lettre
            || !s[pos + nom.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
    })
}

fn remplacer_macro(s: &str, nom: &str, par: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut reste = s;

    while let Some(pos) = chercher_macro(reste, nom) {
        out.push_str(&reste[..pos]);
        out.push_str(par);
        reste = &reste[pos + nom.len()..];
    }
    out.push_str(reste);
    out
}

/// Index de l'accolade fermante correspondant à `s[0] == '{'`.
fn accolade_fermante(s: &str) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => profondeur += 1,
            '}' => {
                profondeur = profondeur.checked_sub(1)?;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Lit un argument LaTeX : `{...}` équilibré, ou un seul caractère alphanumérique
/// (`\frac12`). Renvoie (contenu, octets consommés).
fn lire_argument(s: &str) -> Option<(&str, usize)> {
    let sans_blancs = s.trim_start();
    let decalage = s.len() - sans_blancs.len();
    let c = sans_blancs.chars().next()?;

    if c == '{' {
        let fin = accolade_fermante(sans_blancs)?;
        return Some((&sans_blancs[1..fin], decalage + fin + 1));
    }
    if c.is_ascii_alphanumeric() {
        return Some((&sans_blancs[..1], decalage + 1));
    }
    None
}

/// Réécrit chaque `nom{a1}...{an}` via `f`. Un passage, gauche à droite ;
/// les arguments ne sont pas re-parcourus (c'est le rôle de `jusqu_a_stabilite`).
fn reecrire_macro(s: &str, nom: &str, arite: usize, f: impl Fn(&[&str]) -> String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut reste = s;

    while let Some(pos) = chercher_macro(reste, nom) {
        let mut curseur = pos + nom.len();
        let mut args: Vec<&str> = Vec::with_capacity(arite);

        while args.len() < arite {
            match lire_argument(&reste[curseur..]) {
                Some((arg, n)) => {
                    args.push(arg);
                    curseur += n;
                }
                None => break,
            }
        }

        if args.len() == arite {
            out.push_str(&reste[..pos]);
            out.push_str(&f(&args));
        } else {
            // forme incomplète : on recopie la macro et on continue après elle
            curseur = pos + nom.len();
            out.push_str(&reste[..curseur]);
        }
        reste = &reste[curseur..];
    }
    out.push_str(reste);
    out
}
