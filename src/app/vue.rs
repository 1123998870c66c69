// src/app/vue.rs
//
// Vue (UI egui) — banc de correction, natif + web
// -----------------------------------------------
// Objectifs :
// - Même AppCorrecteur (etat.rs) pour natif + wasm
// - Diagnostic recalculé à chaque frappe (le noyau est pur, aucun coût caché)
// - Enter corrige (quand le champ réponse a le focus)
// - Boutons d'insertion pour les notations qu'un clavier tape mal (π, ½, \frac...)

use eframe::egui;

use super::etat::AppCorrecteur;
use correcteur_qpur::noyau::Strategie;

impl AppCorrecteur {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Correcteur Q-pur");
                ui.add_space(6.0);

                self.ui_saisies(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_verdict(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_diagnostic(ui);
            });
    }

    fn ui_saisies(&mut self, ui: &mut egui::Ui) {
        ui.label("Réponse élève :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.reponse)
                .desired_width(ui.available_width())
                .hint_text("Ex: \\frac{3}{8}, 0,375, ½ - ⅛, sqrt(2)")
                .id_source("reponse_edit")
                .code_editor(),
        );

        if self.focus_reponse {
            resp.request_focus();
            self.focus_reponse = false;
        }

        if resp.changed() {
            self.rafraichir_diagnostic();
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.corriger();
        }

        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            for (label, texte) in [
                ("π", "\\pi"),
                ("½", "½"),
                ("a/b", "\\frac{}{}"),
                ("√", "\\sqrt{}"),
                ("x²", "^{2}"),
                ("×", "×"),
                ("−", "−"),
            ] {
                self.bouton_insert(ui, label, texte);
            }
        });

        ui.add_space(8.0);

        ui.label("Réponse attendue :");
        ui.add(
            egui::TextEdit::singleline(&mut self.attendu)
                .desired_width(ui.available_width())
                .hint_text(r#"{"value": 0.375, "tolerance": 1e-9}  |  4  |  apple pie"#)
                .id_source("attendu_edit")
                .code_editor(),
        );

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let corriger = ui
                .add_sized([96.0, 30.0], egui::Button::new("Corriger"))
                .on_hover_text("Note la réponse (Enter)");
            if corriger.clicked() {
                self.corriger();
            }

            let c = ui
                .add_sized([56.0, 30.0], egui::Button::new("C"))
                .on_hover_text("Efface seulement la réponse");
            if c.clicked() {
                self.clear_reponse();
            }

            let ac = ui
                .add_sized([56.0, 30.0], egui::Button::new("AC"))
                .on_hover_text("Remise à zéro totale");
            if ac.clicked() {
                self.reset_total();
            }
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_verdict(&mut self, ui: &mut egui::Ui) {
        ui.label("Verdict :");
        match &self.verdict {
            None => {
                ui.monospace("—");
            }
            Some(v) => {
                let voie = match v.strategie {
                    Strategie::Texte => "texte",
                    Strategie::Exacte => "exacte",
                    Strategie::Numerique => "flottante",
                    Strategie::Aucune => "aucune",
                };
                let texte = if v.correct {
                    format!("CORRECT (voie {voie})")
                } else {
                    "INCORRECT".to_string()
                };
                let couleur = if v.correct {
                    egui::Color32::from_rgb(40, 160, 70)
                } else {
                    ui.visuals().error_fg_color
                };
                ui.colored_label(couleur, texte);
            }
        }
    }

    fn ui_diagnostic(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Diagnostic")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_diagnostic(ui, "Normalisé", "diag_normalise", &self.diagnostic.normalise);
                Self::champ_diagnostic(ui, "Jetons", "diag_jetons", &self.diagnostic.jetons);
                Self::champ_diagnostic(ui, "Fraction", "diag_fraction", &self.diagnostic.fraction);
                Self::champ_diagnostic(ui, "Valeur", "diag_valeur", &self.diagnostic.valeur);
            });
    }

    fn champ_diagnostic(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(ui.text_style_height(&egui::TextStyle::Monospace));
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        self.reponse.push_str(to_insert);
        self.rafraichir_diagnostic();
        self.focus_reponse = true;
    }
}
