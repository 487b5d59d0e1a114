//! Main application UI.
//! Tag selection screen, quiz screen, fullscreen keys and the aspect-ratio lock.

use arabic_flashcards::ledger;
use arabic_flashcards::models::{
    ConfirmAction, QuizSession, RevealState, SelectionFilter, TagSelector, Validation,
    Verdict,
};
use arabic_flashcards::window::{EventOrigin, ResizeEvent, ResizeGovernor};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Width divided by height of the main window.
pub const ASPECT_RATIO: f64 = 9.0 / 16.0;
pub const INITIAL_WIDTH: u32 = 400;

const CORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(144, 238, 144);
const INCORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 192, 203);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(226, 0, 4);

enum AppScreen {
    TagSelector(TagSelector),
    Quiz(QuizSession),
}

/// Actions collected while rendering and applied afterwards.
enum QuizAction {
    ToggleReveal,
    Check,
    Confirm,
    Next,
    SaveTransliteration,
    BackToSelector,
}

enum SelectorAction {
    Start,
    OpenLedger(PathBuf),
}

pub struct TranslatorApp {
    screen: AppScreen,
    governor: ResizeGovernor,
    last_size: Option<(u32, u32)>,
    fullscreen: bool,
    status_message: Option<String>,
    amended_latin: String,
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_fullscreen_keys(ctx);
        self.govern_aspect_ratio(ctx);

        match self.screen {
            AppScreen::TagSelector(_) => self.render_selector_screen(ctx),
            AppScreen::Quiz(_) => self.render_quiz_screen(ctx),
        }
    }
}

impl TranslatorApp {
    pub fn new(ledger_path: impl AsRef<Path>) -> Self {
        Self {
            screen: AppScreen::TagSelector(open_selector(ledger_path.as_ref())),
            governor: ResizeGovernor::new(ASPECT_RATIO),
            last_size: None,
            fullscreen: false,
            status_message: None,
            amended_latin: String::new(),
        }
    }

    /// F11 toggles fullscreen, Escape leaves it.
    fn handle_fullscreen_keys(&mut self, ctx: &egui::Context) {
        let (f11, escape) =
            ctx.input(|i| (i.key_pressed(egui::Key::F11), i.key_pressed(egui::Key::Escape)));

        let wanted = if f11 {
            !self.fullscreen
        } else if escape {
            false
        } else {
            self.fullscreen
        };

        if wanted != self.fullscreen {
            self.fullscreen = wanted;
            self.governor.release();
            self.last_size = None;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(wanted));
        }
    }

    /// Feeds window size changes to the governor and applies its corrections.
    fn govern_aspect_ratio(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.governor.poll(now);

        if !self.fullscreen {
            if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
                let size = (rect.width().round() as u32, rect.height().round() as u32);
                if self.last_size != Some(size) {
                    self.last_size = Some(size);
                    let event = ResizeEvent {
                        origin: EventOrigin::Window,
                        width: size.0,
                        height: size.1,
                    };
                    if let Some(geometry) = self.governor.on_resize(event, now) {
                        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                            geometry.width as f32,
                            geometry.height as f32,
                        )));
                    }
                }
            }
        }

        // Keep frames coming until the pending release has run.
        if let Some(deadline) = self.governor.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    /// Renders the tag checkboxes and the button that starts the quiz
    fn render_selector_screen(&mut self, ctx: &egui::Context) {
        let mut action: Option<SelectorAction> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let AppScreen::TagSelector(selector) = &mut self.screen else {
                return;
            };

            ui.horizontal(|ui| {
                if ui.button("Load Tags").clicked() {
                    action = Some(SelectorAction::Start);
                }
                if ui.button("Open word list…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                    {
                        action = Some(SelectorAction::OpenLedger(path));
                    }
                }
            });
            ui.label(format!("Word list: {}", selector.ledger_path.display()));

            if let Some(message) = &self.status_message {
                ui.colored_label(ERROR_COLOR, message);
            }
            ui.separator();

            if selector.is_empty() {
                ui.label("No tags found - all words will be used.");
            }

            egui::ScrollArea::vertical()
                .id_salt("tag_list")
                .show(ui, |ui| {
                    for (tag, checked) in selector.toggles_mut() {
                        ui.checkbox(checked, tag.as_str());
                    }
                });
        });

        match action {
            Some(SelectorAction::Start) => self.start_quiz(),
            Some(SelectorAction::OpenLedger(path)) => {
                self.status_message = None;
                self.screen = AppScreen::TagSelector(open_selector(&path));
            }
            None => {}
        }
    }

    /// Loads the entries matching the checked tags and opens the quiz.
    fn start_quiz(&mut self) {
        let AppScreen::TagSelector(selector) = &self.screen else {
            return;
        };

        let filter = selector.confirm();
        log_selection(&filter);
        let entries = ledger::load_entries_or_sample(&selector.ledger_path, &filter);

        match QuizSession::start(&selector.ledger_path, entries) {
            Ok(session) => {
                self.status_message = None;
                self.amended_latin.clear();
                self.screen = AppScreen::Quiz(session);
            }
            Err(e) => {
                warn!("Cannot start quiz: {}", e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Renders the current word, the answer field and the quiz buttons
    fn render_quiz_screen(&mut self, ctx: &egui::Context) {
        let mut actions: Vec<QuizAction> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let AppScreen::Quiz(session) = &mut self.screen else {
                return;
            };

            let entry = session.current().clone();
            let revealed = session.reveal_state() == RevealState::Shown;

            ui.horizontal(|ui| {
                ui.heading(&entry.english);
                ui.label(format!("({})", entry.word_type));
            });
            ui.add_space(20.0);

            ui.group(|ui| {
                ui.set_min_height(80.0);
                ui.vertical_centered(|ui| {
                    if revealed {
                        ui.heading(&entry.arabic_latin);
                        ui.heading(&entry.arabic);
                    } else {
                        ui.label("(Click 'Show' to reveal)");
                    }
                });
            });
            ui.add_space(20.0);

            let background = match session.validation() {
                Validation::CorrectLocked => CORRECT_COLOR,
                Validation::Incorrect => INCORRECT_COLOR,
                Validation::Unanswered => egui::Color32::WHITE,
            };
            let response = ui.add(
                egui::TextEdit::singleline(&mut session.answer)
                    .hint_text("transliteration")
                    .text_color(egui::Color32::BLACK)
                    .background_color(background)
                    .desired_width(f32::INFINITY),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(QuizAction::Confirm);
                response.request_focus();
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let reveal_label = if revealed { "Hide" } else { "Show" };
                if ui
                    .add_enabled(session.can_toggle_reveal(), egui::Button::new(reveal_label))
                    .clicked()
                {
                    actions.push(QuizAction::ToggleReveal);
                }
                if ui
                    .add_enabled(session.can_submit(), egui::Button::new("Check"))
                    .clicked()
                {
                    actions.push(QuizAction::Check);
                }
                if ui.button("Next").clicked() {
                    actions.push(QuizAction::Next);
                }
            });

            if revealed {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label("Fix transliteration:");
                    ui.text_edit_singleline(&mut self.amended_latin);
                    if ui.button("Save").clicked() {
                        actions.push(QuizAction::SaveTransliteration);
                    }
                });
            }

            ui.add_space(20.0);
            if let Some(message) = &self.status_message {
                ui.colored_label(ERROR_COLOR, message);
            }

            // Labelled with the current tag; goes back to the selector.
            if ui.button(format!("⟵ {}", entry.tag)).clicked() {
                actions.push(QuizAction::BackToSelector);
            }
        });

        for action in actions {
            self.apply_quiz_action(action);
        }
    }

    fn apply_quiz_action(&mut self, action: QuizAction) {
        let AppScreen::Quiz(session) = &mut self.screen else {
            return;
        };

        match action {
            QuizAction::ToggleReveal => {
                session.toggle_reveal();
            }
            QuizAction::Check => {
                let answer = session.answer.clone();
                log_verdict(session.submit_answer(&answer));
            }
            QuizAction::Confirm => match session.confirm() {
                ConfirmAction::Submitted(verdict) => log_verdict(verdict),
                ConfirmAction::Advanced => self.amended_latin.clear(),
            },
            QuizAction::Next => {
                session.next_word();
                self.amended_latin.clear();
            }
            QuizAction::SaveTransliteration => {
                let amended = self.amended_latin.trim().to_string();
                if amended.is_empty() {
                    return;
                }
                let path = session.ledger_path().to_path_buf();
                let previous = session.amend_transliteration(&amended);
                let result = ledger::replace_transliteration(&path, &previous, &amended);
                self.status_message = match result {
                    Ok(_) => None,
                    Err(e) => {
                        warn!("Could not update ledger: {}", e);
                        Some(format!("Could not update word list: {}", e))
                    }
                };
                self.amended_latin.clear();
            }
            QuizAction::BackToSelector => {
                let placeholder = AppScreen::TagSelector(TagSelector::new("", Vec::new()));
                if let AppScreen::Quiz(session) = std::mem::replace(&mut self.screen, placeholder) {
                    let path = session.return_to_selector();
                    self.status_message = None;
                    self.screen = AppScreen::TagSelector(open_selector(&path));
                }
            }
        }
    }
}

/// Builds the selector for `path`. An unreadable ledger yields no tags, which
/// later falls back to the sample list.
fn open_selector(path: &Path) -> TagSelector {
    let tags = match ledger::load_tags(path) {
        Ok(tags) => tags,
        Err(e) => {
            warn!("Could not read tags from {}: {}", path.display(), e);
            Default::default()
        }
    };
    TagSelector::new(path, tags)
}

fn log_selection(filter: &SelectionFilter) {
    if filter.is_all() {
        info!("No tags selected, using every word");
    } else {
        info!("Selected tags: {:?}", filter.tags().collect::<Vec<_>>());
    }
}

fn log_verdict(verdict: Verdict) {
    match verdict {
        Verdict::Correct => info!("Correct answer"),
        Verdict::Incorrect => info!("Incorrect answer"),
        Verdict::Ignored => {}
    }
}
