//! Language selection workflow.
//!
//! Listing -> AwaitingChoice -> Committed | Cancelled. With a live holder the
//! choice comes from an interactive menu; without one (operator context) the
//! first registered language is picked and written to the global scope.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::i18n::{LanguageId, LanguageSystem};
use crate::preferences::PreferenceHolder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub language: LanguageId,
    pub label: String,
}

/// Everything needed to render the language menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMenu {
    pub title: String,
    pub body: String,
    pub options: Vec<MenuOption>,
    pub back_label: String,
}

/// How an open menu was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResponse {
    /// Index into [`LanguageMenu::options`]. Out-of-range indexes act as back.
    Selected(usize),
    Back,
    /// Closed without an answer: timed out, replaced, or the user went away.
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceScope {
    Entity,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Back,
    Dismissed,
    /// The holder stopped being addressable before the write.
    EntityInvalidated,
    /// The store refused the write; nothing changed.
    CommitFailed,
}

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Committed {
        language: LanguageId,
        scope: PreferenceScope,
    },
    Cancelled(CancelReason),
}

/// Shows menus to holders and waits for the answer.
///
/// `present` must always return, mapping any form of abandonment to
/// [`MenuResponse::Dismissed`].
#[async_trait]
pub trait MenuPresenter: Send + Sync {
    type Target: PreferenceHolder;

    async fn present(&self, target: &Self::Target, menu: &LanguageMenu) -> MenuResponse;

    async fn notify(&self, target: &Self::Target, text: String);
}

pub struct SelectionWorkflow<P: MenuPresenter> {
    language: Arc<LanguageSystem>,
    presenter: P,
}

impl<P: MenuPresenter> SelectionWorkflow<P> {
    pub fn new(language: Arc<LanguageSystem>, presenter: P) -> Self {
        Self { language, presenter }
    }

    pub async fn run(&self, entity: Option<&P::Target>) -> SelectionOutcome {
        let menu = self.listing(entity).await;

        let interactive = entity.filter(|e| e.is_addressable());
        let response = match interactive {
            Some(target) => self.presenter.present(target, &menu).await,
            None => self.choose_without_menu(&menu),
        };

        let option = match response {
            MenuResponse::Selected(index) => match menu.options.get(index) {
                Some(option) => option,
                None => return SelectionOutcome::Cancelled(CancelReason::Back),
            },
            MenuResponse::Back => return SelectionOutcome::Cancelled(CancelReason::Back),
            MenuResponse::Dismissed => return SelectionOutcome::Cancelled(CancelReason::Dismissed),
        };

        match interactive {
            Some(target) => self.commit_entity(target, option).await,
            None => self.commit_global(option).await,
        }
    }

    async fn listing(&self, entity: Option<&P::Target>) -> LanguageMenu {
        let holder = entity.map(|e| e as &dyn PreferenceHolder);
        let catalog = self.language.catalog();

        let options = catalog
            .languages()
            .map(|id| MenuOption {
                label: catalog.display_name(id.as_str()).to_string(),
                language: id.clone(),
            })
            .collect();

        let current = self.language.get_player_language(holder).await;
        let current_name = catalog.display_name(current.as_str());

        LanguageMenu {
            title: self.language.translate(holder, "system.language_title", &[]).await,
            body: self
                .language
                .translate(holder, "system.current_language", &[&current_name])
                .await,
            options,
            back_label: self.language.translate(holder, "system.back", &[]).await,
        }
    }

    fn choose_without_menu(&self, menu: &LanguageMenu) -> MenuResponse {
        info!("=== Language selection ===");
        for (i, option) in menu.options.iter().enumerate() {
            info!("{}. {} ({})", i + 1, option.label, option.language);
        }
        info!("{}. {}", menu.options.len() + 1, menu.back_label);
        MenuResponse::Selected(0)
    }

    async fn commit_entity(&self, target: &P::Target, option: &MenuOption) -> SelectionOutcome {
        if !target.is_addressable() {
            debug!("{} went away before the language was saved", target.label());
            return SelectionOutcome::Cancelled(CancelReason::EntityInvalidated);
        }

        let code = option.language.as_str();
        if !self.language.set_player_language(Some(target), code).await {
            return SelectionOutcome::Cancelled(CancelReason::CommitFailed);
        }

        let confirmation = self.confirmation(option);
        self.presenter.notify(target, confirmation).await;

        SelectionOutcome::Committed {
            language: option.language.clone(),
            scope: PreferenceScope::Entity,
        }
    }

    async fn commit_global(&self, option: &MenuOption) -> SelectionOutcome {
        if !self.language.set_global_language(option.language.as_str()).await {
            return SelectionOutcome::Cancelled(CancelReason::CommitFailed);
        }

        info!("[language] {}", self.confirmation(option));

        SelectionOutcome::Committed {
            language: option.language.clone(),
            scope: PreferenceScope::Global,
        }
    }

    /// Confirmation text, rendered in the language just chosen.
    fn confirmation(&self, option: &MenuOption) -> String {
        self.language
            .text(&option.language, "system.language_changed", &[&option.label])
    }
}
