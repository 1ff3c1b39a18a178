use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use tilawah_core::{
    AuthError, Config, ContentRequest, CredentialStore, FetchError, KeyValueStore, QuranClient,
    ReaderMode, ReaderState, Session, Surah, SurahContent,
};
use crate::tui::AppEvent;

pub type Credentials = CredentialStore<Box<dyn KeyValueStore + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Password,
    Confirm,
}

/// Input state shared by the login and signup screens
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::Confirm => &mut self.confirm_password,
        }
    }

    pub fn next_field(&mut self, screen: Screen) {
        self.focus = match (self.focus, screen) {
            (FormField::Email, _) => FormField::Password,
            (FormField::Password, Screen::Signup) => FormField::Confirm,
            (FormField::Password, _) | (FormField::Confirm, _) => FormField::Email,
        };
    }

    pub fn prev_field(&mut self, screen: Screen) {
        self.focus = match (self.focus, screen) {
            (FormField::Email, Screen::Signup) => FormField::Confirm,
            (FormField::Email, _) => FormField::Password,
            (FormField::Password, _) => FormField::Email,
            (FormField::Confirm, _) => FormField::Password,
        };
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub session: Option<Session>,

    // Reading page
    pub reader: ReaderState,
    pub picker_state: ListState,

    // Content state
    pub content_scroll: u16,
    pub content_height: u16,
    pub total_content_lines: u16,

    // Login / signup
    pub form: AuthForm,

    // Panel areas for mouse hit-testing (updated during render)
    pub content_area: Option<Rect>,
    pub picker_area: Option<Rect>,

    // Data
    client: QuranClient,
    credentials: Credentials,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        config: &Config,
        credentials: Credentials,
        session: Option<Session>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let client = QuranClient::new(config.api_base_url(), config.translation_edition());

        Self {
            should_quit: false,
            screen: Screen::Home,
            session,

            reader: ReaderState::new(),
            picker_state: ListState::default(),

            content_scroll: 0,
            content_height: 0,
            total_content_lines: 0,

            form: AuthForm::default(),

            content_area: None,
            picker_area: None,

            client,
            credentials,
            events,
        }
    }

    // Remote content

    /// Fetch the Surah index in the background
    pub fn start_index_load(&mut self) {
        self.reader.begin_index_load();

        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client.fetch_surahs().await;
            let _ = tx.send(AppEvent::SurahsLoaded(result));
        });
    }

    pub fn apply_index(&mut self, result: Result<Vec<Surah>, FetchError>) {
        self.reader.finish_index_load(result);
        self.reset_picker_selection();
    }

    /// Retry the index if it never arrived
    pub fn retry_index(&mut self) {
        if self.reader.surahs().is_none() && !self.reader.is_index_loading() {
            self.start_index_load();
        }
    }

    /// Load the Surah highlighted in the picker
    pub fn select_highlighted(&mut self) {
        let Some(number) = self.highlighted_surah().map(|s| s.number) else {
            return;
        };

        if let Some(request) = self.reader.select(number) {
            debug!(surah = number, request = request.id, "selected surah");
            self.content_scroll = 0;

            let client = self.client.clone();
            let tx = self.events.clone();
            tokio::spawn(async move {
                let result = client.fetch_surah(request.surah).await;
                let _ = tx.send(AppEvent::SurahLoaded { request, result });
            });
        }
    }

    pub fn apply_content(&mut self, request: ContentRequest, result: Result<SurahContent, FetchError>) {
        let loaded = result.is_ok();
        if !self.reader.finish_content_load(request, result) {
            debug!(surah = request.surah, request = request.id, "ignored superseded response");
            return;
        }
        if loaded {
            // Scroll to top
            self.content_scroll = 0;
        }
    }

    // Picker

    pub fn open_picker(&mut self) {
        if self.reader.open_picker() {
            self.reset_picker_selection();
        }
    }

    pub fn close_picker(&mut self) {
        self.reader.close_picker();
    }

    pub fn highlighted_surah(&self) -> Option<&Surah> {
        let filtered = self.reader.filtered_surahs();
        self.picker_state
            .selected()
            .and_then(|i| filtered.get(i).copied())
    }

    pub fn picker_nav_down(&mut self) {
        let len = self.reader.filtered_surahs().len();
        if len > 0 {
            let i = self.picker_state.selected().unwrap_or(0);
            self.picker_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn picker_nav_up(&mut self) {
        let i = self.picker_state.selected().unwrap_or(0);
        self.picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn picker_nav_first(&mut self) {
        self.reset_picker_selection();
    }

    pub fn picker_nav_last(&mut self) {
        let len = self.reader.filtered_surahs().len();
        if len > 0 {
            self.picker_state.select(Some(len - 1));
        }
    }

    pub fn search_push(&mut self, c: char) {
        self.reader.push_search_char(c);
        self.reset_picker_selection();
    }

    pub fn search_pop(&mut self) {
        self.reader.pop_search_char();
        self.reset_picker_selection();
    }

    pub fn search_clear(&mut self) {
        self.reader.clear_search();
        self.reset_picker_selection();
    }

    fn reset_picker_selection(&mut self) {
        let selection = if self.reader.filtered_surahs().is_empty() {
            None
        } else {
            Some(0)
        };
        self.picker_state.select(selection);
    }

    // Content scrolling
    pub fn scroll_down(&mut self) {
        if self.content_scroll < self.max_scroll() {
            self.content_scroll = self.content_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half_page = self.content_height / 2;
        self.content_scroll = (self.content_scroll + half_page).min(self.max_scroll());
    }

    pub fn scroll_half_page_up(&mut self) {
        let half_page = self.content_height / 2;
        self.content_scroll = self.content_scroll.saturating_sub(half_page);
    }

    pub fn scroll_to_top(&mut self) {
        self.content_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.content_scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        self.total_content_lines.saturating_sub(self.content_height)
    }

    // Sessions

    pub fn open_login(&mut self) {
        self.form = AuthForm::default();
        self.screen = Screen::Login;
    }

    pub fn open_signup(&mut self) {
        self.form = AuthForm::default();
        self.screen = Screen::Signup;
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    pub fn submit_form(&mut self) {
        let result = match self.screen {
            Screen::Login => self.credentials.login(&self.form.email, &self.form.password),
            Screen::Signup => self.credentials.signup(
                &self.form.email,
                &self.form.password,
                &self.form.confirm_password,
            ),
            Screen::Home => return,
        };

        match result {
            Ok(session) => {
                self.session = Some(session);
                self.form = AuthForm::default();
                self.screen = Screen::Home;
            }
            Err(e) => {
                if let AuthError::Storage(ref cause) = e {
                    warn!(%cause, "credential storage failed");
                }
                self.form.error = Some(e.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = self.credentials.logout(session) {
                warn!(error = %e, "failed to clear session");
            }
        }
    }

    // Title helpers
    pub fn content_title(&self) -> String {
        match (self.reader.mode(), self.reader.content()) {
            (ReaderMode::ContentShown, Some(content)) => format!(
                "{}. {} ({})",
                content.surah.number, content.surah.english_name, content.surah.english_name_translation
            ),
            (ReaderMode::ContentLoading, _) => "Loading".to_string(),
            _ => "Tilawah".to_string(),
        }
    }
}
