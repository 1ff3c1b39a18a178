//! UI-agnostic reading page state
//!
//! `ReaderState` owns everything the reading page shows: the Surah index, the
//! currently loaded Surah, loading flags, the last error and the picker sheet.
//! Front-ends call the transition methods and run the fetches they ask for;
//! fetch outcomes come back through `finish_index_load` and
//! `finish_content_load`.

use crate::error::FetchError;
use crate::filter::filter_surahs;
use crate::model::{Surah, SurahContent};

/// Which of the page's exclusive modes is active (the picker is orthogonal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    Bootstrapping,
    Idle,
    ContentLoading,
    ContentShown,
}

/// Ticket for a content fetch issued by [`ReaderState::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRequest {
    pub id: u64,
    pub surah: u32,
}

#[derive(Debug, Clone)]
pub struct ReaderState {
    surahs: Option<Vec<Surah>>,
    content: Option<SurahContent>,
    index_loading: bool,
    content_loading: bool,
    last_error: Option<FetchError>,
    search_query: String,
    picker_open: bool,
    latest_request: u64,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderState {
    /// Starts out bootstrapping: the index load is considered issued.
    pub fn new() -> Self {
        Self {
            surahs: None,
            content: None,
            index_loading: true,
            content_loading: false,
            last_error: None,
            search_query: String::new(),
            picker_open: false,
            latest_request: 0,
        }
    }

    pub fn mode(&self) -> ReaderMode {
        if self.content_loading {
            ReaderMode::ContentLoading
        } else if self.content.is_some() {
            ReaderMode::ContentShown
        } else if self.index_loading {
            ReaderMode::Bootstrapping
        } else {
            ReaderMode::Idle
        }
    }

    pub fn surahs(&self) -> Option<&[Surah]> {
        self.surahs.as_deref()
    }

    pub fn content(&self) -> Option<&SurahContent> {
        self.content.as_ref()
    }

    pub fn is_index_loading(&self) -> bool {
        self.index_loading
    }

    pub fn is_content_loading(&self) -> bool {
        self.content_loading
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    // Index loading

    /// Mark a (re)load of the index as in flight
    pub fn begin_index_load(&mut self) {
        self.index_loading = true;
        if self.last_error == Some(FetchError::Index) {
            self.last_error = None;
        }
    }

    /// Apply the outcome of an index fetch. Success replaces the whole index;
    /// failure leaves whatever was there before.
    pub fn finish_index_load(&mut self, result: Result<Vec<Surah>, FetchError>) {
        self.index_loading = false;
        match result {
            Ok(surahs) => self.surahs = Some(surahs),
            Err(_) => self.last_error = Some(FetchError::Index),
        }
    }

    // Picker

    /// Open the picker sheet. Refused while a Surah is loading; returns
    /// whether the picker is now open.
    pub fn open_picker(&mut self) -> bool {
        if !self.content_loading {
            self.picker_open = true;
        }
        self.picker_open
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn toggle_picker(&mut self) {
        if self.picker_open {
            self.close_picker();
        } else {
            self.open_picker();
        }
    }

    // Search

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    /// What the picker lists for the current query (empty until the index loads)
    pub fn filtered_surahs(&self) -> Vec<&Surah> {
        self.surahs
            .as_deref()
            .map(|surahs| filter_surahs(surahs, &self.search_query))
            .unwrap_or_default()
    }

    // Content loading

    /// Choose a Surah from the open picker.
    ///
    /// Returns the request the caller must fetch, or `None` when the picker is
    /// closed. Any earlier request still in flight is superseded.
    pub fn select(&mut self, surah: u32) -> Option<ContentRequest> {
        if !self.picker_open {
            return None;
        }

        self.picker_open = false;
        self.content_loading = true;
        self.content = None;
        self.last_error = None;
        self.latest_request += 1;

        Some(ContentRequest {
            id: self.latest_request,
            surah,
        })
    }

    /// Apply the outcome of a content fetch.
    ///
    /// Returns `false` (and changes nothing) when `request` has been superseded
    /// by a later selection.
    pub fn finish_content_load(
        &mut self,
        request: ContentRequest,
        result: Result<SurahContent, FetchError>,
    ) -> bool {
        if request.id != self.latest_request {
            return false;
        }

        self.content_loading = false;
        match result {
            Ok(content) => self.content = Some(content),
            Err(_) => {
                self.content = None;
                self.last_error = Some(FetchError::Content {
                    surah: request.surah,
                });
            }
        }
        true
    }
}
