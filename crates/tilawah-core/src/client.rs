use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{FetchError, TransportError};
use crate::model::{combine_ayahs, Envelope, Surah, SurahContent, SurahDetail, SurahTranslation};
use crate::transport::{HttpTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";
pub const DEFAULT_TRANSLATION_EDITION: &str = "en.asad";

/// Client for the Qur'an text API
///
/// Holds no mutable state; clone it freely into spawned tasks.
#[derive(Clone)]
pub struct QuranClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    translation_edition: String,
}

impl QuranClient<HttpTransport> {
    pub fn new(base_url: &str, translation_edition: &str) -> Self {
        Self::with_transport(HttpTransport::new(), base_url, translation_edition)
    }
}

impl<T: Transport> QuranClient<T> {
    pub fn with_transport(transport: T, base_url: &str, translation_edition: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            translation_edition: translation_edition.to_string(),
        }
    }

    pub fn translation_edition(&self) -> &str {
        &self.translation_edition
    }

    /// Fetch the Surah index in the order the API delivers it
    pub async fn fetch_surahs(&self) -> Result<Vec<Surah>, FetchError> {
        let url = format!("{}/surah", self.base_url);

        let surahs: Vec<Surah> = self.get_data(&url).await.map_err(|e| {
            warn!(error = %e, "failed to fetch surah index");
            FetchError::Index
        })?;

        debug!(count = surahs.len(), "fetched surah index");
        Ok(surahs)
    }

    /// Fetch one Surah's original text and translation together.
    ///
    /// Both requests are in flight at the same time; the first failure fails
    /// the whole call and no partial content is returned.
    pub async fn fetch_surah(&self, number: u32) -> Result<SurahContent, FetchError> {
        let original_url = format!("{}/surah/{}", self.base_url, number);
        let translation_url = format!(
            "{}/surah/{}/{}",
            self.base_url, number, self.translation_edition
        );

        let (detail, translation) = tokio::try_join!(
            self.get_data::<SurahDetail>(&original_url),
            self.get_data::<SurahTranslation>(&translation_url),
        )
        .map_err(|e| {
            warn!(surah = number, error = %e, "failed to fetch surah content");
            FetchError::Content { surah: number }
        })?;

        let ayahs = combine_ayahs(detail.ayahs, &translation.ayahs);
        debug!(
            surah = number,
            ayahs = ayahs.len(),
            translations = translation.ayahs.len(),
            "fetched surah content"
        );

        Ok(SurahContent {
            surah: detail.surah,
            ayahs,
        })
    }

    async fn get_data<D: DeserializeOwned>(&self, url: &str) -> Result<D, TransportError> {
        let body = self.transport.get_json(url).await?;
        let envelope: Envelope<D> =
            serde_json::from_value(body).map_err(|e| TransportError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(envelope.data)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::model::fixtures::surah;
    use crate::model::TRANSLATION_PLACEHOLDER;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    const BASE: &str = "http://quran.test/v1";

    fn client(transport: StubTransport) -> QuranClient<StubTransport> {
        QuranClient::with_transport(transport, BASE, DEFAULT_TRANSLATION_EDITION)
    }

    #[tokio::test]
    async fn test_fetch_surahs_preserves_delivered_order() {
        let surahs = vec![surah(3, "Aal-i-Imraan"), surah(1, "Al-Faatiha")];
        let transport = StubTransport::new(vec![(format!("{BASE}/surah"), Ok(index_body(&surahs)))]);

        let fetched = client(transport).fetch_surahs().await.unwrap();

        assert_eq!(fetched, surahs);
    }

    #[tokio::test]
    async fn test_fetch_surahs_status_error_is_index_error() {
        let transport = StubTransport::new(vec![(
            format!("{BASE}/surah"),
            Err(TransportError::Status {
                url: format!("{BASE}/surah"),
                status: 500,
            }),
        )]);

        let result = client(transport.clone()).fetch_surahs().await;

        assert_eq!(result, Err(FetchError::Index));
        assert_eq!(transport.requests().len(), 1, "no retry on failure");
    }

    #[tokio::test]
    async fn test_fetch_surahs_malformed_payload_is_index_error() {
        let transport = StubTransport::new(vec![(
            format!("{BASE}/surah"),
            Ok(serde_json::json!({ "data": "not a list" })),
        )]);

        assert_eq!(client(transport).fetch_surahs().await, Err(FetchError::Index));
    }

    #[tokio::test]
    async fn test_fetch_surah_combines_both_legs() {
        let al_baqara = surah(2, "Al-Baqara");
        let transport = StubTransport::new(vec![
            (format!("{BASE}/surah/2"), Ok(detail_body(&al_baqara, 7))),
            (format!("{BASE}/surah/2/en.asad"), Ok(translation_body(6))),
        ]);

        let content = client(transport.clone()).fetch_surah(2).await.unwrap();

        assert_eq!(content.surah, al_baqara);
        assert_eq!(content.ayahs.len(), 7);
        assert_eq!(content.ayahs[0].translation_text, "Verse 1");
        assert_eq!(content.ayahs[6].translation_text, TRANSLATION_PLACEHOLDER);

        let mut requests = transport.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec![format!("{BASE}/surah/2"), format!("{BASE}/surah/2/en.asad")]
        );
    }

    #[tokio::test]
    async fn test_fetch_surah_fails_when_translation_fails() {
        let transport = StubTransport::new(vec![(
            format!("{BASE}/surah/5"),
            Ok(detail_body(&surah(5, "Al-Maaida"), 3)),
        )]);

        let result = client(transport).fetch_surah(5).await;

        assert_eq!(result, Err(FetchError::Content { surah: 5 }));
    }

    #[tokio::test]
    async fn test_fetch_surah_fails_when_original_fails() {
        let transport = StubTransport::new(vec![(
            format!("{BASE}/surah/5/en.asad"),
            Ok(translation_body(3)),
        )]);

        let result = client(transport).fetch_surah(5).await;

        assert_eq!(result, Err(FetchError::Content { surah: 5 }));
    }

    /// The original leg only completes once the translation leg has started,
    /// so a sequential implementation would never finish.
    #[derive(Clone)]
    struct GatedTransport {
        inner: StubTransport,
        translation_started: Arc<Notify>,
    }

    impl Transport for GatedTransport {
        async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
            if url.ends_with("en.asad") {
                self.translation_started.notify_one();
            } else {
                self.translation_started.notified().await;
            }
            self.inner.get_json(url).await
        }
    }

    #[tokio::test]
    async fn test_fetch_surah_dispatches_legs_concurrently() {
        let transport = GatedTransport {
            inner: StubTransport::new(vec![
                (format!("{BASE}/surah/3"), Ok(detail_body(&surah(3, "Aal-i-Imraan"), 2))),
                (format!("{BASE}/surah/3/en.asad"), Ok(translation_body(2))),
            ]),
            translation_started: Arc::new(Notify::new()),
        };
        let client = QuranClient::with_transport(transport, BASE, DEFAULT_TRANSLATION_EDITION);

        let content = tokio::time::timeout(Duration::from_secs(2), client.fetch_surah(3))
            .await
            .expect("legs should not wait on each other")
            .unwrap();

        assert_eq!(content.ayahs.len(), 2);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = QuranClient::with_transport(StubTransport::default(), "http://x/v1/", "en.sahih");
        assert_eq!(client.base_url, "http://x/v1");
        assert_eq!(client.translation_edition(), "en.sahih");
    }
}
