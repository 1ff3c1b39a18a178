//! Qur'an data model
//!
//! Field names follow the remote text API (camelCase on the wire). Everything
//! here is immutable once fetched; content for a new Surah replaces the old one
//! wholesale instead of being merged into it.

use serde::{Deserialize, Deserializer, Serialize};

/// Shown in place of a translation that the translation edition did not supply
pub const TRANSLATION_PLACEHOLDER: &str = "Translation not available.";

/// Where a Surah was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
}

impl RevelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevelationType::Meccan => "Meccan",
            RevelationType::Medinan => "Medinan",
        }
    }
}

/// One entry of the Surah index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u32,
    /// Native (Arabic) name
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub revelation_type: RevelationType,
    pub number_of_ayahs: u32,
}

/// A single verse in the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Position across the whole corpus
    pub number: u32,
    pub text: String,
    pub number_in_surah: u32,
    pub juz: u32,
    pub manzil: u32,
    pub page: u32,
    pub ruku: u32,
    pub hizb_quarter: u32,
    #[serde(deserialize_with = "deserialize_sajda")]
    pub sajda: bool,
}

/// Metadata describing a translation edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub identifier: String,
    pub language: String,
    pub name: String,
    pub english_name: String,
    pub format: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub direction: Option<String>,
}

/// One verse of a translation edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahTranslation {
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub edition: Option<Edition>,
}

/// An original verse paired with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedAyah {
    #[serde(flatten)]
    pub ayah: Ayah,
    pub translation_text: String,
}

/// A Surah with its translated verses, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahContent {
    #[serde(flatten)]
    pub surah: Surah,
    pub ayahs: Vec<TranslatedAyah>,
}

/// `GET /surah/{n}` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SurahDetail {
    #[serde(flatten)]
    pub surah: Surah,
    pub ayahs: Vec<Ayah>,
}

/// `GET /surah/{n}/{edition}` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SurahTranslation {
    pub ayahs: Vec<AyahTranslation>,
}

/// Every API response wraps its payload in `data`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// The API marks prostration verses either with `true` or with an object
/// describing the prostration; both mean the cue is present.
fn deserialize_sajda<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sajda {
        Flag(bool),
        Detail(serde_json::Map<String, serde_json::Value>),
    }

    Ok(match Sajda::deserialize(deserializer)? {
        Sajda::Flag(flag) => flag,
        Sajda::Detail(_) => true,
    })
}

/// Pair each original verse with the translation at the same position.
///
/// Always yields one entry per original verse. Missing (or empty) translations
/// get [`TRANSLATION_PLACEHOLDER`]; surplus translations are dropped.
pub fn combine_ayahs(original: Vec<Ayah>, translations: &[AyahTranslation]) -> Vec<TranslatedAyah> {
    original
        .into_iter()
        .enumerate()
        .map(|(idx, ayah)| {
            let translation_text = translations
                .get(idx)
                .map(|t| t.text.as_str())
                .filter(|text| !text.is_empty())
                .unwrap_or(TRANSLATION_PLACEHOLDER)
                .to_string();
            TranslatedAyah {
                ayah,
                translation_text,
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_combine_shorter_translation_uses_placeholder() {
        let original: Vec<Ayah> = (1..=7).map(ayah).collect();
        let translations: Vec<AyahTranslation> = (1..=6).map(translation).collect();

        let combined = combine_ayahs(original, &translations);

        assert_eq!(combined.len(), 7);
        assert_eq!(combined[0].translation_text, "Verse 1");
        assert_eq!(combined[5].translation_text, "Verse 6");
        assert_eq!(combined[6].translation_text, TRANSLATION_PLACEHOLDER);
        assert_eq!(combined[6].ayah.number_in_surah, 7);
    }

    #[test]
    fn test_combine_ignores_surplus_translations() {
        let original: Vec<Ayah> = (1..=3).map(ayah).collect();
        let translations: Vec<AyahTranslation> = (1..=5).map(translation).collect();

        let combined = combine_ayahs(original, &translations);

        assert_eq!(combined.len(), 3);
        let texts: Vec<&str> = combined.iter().map(|a| a.translation_text.as_str()).collect();
        assert_eq!(texts, vec!["Verse 1", "Verse 2", "Verse 3"]);
    }

    #[test]
    fn test_combine_is_positional_not_by_number() {
        let original = vec![ayah(1), ayah(2)];
        let translations = vec![translation(42), translation(7)];

        let combined = combine_ayahs(original, &translations);

        assert_eq!(combined[0].translation_text, "Verse 42");
        assert_eq!(combined[1].translation_text, "Verse 7");
    }

    #[test]
    fn test_combine_empty_translation_text_uses_placeholder() {
        let mut blank = translation(1);
        blank.text.clear();

        let combined = combine_ayahs(vec![ayah(1)], &[blank]);

        assert_eq!(combined[0].translation_text, TRANSLATION_PLACEHOLDER);
    }

    #[test]
    fn test_sajda_accepts_flag_and_object() {
        let flagged = serde_json::json!({
            "number": 1160, "text": "x", "numberInSurah": 206, "juz": 9,
            "manzil": 2, "page": 176, "ruku": 136, "hizbQuarter": 72, "sajda": false
        });
        let detailed = serde_json::json!({
            "number": 1160, "text": "x", "numberInSurah": 206, "juz": 9,
            "manzil": 2, "page": 176, "ruku": 136, "hizbQuarter": 72,
            "sajda": { "id": 1, "recommended": true, "obligatory": false }
        });

        let flagged: Ayah = serde_json::from_value(flagged).unwrap();
        let detailed: Ayah = serde_json::from_value(detailed).unwrap();

        assert!(!flagged.sajda);
        assert!(detailed.sajda);
    }

    #[test]
    fn test_surah_detail_decodes_from_api_shape() {
        let payload = serde_json::json!({
            "code": 200,
            "status": "OK",
            "data": {
                "number": 1,
                "name": "سُورَةُ ٱلْفَاتِحَةِ",
                "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening",
                "revelationType": "Meccan",
                "numberOfAyahs": 1,
                "ayahs": [{
                    "number": 1, "text": "بِسْمِ", "numberInSurah": 1, "juz": 1,
                    "manzil": 1, "page": 1, "ruku": 1, "hizbQuarter": 1, "sajda": false
                }]
            }
        });

        let detail: Envelope<SurahDetail> = serde_json::from_value(payload).unwrap();

        assert_eq!(detail.data.surah.english_name, "Al-Faatiha");
        assert_eq!(detail.data.surah.revelation_type, RevelationType::Meccan);
        assert_eq!(detail.data.ayahs.len(), 1);
    }
}
