//! How a loaded Surah is laid out for reading

use crate::model::{SurahContent, TranslatedAyah};

/// Prefatory line shown before a Surah's verses
pub const INVOCATION: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ";

/// Title shown while nothing is selected
pub const MUSHAF_TITLE: &str = "القرآن الكريم";

/// Al-Faatiha carries the invocation as its first verse and At-Tawba has none.
const INVOCATION_EXEMPT: [u32; 2] = [1, 9];

pub fn shows_invocation(surah_number: u32) -> bool {
    !INVOCATION_EXEMPT.contains(&surah_number)
}

/// One visual unit of the reading pane, top to bottom
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingBlock<'a> {
    Header {
        name: &'a str,
        english_name: &'a str,
        english_name_translation: &'a str,
        subtitle: String,
    },
    Invocation,
    Verse(&'a TranslatedAyah),
}

pub fn reading_blocks(content: &SurahContent) -> Vec<ReadingBlock<'_>> {
    let surah = &content.surah;
    let mut blocks = Vec::with_capacity(content.ayahs.len() + 2);

    blocks.push(ReadingBlock::Header {
        name: &surah.name,
        english_name: &surah.english_name,
        english_name_translation: &surah.english_name_translation,
        subtitle: format!(
            "{} - {} Ayahs",
            surah.revelation_type.as_str(),
            surah.number_of_ayahs
        ),
    });

    if shows_invocation(surah.number) {
        blocks.push(ReadingBlock::Invocation);
    }

    blocks.extend(content.ayahs.iter().map(ReadingBlock::Verse));
    blocks
}

/// Render `n` with Arabic-Indic digits (٠١٢٣٤٥٦٧٨٩)
pub fn arabic_indic(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// End-of-verse marker, e.g. `﴿١٢﴾`
pub fn verse_marker(number_in_surah: u32) -> String {
    format!("\u{FD3F}{}\u{FD3E}", arabic_indic(number_in_surah))
}
