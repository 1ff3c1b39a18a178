use crate::model::Surah;

/// Does `surah` match a picker search query?
///
/// English names match case-insensitively. The Arabic name is matched as-is
/// since case folding means nothing for it. Numbers match on their decimal
/// digits, so "1" finds 1, 10..19, 21 and so on.
pub fn matches_query(surah: &Surah, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    surah
        .english_name
        .to_lowercase()
        .contains(&query.to_lowercase())
        || surah.name.contains(query)
        || surah.number.to_string().contains(query)
}

/// The Surahs a query lets through, in index order
pub fn filter_surahs<'a>(surahs: &'a [Surah], query: &str) -> Vec<&'a Surah> {
    surahs.iter().filter(|s| matches_query(s, query)).collect()
}
