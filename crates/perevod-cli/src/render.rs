use perevod_core::languages::LanguageCode;
use perevod_core::models::record::TranslationRecord;

/// Characters of the id shown in listings; enough to pass back to
/// `favorite` / `delete`.
const SHORT_ID: usize = 8;

/// One listing line:
/// `★ 1a2b3c4d  ru → en  2026-10-17 12:00  привет → hello`
pub fn record_line(record: &TranslationRecord) -> String {
    let marker = if record.is_favorite() { '★' } else { ' ' };
    let id = record.id().to_string();
    let when = record
        .created_at()
        .strftime("%Y-%m-%d %H:%M")
        .to_string();

    format!(
        "{marker} {}  {} → {}  {when}  {} → {}",
        &id[..SHORT_ID],
        record.source_lang(),
        record.target_lang(),
        single_line(record.source_text()),
        single_line(record.translated_text()),
    )
}

pub fn records(records: &[TranslationRecord], empty_message: &str) -> String {
    if records.is_empty() {
        return empty_message.to_string();
    }
    records
        .iter()
        .map(record_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn language_line(lang: LanguageCode) -> String {
    format!("{:<6} {}", lang.code(), lang.name())
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
