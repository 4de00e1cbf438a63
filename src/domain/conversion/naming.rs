use super::language::Language;

/// Derive the converted audio file name for a document and language.
///
/// The pipeline names its output after the document name up to the first
/// period, so `notes.txt` becomes `notes_hindi.mp3` and a name without an
/// extension is used whole.
pub fn audio_file_name(document_name: &str, language: Language) -> String {
    let base = match document_name.split_once('.') {
        Some((base, _)) => base,
        None => document_name,
    };

    format!("{}_{}.mp3", base, language.token())
}

/// Public URL a converted audio object streams from.
///
/// Object keys keep the literal `/tmp/` prefix they were staged under, which
/// yields a doubled slash after the bucket host.
pub fn bucket_object_url(bucket_url: &str, audio_file: &str) -> String {
    format!(
        "{}//tmp/{}",
        bucket_url.trim_end_matches('/'),
        urlencoding::encode(audio_file)
    )
}
