//! 結果のテキスト表示

use face_client_common::{
    translate, EnrollResponse, GalleryPage, Key, Lang, MatchOutcome, RecognitionResult,
};

const LANG: Lang = Lang::En;

pub fn enrollment(response: &EnrollResponse) -> String {
    format!(
        "{} - {}\n  ID: {}\n  {}: {}\n  {}",
        translate(LANG, Key::FaceUploadedSuccessfully),
        response.filename,
        response.id,
        translate(LANG, Key::Label),
        response.label,
        response.message,
    )
}

pub fn recognition(result: &RecognitionResult) -> String {
    match result.outcome() {
        MatchOutcome::Matched(record) => format!(
            "{}\n  {}: {}\n  {}: {}%\n  ID: {}\n  Distance: {:.4}",
            translate(LANG, Key::MatchFound),
            translate(LANG, Key::Label),
            record.label,
            translate(LANG, Key::Similarity),
            result.similarity_percent(),
            record.id,
            result.cosine_distance,
        ),
        MatchOutcome::NoMatch => translate(LANG, Key::NoMatchFound).to_string(),
    }
}

pub fn gallery(page: &GalleryPage) -> String {
    if page.faces.is_empty() {
        return translate(LANG, Key::NoFacesFound).to_string();
    }

    let mut lines = Vec::with_capacity(page.faces.len() + 2);
    lines.push(format!("{:<38} {:<20} {:<24} {}", "ID", "LABEL", "FILENAME", "CREATED"));
    for face in &page.faces {
        lines.push(format!(
            "{:<38} {:<20} {:<24} {}",
            face.id, face.label, face.filename, face.created_at
        ));
    }
    lines.push(format!(
        "Page {} / {} ({} faces)",
        page.page_index,
        page.total_pages(),
        page.total_count
    ));
    lines.join("\n")
}
