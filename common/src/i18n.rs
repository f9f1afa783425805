//! 画面表示用の翻訳テーブル（英語・ポーランド語）

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    En,
    #[default]
    Pl,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Pl];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Pl => "pl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Pl => "PL",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Lang::En => "🇬🇧",
            Lang::Pl => "🇵🇱",
        }
    }

    /// 未知のコードは `None`（呼び出し側で既定言語にフォールバック）
    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "pl" => Some(Lang::Pl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Gallery,
    Add,
    Recognize,
    FaceRecognition,
    UploadImage,
    WebcamCapture,
    Recognizing,
    RecognizeFace,
    AddNewFace,
    FaceLabel,
    FaceLabelHelperText,
    UploadFace,
    ChooseFile,
    Selected,
    RecognitionResult,
    FailedToLoadMatchedImage,
    MatchFound,
    NoMatchFound,
    Label,
    Similarity,
    MatchedFace,
    CapturePhoto,
    RetakePhoto,
    FaceUploadedSuccessfully,
    NoFacesFound,
    CameraUnavailable,
}

/// 翻訳文字列を返す
pub fn translate(lang: Lang, key: Key) -> &'static str {
    match lang {
        Lang::En => english(key),
        Lang::Pl => polish(key),
    }
}

fn english(key: Key) -> &'static str {
    match key {
        Key::Gallery => "Gallery",
        Key::Add => "Add",
        Key::Recognize => "Recognize",
        Key::FaceRecognition => "Face Recognition",
        Key::UploadImage => "Upload Image",
        Key::WebcamCapture => "Take Photo",
        Key::Recognizing => "Recognizing",
        Key::RecognizeFace => "Recognize Face",
        Key::AddNewFace => "Add New Face",
        Key::FaceLabel => "Face Label",
        Key::FaceLabelHelperText => "Name or identifier for the face",
        Key::UploadFace => "Upload Face",
        Key::ChooseFile => "Choose File",
        Key::Selected => "Selected",
        Key::RecognitionResult => "Recognition Result",
        Key::FailedToLoadMatchedImage => "Failed to load matched image",
        Key::MatchFound => "Match Found",
        Key::NoMatchFound => "No matching face found in the database",
        Key::Label => "Label",
        Key::Similarity => "Similarity",
        Key::MatchedFace => "Matched Face",
        Key::CapturePhoto => "Capture Photo",
        Key::RetakePhoto => "Retake Photo",
        Key::FaceUploadedSuccessfully => "Face uploaded successfully",
        Key::NoFacesFound => "No faces found. Please add some faces first.",
        Key::CameraUnavailable => "Camera is not available",
    }
}

fn polish(key: Key) -> &'static str {
    match key {
        Key::Gallery => "Galeria",
        Key::Add => "Dodaj",
        Key::Recognize => "Rozpoznaj",
        Key::FaceRecognition => "Rozpoznawanie twarzy",
        Key::UploadImage => "Prześlij obraz",
        Key::WebcamCapture => "Zrób zdjęcie",
        Key::Recognizing => "Rozpoznawanie",
        Key::RecognizeFace => "Rozpoznaj twarz",
        Key::AddNewFace => "Dodaj nową twarz",
        Key::FaceLabel => "Etykieta twarzy",
        Key::FaceLabelHelperText => "Nazwa lub identyfikator dla twarzy",
        Key::UploadFace => "Prześlij twarz",
        Key::ChooseFile => "Wybierz plik",
        Key::Selected => "Wybrane",
        Key::RecognitionResult => "Wynik rozpoznawania",
        Key::FailedToLoadMatchedImage => "Nie udało się załadować dopasowanego obrazu",
        Key::MatchFound => "Znaleziono dopasowanie",
        Key::NoMatchFound => "Nie znaleziono pasującej twarzy w bazie danych",
        Key::Label => "Etykieta",
        Key::Similarity => "Podobieństwo",
        Key::MatchedFace => "Dopasowana twarz",
        Key::CapturePhoto => "Zrób zdjęcie",
        Key::RetakePhoto => "Zrób nowe zdjęcie",
        Key::FaceUploadedSuccessfully => "Twarz została pomyślnie zapisana",
        Key::NoFacesFound => "Nie znaleziono twarzy. Najpierw dodaj twarze.",
        Key::CameraUnavailable => "Kamera jest niedostępna",
    }
}
