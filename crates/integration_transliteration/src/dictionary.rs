//! Built-in fallback dictionary
//!
//! A handful of common greetings and words per language. Lookups are
//! case-insensitive; anything not listed stays as typed.

const HINDI: &[(&str, &str)] = &[
    ("namaste", "नमस्ते"),
    ("namaskar", "नमस्कार"),
    ("dhanyavad", "धन्यवाद"),
    ("shukriya", "शुक्रिया"),
    ("main", "मैं"),
    ("hoon", "हूँ"),
    ("aap", "आप"),
    ("kaise", "कैसे"),
    ("ho", "हो"),
    ("hai", "है"),
    ("hain", "हैं"),
    ("kya", "क्या"),
    ("nahi", "नहीं"),
    ("haan", "हाँ"),
    ("accha", "अच्छा"),
    ("pyaar", "प्यार"),
    ("dost", "दोस्त"),
    ("ghar", "घर"),
    ("paani", "पानी"),
    ("duniya", "दुनिया"),
];

const TAMIL: &[(&str, &str)] = &[
    ("vanakkam", "வணக்கம்"),
    ("nandri", "நன்றி"),
    ("amma", "அம்மா"),
    ("appa", "அப்பா"),
    ("eppadi", "எப்படி"),
    ("irukkeenga", "இருக்கீங்க"),
    ("naan", "நான்"),
    ("neenga", "நீங்க"),
    ("sari", "சரி"),
    ("illai", "இல்லை"),
];

const TELUGU: &[(&str, &str)] = &[
    ("namaskaram", "నమస్కారం"),
    ("dhanyavadalu", "ధన్యవాదాలు"),
    ("amma", "అమ్మ"),
    ("nanna", "నాన్న"),
    ("bagunnara", "బాగున్నారా"),
    ("nenu", "నేను"),
    ("meeru", "మీరు"),
    ("avunu", "అవును"),
    ("ledu", "లేదు"),
];

const BENGALI: &[(&str, &str)] = &[
    ("nomoskar", "নমস্কার"),
    ("dhonnobad", "ধন্যবাদ"),
    ("bhalo", "ভালো"),
    ("ami", "আমি"),
    ("tumi", "তুমি"),
    ("kemon", "কেমন"),
    ("acho", "আছো"),
    ("haan", "হ্যাঁ"),
    ("na", "না"),
];

const GUJARATI: &[(&str, &str)] = &[
    ("namaste", "નમસ્તે"),
    ("aabhar", "આભાર"),
    ("kem", "કેમ"),
    ("cho", "છો"),
    ("majama", "મજામાં"),
    ("hu", "હું"),
    ("tame", "તમે"),
    ("ha", "હા"),
    ("na", "ના"),
];

const MARATHI: &[(&str, &str)] = &[
    ("namaskar", "नमस्कार"),
    ("dhanyavaad", "धन्यवाद"),
    ("kasa", "कसा"),
    ("kashi", "कशी"),
    ("aahes", "आहेस"),
    ("mi", "मी"),
    ("tumhi", "तुम्ही"),
    ("ho", "हो"),
    ("nahi", "नाही"),
];

const PUNJABI: &[(&str, &str)] = &[
    ("sat", "ਸਤ"),
    ("sri", "ਸ੍ਰੀ"),
    ("akal", "ਅਕਾਲ"),
    ("dhanvaad", "ਧੰਨਵਾਦ"),
    ("ki", "ਕੀ"),
    ("haal", "ਹਾਲ"),
    ("hai", "ਹੈ"),
    ("main", "ਮੈਂ"),
    ("tusi", "ਤੁਸੀਂ"),
];

const URDU: &[(&str, &str)] = &[
    ("salaam", "سلام"),
    ("shukriya", "شکریہ"),
    ("aap", "آپ"),
    ("kaise", "کیسے"),
    ("hain", "ہیں"),
    ("main", "میں"),
    ("theek", "ٹھیک"),
    ("hoon", "ہوں"),
    ("haan", "ہاں"),
    ("nahi", "نہیں"),
];

fn table(language: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match language {
        "hi" => Some(HINDI),
        "ta" => Some(TAMIL),
        "te" => Some(TELUGU),
        "bn" => Some(BENGALI),
        "gu" => Some(GUJARATI),
        "mr" => Some(MARATHI),
        "pa" => Some(PUNJABI),
        "ur" => Some(URDU),
        _ => None,
    }
}

/// Look up a single word, ignoring case
pub fn lookup(word: &str, language: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    table(language)?
        .iter()
        .find(|(latin, _)| *latin == lower)
        .map(|(_, native)| *native)
}

/// Transliterate word by word, keeping whitespace and surrounding
/// punctuation as typed
pub fn transliterate(text: &str, language: &str) -> String {
    map_words(text, |word| lookup(word, language).map(str::to_string))
}

/// Apply `f` to the alphabetic core of each whitespace-separated token
///
/// Tokens for which `f` returns `None` are kept unchanged.
pub(crate) fn map_words(text: &str, mut f: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();

    let mut flush = |token: &mut String, out: &mut String| {
        if token.is_empty() {
            return;
        }
        let start = token.find(char::is_alphanumeric).unwrap_or(token.len());
        let end = token
            .rfind(char::is_alphanumeric)
            .map_or(start, |i| i + token[i..].chars().next().map_or(1, char::len_utf8));
        let (prefix, rest) = token.split_at(start);
        let (core, suffix) = rest.split_at(end.saturating_sub(start));

        out.push_str(prefix);
        match (!core.is_empty()).then(|| f(core)).flatten() {
            Some(native) => out.push_str(&native),
            None => out.push_str(core),
        }
        out.push_str(suffix);
        token.clear();
    };

    for ch in text.chars() {
        if ch.is_whitespace() {
            flush(&mut token, &mut out);
            out.push(ch);
        } else {
            token.push(ch);
        }
    }
    flush(&mut token, &mut out);
    out
}
