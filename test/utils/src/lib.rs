pub fn nine_words_fixture() -> &'static str {
    return r#"
[
    { "word": "run", "meaning": "달리다", "example": "I run every morning.", "category": "noun" },
    { "word": "apple", "meaning": "사과", "example": "I ate an apple.", "category": "noun" },
    { "word": "book", "meaning": "책", "category": "noun" },
    { "word": "water", "meaning": "물", "example": "Drink some water.", "category": "noun" },
    { "word": "happy", "meaning": "행복한", "category": "noun" },
    { "word": "river", "meaning": "강", "category": "noun" },
    { "word": "doctor", "meaning": "의사", "category": "noun" },
    { "word": "window", "meaning": "창문", "category": "noun" },
    { "word": "friend", "meaning": "친구", "category": "noun" }
]
"#
    .trim();
}

pub fn next_nine_words_fixture() -> &'static str {
    return r#"
[
    { "word": "house", "meaning": "집", "category": "noun" },
    { "word": "music", "meaning": "음악", "category": "noun" },
    { "word": "bread", "meaning": "빵", "category": "noun" },
    { "word": "cloud", "meaning": "구름", "category": "noun" },
    { "word": "chair", "meaning": "의자", "category": "noun" },
    { "word": "garden", "meaning": "정원", "category": "noun" },
    { "word": "letter", "meaning": "편지", "category": "noun" },
    { "word": "mountain", "meaning": "산", "category": "noun" },
    { "word": "pencil", "meaning": "연필", "category": "noun" }
]
"#
    .trim();
}

pub fn past_tense_fixture() -> &'static str {
    return r#"
[
    { "word": "arrive", "meaning": "도착하다", "past_tense": "arrived", "example": "We arrived late." },
    { "word": "go", "meaning": "가다", "past_tense": "went" },
    { "word": "eat", "meaning": "먹다", "past_tense": "ate" },
    { "word": "see", "meaning": "보다", "past_tense": "saw" },
    { "word": "take", "meaning": "가지다", "past_tense": "took" },
    { "word": "write", "meaning": "쓰다", "past_tense": "wrote" },
    { "word": "begin", "meaning": "시작하다", "past_tense": "began" },
    { "word": "buy", "meaning": "사다", "past_tense": "bought" },
    { "word": "sleep", "meaning": "자다", "past_tense": "slept" }
]
"#
    .trim();
}
