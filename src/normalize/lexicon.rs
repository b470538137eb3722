use std::collections::{HashMap, HashSet};

/// High-frequency English words dropped before analysis. Matching is
/// case-sensitive, so sentence-initial capitals survive. Directional
/// particles (up, out, off, ...) are kept because they flip the meaning of
/// phrasal verbs, which matters for sentiment.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "should", "now",
];

/// Contraction -> expansion, lowercase forms. Lookup falls back to a
/// lowercased match with the capitalization carried over.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "are not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("here's", "here is"),
    ("how's", "how is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("might've", "might have"),
    ("mightn't", "might not"),
    ("must've", "must have"),
    ("mustn't", "must not"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("that'll", "that will"),
    ("that's", "that is"),
    ("there'll", "there will"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'll", "what will"),
    ("what's", "what is"),
    ("when's", "when is"),
    ("where's", "where is"),
    ("who'll", "who will"),
    ("who's", "who is"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("y'all", "you all"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Emoji -> canonical shortcode name, covering the emoji that dominate
/// political/sentiment tweet streams. Multi-codepoint sequences (flags,
/// skin tones) are out of scope for the ASCII-bound pipeline.
const EMOJI_NAMES: &[(char, &str)] = &[
    ('\u{2728}', ":sparkles:"),
    ('\u{2764}', ":red_heart:"),
    ('\u{2B50}', ":star:"),
    ('😀', ":grinning_face:"),
    ('😁', ":beaming_face_with_smiling_eyes:"),
    ('😂', ":face_with_tears_of_joy:"),
    ('😃', ":grinning_face_with_big_eyes:"),
    ('😄', ":grinning_face_with_smiling_eyes:"),
    ('😅', ":grinning_face_with_sweat:"),
    ('😆', ":grinning_squinting_face:"),
    ('😉', ":winking_face:"),
    ('😊', ":smiling_face_with_smiling_eyes:"),
    ('😍', ":smiling_face_with_heart_eyes:"),
    ('😎', ":smiling_face_with_sunglasses:"),
    ('😐', ":neutral_face:"),
    ('😒', ":unamused_face:"),
    ('😔', ":pensive_face:"),
    ('😘', ":face_blowing_a_kiss:"),
    ('😞', ":disappointed_face:"),
    ('😠', ":angry_face:"),
    ('😡', ":pouting_face:"),
    ('😢', ":crying_face:"),
    ('😭', ":loudly_crying_face:"),
    ('😱', ":face_screaming_in_fear:"),
    ('😳', ":flushed_face:"),
    ('🙄', ":face_with_rolling_eyes:"),
    ('🙌', ":raising_hands:"),
    ('🙏', ":folded_hands:"),
    ('🤔', ":thinking_face:"),
    ('🤝', ":handshake:"),
    ('🤣', ":rolling_on_the_floor_laughing:"),
    ('🤬', ":face_with_symbols_on_mouth:"),
    ('🤷', ":person_shrugging:"),
    ('🎉', ":party_popper:"),
    ('🏆', ":trophy:"),
    ('👀', ":eyes:"),
    ('👍', ":thumbs_up:"),
    ('👎', ":thumbs_down:"),
    ('👏', ":clapping_hands:"),
    ('💀', ":skull:"),
    ('💔', ":broken_heart:"),
    ('💪', ":flexed_biceps:"),
    ('💯', ":hundred_points:"),
    ('📢', ":loudspeaker:"),
    ('🔥', ":fire:"),
    ('🗳', ":ballot_box_with_ballot:"),
    ('🚀', ":rocket:"),
];

/// Irregular forms plus words whose surface form already is the lemma and
/// would otherwise be mangled by the suffix rules.
const LEMMA_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("children", "child"),
    ("crises", "crisis"),
    ("economics", "economics"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("men", "man"),
    ("mice", "mouse"),
    ("news", "news"),
    ("oxen", "ox"),
    ("politics", "politics"),
    ("selves", "self"),
    ("series", "series"),
    ("species", "species"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Noun suffix detachment rules, tried in order. The bare `"s"` rule is
/// additionally guarded in [`Lexicon::lemmatize`].
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

/// The dictionaries the normalizer runs against: stop words, contraction
/// expansions, emoji names, and the lemmatizer tables. Constructed once and
/// shared by reference; the normalizer itself holds no state.
pub struct Lexicon {
    stop_words: HashSet<&'static str>,
    contractions: HashMap<&'static str, &'static str>,
    emoji_names: HashMap<char, &'static str>,
    lemma_exceptions: HashMap<&'static str, &'static str>,
}

impl Lexicon {
    pub fn english() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            contractions: CONTRACTIONS.iter().copied().collect(),
            emoji_names: EMOJI_NAMES.iter().copied().collect(),
            lemma_exceptions: LEMMA_EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Case-sensitive exact membership test.
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Expand a contraction token, or `None` when it is not one. An exact
    /// match wins; otherwise a lowercased match is re-capitalized, so
    /// `"Can't"` expands to `"Cannot"`.
    pub fn expand_contraction(&self, token: &str) -> Option<String> {
        if let Some(expansion) = self.contractions.get(token) {
            return Some((*expansion).to_string());
        }

        let lowered = token.to_lowercase();
        let expansion = self.contractions.get(lowered.as_str())?;
        if token.chars().next().is_some_and(|c| c.is_uppercase()) {
            let mut chars = expansion.chars();
            let first = chars.next()?.to_uppercase().to_string();
            Some(format!("{}{}", first, chars.as_str()))
        } else {
            Some((*expansion).to_string())
        }
    }

    pub fn emoji_name(&self, c: char) -> Option<&'static str> {
        self.emoji_names.get(&c).copied()
    }

    /// Reduce a token to its dictionary base form: irregular forms via the
    /// exception table, regular plurals via suffix detachment.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.lemma_exceptions.get(word) {
            return (*lemma).to_string();
        }
        if word.chars().count() <= 3 {
            return word.to_string();
        }

        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            // Bare "s" must not fire on -ss/-us/-is words (class, virus,
            // basis), and "ies" mangles four-letter words (ties -> ty).
            if *suffix == "s"
                && (word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
            {
                continue;
            }
            if *suffix == "ies" && word.chars().count() <= 4 {
                continue;
            }
            if let Some(stem) = word.strip_suffix(suffix) {
                if !stem.is_empty() {
                    return format!("{}{}", stem, replacement);
                }
            }
        }

        word.to_string()
    }
}
