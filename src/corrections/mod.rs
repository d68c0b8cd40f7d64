//! Ordered lexical correction table.
//!
//! Fixes capitalization of known proper nouns and technical terms after
//! punctuation restoration. Matching is literal substring replacement, not
//! regex and not word-boundary aware: a pattern can match inside a larger
//! word unless the pattern itself carries padding (which is why entries like
//! `" vi "` include the spaces).

/// Built-in corrections, applied in order. Later entries must not undo
/// earlier ones.
const DEFAULT_CORRECTIONS: &[(&str, &str)] = &[
    (" vi ", " Vi "),
    (" vi,", " Vi,"),
    ("i'm", "I'm"),
    ("i've", "I've"),
    ("i'd", "I'd"),
    ("im", "I'm"),
    ("ive", "I've"),
    ("id", "I'd"),
    (" i ", " I "),
    (" c ", " C "),
    (" c, ", " C, "),
    (" c. ", " C. "),
    (" c plus plus", " C++"),
    (" typescript", " TypeScript"),
    (" javascript", " JavaScript"),
    (" python", " Python"),
    (" java", " Java"),
    (" html", " HTML"),
    (" css", " CSS"),
    (" react", " React"),
    (" angular", " Angular"),
    (" node.js", " Node.js"),
    (" php", " PHP"),
    (" sql", " SQL"),
    (" mongodb", " MongoDB"),
    (" api", " API"),
    (" json", " JSON"),
    (" url", " URL"),
    (" ui", " UI"),
    (" ux", " UX"),
    (" git", " Git"),
    (" docker", " Docker"),
    (" aws", " AWS"),
    (" azure", " Azure"),
    (" linux", " Linux"),
    (" windows", " Windows"),
    (" npm", " npm"),
    (" restful", " RESTful"),
    (" http", " HTTP"),
    (" www", " WWW"),
    (" ipv6", " IPv6"),
    (" ipv4", " IPv4"),
    (" xml", " XML"),
    (" yaml", " YAML"),
    (" jwt", " JWT"),
    (" ssl", " SSL"),
    (" tls", " TLS"),
    (" rpc", " RPC"),
    (" cli", " CLI"),
    (" orm", " ORM"),
    (" mvc", " MVC"),
    (" crud", " CRUD"),
    (" graphql", " GraphQL"),
    (" rest", " REST"),
    (" cdn", " CDN"),
    (" ide", " IDE"),
    (" dns", " DNS"),
    (" html5", " HTML5"),
    (" css3", " CSS3"),
    (" ajax", " AJAX"),
    (" xss", " XSS"),
    (" csrf", " CSRF"),
    (" oauth", " OAuth"),
    (" nosql", " NoSQL"),
];

/// An explicit, immutable ordered mapping from literal pattern to literal
/// replacement. Passed into the pipeline rather than living as global state,
/// so tests and callers can supply their own tables.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    entries: Vec<(String, String)>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_CORRECTIONS
                .iter()
                .map(|(pattern, replacement)| (pattern.to_string(), replacement.to_string())),
        )
    }
}

impl CorrectionTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(pattern, replacement)| (pattern.as_str(), replacement.as_str()))
    }

    /// Apply every entry in table order, one left-to-right pass. Pure and
    /// deterministic; no I/O.
    pub fn apply(&self, text: &str) -> String {
        let mut corrected = text.to_string();
        for (pattern, replacement) in &self.entries {
            corrected = corrected.replace(pattern.as_str(), replacement.as_str());
        }
        corrected
    }

    /// Absent transcripts pass through untouched
    pub fn correct(&self, transcript: Option<String>) -> Option<String> {
        transcript.map(|text| self.apply(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> CorrectionTable {
        CorrectionTable::new(
            entries
                .iter()
                .map(|(p, r)| (p.to_string(), r.to_string())),
        )
    }

    #[test]
    fn test_applies_entries_in_order() {
        let table = table(&[(" i ", " I "), (" python", " Python")]);
        assert_eq!(
            table.apply("Hello I am testing python."),
            "Hello I am testing Python."
        );
    }

    #[test]
    fn test_literal_substring_not_word_boundary() {
        // Unpadded patterns match inside larger words; that's the contract
        let table = table(&[("im", "I'm")]);
        assert_eq!(table.apply("time"), "tI'me");
    }

    #[test]
    fn test_padded_patterns_do_not_match_inside_words() {
        let table = table(&[(" vi ", " Vi ")]);
        assert_eq!(table.apply("we use vi daily"), "we use Vi daily");
        assert_eq!(table.apply("evil vim evidence"), "evil vim evidence");
    }

    #[test]
    fn test_double_application_is_idempotent() {
        // Holds whenever no pattern occurs inside another entry's replacement
        let table = table(&[(" python", " Python"), (" html", " HTML")]);
        let input = "we write python and html every day";
        let once = table.apply(input);
        let twice = table.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "we write Python and HTML every day");
    }

    #[test]
    fn test_absent_transcript_passes_through() {
        let table = CorrectionTable::default();
        assert_eq!(table.correct(None), None);
    }

    #[test]
    fn test_present_transcript_is_corrected() {
        let table = CorrectionTable::default();
        assert_eq!(
            table.correct(Some("so i love typescript and css".to_string())),
            Some("so I love TypeScript and CSS".to_string())
        );
    }

    #[test]
    fn test_default_table_is_populated() {
        let table = CorrectionTable::default();
        assert!(table.len() > 50);
        assert!(!table.is_empty());
        let first = table.entries().next().unwrap();
        assert_eq!(first, (" vi ", " Vi "));
    }
}
