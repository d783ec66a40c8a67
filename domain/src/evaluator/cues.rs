//! Query cue matching
//!
//! Evaluators score queries by the presence of cue words. Matching runs on a
//! normalized form of the query: lowercased, with every non-alphanumeric
//! character treated as a separator. Three cue shapes are supported:
//!
//! - [`Cue::Word`]: an exact token (`"or"` does not match `"for"`)
//! - [`Cue::Stem`]: a token prefix (`"transform"` matches `"transforming"`)
//! - [`Cue::Phrase`]: consecutive tokens (`"what if"`, `"trade off"`)

/// A single textual cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Word(&'static str),
    Stem(&'static str),
    Phrase(&'static str),
}

/// Pre-tokenized view of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCues {
    raw: String,
    tokens: Vec<String>,
    normalized: String,
}

impl QueryCues {
    pub fn new(query: &str) -> Self {
        let tokens: Vec<String> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();
        let normalized = tokens.join(" ");

        Self {
            raw: query.to_string(),
            tokens,
            normalized,
        }
    }

    /// The query exactly as given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased tokens joined by single spaces
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn matches(&self, cue: Cue) -> bool {
        match cue {
            Cue::Word(word) => self.tokens.iter().any(|t| t == word),
            Cue::Stem(stem) => self.tokens.iter().any(|t| t.starts_with(stem)),
            Cue::Phrase(phrase) => {
                format!(" {} ", self.normalized).contains(&format!(" {} ", phrase))
            }
        }
    }

    pub fn has_any(&self, cues: &[Cue]) -> bool {
        cues.iter().any(|cue| self.matches(*cue))
    }

    /// Number of distinct cues from `cues` present in the query
    pub fn count(&self, cues: &[Cue]) -> usize {
        cues.iter().filter(|cue| self.matches(**cue)).count()
    }

    /// The cues from `cues` present in the query, as their literal text
    pub fn matched(&self, cues: &[Cue]) -> Vec<&'static str> {
        cues.iter()
            .filter(|cue| self.matches(**cue))
            .map(|cue| match cue {
                Cue::Word(s) | Cue::Stem(s) | Cue::Phrase(s) => *s,
            })
            .collect()
    }

    /// Whether `topic` appears as a whole word or phrase in the query
    pub fn mentions_topic(&self, topic: &str) -> bool {
        let topic = QueryCues::new(topic);
        !topic.is_blank()
            && format!(" {} ", self.normalized).contains(&format!(" {} ", topic.normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_requires_whole_token() {
        let cues = QueryCues::new("Is this for me?");
        assert!(!cues.matches(Cue::Word("or")));
        assert!(cues.matches(Cue::Word("for")));
    }

    #[test]
    fn test_stem_matches_prefix() {
        let cues = QueryCues::new("We are transforming the team");
        assert!(cues.matches(Cue::Stem("transform")));
        assert!(!cues.matches(Cue::Word("transform")));
    }

    #[test]
    fn test_phrase_spans_punctuation() {
        let cues = QueryCues::new("What-if we accept the trade-off?");
        assert!(cues.matches(Cue::Phrase("what if")));
        assert!(cues.matches(Cue::Phrase("trade off")));
        assert!(!cues.matches(Cue::Phrase("if we reject")));
    }

    #[test]
    fn test_blank_query() {
        let cues = QueryCues::new("  ?! ");
        assert!(cues.is_blank());
        assert_eq!(cues.normalized(), "");
        assert!(!cues.has_any(&[Cue::Word("should"), Cue::Phrase("what if")]));
    }

    #[test]
    fn test_count_and_matched() {
        let cues = QueryCues::new("After the launch, then what is the impact?");
        let temporal = [Cue::Word("after"), Cue::Word("then"), Cue::Word("before")];
        assert_eq!(cues.count(&temporal), 2);
        assert_eq!(cues.matched(&temporal), vec!["after", "then"]);
    }

    #[test]
    fn test_mentions_topic() {
        let cues = QueryCues::new("Am I ready for Data Warehouse roles?");
        assert!(cues.mentions_topic("data warehouse"));
        assert!(!cues.mentions_topic("data lake"));
        assert!(!cues.mentions_topic("  "));
    }
}
