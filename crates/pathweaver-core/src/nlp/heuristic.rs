//! Rule-based annotator
//!
//! Closed-class lexicons plus suffix rules give a coarse POS tagging; noun
//! groups (determiner/adjective/noun runs) provide noun chunks and the
//! subject/object roles around the first verb of each sentence; runs of
//! capitalised words become named entities.

use tracing::debug;

use crate::error::Result;

use super::lexicon::{
    AUXILIARIES, COMMON_VERBS, CONJUNCTIONS, DETERMINERS, LOCATION_MARKERS,
    ORGANIZATION_SUFFIXES, PREPOSITIONS, PRONOUNS, has_adjective_suffix, is_stop_word,
};
use super::{
    AnnotatedDocument, DependencyRole, EntitySpan, NounChunk, PartOfSpeech, Sentence,
    TextAnnotator, Token,
};

/// Dependency-free English annotator
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnnotator;

impl HeuristicAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl TextAnnotator for HeuristicAnnotator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        let mut doc = AnnotatedDocument::default();

        for sentence in split_sentences(text) {
            annotate_sentence(&mut doc, sentence);
        }

        debug!(
            sentences = doc.sentences.len(),
            tokens = doc.tokens.len(),
            noun_chunks = doc.noun_chunks.len(),
            entities = doc.entities.len(),
            "Annotated text"
        );

        Ok(doc)
    }
}

/// A maximal determiner/adjective/noun run ending in a nominal
struct NounGroup {
    start: usize,
    /// Index of the last nominal, the group's head
    head: usize,
}

fn annotate_sentence(doc: &mut AnnotatedDocument, sentence: &str) {
    let words = tokenize(sentence);
    if words.is_empty() {
        return;
    }

    let offset = doc.tokens.len();
    let mut previous: Option<PartOfSpeech> = None;
    for (i, word) in words.iter().enumerate() {
        let pos = tag_word(word, i == 0, previous);
        doc.tokens.push(Token {
            text: (*word).to_string(),
            pos,
            is_stop: is_stop_word(&word.to_lowercase()),
            dep: None,
            head: offset + i,
        });
        previous = Some(pos);
    }

    let tokens = &mut doc.tokens[offset..];
    let groups = noun_groups(tokens);
    assign_dependencies(tokens, &groups, offset);

    for group in &groups {
        if let Some(chunk) = chunk_text(&tokens[group.start..=group.head]) {
            doc.noun_chunks.push(NounChunk { text: chunk });
        }
    }
    doc.entities.extend(entity_spans(tokens));
    doc.sentences.push(Sentence {
        text: sentence.to_string(),
    });
}

/// Split on terminal punctuation followed by whitespace, and on blank lines
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let boundary = match c {
            '.' | '!' | '?' => chars.peek().is_none_or(|(_, next)| next.is_whitespace()),
            '\n' => chars.peek().is_some_and(|(_, next)| *next == '\n'),
            _ => false,
        };
        if boundary {
            let end = i + c.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// Words (letters, digits, inner apostrophes and hyphens) and single punctuation marks
fn tokenize(sentence: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in sentence.char_indices() {
        let in_word = c.is_alphanumeric() || (matches!(c, '\'' | '-') && word_start.is_some());
        if in_word {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(&sentence[start..i]);
        }
        if !c.is_whitespace() {
            tokens.push(&sentence[i..i + c.len_utf8()]);
        }
    }
    if let Some(start) = word_start {
        tokens.push(&sentence[start..]);
    }
    tokens
}

fn tag_word(word: &str, sentence_initial: bool, previous: Option<PartOfSpeech>) -> PartOfSpeech {
    if !word.chars().any(char::is_alphanumeric) {
        return PartOfSpeech::Punct;
    }
    if word.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return PartOfSpeech::Num;
    }

    let lower = word.to_lowercase();
    let lower = lower.as_str();
    if DETERMINERS.contains(&lower) {
        return PartOfSpeech::Det;
    }
    if PRONOUNS.contains(&lower) {
        return PartOfSpeech::Pron;
    }
    if PREPOSITIONS.contains(&lower) {
        return PartOfSpeech::Adp;
    }
    if CONJUNCTIONS.contains(&lower) {
        return PartOfSpeech::Cconj;
    }
    if AUXILIARIES.contains(&lower) {
        return PartOfSpeech::Aux;
    }
    if COMMON_VERBS.contains(&lower) {
        return PartOfSpeech::Verb;
    }
    if !sentence_initial && word.chars().next().is_some_and(char::is_uppercase) {
        return PartOfSpeech::Propn;
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return PartOfSpeech::Adv;
    }
    if has_adjective_suffix(lower) {
        return PartOfSpeech::Adj;
    }

    let after_nominal = previous.is_some_and(|p| p.is_nominal() || p == PartOfSpeech::Pron);
    if after_nominal && lower.ends_with("ed") {
        return PartOfSpeech::Verb;
    }
    if previous == Some(PartOfSpeech::Pron) {
        return PartOfSpeech::Verb;
    }
    if previous == Some(PartOfSpeech::Aux) && lower.ends_with("ing") {
        return PartOfSpeech::Verb;
    }
    PartOfSpeech::Noun
}

fn noun_groups(tokens: &[Token]) -> Vec<NounGroup> {
    let mut groups = Vec::new();
    let mut start: Option<usize> = None;
    let mut head: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        let continues = match token.pos {
            PartOfSpeech::Noun | PartOfSpeech::Propn => {
                head = Some(i);
                true
            }
            // A modifier after the head starts a new group
            PartOfSpeech::Det | PartOfSpeech::Adj | PartOfSpeech::Num => head.is_none(),
            PartOfSpeech::Pron if start.is_none() => {
                groups.push(NounGroup { start: i, head: i });
                continue;
            }
            _ => false,
        };

        if continues {
            start.get_or_insert(i);
            continue;
        }

        if let (Some(s), Some(h)) = (start.take(), head.take()) {
            groups.push(NounGroup { start: s, head: h });
        }
        if matches!(
            token.pos,
            PartOfSpeech::Det | PartOfSpeech::Adj | PartOfSpeech::Num
        ) {
            start = Some(i);
        }
    }
    if let (Some(s), Some(h)) = (start, head) {
        groups.push(NounGroup { start: s, head: h });
    }
    groups
}

fn assign_dependencies(tokens: &mut [Token], groups: &[NounGroup], offset: usize) {
    let verb = tokens
        .iter()
        .position(|t| t.pos == PartOfSpeech::Verb)
        .or_else(|| tokens.iter().position(|t| t.pos == PartOfSpeech::Aux));

    if let Some(v) = verb {
        for token in tokens.iter_mut() {
            token.head = offset + v;
        }
        tokens[v].head = offset + v;
    }

    let mut subject: Option<usize> = None;
    let mut object: Option<usize> = None;

    for group in groups {
        let preceding = group.start.checked_sub(1).map(|p| tokens[p].pos);
        if preceding == Some(PartOfSpeech::Adp) {
            let adposition = group.start - 1;
            tokens[group.head].dep = Some(DependencyRole::PrepositionalObject);
            tokens[group.head].head = offset + adposition;
            continue;
        }
        match verb {
            Some(v) if group.head < v => subject = Some(group.head),
            Some(v) if group.head > v && object.is_none() => object = Some(group.head),
            _ => {}
        }
    }

    if let Some(v) = verb {
        if let Some(s) = subject {
            tokens[s].dep = Some(DependencyRole::Subject);
            tokens[s].head = offset + v;
        }
        if let Some(o) = object {
            tokens[o].dep = Some(DependencyRole::DirectObject);
            tokens[o].head = offset + v;
        }
    }
}

/// Chunk text without leading determiners; pronoun-only groups yield nothing
fn chunk_text(tokens: &[Token]) -> Option<String> {
    let words: Vec<&str> = tokens
        .iter()
        .skip_while(|t| t.pos == PartOfSpeech::Det)
        .map(|t| t.text.as_str())
        .collect();

    if words.is_empty() || !tokens.iter().any(|t| t.pos.is_nominal()) {
        return None;
    }
    Some(words.join(" "))
}

fn entity_spans(tokens: &[Token]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].pos != PartOfSpeech::Propn {
            i += 1;
            continue;
        }

        // Let a capitalised sentence-initial word join a following proper noun
        let mut start = i;
        if i == 1 && is_capitalised(&tokens[0].text) && tokens[0].pos.is_nominal() {
            start = 0;
        }

        let mut end = i;
        while end + 1 < tokens.len() {
            let next = &tokens[end + 1];
            if next.pos == PartOfSpeech::Propn {
                end += 1;
            } else if next.text == "of"
                && tokens
                    .get(end + 2)
                    .is_some_and(|t| t.pos == PartOfSpeech::Propn)
            {
                end += 2;
            } else {
                break;
            }
        }

        let words: Vec<&str> = tokens[start..=end].iter().map(|t| t.text.as_str()).collect();
        let marker = start
            .checked_sub(1)
            .map(|p| tokens[p].text.to_lowercase());
        spans.push(EntitySpan {
            text: words.join(" "),
            label: entity_label(&words, marker.as_deref()).to_string(),
        });
        i = end + 1;
    }
    spans
}

fn entity_label(words: &[&str], marker: Option<&str>) -> &'static str {
    let last = words.last().map(|w| w.to_lowercase()).unwrap_or_default();
    if ORGANIZATION_SUFFIXES.contains(&last.as_str()) {
        "ORG"
    } else if marker.is_some_and(|m| LOCATION_MARKERS.contains(&m)) {
        "GPE"
    } else if (2..=3).contains(&words.len()) && words.iter().all(|w| is_capitalised(w)) {
        "PERSON"
    } else {
        "MISC"
    }
}

fn is_capitalised(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(text: &str) -> AnnotatedDocument {
        HeuristicAnnotator::new().annotate(text).unwrap()
    }

    #[test]
    fn test_sentence_splitting() {
        let sentences = split_sentences("One idea. Two ideas!\n\nA heading\nThree? Version 2.0 ships");
        assert_eq!(
            sentences,
            vec!["One idea.", "Two ideas!", "A heading\nThree?", "Version 2.0 ships"]
        );
    }

    #[test]
    fn test_tokenize_keeps_inner_hyphens() {
        assert_eq!(
            tokenize("Force-directed layouts, don't panic."),
            vec!["Force-directed", "layouts", ",", "don't", "panic", "."]
        );
    }

    #[test]
    fn test_simple_sentence_tags_and_roles() {
        let doc = annotate("The cat chased the mouse in the garden.");
        let pos: Vec<PartOfSpeech> = doc.tokens.iter().map(|t| t.pos).collect();
        assert_eq!(
            pos,
            vec![
                PartOfSpeech::Det,
                PartOfSpeech::Noun,
                PartOfSpeech::Verb,
                PartOfSpeech::Det,
                PartOfSpeech::Noun,
                PartOfSpeech::Adp,
                PartOfSpeech::Det,
                PartOfSpeech::Noun,
                PartOfSpeech::Punct,
            ]
        );

        assert_eq!(doc.tokens[1].dep, Some(DependencyRole::Subject));
        assert_eq!(doc.tokens[1].head, 2);
        assert_eq!(doc.tokens[4].dep, Some(DependencyRole::DirectObject));
        assert_eq!(doc.tokens[7].dep, Some(DependencyRole::PrepositionalObject));
        assert_eq!(doc.head_of(&doc.tokens[7]).unwrap().text, "in");

        let chunks: Vec<&str> = doc.noun_chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(chunks, vec!["cat", "mouse", "garden"]);
        assert_eq!(doc.sentences.len(), 1);
    }

    #[test]
    fn test_heads_are_document_indices() {
        let doc = annotate("Graphs store edges. The layout uses springs.");
        let second_verb = doc.tokens.iter().position(|t| t.text == "uses").unwrap();
        let layout = doc.tokens.iter().position(|t| t.text == "layout").unwrap();
        assert_eq!(doc.tokens[layout].dep, Some(DependencyRole::Subject));
        assert_eq!(doc.tokens[layout].head, second_verb);
    }

    #[test]
    fn test_entities_and_labels() {
        let doc = annotate(
            "Researchers at Stanford University met Ada Lovelace in London last year.",
        );
        let entities: Vec<(&str, &str)> = doc
            .entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            entities,
            vec![
                ("Stanford University", "ORG"),
                ("Ada Lovelace", "PERSON"),
                ("London", "GPE"),
            ]
        );
    }

    #[test]
    fn test_stop_word_flag() {
        let doc = annotate("It is in the data.");
        assert!(doc.tokens[0].is_stop);
        assert!(doc.tokens[2].is_stop);
        assert!(!doc.tokens[4].is_stop);
    }

    #[test]
    fn test_empty_text() {
        let doc = annotate("   \n\n  ");
        assert!(doc.is_empty());
        assert!(doc.sentences.is_empty());
    }
}
