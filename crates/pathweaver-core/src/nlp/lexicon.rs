//! Closed-class English word lists used by the heuristic annotator

use std::collections::HashSet;
use std::sync::LazyLock;

pub(crate) const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "such", "my", "your", "his", "her", "its", "our", "their", "all", "both",
    "either", "neither", "several", "many", "much", "few", "most", "more", "other",
];

pub(crate) const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "whose", "which", "what", "someone", "something", "anyone", "anything", "everyone",
    "everything", "nobody", "nothing", "one",
];

pub(crate) const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "by", "from", "to", "into", "onto", "over", "under",
    "about", "through", "between", "among", "after", "before", "during", "without", "within",
    "across", "against", "along", "around", "behind", "below", "beneath", "beside", "beyond",
    "despite", "inside", "near", "outside", "since", "toward", "towards", "upon", "via", "like",
    "per", "than",
];

pub(crate) const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "whereas",
    "if", "unless", "when", "where", "whether",
];

pub(crate) const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "having",
    "do", "does", "did", "can", "could", "will", "would", "shall", "should", "may", "might",
    "must",
];

pub(crate) const COMMON_VERBS: &[&str] = &[
    "make", "makes", "made", "use", "uses", "used", "take", "takes", "took", "give", "gives",
    "gave", "get", "gets", "got", "show", "shows", "showed", "find", "finds", "found", "help",
    "helps", "helped", "include", "includes", "included", "provide", "provides", "provided",
    "describe", "describes", "described", "explain", "explains", "explained", "contain",
    "contains", "contained", "require", "requires", "required", "allow", "allows", "allowed",
    "create", "creates", "created", "build", "builds", "built", "form", "forms", "formed",
    "become", "becomes", "became", "remain", "remains", "remained", "see", "sees", "saw",
    "know", "knows", "knew", "think", "thinks", "thought", "study", "studies", "studied",
    "learn", "learns", "learned", "learnt", "connect", "connects", "connected", "depend",
    "depends", "depended", "chase", "chases", "chased", "eat", "eats", "ate", "run", "runs",
    "ran", "write", "writes", "wrote", "read", "reads", "store", "stores", "stored", "meet",
    "meets", "met",
];

pub(crate) const ORGANIZATION_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "ltd", "llc", "university", "institute", "company",
    "foundation", "association", "agency", "group", "bank", "labs", "laboratory", "college",
    "committee", "council", "society",
];

pub(crate) const LOCATION_MARKERS: &[&str] = &["in", "at", "from", "near", "across"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words: HashSet<&'static str> = HashSet::new();
    for list in [
        DETERMINERS,
        PRONOUNS,
        PREPOSITIONS,
        CONJUNCTIONS,
        AUXILIARIES,
    ] {
        words.extend(list.iter().copied());
    }
    words.extend([
        "not", "very", "also", "just", "only", "then", "there", "here", "how", "why", "now",
        "too", "again", "once", "up", "down", "out", "off", "own", "same", "well", "even",
        "ever", "still", "however", "thus", "therefore", "hence", "whose", "whoever",
        "whatever", "become", "becomes", "became", "yours", "ours", "theirs", "mine", "hers",
        "last", "first", "next", "many", "various", "really", "whereby", "amongst", "done",
    ]);
    words
});

/// Whether `word` (lower-cased) is an English stop word
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

pub(crate) fn has_adjective_suffix(word: &str) -> bool {
    word.chars().count() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("between"));
        assert!(is_stop_word("however"));
        assert!(!is_stop_word("graph"));
        assert!(!is_stop_word("The"));
    }

    #[test]
    fn test_adjective_suffix() {
        assert!(has_adjective_suffix("dangerous"));
        assert!(has_adjective_suffix("readable"));
        assert!(!has_adjective_suffix("ful"));
        assert!(!has_adjective_suffix("graph"));
    }
}
