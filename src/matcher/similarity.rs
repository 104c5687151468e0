//! Name similarity for the heuristic type mapper

/// Levenshtein edit distance between two strings, by characters
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // two rows of the distance matrix
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &char_a) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &char_b) in b.iter().enumerate() {
            let cost = if char_a == char_b { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Case- and separator-insensitive form of a type name.
///
/// `TrackEntry`, `trackEntry` and `Track_Entry` all normalise to
/// `trackentry`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Last segment of a dotted name
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

/// Shortest normalised name that may match with one edit.
/// Below this, one edit turns too many unrelated names into each other.
const MIN_FUZZY_LEN: usize = 6;

/// Whether two type names plausibly denote the same type across languages
pub fn names_match(source: &str, java: &str) -> bool {
    let source = normalize_name(source);
    let java = normalize_name(java);
    if source.is_empty() || java.is_empty() {
        return false;
    }
    if source == java {
        return true;
    }
    source.chars().count().min(java.chars().count()) >= MIN_FUZZY_LEN
        && levenshtein_distance(&source, &java) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("bone", "bone"), 0);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "slot"), 4);
        assert_eq!(levenshtein_distance("slot", ""), 4);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Track_Entry"), "trackentry");
        assert_eq!(normalize_name("trackEntry"), "trackentry");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("com.esotericsoftware.spine.AnimationState.TrackEntry"), "TrackEntry");
        assert_eq!(simple_name("Bone"), "Bone");
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("skeleton_data", "SkeletonData"));
        // one edit on a long name
        assert!(names_match("AttachmentTimline", "AttachmentTimeline"));
        // one edit on a short name is too loose
        assert!(!names_match("Bone", "Bond"));
        assert!(!names_match("Slot", "SlotData"));
    }
}
