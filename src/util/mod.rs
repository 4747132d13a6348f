//! Untraced helpers over plain strings
//!
//! The machine finds the overlap by brute force so that its trace shows every
//! comparison. The same number falls out of one prefix-function pass over
//! `reverse(s) + separator + s` in linear time; these helpers compute it directly
//! for callers that only want the answer.

/// Whether `word` reads the same in both directions
pub fn is_palindrome(word: &str) -> bool {
    word.chars().eq(word.chars().rev())
}

/// Prefix function: `pi[i]` is the length of the longest proper border of
/// `text[..=i]`
pub fn prefix_function<T: PartialEq>(text: &[T]) -> Vec<usize> {
    let mut pi = vec![0; text.len()];
    for i in 1..text.len() {
        let mut k = pi[i - 1];
        while k > 0 && text[i] != text[k] {
            k = pi[k - 1];
        }
        if text[i] == text[k] {
            k += 1;
        }
        pi[i] = k;
    }
    pi
}

/// Longest suffix of `word` equal to a prefix of its reverse
///
/// This is the overlap `k` the machine's search phase returns.
pub fn overlap_len(word: &str) -> usize {
    // `None` separates the halves so no border can cross it.
    let joined: Vec<Option<char>> = word
        .chars()
        .rev()
        .map(Some)
        .chain(std::iter::once(None))
        .chain(word.chars().map(Some))
        .collect();
    prefix_function(&joined).last().copied().unwrap_or(0)
}

/// Shortest palindrome having `word` as a prefix
pub fn shortest_palindrome(word: &str) -> String {
    let k = overlap_len(word);
    let n = word.chars().count();
    let mut out = String::with_capacity(word.len() * 2);
    out.push_str(word);
    out.extend(word.chars().take(n - k).collect::<Vec<_>>().into_iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome(""));
        assert!(is_palindrome("a"));
        assert!(is_palindrome("abba"));
        assert!(!is_palindrome("abca"));
    }

    #[test]
    fn test_prefix_function() {
        assert_eq!(prefix_function(&b"aabaaab"[..]), vec![0, 1, 0, 1, 2, 2, 3]);
        assert!(prefix_function::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_overlap_len() {
        assert_eq!(overlap_len("abc"), 1);
        assert_eq!(overlap_len("ab"), 1);
        assert_eq!(overlap_len("abb"), 2);
        assert_eq!(overlap_len("level"), 5);
        assert_eq!(overlap_len(""), 0);
    }

    #[test]
    fn test_shortest_palindrome() {
        assert_eq!(shortest_palindrome("abc"), "abcba");
        assert_eq!(shortest_palindrome("ab"), "aba");
        assert_eq!(shortest_palindrome("abab"), "ababa");
        assert_eq!(shortest_palindrome("a"), "a");
        assert_eq!(shortest_palindrome("abcdc"), "abcdcba");
        assert_eq!(shortest_palindrome(""), "");
    }
}
