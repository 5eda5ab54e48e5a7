use super::*;

// =============================================================================
// BASIC NORMALIZATION
// =============================================================================

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(slugify("Kigali Construction Ltd."), "kigali-construction-ltd");
}

#[test]
fn slugify_trims_surrounding_whitespace() {
    assert_eq!(slugify("  Amahoro Plumbing  "), "amahoro-plumbing");
}

#[test]
fn slugify_keeps_digits() {
    assert_eq!(slugify("2000 Hills Movers"), "2000-hills-movers");
}

#[test]
fn slugify_passes_through_existing_slugs() {
    assert_eq!(slugify("kigali-construction-ltd"), "kigali-construction-ltd");
}

// =============================================================================
// SEPARATOR COLLAPSING
// =============================================================================

#[test]
fn slugify_collapses_mixed_separator_runs() {
    assert_eq!(slugify("a _- b"), "a-b");
    assert_eq!(slugify("hello--world"), "hello-world");
    assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
}

#[test]
fn slugify_strips_leading_and_trailing_separators() {
    assert_eq!(slugify("--hello--"), "hello");
    assert_eq!(slugify("__init__"), "init");
}

// =============================================================================
// STRIPPED CHARACTERS
// =============================================================================

#[test]
fn slugify_drops_punctuation_without_separating() {
    assert_eq!(slugify("A!B"), "ab");
    assert_eq!(slugify("O'Connor & Sons"), "oconnor-sons");
}

#[test]
fn slugify_drops_accented_characters() {
    assert_eq!(slugify("Café"), "caf");
    assert_eq!(slugify("Fünf Höfe"), "fnf-hfe");
}

// =============================================================================
// DEGENERATE INPUT
// =============================================================================

#[test]
fn slugify_empty_input_is_empty() {
    assert_eq!(slugify(""), "");
}

#[test]
fn slugify_punctuation_only_is_empty() {
    assert_eq!(slugify("!!! ... ???"), "");
    assert_eq!(slugify("---"), "");
}

// =============================================================================
// OUTPUT ALPHABET INVARIANT
// =============================================================================

#[test]
fn slugify_output_alphabet_holds_for_awkward_inputs() {
    let inputs = [
        "Kigali Construction Ltd.",
        "  -- Weird__ Input!! --  ",
        "ümlaut ünd spaces",
        "a\u{00A0}b", // non-breaking space
        "12 % discount!!",
        "",
    ];
    for input in inputs {
        let slug = slugify(input);
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "bad char in slug {slug:?} for input {input:?}"
        );
        assert!(!slug.starts_with('-'), "leading hyphen in {slug:?}");
        assert!(!slug.ends_with('-'), "trailing hyphen in {slug:?}");
        assert!(!slug.contains("--"), "double hyphen in {slug:?}");
    }
}
