//! Tests for PrefixClassifier normalization and detection

use rstest::rstest;

use kstree::domain::PrefixClassifier;

#[test]
fn given_descriptive_heading_when_normalizing_then_clean_strips_heading() {
    // Arrange
    let classifier = PrefixClassifier::new();
    let raw = "Elevated sodium 1. An exchangeable sodium percentage of 15 or more";

    // Act
    let (clean, display) = classifier.normalize(raw);

    // Assert
    assert_eq!(clean, "1. An exchangeable sodium percentage of 15 or more");
    assert_eq!(display, raw);
    assert_eq!(classifier.detect_level(&clean), 1);
    assert_eq!(classifier.extract_label(&clean), Some("1".to_string()));
}

#[test]
fn given_mixed_case_header_when_normalizing_then_text_passes_through() {
    // Arrange
    let classifier = PrefixClassifier::new();
    let raw = "IFFZa. Other Fragiaquults that have a plinthic horizon.";

    // Act
    let (clean, display) = classifier.normalize(raw);

    // Assert
    assert_eq!(clean, raw);
    assert_eq!(display, raw);
    assert_eq!(classifier.detect_level(&clean), 0);
    assert_eq!(classifier.extract_label(&clean), Some("IFFZa".to_string()));
}

#[test]
fn given_missing_period_when_normalizing_then_period_inserted() {
    // Arrange
    let classifier = PrefixClassifier::new();

    // Act
    let (clean, display) = classifier.normalize("1 Do not have andic soil properties.");

    // Assert
    assert_eq!(clean, "1. Do not have andic soil properties.");
    assert_eq!(display, "1 Do not have andic soil properties.");
    assert_eq!(classifier.detect_level(&clean), 1);
}

#[test]
fn given_connector_before_prefix_when_normalizing_then_connector_stripped() {
    // Arrange
    let classifier = PrefixClassifier::new();

    // Act
    let (clean, display) = classifier.normalize("or a. a cryic temperature regime.");

    // Assert
    assert_eq!(clean, "a. a cryic temperature regime.");
    assert_eq!(display, "a. a cryic temperature regime.");
}

#[test]
fn given_connector_without_prefix_when_normalizing_then_text_unchanged() {
    // Arrange
    let classifier = PrefixClassifier::new();

    // Act
    let (clean, _) = classifier.normalize("or otherwise saturated with water.");

    // Assert: no recognizable prefix follows, so the connector stays
    assert_eq!(clean, "or otherwise saturated with water.");
}

#[rstest]
#[case("A. Histosols.", 0)]
#[case("2. Other Gelisols.", 1)]
#[case("b. a densic contact within 50 cm.", 2)]
#[case("(3) a buried layer.", 3)]
#[case("(ab) more than half the thickness.", 4)]
#[case("saturated with water for 30 days.", -1)]
fn given_clause_text_when_detecting_level_then_prefix_decides(
    #[case] text: &str,
    #[case] expected: i8,
) {
    let classifier = PrefixClassifier::new();
    assert_eq!(classifier.detect_level(text), expected);
}
