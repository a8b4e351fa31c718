//! Prefix classification: nesting level and label detection from clause text.
//!
//! The printed keys mark nesting with textual prefixes: `"A."` (header),
//! `"1."` (numbered), `"a."` (lettered), `"(1)"` (paren-numbered) and
//! `"(a)"` (paren-lettered). The classifier also repairs four known
//! formatting irregularities in the source before detection.

use regex::Regex;

/// Pure-function classifier over clause text. Regexes are compiled once.
pub struct PrefixClassifier {
    connector: Regex,
    connector_prefix: Regex,
    mixed_header: Regex,
    heading: Regex,
    heading_connector: Regex,
    missing_dot: Regex,
    levels: [Regex; 5],
    labels: [Regex; 5],
}

impl Default for PrefixClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixClassifier {
    pub fn new() -> Self {
        Self {
            connector: Regex::new(r"^(?i)(?:and|or)\s+").unwrap(),
            connector_prefix: Regex::new(r"^(?i)(?:[a-z]\.\s|\d+\.\s|\(\d+\)|\([a-z]+\))")
                .unwrap(),
            mixed_header: Regex::new(r"^[A-Z]+[a-z]+\.").unwrap(),
            heading: Regex::new(r"^(.+?)\s+(\d+\.)\s").unwrap(),
            heading_connector: Regex::new(r"^(?i)(?:or|and)\s").unwrap(),
            missing_dot: Regex::new(r"^(\d+)\s+[A-Z]").unwrap(),
            levels: [
                Regex::new(r"^[A-Z][A-Za-z]*\.").unwrap(),
                Regex::new(r"^\d+\.").unwrap(),
                Regex::new(r"^[a-z]\.").unwrap(),
                Regex::new(r"^\(\d+\)").unwrap(),
                Regex::new(r"^\([a-z]+\)").unwrap(),
            ],
            labels: [
                Regex::new(r"^([A-Z][A-Za-z]*)\.").unwrap(),
                Regex::new(r"^(\d+)\.").unwrap(),
                Regex::new(r"^([a-z])\.").unwrap(),
                Regex::new(r"^\((\d+)\)").unwrap(),
                Regex::new(r"^\(([a-z]+)\)").unwrap(),
            ],
        }
    }

    /// Repair known source formatting issues.
    ///
    /// Returns `(clean, display)`: `clean` is what level/label detection
    /// runs on, `display` is what the node carries. Rules, in priority
    /// order:
    ///
    /// 1. strip a leading `"and "`/`"or "` connector when a recognizable
    ///    clause prefix follows (the logic badge already conveys AND/OR);
    /// 2. mixed-case sub-code headers (`"IFFZa. Other..."`) pass through
    ///    unchanged;
    /// 3. descriptive subheadings before an embedded numbered prefix
    ///    (`"Elevated sodium 1. An exchangeable..."`) are stripped from
    ///    `clean`, keeping the original as `display`;
    /// 4. a missing period after a bare leading number (`"1 Do not..."`)
    ///    is inserted.
    pub fn normalize(&self, content: &str) -> (String, String) {
        let mut text = content.trim().to_string();

        if let Some(m) = self.connector.find(&text) {
            if self.connector_prefix.is_match(&text[m.end()..]) {
                text = text[m.end()..].to_string();
            }
        }

        if self.mixed_header.is_match(&text) {
            return (text.clone(), text);
        }

        if let Some(caps) = self.heading.captures(&text) {
            let heading = caps.get(1).unwrap().as_str();
            // Only strip when the heading is not itself a connector
            if !self.heading_connector.is_match(heading) {
                let stripped = text[caps.get(2).unwrap().start()..].to_string();
                return (stripped, text);
            }
        }

        if let Some(caps) = self.missing_dot.captures(&text) {
            let digits = caps.get(1).unwrap();
            let fixed = format!("{}. {}", digits.as_str(), text[digits.end()..].trim_start());
            return (fixed, text);
        }

        (text.clone(), text)
    }

    /// Determine the nesting level (0–4) from the clause prefix, or −1 when
    /// no prefix pattern matches.
    pub fn detect_level(&self, content: &str) -> i8 {
        let text = self.connector.replace(content.trim(), "");
        for (level, re) in self.levels.iter().enumerate() {
            if re.is_match(&text) {
                return level as i8;
            }
        }
        -1
    }

    /// Extract the identifying token from the clause prefix (the code
    /// letters, the digit, the single letter, ...) used to build clause ids.
    pub fn extract_label(&self, content: &str) -> Option<String> {
        let text = self.connector.replace(content.trim(), "");
        for re in &self.labels {
            if let Some(caps) = re.captures(&text) {
                return Some(caps.get(1).unwrap().as_str().to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_level_covers_all_prefixes() {
        let c = PrefixClassifier::new();
        assert_eq!(c.detect_level("A. Histosols."), 0);
        assert_eq!(c.detect_level("IFFZa. Other soils."), 0);
        assert_eq!(c.detect_level("1. Soils that are saturated."), 1);
        assert_eq!(c.detect_level("a. a cryic temperature regime."), 2);
        assert_eq!(c.detect_level("(1) a lithic contact."), 3);
        assert_eq!(c.detect_level("(a) within 100 cm."), 4);
        assert_eq!(c.detect_level("no prefix at all"), -1);
    }

    #[test]
    fn test_detect_level_strips_connector() {
        let c = PrefixClassifier::new();
        assert_eq!(c.detect_level("or 2. Other Histosols."), 1);
        assert_eq!(c.detect_level("And a. a mollic epipedon."), 2);
    }

    #[test]
    fn test_extract_label() {
        let c = PrefixClassifier::new();
        assert_eq!(c.extract_label("AA. Histels."), Some("AA".to_string()));
        assert_eq!(c.extract_label("3. Other soils."), Some("3".to_string()));
        assert_eq!(c.extract_label("b. a densic contact."), Some("b".to_string()));
        assert_eq!(c.extract_label("(2) an ochric epipedon."), Some("2".to_string()));
        assert_eq!(c.extract_label("(ab) deep layers."), Some("ab".to_string()));
        assert_eq!(c.extract_label("continuation text"), None);
    }
}
