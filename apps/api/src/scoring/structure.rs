use serde::{Deserialize, Serialize};

use crate::scoring::tables::{round_to, StructureHints, StructureSection};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPresence {
    pub section: StructureSection,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub score: f64,
    pub parts: Vec<SectionPresence>,
}

impl StructureReport {
    pub fn missing(&self) -> Vec<StructureSection> {
        self.parts
            .iter()
            .filter(|p| !p.present)
            .map(|p| p.section)
            .collect()
    }
}

/// Checks which structural sections the normalized answer touches.
pub fn score_structure(normalized: &str, hints: StructureHints) -> StructureReport {
    let parts: Vec<SectionPresence> = hints
        .iter()
        .map(|(section, cues)| SectionPresence {
            section: *section,
            present: cues.iter().any(|cue| normalized.contains(cue)),
        })
        .collect();

    let present = parts.iter().filter(|p| p.present).count();
    let score = if hints.is_empty() {
        0.0
    } else {
        round_to(present as f64 / hints.len() as f64, 2)
    };

    StructureReport { score, parts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalize;
    use crate::scoring::tables::STRUCTURE_HINTS;

    #[test]
    fn test_all_sections_present() {
        let text = normalize(
            "Hello, I built a Python service and I'm looking for a role; my approach was simple.",
        );
        let report = score_structure(&text, STRUCTURE_HINTS);
        assert_eq!(report.score, 1.0);
        assert!(report.missing().is_empty());
    }

    #[test]
    fn test_missing_sections_in_fixed_order() {
        let report = score_structure("we built a cart", STRUCTURE_HINTS);
        assert_eq!(report.score, 0.2);
        assert_eq!(
            report.missing(),
            vec![
                StructureSection::Intro,
                StructureSection::Skills,
                StructureSection::Goal,
                StructureSection::Logic,
            ]
        );
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        let report = score_structure("", STRUCTURE_HINTS);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.parts.len(), 5);
    }
}
