//! Maps a matched entry into a presentation-agnostic record. Simple mode
//! gives plain headword/gloss pairs with external link targets; detailed
//! mode preserves every annotated segment with its semantic role so a
//! renderer can style them itself.

use ordbok_types::{DisplayMode, RenderRecord, RenderSegment, SegmentRole, Separator};

use crate::direction::Direction;
use crate::trie::{Entry, Headword, Segment, SegmentKind, Side, Translation};

/// Link-target format is fixed for compatibility with existing consumers.
pub fn wiktionary_url(lang: &str, word: &str) -> String {
    format!("http://{lang}.wiktionary.org/wiki/{word}")
}

/// Conventional default label for a part-of-speech code. Real localization
/// is the renderer's concern; this table is only the fallback.
pub fn pos_label(code: &str) -> &'static str {
    match code {
        "s" => "substantiv",
        "a" => "adjektiv",
        "adv" => "adverb",
        "v" => "verb",
        "en" => "egennamn",
        "pos" => "postposition",
        "pron" => "pronomen",
        "num" => "räkneord",
        "konj" => "konjunktion",
        "ij" => "interjektion",
        "prep" => "preposition",
        _ => "_pos_",
    }
}

pub fn format_entry(entry: &Entry, mode: DisplayMode, direction: &Direction) -> RenderRecord {
    let mut segments = Vec::new();
    for side in &entry.sides {
        match (mode, side) {
            (DisplayMode::Simple, Side::Headword(headword)) => {
                segments.push(RenderSegment {
                    role: SegmentRole::Headword,
                    text: headword.text.clone(),
                    link: Some(wiktionary_url(direction.source_lang(), &headword.text)),
                    label: None,
                    separator: Separator::Space,
                });
            }
            (DisplayMode::Simple, Side::Translation(translation)) => {
                segments.push(RenderSegment {
                    role: SegmentRole::Translation,
                    text: translation.text.clone(),
                    link: Some(wiktionary_url(direction.target_lang(), &translation.text)),
                    label: None,
                    separator: Separator::Break,
                });
            }
            (DisplayMode::Detailed, Side::Headword(headword)) => {
                push_headword(headword, &mut segments);
            }
            (DisplayMode::Detailed, Side::Translation(translation)) => {
                push_translation(translation, &mut segments);
            }
        }
    }
    RenderRecord { segments }
}

fn push_headword(headword: &Headword, segments: &mut Vec<RenderSegment>) {
    segments.push(RenderSegment {
        role: SegmentRole::Headword,
        text: headword.text.clone(),
        link: None,
        label: None,
        separator: Separator::Space,
    });
    let last = headword.tags.len().saturating_sub(1);
    for (index, tag) in headword.tags.iter().enumerate() {
        if index == last {
            // Final code is the part-of-speech, shown raw with its label
            segments.push(RenderSegment {
                role: SegmentRole::PosTag,
                text: tag.clone(),
                link: None,
                label: Some(pos_label(tag).to_string()),
                separator: Separator::Space,
            });
        } else {
            segments.push(RenderSegment {
                role: SegmentRole::Geo,
                text: format!("({tag})"),
                link: None,
                label: None,
                separator: Separator::Space,
            });
        }
    }
}

fn push_translation(translation: &Translation, segments: &mut Vec<RenderSegment>) {
    let count = translation.segments.len();
    for (index, segment) in translation.segments.iter().enumerate() {
        let separator = if index + 1 == count {
            Separator::Break
        } else if spaced(&segment.kind, &translation.segments[index + 1].kind) {
            Separator::Space
        } else {
            Separator::None
        };
        segments.push(RenderSegment {
            role: role_for(segment.kind),
            text: display_value(segment),
            link: None,
            label: None,
            separator,
        });
    }
}

/// Whether a space belongs between two adjacent translation segments.
fn spaced(current: &SegmentKind, next: &SegmentKind) -> bool {
    !matches!(current, SegmentKind::ExampleTarget | SegmentKind::BracketOpen)
        && !matches!(next, SegmentKind::Comma | SegmentKind::Geo)
}

fn display_value(segment: &Segment) -> String {
    match segment.kind {
        SegmentKind::Geo | SegmentKind::Restriction => format!("({})", segment.value),
        SegmentKind::SynonymGroup | SegmentKind::VariantGroup => format!("{}:", segment.value),
        _ => segment.value.clone(),
    }
}

fn role_for(kind: SegmentKind) -> SegmentRole {
    match kind {
        SegmentKind::GroupId => SegmentRole::GroupId,
        SegmentKind::Translation => SegmentRole::Translation,
        SegmentKind::ExampleSource => SegmentRole::ExampleSource,
        SegmentKind::ExampleTarget => SegmentRole::ExampleTarget,
        SegmentKind::BracketOpen => SegmentRole::BracketOpen,
        SegmentKind::BracketClose => SegmentRole::BracketClose,
        SegmentKind::Equivalence => SegmentRole::Equivalence,
        SegmentKind::Comma => SegmentRole::Comma,
        SegmentKind::Slash => SegmentRole::Slash,
        SegmentKind::Geo => SegmentRole::Geo,
        SegmentKind::SynonymGroup => SegmentRole::SynonymGroup,
        SegmentKind::VariantGroup => SegmentRole::VariantGroup,
        SegmentKind::Synonym => SegmentRole::Synonym,
        SegmentKind::Restriction => SegmentRole::Restriction,
        SegmentKind::Unknown => SegmentRole::Unknown,
    }
}
