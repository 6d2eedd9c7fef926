//! Metadata heuristics over filenames and extracted text
//!
//! Every function here is pure and total: a value that cannot be found is
//! `None` or an empty list, never an error. The rules are pattern-based and
//! best-effort.
//!
//! Known limitation: any standalone 4-digit number left in a filename after
//! the date prefix is read as the distance.
//!
//! Digits are ASCII `0-9` only; dates and distances written with other
//! Unicode digits are not recognized.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Difficulty, Equipment, FocusArea, PoolType};

/// Fields recoverable from the `YYYY.MM.DD - DISTANCE - POOLTYPE.docx` convention
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameMetadata {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub distance_meters: Option<u32>,
    pub pool_type: Option<PoolType>,
}

/// Duration assumed when the distance is unknown
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Minutes per 100 of distance, rest included
const MINUTES_PER_100: f64 = 1.75;

/// Keyword variants per equipment item, in output order
const EQUIPMENT_KEYWORDS: [(Equipment, &[&str]); 6] = [
    (Equipment::PullBuoy, &["pull buoy", "pull", "pulling"]),
    (Equipment::Fins, &["fins", "fin"]),
    (Equipment::Kickboard, &["kick board", "kickboard", "kick"]),
    (Equipment::Paddles, &["paddles", "paddle"]),
    (Equipment::Snorkel, &["snorkel"]),
    (Equipment::Band, &["band", "ankle band"]),
];

/// Focus areas added when the text mentions any of the keywords, in order
const CONTENT_FOCUS: [(FocusArea, &[&str]); 3] = [
    (FocusArea::Speed, &["sprint", "fast", "speed"]),
    (FocusArea::Technique, &["drill", "technique"]),
    (FocusArea::Kick, &["kick", "kicking"]),
];

/// Strip a trailing `.docx`/`.DOCX` extension
pub fn strip_docx_extension(filename: &str) -> &str {
    filename
        .strip_suffix(".docx")
        .or_else(|| filename.strip_suffix(".DOCX"))
        .unwrap_or(filename)
}

/// Parse date, distance and pool type from a template filename.
///
/// The date prefix is removed before looking for the distance so that the
/// year is never mistaken for it.
pub fn extract_metadata_from_filename(filename: &str) -> FilenameMetadata {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    static DISTANCE_RE: OnceLock<Regex> = OnceLock::new();
    static POOL_RE: OnceLock<Regex> = OnceLock::new();

    let date_re = DATE_RE.get_or_init(|| Regex::new(r"^([0-9]{4})[.\-]([0-9]{2})[.\-]([0-9]{2})").unwrap());
    let distance_re = DISTANCE_RE.get_or_init(|| Regex::new(r"\b([0-9]{4})\b").unwrap());
    let pool_re = POOL_RE.get_or_init(|| Regex::new(r"(?i)\b(SCY|SCM|LCM)\b").unwrap());

    let mut metadata = FilenameMetadata::default();
    let mut name = strip_docx_extension(filename);

    if let Some(caps) = date_re.captures(name) {
        metadata.date = Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
        name = &name[caps.get(0).map_or(0, |m| m.end())..];
    }

    metadata.distance_meters = distance_re
        .captures(name)
        .and_then(|caps| caps[1].parse().ok());

    metadata.pool_type = pool_re
        .captures(name)
        .and_then(|caps| PoolType::from_code(&caps[1]));

    metadata
}

/// Find the total distance in a plan's text.
///
/// Tries, in order: a number after "Cool Down", a number after "Total", a
/// number followed by a unit. The first pattern that yields an integer wins.
pub fn extract_distance_from_content(raw_text: &str) -> Option<u32> {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();

    let patterns = PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)Cool Down.*?([0-9]{1,2}[,.]?[0-9]{3})").unwrap(),
            Regex::new(r"(?i)Total.*?([0-9]{1,2}[,.]?[0-9]{3})").unwrap(),
            Regex::new(r"(?i)([0-9]{1,2}[,.]?[0-9]{3})\s*(?:yards|meters|m|y)").unwrap(),
        ]
    });

    patterns.iter().find_map(|re| {
        let caps = re.captures(raw_text)?;
        caps[1].replace([',', '.'], "").parse().ok()
    })
}

/// Difficulty tier for a total distance; unknown distance is intermediate
pub fn classify_difficulty(distance_meters: Option<u32>) -> Difficulty {
    match distance_meters {
        None => Difficulty::Intermediate,
        Some(d) if d < 2000 => Difficulty::Beginner,
        Some(d) if d < 3000 => Difficulty::Intermediate,
        Some(d) if d < 4000 => Difficulty::Advanced,
        Some(_) => Difficulty::Elite,
    }
}

/// Equipment mentioned anywhere in the text, in fixed declaration order
pub fn extract_equipment_mentioned(raw_text: &str) -> Vec<Equipment> {
    let lower = raw_text.to_lowercase();
    EQUIPMENT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(equipment, _)| *equipment)
        .collect()
}

/// Focus areas every plan of this type starts with
pub fn seed_focus_areas(plan_type_key: &str) -> &'static [FocusArea] {
    match plan_type_key {
        "mileage" => &[FocusArea::Endurance, FocusArea::Volume],
        "im" => &[FocusArea::Technique, FocusArea::StrokeWork],
        "fast" => &[FocusArea::Speed, FocusArea::Sprint],
        "kitchen_sink" => &[FocusArea::Mixed, FocusArea::Variety],
        _ => &[],
    }
}

/// Type seed list followed by speed, technique and kick when the text
/// mentions them; each area appears at most once
pub fn extract_focus_areas(raw_text: &str, plan_type_key: &str) -> Vec<FocusArea> {
    let lower = raw_text.to_lowercase();
    let mut areas = seed_focus_areas(plan_type_key).to_vec();

    for (area, keywords) in CONTENT_FOCUS.iter() {
        if keywords.iter().any(|k| lower.contains(k)) && !areas.contains(area) {
            areas.push(*area);
        }
    }

    areas
}

/// Session length at 1.75 minutes per 100, rounded to the nearest 5 minutes.
///
/// Halfway values round to the even multiple: 52.5 minutes gives 50, 17.5
/// minutes gives 20.
pub fn estimate_duration_minutes(distance_meters: Option<u32>) -> u32 {
    match distance_meters {
        None => DEFAULT_DURATION_MINUTES,
        Some(distance) => {
            let minutes = f64::from(distance) / 100.0 * MINUTES_PER_100;
            ((minutes / 5.0).round_ties_even() * 5.0) as u32
        }
    }
}

/// Stable identifier from plan type and filename, e.g.
/// `mileage_2026.02.09_-_3200_-_scy`
pub fn generate_plan_id(plan_type_key: &str, filename: &str) -> String {
    static UNSAFE_RE: OnceLock<Regex> = OnceLock::new();
    let unsafe_re = UNSAFE_RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\-_.]").unwrap());

    let clean = unsafe_re.replace_all(strip_docx_extension(filename), "_");
    format!("{}_{}", plan_type_key, clean).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_full_convention() {
        let meta = extract_metadata_from_filename("2026.02.09 - 3200 - SCY.docx");
        assert_eq!(meta.date.as_deref(), Some("2026-02-09"));
        assert_eq!(meta.distance_meters, Some(3200));
        assert_eq!(meta.pool_type, Some(PoolType::Scy));
    }

    #[test]
    fn test_filename_dash_date_and_lowercase_pool() {
        let meta = extract_metadata_from_filename("2025-11-03 - 2800 - lcm.DOCX");
        assert_eq!(meta.date.as_deref(), Some("2025-11-03"));
        assert_eq!(meta.distance_meters, Some(2800));
        assert_eq!(meta.pool_type, Some(PoolType::Lcm));
    }

    #[test]
    fn test_filename_without_convention() {
        let meta = extract_metadata_from_filename("no_date_here.docx");
        assert_eq!(meta, FilenameMetadata::default());
    }

    #[test]
    fn test_filename_distance_without_date() {
        let meta = extract_metadata_from_filename("Sprint set 2500 SCM.docx");
        assert_eq!(meta.date, None);
        assert_eq!(meta.distance_meters, Some(2500));
        assert_eq!(meta.pool_type, Some(PoolType::Scm));
    }

    #[test]
    fn test_filename_date_digits_not_used_as_distance() {
        let meta = extract_metadata_from_filename("2026.02.09 - SCY.docx");
        assert_eq!(meta.date.as_deref(), Some("2026-02-09"));
        assert_eq!(meta.distance_meters, None);
    }

    #[test]
    fn test_filename_pool_requires_word_boundary() {
        let meta = extract_metadata_from_filename("2026.02.09 - 3200_SCY.docx");
        assert_eq!(meta.pool_type, None);
        // `_` is a word character, so 3200 is not a standalone number either
        assert_eq!(meta.distance_meters, None);
    }

    #[test]
    fn test_filename_stray_identifier_is_taken_as_distance() {
        let meta = extract_metadata_from_filename("Workout 1234.docx");
        assert_eq!(meta.distance_meters, Some(1234));
    }

    #[test]
    fn test_distance_after_cool_down() {
        let text = "Warm Up\t400\nMain Set\t2,000\nCool Down\t3,200";
        assert_eq!(extract_distance_from_content(text), Some(3200));
    }

    #[test]
    fn test_distance_after_total() {
        let text = "Main 8x100\nTotal: 2.800 for today";
        assert_eq!(extract_distance_from_content(text), Some(2800));
    }

    #[test]
    fn test_distance_with_unit() {
        assert_eq!(extract_distance_from_content("swim 1500 meters easy"), Some(1500));
        assert_eq!(extract_distance_from_content("4,000y aerobic"), Some(4000));
    }

    #[test]
    fn test_distance_pattern_priority() {
        // Unit pattern matches earlier in the text but "Cool Down" wins
        let text = "1000 yards warm up\ncool down easy 2400";
        assert_eq!(extract_distance_from_content(text), Some(2400));
    }

    #[test]
    fn test_distance_not_found() {
        assert_eq!(extract_distance_from_content("easy 200 swim"), None);
        assert_eq!(extract_distance_from_content(""), None);
    }

    #[test]
    fn test_cool_down_does_not_cross_lines() {
        let text = "Cool Down\n200 easy\n3000 yards";
        assert_eq!(extract_distance_from_content(text), Some(3000));
    }

    #[test]
    fn test_classify_difficulty_boundaries() {
        assert_eq!(classify_difficulty(Some(1999)), Difficulty::Beginner);
        assert_eq!(classify_difficulty(Some(2000)), Difficulty::Intermediate);
        assert_eq!(classify_difficulty(Some(2999)), Difficulty::Intermediate);
        assert_eq!(classify_difficulty(Some(3000)), Difficulty::Advanced);
        assert_eq!(classify_difficulty(Some(3999)), Difficulty::Advanced);
        assert_eq!(classify_difficulty(Some(4000)), Difficulty::Elite);
        assert_eq!(classify_difficulty(None), Difficulty::Intermediate);
    }

    #[test]
    fn test_equipment_fixed_order() {
        assert_eq!(
            extract_equipment_mentioned("Bring your pull buoy and fins"),
            vec![Equipment::PullBuoy, Equipment::Fins]
        );
        assert_eq!(
            extract_equipment_mentioned("FINS first, then PULL"),
            vec![Equipment::PullBuoy, Equipment::Fins]
        );
    }

    #[test]
    fn test_equipment_each_item_once() {
        let found = extract_equipment_mentioned("kick, kickboard, kick board, snorkel, ankle band");
        assert_eq!(
            found,
            vec![Equipment::Kickboard, Equipment::Snorkel, Equipment::Band]
        );
    }

    #[test]
    fn test_equipment_none() {
        assert!(extract_equipment_mentioned("8 x 100 freestyle").is_empty());
    }

    #[test]
    fn test_focus_areas_seed_only() {
        assert_eq!(
            extract_focus_areas("easy aerobic swim", "mileage"),
            vec![FocusArea::Endurance, FocusArea::Volume]
        );
    }

    #[test]
    fn test_focus_areas_content_additions_in_order() {
        assert_eq!(
            extract_focus_areas("Kicking ladder, then drill and a SPRINT", "mileage"),
            vec![
                FocusArea::Endurance,
                FocusArea::Volume,
                FocusArea::Speed,
                FocusArea::Technique,
                FocusArea::Kick,
            ]
        );
    }

    #[test]
    fn test_focus_areas_no_duplicates() {
        assert_eq!(
            extract_focus_areas("fast drill", "im"),
            vec![FocusArea::Technique, FocusArea::StrokeWork, FocusArea::Speed]
        );
        assert_eq!(
            extract_focus_areas("speed speed", "fast"),
            vec![FocusArea::Speed, FocusArea::Sprint]
        );
    }

    #[test]
    fn test_focus_areas_unknown_type() {
        assert_eq!(extract_focus_areas("kick", "open_water"), vec![FocusArea::Kick]);
    }

    #[test]
    fn test_estimate_duration() {
        assert_eq!(estimate_duration_minutes(None), 60);
        assert_eq!(estimate_duration_minutes(Some(2800)), 50);
        assert_eq!(estimate_duration_minutes(Some(3200)), 55);
        assert_eq!(estimate_duration_minutes(Some(0)), 0);
    }

    #[test]
    fn test_estimate_duration_ties_round_to_even() {
        // 3000 -> 52.5 min -> 10.5 units -> 10
        assert_eq!(estimate_duration_minutes(Some(3000)), 50);
        // 1000 -> 17.5 min -> 3.5 units -> 4
        assert_eq!(estimate_duration_minutes(Some(1000)), 20);
        // 2500 -> 43.75 min -> 8.75 units -> 9
        assert_eq!(estimate_duration_minutes(Some(2500)), 45);
        assert_eq!(estimate_duration_minutes(Some(4000)), 70);
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        // Arabic-Indic year, fullwidth distance
        let name = "\u{0662}\u{0660}\u{0662}\u{0666}.02.09 - \u{FF13}\u{FF12}\u{FF10}\u{FF10} - SCY.docx";
        let meta = extract_metadata_from_filename(name);
        assert_eq!(meta.date, None);
        assert_eq!(meta.distance_meters, None);
        assert_eq!(meta.pool_type, Some(PoolType::Scy));

        assert_eq!(
            extract_distance_from_content("Cool Down \u{FF12},\u{FF14}00\nTotal 2,400"),
            Some(2400)
        );
    }

    #[test]
    fn test_generate_plan_id() {
        assert_eq!(
            generate_plan_id("mileage", "2026.02.09 - 3200 - SCY.docx"),
            "mileage_2026.02.09_-_3200_-_scy"
        );
        assert_eq!(generate_plan_id("IM", "Übung #1.DOCX"), "im__bung__1");
    }

    #[test]
    fn test_generate_plan_id_is_pure_and_safe() {
        let re = Regex::new(r"^[a-z0-9_.\-]+$").unwrap();
        for name in ["A b&c.docx", "x/y\\z.docx", "ümlaut—dash.docx", "plain"] {
            let first = generate_plan_id("fast", name);
            assert_eq!(first, generate_plan_id("fast", name));
            let suffix = first.strip_prefix("fast_").unwrap();
            assert!(re.is_match(suffix), "unexpected id {}", first);
        }
    }

    #[test]
    fn test_strip_docx_extension() {
        assert_eq!(strip_docx_extension("a.docx"), "a");
        assert_eq!(strip_docx_extension("a.DOCX"), "a");
        assert_eq!(strip_docx_extension("a.Docx"), "a.Docx");
        assert_eq!(strip_docx_extension("2026.02.09"), "2026.02.09");
    }
}
