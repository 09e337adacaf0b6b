//! Human-readable mixing steps
//!
//! All numbers shown to the painter come from the rounded HSB values and
//! percentages rounded to one decimal.

use crate::color::Hsb;
use crate::mixing::BrightnessRegime;

use super::RecipeEntry;

fn amount(entry: &RecipeEntry) -> String {
    format!("{:.1}% {}", entry.percent, entry.label)
}

fn list(entries: &[&RecipeEntry]) -> String {
    entries
        .iter()
        .map(|e| amount(e))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Opening line describing the target
pub fn describe_target(hex: &str, hsb: Hsb) -> String {
    format!(
        "Target {}: hue {}°, saturation {}%, brightness {}%.",
        hex, hsb.hue, hsb.saturation, hsb.brightness
    )
}

/// Steps for a recipe built on white, black and the hue pigments
///
/// `base_id` is the pigment the regime starts from (white for bright
/// targets, black for dark ones); it is poured first when present.
pub fn mixing_steps(
    regime: BrightnessRegime,
    entries: &[RecipeEntry],
    base_id: Option<&str>,
) -> Vec<String> {
    let base = base_id.and_then(|id| entries.iter().find(|e| e.pigment_id == id));
    let rest: Vec<&RecipeEntry> = entries
        .iter()
        .filter(|e| Some(e.pigment_id.as_str()) != base_id)
        .collect();

    let mut steps = Vec::new();
    match (regime, base) {
        (BrightnessRegime::MidBrightness, _) | (_, None) => {
            if let Some((first, others)) = entries.split_first() {
                steps.push(format!("Start with {}.", amount(first)));
                for entry in others {
                    steps.push(format!("Add {}.", amount(entry)));
                }
            }
        }
        (BrightnessRegime::HighBrightness, Some(base)) => {
            steps.push(format!("Start with {} as the light base.", amount(base)));
            if !rest.is_empty() {
                steps.push(format!("Tint it gradually with {}.", list(&rest)));
            }
        }
        (BrightnessRegime::LowBrightness, Some(base)) => {
            steps.push(format!("Start with {} as the dark base.", amount(base)));
            if !rest.is_empty() {
                steps.push(format!("Work in {} a little at a time.", list(&rest)));
            }
        }
    }
    steps.push("Mix until uniform and compare a dry swatch with the target.".to_string());
    steps
}

/// Steps for a white and black split
pub fn grayscale_steps(entries: &[RecipeEntry]) -> Vec<String> {
    let parts: Vec<&RecipeEntry> = entries.iter().collect();
    vec![
        format!("Mix {} for a neutral gray.", list(&parts)),
        "Adjust with small amounts of white or black until the value matches.".to_string(),
    ]
}

/// Note prepended when the mixing model could not be used
pub fn degraded_notice() -> String {
    "The mixing model is unavailable; showing a neutral gray of matching brightness instead."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, label: &str, percent: f64) -> RecipeEntry {
        RecipeEntry {
            pigment_id: id.to_string(),
            label: label.to_string(),
            hex: "#000000".to_string(),
            percent,
        }
    }

    #[test]
    fn test_describe_target() {
        let line = describe_target("#8D93AD", Hsb::new(229.0, 18.0, 68.0));
        assert_eq!(line, "Target #8D93AD: hue 229°, saturation 18%, brightness 68%.");
    }

    #[test]
    fn test_high_brightness_starts_from_white() {
        let entries = vec![
            entry("white", "White (W)", 70.0),
            entry("red", "Red (R)", 30.0),
        ];
        let steps = mixing_steps(BrightnessRegime::HighBrightness, &entries, Some("white"));
        assert_eq!(steps[0], "Start with 70.0% White (W) as the light base.");
        assert_eq!(steps[1], "Tint it gradually with 30.0% Red (R).");
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_low_brightness_starts_from_black() {
        let entries = vec![
            entry("black", "Black (K)", 60.0),
            entry("blue", "Blue (B)", 25.5),
            entry("white", "White (W)", 14.5),
        ];
        let steps = mixing_steps(BrightnessRegime::LowBrightness, &entries, Some("black"));
        assert_eq!(steps[0], "Start with 60.0% Black (K) as the dark base.");
        assert_eq!(
            steps[1],
            "Work in 25.5% Blue (B), 14.5% White (W) a little at a time."
        );
    }

    #[test]
    fn test_mid_brightness_lists_in_order() {
        let entries = vec![entry("a", "A", 55.0), entry("b", "B", 45.0)];
        let steps = mixing_steps(BrightnessRegime::MidBrightness, &entries, None);
        assert_eq!(steps[0], "Start with 55.0% A.");
        assert_eq!(steps[1], "Add 45.0% B.");
    }

    #[test]
    fn test_grayscale_steps() {
        let entries = vec![entry("w", "W", 60.0), entry("k", "K", 40.0)];
        let steps = grayscale_steps(&entries);
        assert_eq!(steps[0], "Mix 60.0% W, 40.0% K for a neutral gray.");
    }
}
