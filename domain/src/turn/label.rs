//! Sub-phase labels

/// Derive a display label for a sub-phase turn.
///
/// The prompt's leading word before a colon wins ("Block: choose..." gives
/// "Block"), optionally followed by "attack" ("Declare attack: ..." gives
/// "Declare attack"). Otherwise the declared episode type is used.
pub fn sub_phase_label(prompt: Option<&str>, episode_type: Option<&str>) -> String {
    prompt
        .and_then(label_from_prompt)
        .unwrap_or_else(|| generic_label(episode_type))
}

fn label_from_prompt(prompt: &str) -> Option<String> {
    let (head, _) = prompt.trim_start().split_once(':')?;
    let mut words = head.split_whitespace();
    let first = words.next()?;
    if !first
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }

    match (words.next(), words.next()) {
        (None, _) => Some(first.to_string()),
        (Some(second), None) if second.eq_ignore_ascii_case("attack") => {
            Some(format!("{first} {second}"))
        }
        _ => None,
    }
}

fn generic_label(episode_type: Option<&str>) -> String {
    let Some(kind) = episode_type.map(str::trim).filter(|t| !t.is_empty()) else {
        return "Sub-phase".to_string();
    };

    let spaced = kind.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => "Sub-phase".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_leading_word() {
        assert_eq!(
            sub_phase_label(Some("Block: choose which creatures block"), None),
            "Block"
        );
    }

    #[test]
    fn test_label_with_attack_suffix() {
        assert_eq!(
            sub_phase_label(Some("Declare attack: pick attackers"), Some("attack")),
            "Declare attack"
        );
    }

    #[test]
    fn test_label_falls_back_to_episode_type() {
        assert_eq!(
            sub_phase_label(Some("Pick two cards to discard: ..."), Some("forced_discard")),
            "Forced discard"
        );
        assert_eq!(sub_phase_label(Some("no colon here"), Some("scry")), "Scry");
    }

    #[test]
    fn test_label_without_any_hint() {
        assert_eq!(sub_phase_label(None, None), "Sub-phase");
        assert_eq!(sub_phase_label(Some(":"), Some("  ")), "Sub-phase");
    }
}
