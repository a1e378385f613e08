/// Fixed catalogue of voice names a preference may reference. The short
/// name maps to a provider voice inside the synthesis client.
pub const VOICES: &[&str] = &[
    "Ava", "Andrew", "Emma", "Brian", "Jenny", "Guy", "Aria", "Davis", "Jane", "Jason", "Sara",
    "Tony", "Nancy", "Amber", "Ana", "Ashley", "Brandon", "Christopher", "Cora", "Elizabeth",
    "Eric", "Jacob", "Michelle", "Monica", "Roger", "Steffan",
];

pub fn is_known_voice(voice: &str) -> bool {
    VOICES.contains(&voice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_voices_accepted() {
        assert!(is_known_voice("Ava"));
        assert!(is_known_voice("Steffan"));
    }

    #[test]
    fn unknown_and_miscased_voices_rejected() {
        assert!(!is_known_voice("HAL9000"));
        assert!(!is_known_voice("ava"));
        assert!(!is_known_voice(""));
    }
}
