//! Fixed Dutch phrases spoken or logged by the assistant.

pub const HELP: &str = "Ik kan tekst voorlezen en tonen, en foto's van internet laten zien. \
Zeg bijvoorbeeld: toon tekst hallo wereld. Of: toon foto van katten.";

pub const TEXT_HIDDEN: &str = "Tekst verborgen.";
pub const TEXT_SHOWN_LOG: &str = "Tekst getoond en uitgesproken.";
pub const ACKNOWLEDGED: &str = "Begrepen.";

pub const AWAKE_SUFFIX: &str = "Ik ben wakker. Waarmee kan ik helpen?";
pub const AWAKE_LOG: &str = "Ik ben wakker.";
pub const ALREADY_AWAKE: &str = "Ik ben al actief.";
pub const SLEEP: &str = "Ik ga slapen. Tot later.";
pub const SLEEP_LOG: &str = "Ga naar slaapstand.";
pub const ALREADY_ASLEEP: &str = "Ik ben al in slaapstand.";

pub const RECOGNITION_UNAVAILABLE: &str = "Spraakherkenning wordt niet ondersteund.";
pub const MICROPHONE_FAILED: &str = "Kon de microfoon niet starten.";

/// Spoken and logged when a photo is requested.
pub fn photo_announcement(query: &str) -> String {
    format!("Toon een foto van {query}.")
}

/// Logged when a recognition session ends with an error.
pub fn recognition_error(message: &str) -> String {
    format!("Fout spraakherkenning: {message}")
}

/// Spoken when the microphone is switched on from the UI.
pub fn microphone_ready(assistant_name: &str) -> String {
    let mut chars = assistant_name.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("Microfoon actief. Zeg: {name} wake up.")
}

/// Time-of-day salutation for the wake greeting.
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Goedemorgen.",
        12..=17 => "Goedemiddag.",
        _ => "Goedenavond.",
    }
}
