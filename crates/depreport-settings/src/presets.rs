use depreport_domain::policy::EffectiveConfig;

pub const PROFILES: [&str; 3] = ["full", "offline", "summary"];

/// Preset profiles are opinionated defaults.
///
/// Unknown names get the `full` preset.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "offline" => offline_profile(),
        "summary" => summary_profile(),
        // default
        _ => full_profile(),
    }
}

fn full_profile() -> EffectiveConfig {
    EffectiveConfig::default()
}

fn offline_profile() -> EffectiveConfig {
    // Everything that can be computed from local files.
    EffectiveConfig {
        profile: "offline".to_string(),
        dependency_locations: false,
        ..EffectiveConfig::default()
    }
}

fn summary_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "summary".to_string(),
        dependency_details: false,
        dependency_locations: false,
        ..EffectiveConfig::default()
    }
}
