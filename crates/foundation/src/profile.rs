/// Learner accessibility profile chosen on the home screen.
///
/// `General` is the explicit "no adaptation" choice; it is a real selection
/// but is never sent to the backend as a `disability_profile`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    Adhd,
    Dyslexia,
    VisualImpairment,
    HearingImpairment,
    Cognitive,
    General,
}

/// Which adapted sections the backend generates for a profile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct AdaptedSections {
    pub simplified: bool,
    pub visual_description: bool,
    pub tts_script: bool,
}

impl Profile {
    /// Carousel order on the home screen.
    pub const ALL: [Profile; 6] = [
        Profile::Adhd,
        Profile::Dyslexia,
        Profile::VisualImpairment,
        Profile::HearingImpairment,
        Profile::Cognitive,
        Profile::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Adhd => "adhd",
            Profile::Dyslexia => "dyslexia",
            Profile::VisualImpairment => "visual_impairment",
            Profile::HearingImpairment => "hearing_impairment",
            Profile::Cognitive => "cognitive",
            Profile::General => "none",
        }
    }

    /// Value for the `disability_profile` request field.
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            Profile::General => None,
            other => Some(other.as_str()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Profile::Adhd => "⚡ ADHD",
            Profile::Dyslexia => "📖 Dyslexia",
            Profile::VisualImpairment => "👁️ Visual",
            Profile::HearingImpairment => "🔇 Hearing",
            Profile::Cognitive => "🧩 Cognitive",
            Profile::General => "General",
        }
    }

    /// Label for an optional profile; unset reads as `General`.
    pub fn label_or_general(profile: Option<Profile>) -> &'static str {
        profile.unwrap_or(Profile::General).label()
    }

    /// Mirrors the backend's profile routing so the loading state can say
    /// what is being prepared.
    pub fn adapted_sections(self) -> AdaptedSections {
        let (simplified, visual_description, tts_script) = match self {
            Profile::Dyslexia | Profile::Adhd => (true, false, false),
            Profile::Cognitive => (true, false, true),
            Profile::VisualImpairment => (false, true, true),
            Profile::HearingImpairment => (true, true, false),
            Profile::General => (true, true, true),
        };
        AdaptedSections {
            simplified,
            visual_description,
            tts_script,
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfile(pub String);

impl std::fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown profile: {:?}", self.0)
    }
}

impl std::error::Error for UnknownProfile {}

impl std::str::FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for p in Profile::ALL {
            assert_eq!(p.as_str().parse::<Profile>(), Ok(p));
        }
        assert_eq!(" dyslexia ".parse::<Profile>(), Ok(Profile::Dyslexia));
        assert!("autism".parse::<Profile>().is_err());
    }

    #[test]
    fn general_is_not_sent_to_backend() {
        assert_eq!(Profile::General.wire_name(), None);
        assert_eq!(
            Profile::VisualImpairment.wire_name(),
            Some("visual_impairment")
        );
    }

    #[test]
    fn unset_profile_reads_as_general() {
        assert_eq!(Profile::label_or_general(None), "General");
        assert_eq!(Profile::label_or_general(Some(Profile::Adhd)), "⚡ ADHD");
    }

    #[test]
    fn visual_profile_skips_simplified_text() {
        let s = Profile::VisualImpairment.adapted_sections();
        assert!(!s.simplified);
        assert!(s.visual_description && s.tts_script);

        let all = Profile::General.adapted_sections();
        assert!(all.simplified && all.visual_description && all.tts_script);
    }
}
