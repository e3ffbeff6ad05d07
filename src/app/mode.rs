/// Which panel the player shows. Switching never touches playback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Local,
    YouTube,
}

impl Mode {
    /// Stored/serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::YouTube => "youtube",
        }
    }

    /// Parse a stored name; unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "local" => Some(Self::Local),
            "youtube" => Some(Self::YouTube),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Local => Self::YouTube,
            Self::YouTube => Self::Local,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::YouTube => "YouTube",
        }
    }
}
