use ratatui::style::Color;

pub const FALLBACK_COLOR: Color = Color::Rgb(0xCC, 0xCC, 0xCC);

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    target_fps: 60,
    poll_ms: 1,
};

pub const SPIN_SETTINGS: SpinSettings = SpinSettings {
    duration_ms: 5000,
    extra_rotations: 7,
    pointer_angle: 270.0,
};

pub const DISTRIBUTION_SETTINGS: DistributionSettings = DistributionSettings {
    percent_tolerance: 0.001,
};

pub const BRAILLE: BrailleSettings = BrailleSettings {
    base: 0x2800,
    dot_height: 4,
    dot_width: 2,
};

pub const WHEEL_STYLE: WheelStyle = WheelStyle {
    hub_ratio: 0.1,
    hub_color: Color::Rgb(0x2A, 0x2A, 0x40),
    empty_color: Color::Gray,
    pointer_color: Color::Rgb(0xFF, 0xD7, 0x00),
    pointer_glyph: "▼",
};

pub const DEFAULT_RANKS: &[RankPreset] = &[
    RankPreset {
        key: "E",
        name: "E-Rank",
        weight: 35.0,
        color: "#A9A9A9",
    },
    RankPreset {
        key: "D",
        name: "D-Rank",
        weight: 30.0,
        color: "#6BCB77",
    },
    RankPreset {
        key: "C",
        name: "C-Rank",
        weight: 20.0,
        color: "#5DADE2",
    },
    RankPreset {
        key: "B",
        name: "B-Rank",
        weight: 10.0,
        color: "#AF7AC5",
    },
    RankPreset {
        key: "A",
        name: "A-Rank",
        weight: 3.0,
        color: "#F1C40F",
    },
    RankPreset {
        key: "S",
        name: "S-Rank",
        weight: 1.5,
        color: "#E74C3C",
    },
    RankPreset {
        key: "NATIONAL",
        name: "National Level",
        weight: 0.5,
        color: "#E67E22",
    },
];

pub const FILE_NAMES: FileNames = FileNames {
    categories: "categories.csv",
    log: "rankwheel.log",
};

pub const TABLE_BACKUPS: BackupPolicy = BackupPolicy {
    dir_name: "backups",
    keep: 10,
    stamp_format: "%Y%m%d_%H%M%S%3f",
};

pub struct TimeSettings {
    pub target_fps: u64,
    pub poll_ms: u64,
}

pub struct SpinSettings {
    pub duration_ms: u64,
    pub extra_rotations: u32,
    /// Degrees, 0 at 3 o'clock, clockwise.
    pub pointer_angle: f64,
}

pub struct DistributionSettings {
    pub percent_tolerance: f64,
}

pub struct BrailleSettings {
    pub base: u32,
    pub dot_height: usize,
    pub dot_width: usize,
}

pub struct WheelStyle {
    pub hub_ratio: f64,
    pub hub_color: Color,
    pub empty_color: Color,
    pub pointer_color: Color,
    pub pointer_glyph: &'static str,
}

pub struct RankPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub color: &'static str,
}

pub struct FileNames {
    pub categories: &'static str,
    pub log: &'static str,
}

/// Replaced category tables are copied to `<dir_name>/<stem>-<stamp>.csv`
/// next to the table; only the newest `keep` copies survive.
pub struct BackupPolicy {
    pub dir_name: &'static str,
    pub keep: usize,
    pub stamp_format: &'static str,
}
