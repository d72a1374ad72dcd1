use std::fs;

use crate::renderer::{GlyphSet, GLYPHS_ASCII, GLYPHS_UNICODE};

/// Runtime platform capabilities relevant to drawing the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Platform {
    is_wsl: bool,
}

impl Platform {
    /// Detects platform details from the current runtime environment.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            is_wsl: detect_wsl(),
        }
    }

    /// Block glyphs render unevenly in WSL consoles, so fall back to ASCII there.
    #[must_use]
    pub fn glyphs(self, force_ascii: bool) -> GlyphSet {
        if force_ascii || self.is_wsl {
            GLYPHS_ASCII
        } else {
            GLYPHS_UNICODE
        }
    }
}

fn detect_wsl() -> bool {
    let Ok(version) = fs::read_to_string("/proc/version") else {
        return false;
    };

    version.to_ascii_lowercase().contains("microsoft")
}
