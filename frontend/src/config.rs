//! Optional user configuration, read from
//! `<config-dir>/dotmatrix/config.toml`. A missing or malformed file
//! falls back to defaults.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Integer window scale factor.
    pub scale: u32,

    /// Four display shades as "#RRGGBB", lightest first.
    pub shades: [String; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 3,
            shades: [
                "#e0f8d0".into(),
                "#88c070".into(),
                "#346856".into(),
                "#081820".into(),
            ],
        }
    }
}

impl Config {
    /// Parsed shade values; an entry that fails to parse keeps its
    /// default.
    pub fn parsed_shades(&self) -> [(u8, u8, u8); 4] {
        let mut out = [
            (0xE0, 0xF8, 0xD0),
            (0x88, 0xC0, 0x70),
            (0x34, 0x68, 0x56),
            (0x08, 0x18, 0x20),
        ];
        for (slot, hex) in out.iter_mut().zip(&self.shades) {
            if let Some(rgb) = parse_hex_color(hex) {
                *slot = rgb;
            }
        }
        out
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#')?;
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some((r, g, b))
}

pub fn load() -> Config {
    let Some(dir) = dirs::config_dir() else {
        return Config::default();
    };
    let path = dir.join("dotmatrix").join("config.toml");
    match std::fs::read_to_string(&path) {
        Ok(text) => match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring malformed {}: {e}", path.display());
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}
