//! Watch face settings
//!
//! Settings arrive from the phone as key/value pairs, are validated one
//! field at a time and written through to persistent storage. Loading
//! never fails: every field that is missing or unreadable falls back to
//! its default on its own.

use core::fmt;

use embedded_graphics::pixelcolor::RgbColor;

use super::storage::Storage;
use crate::ui::color::Color;
use crate::ui::complication::Complication;
use crate::ui::palette::ColorMode;

/// What the line across the center shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CenterLine {
    /// Length follows the battery level
    #[default]
    Battery,
    /// Always full length
    Constant,
    /// Hidden
    None,
}

impl CenterLine {
    pub const ALL: [CenterLine; 3] = [CenterLine::Battery, CenterLine::Constant, CenterLine::None];

    /// Stable numeric code used for persistence
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Token used in configuration messages
    pub const fn token(self) -> &'static str {
        match self {
            CenterLine::Battery => "battery",
            CenterLine::Constant => "constant",
            CenterLine::None => "none",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.token() == token)
    }
}

/// Identifies one setting, both in messages and in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    ColorMode,
    BackgroundColor,
    ForegroundColor,
    LineOne,
    LineTwo,
    CenterLine,
    VibrateOnDisconnect,
    ShowDisconnectIcon,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::ColorMode,
        SettingKey::BackgroundColor,
        SettingKey::ForegroundColor,
        SettingKey::LineOne,
        SettingKey::LineTwo,
        SettingKey::CenterLine,
        SettingKey::VibrateOnDisconnect,
        SettingKey::ShowDisconnectIcon,
    ];

    /// Key used in configuration messages
    pub const fn message_key(self) -> &'static str {
        match self {
            SettingKey::ColorMode => "colorSetting",
            SettingKey::BackgroundColor => "backgroundColor",
            SettingKey::ForegroundColor => "foregroundColor",
            SettingKey::LineOne => "topLineSetting",
            SettingKey::LineTwo => "bottomLineSetting",
            SettingKey::CenterLine => "centerLineSetting",
            SettingKey::VibrateOnDisconnect => "bluetoothVibes",
            SettingKey::ShowDisconnectIcon => "bluetoothIcon",
        }
    }

    pub fn from_message_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.message_key() == key)
    }

    /// Key under which the setting is persisted. Never renumber these.
    pub const fn storage_key(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key())
    }
}

/// Value as delivered by the configuration transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawValue<'a> {
    /// String token, used by enum settings
    Token(&'a str),
    /// Integer, used by colors (`0xRRGGBB`) and toggles (0/1)
    Int(i32),
}

/// Rejected setting update
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("unrecognized token for {0}")]
    InvalidEnumToken(SettingKey),
    #[error("value of the wrong kind for {0}")]
    InvalidValue(SettingKey),
    #[error("unknown setting key")]
    UnknownKey,
    #[error("failed to persist {0}")]
    Storage(SettingKey),
}

/// A validated value for one setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    ColorMode(ColorMode),
    BackgroundColor(Color),
    ForegroundColor(Color),
    LineOne(Complication),
    LineTwo(Complication),
    CenterLine(CenterLine),
    VibrateOnDisconnect(bool),
    ShowDisconnectIcon(bool),
}

impl Setting {
    pub const fn key(&self) -> SettingKey {
        match self {
            Setting::ColorMode(_) => SettingKey::ColorMode,
            Setting::BackgroundColor(_) => SettingKey::BackgroundColor,
            Setting::ForegroundColor(_) => SettingKey::ForegroundColor,
            Setting::LineOne(_) => SettingKey::LineOne,
            Setting::LineTwo(_) => SettingKey::LineTwo,
            Setting::CenterLine(_) => SettingKey::CenterLine,
            Setting::VibrateOnDisconnect(_) => SettingKey::VibrateOnDisconnect,
            Setting::ShowDisconnectIcon(_) => SettingKey::ShowDisconnectIcon,
        }
    }

    /// Validate a value received for `key`
    pub fn parse(key: SettingKey, value: RawValue<'_>) -> Result<Self, ConfigError> {
        match (key, value) {
            (SettingKey::ColorMode, RawValue::Token(token)) => ColorMode::from_token(token)
                .map(Setting::ColorMode)
                .ok_or(ConfigError::InvalidEnumToken(key)),
            (SettingKey::LineOne, RawValue::Token(token)) => Complication::from_token(token)
                .map(Setting::LineOne)
                .ok_or(ConfigError::InvalidEnumToken(key)),
            (SettingKey::LineTwo, RawValue::Token(token)) => Complication::from_token(token)
                .map(Setting::LineTwo)
                .ok_or(ConfigError::InvalidEnumToken(key)),
            (SettingKey::CenterLine, RawValue::Token(token)) => CenterLine::from_token(token)
                .map(Setting::CenterLine)
                .ok_or(ConfigError::InvalidEnumToken(key)),
            (SettingKey::BackgroundColor, RawValue::Int(hex)) => {
                Ok(Setting::BackgroundColor(Color::from_hex(hex as u32)))
            }
            (SettingKey::ForegroundColor, RawValue::Int(hex)) => {
                Ok(Setting::ForegroundColor(Color::from_hex(hex as u32)))
            }
            (SettingKey::VibrateOnDisconnect, RawValue::Int(flag)) => parse_flag(flag)
                .map(Setting::VibrateOnDisconnect)
                .ok_or(ConfigError::InvalidValue(key)),
            (SettingKey::ShowDisconnectIcon, RawValue::Int(flag)) => parse_flag(flag)
                .map(Setting::ShowDisconnectIcon)
                .ok_or(ConfigError::InvalidValue(key)),
            _ => Err(ConfigError::InvalidValue(key)),
        }
    }

    /// Decode a persisted value, `None` if it does not fit the key
    pub fn decode(key: SettingKey, stored: i32) -> Option<Self> {
        let code = u8::try_from(stored).ok();
        match key {
            SettingKey::ColorMode => code.and_then(ColorMode::from_code).map(Setting::ColorMode),
            SettingKey::BackgroundColor => {
                Some(Setting::BackgroundColor(Color::from_hex(stored as u32)))
            }
            SettingKey::ForegroundColor => {
                Some(Setting::ForegroundColor(Color::from_hex(stored as u32)))
            }
            SettingKey::LineOne => code.and_then(Complication::from_code).map(Setting::LineOne),
            SettingKey::LineTwo => code.and_then(Complication::from_code).map(Setting::LineTwo),
            SettingKey::CenterLine => code.and_then(CenterLine::from_code).map(Setting::CenterLine),
            SettingKey::VibrateOnDisconnect => {
                parse_flag(stored).map(Setting::VibrateOnDisconnect)
            }
            SettingKey::ShowDisconnectIcon => parse_flag(stored).map(Setting::ShowDisconnectIcon),
        }
    }

    /// Value written to persistent storage
    pub const fn encode(&self) -> i32 {
        match *self {
            Setting::ColorMode(mode) => mode.code() as i32,
            Setting::BackgroundColor(color) | Setting::ForegroundColor(color) => {
                color.to_hex() as i32
            }
            Setting::LineOne(line) | Setting::LineTwo(line) => line.code() as i32,
            Setting::CenterLine(line) => line.code() as i32,
            Setting::VibrateOnDisconnect(flag) | Setting::ShowDisconnectIcon(flag) => flag as i32,
        }
    }
}

fn parse_flag(value: i32) -> Option<bool> {
    match value {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Complete set of user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub color_mode: ColorMode,
    /// Background in [`ColorMode::SelectedColors`]
    pub background_pref: Color,
    /// Foreground in [`ColorMode::SelectedColors`]
    pub foreground_pref: Color,
    /// Upper text line
    pub line_one: Complication,
    /// Lower text line
    pub line_two: Complication,
    pub center_line: CenterLine,
    /// Buzz when the phone disconnects
    pub vibrate_on_disconnect: bool,
    /// Draw an icon while the phone is disconnected
    pub show_disconnect_icon: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Dark,
            background_pref: Color::BLUE,
            foreground_pref: Color::WHITE,
            line_one: Complication::MonthDate,
            line_two: Complication::Steps,
            center_line: CenterLine::Battery,
            vibrate_on_disconnect: true,
            show_disconnect_icon: true,
        }
    }
}

impl Configuration {
    /// Read every setting from `storage`, defaulting each one that is
    /// absent or unreadable.
    pub fn load<S: Storage>(storage: &S) -> Self {
        let mut config = Self::default();
        for key in SettingKey::ALL {
            let Some(stored) = storage.read(key.storage_key()) else {
                continue;
            };
            match Setting::decode(key, stored) {
                Some(setting) => config.apply(setting),
                None => warn!("Ignoring unreadable stored {:?}: {}", key, stored),
            }
        }
        config
    }

    /// Current value of one setting
    pub const fn get(&self, key: SettingKey) -> Setting {
        match key {
            SettingKey::ColorMode => Setting::ColorMode(self.color_mode),
            SettingKey::BackgroundColor => Setting::BackgroundColor(self.background_pref),
            SettingKey::ForegroundColor => Setting::ForegroundColor(self.foreground_pref),
            SettingKey::LineOne => Setting::LineOne(self.line_one),
            SettingKey::LineTwo => Setting::LineTwo(self.line_two),
            SettingKey::CenterLine => Setting::CenterLine(self.center_line),
            SettingKey::VibrateOnDisconnect => {
                Setting::VibrateOnDisconnect(self.vibrate_on_disconnect)
            }
            SettingKey::ShowDisconnectIcon => {
                Setting::ShowDisconnectIcon(self.show_disconnect_icon)
            }
        }
    }

    fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::ColorMode(mode) => self.color_mode = mode,
            Setting::BackgroundColor(color) => self.background_pref = color,
            Setting::ForegroundColor(color) => self.foreground_pref = color,
            Setting::LineOne(line) => self.line_one = line,
            Setting::LineTwo(line) => self.line_two = line,
            Setting::CenterLine(line) => self.center_line = line,
            Setting::VibrateOnDisconnect(flag) => self.vibrate_on_disconnect = flag,
            Setting::ShowDisconnectIcon(flag) => self.show_disconnect_icon = flag,
        }
    }
}

/// Settings together with the storage they are persisted in
#[derive(Debug)]
pub struct ConfigurationStore<S> {
    config: Configuration,
    storage: S,
}

impl<S: Storage> ConfigurationStore<S> {
    /// Load settings from `storage`
    pub fn load(storage: S) -> Self {
        let config = Configuration::load(&storage);
        info!("Settings loaded: {:?}", config);
        Self { config, storage }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, dropping the in-memory copy
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Validate `value` for `key`, then persist and apply it.
    ///
    /// On error the setting keeps its previous value both in memory and
    /// in storage.
    pub fn update(&mut self, key: SettingKey, value: RawValue<'_>) -> Result<(), ConfigError> {
        let setting = Setting::parse(key, value).inspect_err(|err| {
            warn!("Rejected {:?} update: {:?}", key, err);
        })?;
        self.set(setting)
    }

    /// Persist and apply an already validated setting
    pub fn set(&mut self, setting: Setting) -> Result<(), ConfigError> {
        let key = setting.key();
        if let Err(err) = self.storage.write(key.storage_key(), setting.encode()) {
            error!("Could not persist {:?}: {:?}", key, err);
            return Err(ConfigError::Storage(key));
        }
        self.config.apply(setting);
        info!("Setting updated: {:?}", setting);
        Ok(())
    }
}
