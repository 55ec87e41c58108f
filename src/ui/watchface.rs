//! Ring watch face
//!
//! [`Watchface`] owns the settings and the derived frame state. The
//! firmware feeds it events (minute ticks, settings messages, connection
//! and battery changes) one at a time; each handler recomputes only what
//! the event touched and reports which parts of the screen must be redrawn
//! and whether to buzz.

use core::ops::{BitOr, BitOrAssign};

use chrono::NaiveDateTime;
use rand::Rng;

use super::color::Color;
use super::complication::{self, Complication, ComplicationText};
use super::palette::{self, ColorMode};
use super::{FaceGeometry, RenderInput};
use crate::peripherals::{
    activity::ActivitySnapshot, battery::BatteryLevel, bluetooth::Connection, vibration::Haptics,
};
use crate::system::{
    config::{CenterLine, ConfigError, Configuration, ConfigurationStore, RawValue, SettingKey},
    storage::Storage,
    time::{is_palette_rollover, ClockAngles, ClockStyle},
};

/// Rejected entries kept per message
pub const MAX_REJECTED: usize = 8;

/// Live readings taken when an event is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    /// Local wall-clock time
    pub now: NaiveDateTime,
    /// Today's activity totals
    pub activity: ActivitySnapshot,
    /// Platform clock format
    pub clock_style: ClockStyle,
}

/// Set of screen areas to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Surfaces(u8);

impl Surfaces {
    pub const NONE: Self = Self(0);
    /// Minute and hour rings
    pub const RING: Self = Self(1 << 0);
    /// Both text lines
    pub const COMPLICATIONS: Self = Self(1 << 1);
    /// Battery/center line
    pub const CENTER_LINE: Self = Self(1 << 2);
    pub const DISCONNECT_ICON: Self = Self(1 << 3);
    /// Everything, e.g. after a color change
    pub const ALL: Self = Self(0b1111);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Surfaces {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Surfaces {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Side effects requested by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Effects {
    pub redraw: Surfaces,
    /// Pulse the vibration motor once
    pub vibrate: bool,
}

impl Effects {
    const fn redraw(redraw: Surfaces) -> Self {
        Self {
            redraw,
            vibrate: false,
        }
    }

    /// Fire the requested pulse, if any
    pub fn buzz<H: Haptics>(&self, motor: &mut H) {
        if self.vibrate {
            motor.pulse_once();
        }
    }
}

/// Outcome of a settings message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageReport {
    pub effects: Effects,
    /// Entries that were not applied
    pub rejected: heapless::Vec<ConfigError, MAX_REJECTED>,
}

/// Which of the two text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    One,
    Two,
}

/// Settings plus everything derived from them and the live inputs
#[derive(Debug)]
pub struct Watchface<S, R> {
    store: ConfigurationStore<S>,
    rng: R,
    geometry: FaceGeometry,
    background: Color,
    foreground: Color,
    line_one: ComplicationText,
    line_two: ComplicationText,
    angles: ClockAngles,
    battery: BatteryLevel,
    connection: Connection,
}

impl<S: Storage, R: Rng> Watchface<S, R> {
    /// Load settings and compute the first frame
    pub fn new(
        storage: S,
        rng: R,
        inputs: &Inputs,
        battery: BatteryLevel,
        connection: Connection,
    ) -> Self {
        let mut face = Self {
            store: ConfigurationStore::load(storage),
            rng,
            geometry: FaceGeometry::default(),
            background: palette::FALLBACK_COLORS.0,
            foreground: palette::FALLBACK_COLORS.1,
            line_one: ComplicationText::default(),
            line_two: ComplicationText::default(),
            angles: ClockAngles::at(&inputs.now),
            battery,
            connection,
        };
        face.select_colors();
        face.format_line(Line::One, inputs);
        face.format_line(Line::Two, inputs);
        face
    }

    /// Use a face size other than the default
    pub fn with_geometry(mut self, geometry: FaceGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn config(&self) -> &Configuration {
        self.store.config()
    }

    pub fn store(&self) -> &ConfigurationStore<S> {
        &self.store
    }

    pub fn battery(&self) -> BatteryLevel {
        self.battery
    }

    pub fn connection(&self) -> Connection {
        self.connection
    }

    /// Minute boundary: refresh the text lines and rings, and reroll random
    /// colors at the top of the hour.
    pub fn on_tick(&mut self, inputs: &Inputs) -> Effects {
        let mut redraw = Surfaces::RING | Surfaces::COMPLICATIONS;

        self.angles = ClockAngles::at(&inputs.now);
        self.format_line(Line::One, inputs);
        self.format_line(Line::Two, inputs);

        if self.config().color_mode.is_randomized() && is_palette_rollover(&inputs.now) {
            debug!("Hourly palette reroll");
            self.select_colors();
            redraw = Surfaces::ALL;
        }

        Effects::redraw(redraw)
    }

    /// Apply a settings message.
    ///
    /// Entries are handled in order; a rejected entry is reported and
    /// skipped without affecting the others.
    pub fn on_message<'a, I>(&mut self, entries: I, inputs: &Inputs) -> MessageReport
    where
        I: IntoIterator<Item = (&'a str, RawValue<'a>)>,
    {
        let mut report = MessageReport::default();

        for (name, value) in entries {
            let outcome = match SettingKey::from_message_key(name) {
                Some(key) => self.store.update(key, value).map(|()| key),
                None => {
                    warn!("Unknown setting key {}", name);
                    Err(ConfigError::UnknownKey)
                }
            };

            match outcome {
                Ok(key) => report.effects.redraw |= self.refresh_setting(key, inputs),
                Err(err) => {
                    if report.rejected.push(err).is_err() {
                        warn!("Too many rejected entries, dropping {:?}", err);
                    }
                }
            }
        }

        report
    }

    /// Phone connected or disconnected
    pub fn on_connection(&mut self, connection: Connection) -> Effects {
        let dropped = self.connection.drops_to(connection);
        if self.connection != connection {
            info!("Phone connection: {:?}", connection);
        }
        self.connection = connection;

        let vibrate = dropped && self.config().vibrate_on_disconnect;
        if vibrate {
            debug!("Requesting disconnect pulse");
        }

        Effects {
            redraw: Surfaces::DISCONNECT_ICON,
            vibrate,
        }
    }

    /// Battery level changed
    pub fn on_battery(&mut self, battery: BatteryLevel) -> Effects {
        self.battery = battery;
        match self.config().center_line {
            CenterLine::Battery => Effects::redraw(Surfaces::CENTER_LINE),
            CenterLine::Constant | CenterLine::None => Effects::default(),
        }
    }

    /// Everything the renderer needs for the next frame
    pub fn render_input(&self) -> RenderInput {
        let config = self.config();
        RenderInput {
            background: self.background,
            foreground: self.foreground,
            line_one: self.line_one.clone(),
            line_two: self.line_two.clone(),
            angles: self.angles,
            center_line_half_length: self.center_line_half_length(),
            show_disconnect_icon: !self.connection.is_connected() && config.show_disconnect_icon,
            geometry: self.geometry,
        }
    }

    fn center_line_half_length(&self) -> Option<u32> {
        let max = self.geometry.max_center_half_length();
        match self.config().center_line {
            CenterLine::Battery => Some(self.battery.scale(max)),
            CenterLine::Constant => Some(max),
            CenterLine::None => None,
        }
    }

    /// Recompute whatever depends on `key` after it changed
    fn refresh_setting(&mut self, key: SettingKey, inputs: &Inputs) -> Surfaces {
        match key {
            SettingKey::ColorMode => {
                self.select_colors();
                Surfaces::ALL
            }
            SettingKey::BackgroundColor | SettingKey::ForegroundColor => {
                if self.config().color_mode == ColorMode::SelectedColors {
                    self.select_colors();
                    Surfaces::ALL
                } else {
                    Surfaces::NONE
                }
            }
            SettingKey::LineOne => {
                self.format_line(Line::One, inputs);
                Surfaces::COMPLICATIONS
            }
            SettingKey::LineTwo => {
                self.format_line(Line::Two, inputs);
                Surfaces::COMPLICATIONS
            }
            SettingKey::CenterLine => Surfaces::CENTER_LINE,
            SettingKey::VibrateOnDisconnect => Surfaces::NONE,
            SettingKey::ShowDisconnectIcon => Surfaces::DISCONNECT_ICON,
        }
    }

    fn select_colors(&mut self) {
        let config = *self.store.config();
        let (background, foreground) = palette::select(
            config.color_mode,
            config.background_pref,
            config.foreground_pref,
            &mut self.rng,
        );
        debug!("Colors for {:?}: {:?} on {:?}", config.color_mode, foreground, background);
        self.background = background;
        self.foreground = foreground;
    }

    fn format_line(&mut self, line: Line, inputs: &Inputs) {
        let config = self.store.config();
        let (complication, target): (Complication, _) = match line {
            Line::One => (config.line_one, &mut self.line_one),
            Line::Two => (config.line_two, &mut self.line_two),
        };
        *target = complication::format(
            complication,
            &inputs.now,
            &inputs.activity,
            inputs.clock_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::storage::MemoryStorage;
    use crate::ui::palette::{DARK, LIGHT};
    use chrono::NaiveDate;
    use embedded_graphics::pixelcolor::RgbColor;
    use rand::{rngs::SmallRng, SeedableRng};

    fn inputs(hour: u32, minute: u32) -> Inputs {
        Inputs {
            now: NaiveDate::from_ymd_opt(2024, 3, 3)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
            activity: ActivitySnapshot {
                steps: 4321,
                meters: 100,
                calories: 250,
            },
            clock_style: ClockStyle::TwentyFourHour,
        }
    }

    fn face() -> Watchface<MemoryStorage, SmallRng> {
        Watchface::new(
            MemoryStorage::new(),
            SmallRng::seed_from_u64(9),
            &inputs(10, 15),
            BatteryLevel::new(50),
            Connection::Connected,
        )
    }

    #[test]
    fn first_frame_uses_defaults() {
        let frame = face().render_input();
        assert!(DARK.contains(frame.background));
        assert_eq!(frame.foreground, Color::WHITE);
        assert_eq!(frame.line_one.as_str(), "03/3");
        assert_eq!(frame.line_two.as_str(), "4321");
        assert_eq!(frame.angles, ClockAngles { minute: 90, hour: 307 });
        assert_eq!(frame.center_line_half_length, Some(20));
        assert!(!frame.show_disconnect_icon);
    }

    #[test]
    fn tick_refreshes_text_and_rings() {
        let mut face = face();
        let before = face.render_input();

        let mut later = inputs(10, 16);
        later.activity.steps = 5000;
        let effects = face.on_tick(&later);

        assert_eq!(effects.redraw, Surfaces::RING | Surfaces::COMPLICATIONS);
        assert!(!effects.vibrate);
        let frame = face.render_input();
        assert_eq!(frame.line_two.as_str(), "5000");
        assert_eq!(frame.angles.minute, 96);
        assert_eq!(frame.background, before.background);
    }

    #[test]
    fn random_palette_rerolls_on_the_hour() {
        let mut face = face();
        let effects = face.on_tick(&inputs(11, 0));
        assert_eq!(effects.redraw, Surfaces::ALL);
        assert!(DARK.contains(face.render_input().background));
    }

    #[test]
    fn selected_colors_never_reroll() {
        let mut face = face();
        face.on_message(
            [
                ("colorSetting", RawValue::Token("selectedColors")),
                ("backgroundColor", RawValue::Int(0xff0000)),
                ("foregroundColor", RawValue::Int(0x00ff00)),
            ],
            &inputs(10, 15),
        );

        let effects = face.on_tick(&inputs(11, 0));
        assert_eq!(effects.redraw, Surfaces::RING | Surfaces::COMPLICATIONS);
        let frame = face.render_input();
        assert_eq!(frame.background, Color::RED);
        assert_eq!(frame.foreground, Color::GREEN);
    }

    #[test]
    fn light_message_switches_palette_and_persists() {
        let mut face = face();
        let report = face.on_message([("colorSetting", RawValue::Token("light"))], &inputs(10, 15));

        assert!(report.rejected.is_empty());
        assert_eq!(report.effects.redraw, Surfaces::ALL);
        assert_eq!(face.config().color_mode, ColorMode::Light);
        assert_eq!(
            Configuration::load(face.store().storage()).color_mode,
            ColorMode::Light
        );

        let frame = face.render_input();
        assert!(LIGHT.contains(frame.background));
        assert_eq!(frame.foreground, Color::BLACK);
    }

    #[test]
    fn bad_entry_does_not_stop_the_rest() {
        let mut face = face();
        let report = face.on_message(
            [
                ("topLineSetting", RawValue::Token("moonPhase")),
                ("showDate", RawValue::Int(1)),
                ("bottomLineSetting", RawValue::Token("calories")),
            ],
            &inputs(10, 15),
        );

        assert_eq!(
            report.rejected.as_slice(),
            &[
                ConfigError::InvalidEnumToken(SettingKey::LineOne),
                ConfigError::UnknownKey
            ]
        );
        assert_eq!(report.effects.redraw, Surfaces::COMPLICATIONS);
        let frame = face.render_input();
        assert_eq!(frame.line_one.as_str(), "03/3");
        assert_eq!(frame.line_two.as_str(), "250");
    }

    #[test]
    fn color_preferences_under_palette_mode_only_persist() {
        let mut face = face();
        let before = face.render_input();
        let report = face.on_message([("backgroundColor", RawValue::Int(0x00ff00))], &inputs(10, 15));

        assert_eq!(report.effects.redraw, Surfaces::NONE);
        assert_eq!(face.config().background_pref, Color::GREEN);
        assert_eq!(face.render_input().background, before.background);
    }

    #[test]
    fn settings_redraw_only_their_surface() {
        fn redraw(
            face: &mut Watchface<MemoryStorage, SmallRng>,
            name: &str,
            value: RawValue<'_>,
        ) -> Surfaces {
            face.on_message([(name, value)], &inputs(10, 15)).effects.redraw
        }

        let mut face = face();

        assert_eq!(
            redraw(&mut face, "centerLineSetting", RawValue::Token("constant")),
            Surfaces::CENTER_LINE
        );
        assert_eq!(
            redraw(&mut face, "bluetoothIcon", RawValue::Int(0)),
            Surfaces::DISCONNECT_ICON
        );
        assert_eq!(
            redraw(&mut face, "bluetoothVibes", RawValue::Int(0)),
            Surfaces::NONE
        );
        assert_eq!(
            redraw(&mut face, "topLineSetting", RawValue::Token("digitalTime")),
            Surfaces::COMPLICATIONS
        );
        assert_eq!(face.render_input().line_one.as_str(), "10:15");
    }

    #[test]
    fn disconnect_vibrates_once_and_shows_icon() {
        let mut face = face();

        let effects = face.on_connection(Connection::Disconnected);
        assert!(effects.vibrate);
        assert_eq!(effects.redraw, Surfaces::DISCONNECT_ICON);
        assert!(face.render_input().show_disconnect_icon);

        // already disconnected
        assert!(!face.on_connection(Connection::Disconnected).vibrate);

        let effects = face.on_connection(Connection::Connected);
        assert!(!effects.vibrate);
        assert_eq!(effects.redraw, Surfaces::DISCONNECT_ICON);
        assert!(!face.render_input().show_disconnect_icon);
    }

    #[test]
    fn disconnect_respects_settings() {
        let mut face = face();
        face.on_message(
            [
                ("bluetoothVibes", RawValue::Int(0)),
                ("bluetoothIcon", RawValue::Int(0)),
            ],
            &inputs(10, 15),
        );

        let effects = face.on_connection(Connection::Disconnected);
        assert!(!effects.vibrate);
        assert_eq!(effects.redraw, Surfaces::DISCONNECT_ICON);
        assert!(!face.render_input().show_disconnect_icon);
    }

    #[test]
    fn battery_changes_move_the_center_line() {
        let mut face = face();

        let effects = face.on_battery(BatteryLevel::new(25));
        assert_eq!(effects.redraw, Surfaces::CENTER_LINE);
        assert_eq!(face.render_input().center_line_half_length, Some(10));

        face.on_message([("centerLineSetting", RawValue::Token("constant"))], &inputs(10, 15));
        assert!(face.on_battery(BatteryLevel::new(80)).redraw.is_empty());
        assert_eq!(face.render_input().center_line_half_length, Some(40));
        assert_eq!(face.battery().percent(), 80);

        face.on_message([("centerLineSetting", RawValue::Token("none"))], &inputs(10, 15));
        assert_eq!(face.render_input().center_line_half_length, None);
    }

    #[test]
    fn geometry_scales_center_line() {
        let face = face().with_geometry(FaceGeometry { width: 144 });
        assert_eq!(face.render_input().center_line_half_length, Some(12));
    }

    #[derive(Default)]
    struct Motor {
        pulses: u32,
    }

    impl Haptics for Motor {
        fn pulse_once(&mut self) {
            self.pulses += 1;
        }
    }

    #[test]
    fn effects_drive_the_motor() {
        let mut motor = Motor::default();
        let mut face = face();

        face.on_battery(BatteryLevel::new(10)).buzz(&mut motor);
        assert_eq!(motor.pulses, 0);

        face.on_connection(Connection::Disconnected).buzz(&mut motor);
        assert_eq!(motor.pulses, 1);
    }

    #[test]
    fn surfaces_combine() {
        let surfaces = Surfaces::RING | Surfaces::CENTER_LINE;
        assert!(surfaces.contains(Surfaces::RING));
        assert!(!surfaces.contains(Surfaces::COMPLICATIONS));
        assert!(Surfaces::ALL.contains(surfaces));
        assert!(Surfaces::NONE.is_empty());
    }
}
