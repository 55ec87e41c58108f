use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::pixelcolor::RgbColor;
use rand::{rngs::SmallRng, SeedableRng};

use theta_watchface::{
    ui::{complication::Complication, palette::LIGHT},
    ActivitySnapshot, BatteryLevel, ClockAngles, ClockStyle, Color, ConfigError, Configuration,
    Connection, Inputs, MemoryStorage, RawValue, SettingKey, Surfaces, Watchface,
};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn inputs(now: NaiveDateTime, steps: u32) -> Inputs {
    Inputs {
        now,
        activity: ActivitySnapshot {
            steps,
            meters: 1234,
            calories: 321,
        },
        clock_style: ClockStyle::TwelveHour,
    }
}

#[test]
fn settings_survive_a_restart() {
    let mut storage = MemoryStorage::new();
    let boot = inputs(at(9, 30), 800);

    {
        let mut face = Watchface::new(
            &mut storage,
            SmallRng::seed_from_u64(1),
            &boot,
            BatteryLevel::FULL,
            Connection::Connected,
        );
        let report = face.on_message(
            [
                ("colorSetting", RawValue::Token("light")),
                ("topLineSetting", RawValue::Token("digitalTime")),
                ("bottomLineSetting", RawValue::Token("feet")),
                ("centerLineSetting", RawValue::Token("sideways")),
            ],
            &boot,
        );
        assert_eq!(
            report.rejected.as_slice(),
            &[ConfigError::InvalidEnumToken(SettingKey::CenterLine)]
        );
        assert_eq!(report.effects.redraw, Surfaces::ALL);
    }

    let config = Configuration::load(&storage);
    assert_eq!(config.line_one, Complication::DigitalTime);
    assert_eq!(config.line_two, Complication::Feet);

    let face = Watchface::new(
        storage,
        SmallRng::seed_from_u64(2),
        &inputs(at(21, 5), 800),
        BatteryLevel::new(60),
        Connection::Connected,
    );
    let frame = face.render_input();
    assert!(LIGHT.contains(frame.background));
    assert_eq!(frame.foreground, Color::BLACK);
    assert_eq!(frame.line_one.as_str(), "9:05");
    assert_eq!(frame.line_two.as_str(), "4048");
    assert_eq!(frame.angles, ClockAngles { minute: 30, hour: 272 });
    assert_eq!(frame.center_line_half_length, Some(24));
}

#[test]
fn a_day_of_events() {
    let mut face = Watchface::new(
        MemoryStorage::new(),
        SmallRng::seed_from_u64(77),
        &inputs(at(7, 58), 0),
        BatteryLevel::new(90),
        Connection::Connected,
    );

    assert_eq!(
        face.on_tick(&inputs(at(7, 59), 12)).redraw,
        Surfaces::RING | Surfaces::COMPLICATIONS
    );
    assert_eq!(face.on_tick(&inputs(at(8, 0), 40)).redraw, Surfaces::ALL);
    assert_eq!(face.render_input().line_two.as_str(), "40");

    let lost = face.on_connection(Connection::Disconnected);
    assert!(lost.vibrate);
    assert!(face.render_input().show_disconnect_icon);

    assert_eq!(face.on_battery(BatteryLevel::new(30)).redraw, Surfaces::CENTER_LINE);
    assert_eq!(face.render_input().center_line_half_length, Some(12));
}
