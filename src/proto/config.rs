//! Configuration decoding.
//!
//! Wire configurations carry one enumerated field per selection axis; the
//! descriptor packs several axes into shared bytes. Numeric fields wider
//! than their descriptor cell are narrowed without checks, matching the
//! format this was built against.

use crate::config::ConfigDescriptor;
use crate::err::{DecodeError, DecodeResult};
use crate::locale::Locale;
use crate::proto::wire;

fn set_masked(cell: &mut u8, mask: u8, bits: u8) {
    *cell = (*cell & !mask) | bits;
}

/// Decodes a wire configuration into a packed descriptor.
///
/// An unrecognized selection on any axis leaves that axis unspecified. The
/// only fatal condition is a locale tag the locale parser rejects.
pub fn decode_config(pb: &wire::Configuration) -> DecodeResult<ConfigDescriptor> {
    let mut config = ConfigDescriptor {
        mcc: pb.mcc as u16,
        mnc: pb.mnc as u16,
        smallest_screen_width_dp: pb.smallest_screen_width_dp as u16,
        screen_width_dp: pb.screen_width_dp as u16,
        screen_height_dp: pb.screen_height_dp as u16,
        density: pb.density as u16,
        screen_width: pb.screen_width as u16,
        screen_height: pb.screen_height as u16,
        sdk_version: pb.sdk_version as u16,
        ..ConfigDescriptor::default()
    };

    if !pb.locale.is_empty() {
        let locale = Locale::parse(&pb.locale).ok_or_else(|| DecodeError::InvalidLocale {
            tag: pb.locale.clone(),
        })?;
        config.language = locale.pack_language();
        config.country = locale.pack_region();
        if locale.script[0] != 0 {
            config.locale_script = locale.script;
        }
        if locale.variant[0] != 0 {
            config.locale_variant = locale.variant;
        }
    }

    // 1 = ltr, 2 = rtl.
    match pb.layout_direction {
        1 => set_masked(
            &mut config.screen_layout,
            ConfigDescriptor::MASK_LAYOUTDIR,
            ConfigDescriptor::LAYOUTDIR_LTR,
        ),
        2 => set_masked(
            &mut config.screen_layout,
            ConfigDescriptor::MASK_LAYOUTDIR,
            ConfigDescriptor::LAYOUTDIR_RTL,
        ),
        _ => {}
    }

    // 1 = small, 2 = normal, 3 = large, 4 = xlarge.
    let size = match pb.screen_layout_size {
        1 => Some(ConfigDescriptor::SCREENSIZE_SMALL),
        2 => Some(ConfigDescriptor::SCREENSIZE_NORMAL),
        3 => Some(ConfigDescriptor::SCREENSIZE_LARGE),
        4 => Some(ConfigDescriptor::SCREENSIZE_XLARGE),
        _ => None,
    };
    if let Some(size) = size {
        set_masked(&mut config.screen_layout, ConfigDescriptor::MASK_SCREENSIZE, size);
    }

    // 1 = long, 2 = notlong.
    match pb.screen_layout_long {
        1 => set_masked(
            &mut config.screen_layout,
            ConfigDescriptor::MASK_SCREENLONG,
            ConfigDescriptor::SCREENLONG_YES,
        ),
        2 => set_masked(
            &mut config.screen_layout,
            ConfigDescriptor::MASK_SCREENLONG,
            ConfigDescriptor::SCREENLONG_NO,
        ),
        _ => {}
    }

    // 1 = round, 2 = notround.
    match pb.screen_round {
        1 => set_masked(
            &mut config.screen_layout2,
            ConfigDescriptor::MASK_SCREENROUND,
            ConfigDescriptor::SCREENROUND_YES,
        ),
        2 => set_masked(
            &mut config.screen_layout2,
            ConfigDescriptor::MASK_SCREENROUND,
            ConfigDescriptor::SCREENROUND_NO,
        ),
        _ => {}
    }

    // 1 = widecg, 2 = nowidecg.
    match pb.wide_color_gamut {
        1 => set_masked(
            &mut config.color_mode,
            ConfigDescriptor::MASK_WIDE_COLOR_GAMUT,
            ConfigDescriptor::WIDE_COLOR_GAMUT_YES,
        ),
        2 => set_masked(
            &mut config.color_mode,
            ConfigDescriptor::MASK_WIDE_COLOR_GAMUT,
            ConfigDescriptor::WIDE_COLOR_GAMUT_NO,
        ),
        _ => {}
    }

    // 1 = highdr, 2 = lowdr.
    match pb.hdr {
        1 => set_masked(
            &mut config.color_mode,
            ConfigDescriptor::MASK_HDR,
            ConfigDescriptor::HDR_YES,
        ),
        2 => set_masked(
            &mut config.color_mode,
            ConfigDescriptor::MASK_HDR,
            ConfigDescriptor::HDR_NO,
        ),
        _ => {}
    }

    // 1 = port, 2 = land, 3 = square.
    match pb.orientation {
        1 => config.orientation = ConfigDescriptor::ORIENTATION_PORT,
        2 => config.orientation = ConfigDescriptor::ORIENTATION_LAND,
        3 => config.orientation = ConfigDescriptor::ORIENTATION_SQUARE,
        _ => {}
    }

    // 1 = normal, 2 = desk, 3 = car, 4 = television, 5 = appliance,
    // 6 = watch, 7 = vrheadset.
    let ui_mode_type = match pb.ui_mode_type {
        1 => Some(ConfigDescriptor::UI_MODE_TYPE_NORMAL),
        2 => Some(ConfigDescriptor::UI_MODE_TYPE_DESK),
        3 => Some(ConfigDescriptor::UI_MODE_TYPE_CAR),
        4 => Some(ConfigDescriptor::UI_MODE_TYPE_TELEVISION),
        5 => Some(ConfigDescriptor::UI_MODE_TYPE_APPLIANCE),
        6 => Some(ConfigDescriptor::UI_MODE_TYPE_WATCH),
        7 => Some(ConfigDescriptor::UI_MODE_TYPE_VR_HEADSET),
        _ => None,
    };
    if let Some(ui_mode_type) = ui_mode_type {
        set_masked(&mut config.ui_mode, ConfigDescriptor::MASK_UI_MODE_TYPE, ui_mode_type);
    }

    // 1 = night, 2 = notnight.
    match pb.ui_mode_night {
        1 => set_masked(
            &mut config.ui_mode,
            ConfigDescriptor::MASK_UI_MODE_NIGHT,
            ConfigDescriptor::UI_MODE_NIGHT_YES,
        ),
        2 => set_masked(
            &mut config.ui_mode,
            ConfigDescriptor::MASK_UI_MODE_NIGHT,
            ConfigDescriptor::UI_MODE_NIGHT_NO,
        ),
        _ => {}
    }

    // 1 = notouch, 2 = stylus, 3 = finger.
    match pb.touchscreen {
        1 => config.touchscreen = ConfigDescriptor::TOUCHSCREEN_NOTOUCH,
        2 => config.touchscreen = ConfigDescriptor::TOUCHSCREEN_STYLUS,
        3 => config.touchscreen = ConfigDescriptor::TOUCHSCREEN_FINGER,
        _ => {}
    }

    // 1 = keysexposed, 2 = keyshidden, 3 = keyssoft.
    let keys_hidden = match pb.keys_hidden {
        1 => Some(ConfigDescriptor::KEYSHIDDEN_NO),
        2 => Some(ConfigDescriptor::KEYSHIDDEN_YES),
        3 => Some(ConfigDescriptor::KEYSHIDDEN_SOFT),
        _ => None,
    };
    if let Some(keys_hidden) = keys_hidden {
        set_masked(&mut config.input_flags, ConfigDescriptor::MASK_KEYSHIDDEN, keys_hidden);
    }

    // 1 = nokeys, 2 = qwerty, 3 = twelvekey.
    match pb.keyboard {
        1 => config.keyboard = ConfigDescriptor::KEYBOARD_NOKEYS,
        2 => config.keyboard = ConfigDescriptor::KEYBOARD_QWERTY,
        3 => config.keyboard = ConfigDescriptor::KEYBOARD_TWELVEKEY,
        _ => {}
    }

    // 1 = navexposed, 2 = navhidden.
    match pb.nav_hidden {
        1 => set_masked(
            &mut config.input_flags,
            ConfigDescriptor::MASK_NAVHIDDEN,
            ConfigDescriptor::NAVHIDDEN_NO,
        ),
        2 => set_masked(
            &mut config.input_flags,
            ConfigDescriptor::MASK_NAVHIDDEN,
            ConfigDescriptor::NAVHIDDEN_YES,
        ),
        _ => {}
    }

    // 1 = nonav, 2 = dpad, 3 = trackball, 4 = wheel.
    match pb.navigation {
        1 => config.navigation = ConfigDescriptor::NAVIGATION_NONAV,
        2 => config.navigation = ConfigDescriptor::NAVIGATION_DPAD,
        3 => config.navigation = ConfigDescriptor::NAVIGATION_TRACKBALL,
        4 => config.navigation = ConfigDescriptor::NAVIGATION_WHEEL,
        _ => {}
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_wire_config_is_the_default_descriptor() {
        let config = decode_config(&wire::Configuration::default()).unwrap();
        assert!(config.is_default());
    }

    #[test]
    fn wide_numeric_fields_are_silently_narrowed() {
        let pb = wire::Configuration {
            mcc: 0x1_0000 + 310,
            density: 0x2_0000 + 480,
            sdk_version: 0x1_0000 + 29,
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(config.mcc, 310);
        assert_eq!(config.density, 480);
        assert_eq!(config.sdk_version, 29);
    }

    #[test]
    fn locale_fills_the_packed_cells() {
        let pb = wire::Configuration {
            locale: "en-US".to_owned(),
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(config.language, [b'e', b'n']);
        assert_eq!(config.country, [b'U', b'S']);
        assert_eq!(config.locale_script, [0; 4]);

        let pb = wire::Configuration {
            locale: "sr-Latn-RS".to_owned(),
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(config.locale_script, *b"Latn");
    }

    #[test]
    fn malformed_locale_is_fatal() {
        let pb = wire::Configuration {
            locale: "not-a-locale".to_owned(),
            ..wire::Configuration::default()
        };
        let err = decode_config(&pb).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLocale { ref tag } if tag == "not-a-locale"));
    }

    #[test]
    fn axes_sharing_a_byte_compose() {
        let pb = wire::Configuration {
            layout_direction: 2,
            screen_layout_size: 4,
            screen_layout_long: 1,
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(
            config.screen_layout,
            ConfigDescriptor::LAYOUTDIR_RTL
                | ConfigDescriptor::SCREENSIZE_XLARGE
                | ConfigDescriptor::SCREENLONG_YES
        );
    }

    #[test]
    fn ui_mode_axes_compose() {
        let pb = wire::Configuration {
            ui_mode_type: 4,
            ui_mode_night: 1,
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(
            config.ui_mode,
            ConfigDescriptor::UI_MODE_TYPE_TELEVISION | ConfigDescriptor::UI_MODE_NIGHT_YES
        );
    }

    #[test]
    fn unmatched_classifier_leaves_the_axis_unspecified() {
        let pb = wire::Configuration {
            orientation: 99,
            screen_round: 17,
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(config.orientation, 0);
        assert_eq!(config.screen_layout2, 0);
    }

    #[test]
    fn whole_byte_axes_assign_directly() {
        let pb = wire::Configuration {
            orientation: 2,
            touchscreen: 3,
            keyboard: 2,
            navigation: 4,
            keys_hidden: 3,
            nav_hidden: 2,
            ..wire::Configuration::default()
        };
        let config = decode_config(&pb).unwrap();
        assert_eq!(config.orientation, ConfigDescriptor::ORIENTATION_LAND);
        assert_eq!(config.touchscreen, ConfigDescriptor::TOUCHSCREEN_FINGER);
        assert_eq!(config.keyboard, ConfigDescriptor::KEYBOARD_QWERTY);
        assert_eq!(config.navigation, ConfigDescriptor::NAVIGATION_WHEEL);
        assert_eq!(
            config.input_flags,
            ConfigDescriptor::KEYSHIDDEN_SOFT | ConfigDescriptor::NAVHIDDEN_YES
        );
    }
}
