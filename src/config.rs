//! Packed device-configuration descriptor.
//!
//! Field layout and mask values follow the platform's binary configuration
//! struct; enumerated axes share bytes and are isolated with the `MASK_*`
//! constants. An all-zero region within a mask means the axis is
//! unspecified.

/// Device-selection criteria attached to one resource variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConfigDescriptor {
    pub mcc: u16,
    pub mnc: u16,
    /// Two-byte cell, base-31 packed for three-letter codes.
    pub language: [u8; 2],
    /// Two-byte cell, base-31 packed for three-digit codes.
    pub country: [u8; 2],
    pub orientation: u8,
    pub touchscreen: u8,
    pub density: u16,
    pub keyboard: u8,
    pub navigation: u8,
    /// Keys-hidden and nav-hidden axes.
    pub input_flags: u8,
    pub screen_width: u16,
    pub screen_height: u16,
    pub sdk_version: u16,
    /// Layout direction, screen size and screen long axes.
    pub screen_layout: u8,
    /// Screen roundness axis.
    pub screen_layout2: u8,
    /// Wide-color-gamut and HDR axes.
    pub color_mode: u8,
    pub ui_mode: u8,
    pub smallest_screen_width_dp: u16,
    pub screen_width_dp: u16,
    pub screen_height_dp: u16,
    pub locale_script: [u8; 4],
    pub locale_variant: [u8; 8],
}

impl ConfigDescriptor {
    pub const MASK_LAYOUTDIR: u8 = 0xc0;
    pub const LAYOUTDIR_LTR: u8 = 0x40;
    pub const LAYOUTDIR_RTL: u8 = 0x80;

    pub const MASK_SCREENSIZE: u8 = 0x0f;
    pub const SCREENSIZE_SMALL: u8 = 0x01;
    pub const SCREENSIZE_NORMAL: u8 = 0x02;
    pub const SCREENSIZE_LARGE: u8 = 0x03;
    pub const SCREENSIZE_XLARGE: u8 = 0x04;

    pub const MASK_SCREENLONG: u8 = 0x30;
    pub const SCREENLONG_YES: u8 = 0x20;
    pub const SCREENLONG_NO: u8 = 0x10;

    pub const MASK_SCREENROUND: u8 = 0x03;
    pub const SCREENROUND_YES: u8 = 0x02;
    pub const SCREENROUND_NO: u8 = 0x01;

    pub const MASK_WIDE_COLOR_GAMUT: u8 = 0x03;
    pub const WIDE_COLOR_GAMUT_YES: u8 = 0x02;
    pub const WIDE_COLOR_GAMUT_NO: u8 = 0x01;

    pub const MASK_HDR: u8 = 0x0c;
    pub const HDR_YES: u8 = 0x08;
    pub const HDR_NO: u8 = 0x04;

    pub const ORIENTATION_PORT: u8 = 0x01;
    pub const ORIENTATION_LAND: u8 = 0x02;
    pub const ORIENTATION_SQUARE: u8 = 0x03;

    pub const MASK_UI_MODE_TYPE: u8 = 0x0f;
    pub const UI_MODE_TYPE_NORMAL: u8 = 0x01;
    pub const UI_MODE_TYPE_DESK: u8 = 0x02;
    pub const UI_MODE_TYPE_CAR: u8 = 0x03;
    pub const UI_MODE_TYPE_TELEVISION: u8 = 0x04;
    pub const UI_MODE_TYPE_APPLIANCE: u8 = 0x05;
    pub const UI_MODE_TYPE_WATCH: u8 = 0x06;
    pub const UI_MODE_TYPE_VR_HEADSET: u8 = 0x07;

    pub const MASK_UI_MODE_NIGHT: u8 = 0x30;
    pub const UI_MODE_NIGHT_YES: u8 = 0x20;
    pub const UI_MODE_NIGHT_NO: u8 = 0x10;

    pub const TOUCHSCREEN_NOTOUCH: u8 = 0x01;
    pub const TOUCHSCREEN_STYLUS: u8 = 0x02;
    pub const TOUCHSCREEN_FINGER: u8 = 0x03;

    pub const MASK_KEYSHIDDEN: u8 = 0x03;
    pub const KEYSHIDDEN_NO: u8 = 0x01;
    pub const KEYSHIDDEN_YES: u8 = 0x02;
    pub const KEYSHIDDEN_SOFT: u8 = 0x03;

    pub const KEYBOARD_NOKEYS: u8 = 0x01;
    pub const KEYBOARD_QWERTY: u8 = 0x02;
    pub const KEYBOARD_TWELVEKEY: u8 = 0x03;

    pub const MASK_NAVHIDDEN: u8 = 0x0c;
    pub const NAVHIDDEN_NO: u8 = 0x04;
    pub const NAVHIDDEN_YES: u8 = 0x08;

    pub const NAVIGATION_NONAV: u8 = 0x01;
    pub const NAVIGATION_DPAD: u8 = 0x02;
    pub const NAVIGATION_TRACKBALL: u8 = 0x03;
    pub const NAVIGATION_WHEEL: u8 = 0x04;

    /// True when no selection criterion is set at all.
    pub fn is_default(&self) -> bool {
        *self == ConfigDescriptor::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_criteria() {
        let config = ConfigDescriptor::default();
        assert!(config.is_default());

        let mut night = config;
        night.ui_mode |= ConfigDescriptor::UI_MODE_NIGHT_YES;
        assert!(!night.is_default());
        assert_ne!(config, night);
    }
}
